use std::path::PathBuf;
use thiserror::Error;

/// Problems with the order or customer data handed to the formatter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Order has no items list")]
    MissingItems,

    #[error("{record} is missing required field '{field}'")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("Item {index} is missing required field '{field}'")]
    MissingItemField { index: usize, field: &'static str },

    #[error("Item {index} has invalid quantity {quantity}: must be at least 1")]
    InvalidQuantity { index: usize, quantity: i64 },

    #[error("Field '{field}' has malformed value {value}")]
    MalformedValue { field: String, value: String },

    #[error("Amount '{field}' must not be negative")]
    NegativeAmount { field: String },

    #[error("Line total for item {index} is too large")]
    AmountOverflow { index: usize },
}

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Config directory not found at {0}. Run 'invoice-layout init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config value for '{key}': {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid invoice data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
