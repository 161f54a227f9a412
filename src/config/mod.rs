mod company;
mod customer;
mod order;

pub use company::{Company, Config, InvoiceSettings, PdfSettings};
pub use customer::Customer;
pub use order::{FieldValue, LineItem, Order, OrderStatus};

use crate::error::{InvoiceError, Result};
use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "invoice-layout") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.invoice-layout/
    let home = dirs_home().ok_or_else(|| {
        InvoiceError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".invoice-layout"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the configured output dir; relative paths hang off the config dir.
pub fn resolve_output_dir(output_dir: &str, config_dir: &Path) -> PathBuf {
    let path = expand_path(output_dir);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(InvoiceError::ConfigFileNotFound(path));
    }
    debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(&path)?;
    let config: Config =
        toml::from_str(&content).map_err(|e| InvoiceError::ConfigParse { path, source: e })?;
    validate_date_format(&config.invoice.date_format)?;
    Ok(config)
}

/// chrono panics while formatting with a malformed pattern, so reject it up front.
pub(crate) fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(InvoiceError::InvalidConfig {
            key: "invoice.date_format",
            reason: format!("'{format}' is not a valid strftime pattern"),
        });
    }
    Ok(())
}

/// Load an order record from a `.json` or `.toml` file
pub fn load_order(path: &Path) -> Result<Order> {
    load_record(path)
}

/// Load a customer record from a `.json` or `.toml` file
pub fn load_customer(path: &Path) -> Result<Customer> {
    load_record(path)
}

fn load_record<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(InvoiceError::ConfigFileNotFound(path.to_path_buf()));
    }
    debug!(path = %path.display(), "loading record");
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| InvoiceError::JsonParse {
            path: path.to_path_buf(),
            source: e,
        })
    } else {
        toml::from_str(&content).map_err(|e| InvoiceError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[company]
name = "Your Company Name"
address = [
  "123 Business Street",
  "San Francisco, CA 94102",
]
tax_label = "Tax ID"      # optional, default "GST Reg #"
# tax_id = "12-3456789"   # optional, the line is skipped when unset

[invoice]
currency_symbol = "$"
currency_code = "USD"            # optional, shown as "Amount Due (USD)"
date_format = "%B %d, %Y"        # chrono strftime pattern
footer = "Thank you for shopping with us!"

[pdf]
output_dir = "output"   # relative to this directory, or absolute / ~/...
paper = "a4"
# font = "DejaVu Sans"  # optional, any font Typst can find
typst = "typst"         # Typst CLI binary
"#;

/// Template content for order.toml
pub const ORDER_TEMPLATE: &str = r#"# A sample order. Field names follow the order API (camelCase);
# timestamps must be quoted RFC 3339 strings.

id = "ORD-0001"
customerPhone = "+1-555-123-4567"
shippingAddress = "456 Client Avenue, Los Angeles, CA 90001"
total = 330.00
totalExclGST = 300.00
amountDue = 330.00
createdAt = "2026-01-15T10:00:00+00:00"
nextBillingDate = "2026-02-15T10:00:00+00:00"
status = "processing"

[[items]]
name = "Technical Consulting"
salePrice = 150.00
quantity = 2
gstAmount = 30.00
"#;

/// Template content for customer.toml
pub const CUSTOMER_TEMPLATE: &str = r#"name = "Jane Smith"
email = "jane@example.com"
"#;
