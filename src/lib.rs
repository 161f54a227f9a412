pub mod config;
pub mod error;
pub mod invoice;
pub mod logging;
pub mod pdf;

pub use config::{
    Company, Config, Customer, FieldValue, InvoiceSettings, LineItem, Order, OrderStatus,
};
pub use error::{InvoiceError, Result, ValidationError};
pub use invoice::{generate_invoice, DrawInstruction, InvoiceFormatter, Money};
pub use pdf::{DocumentRenderer, TextRenderer, TypstRenderer};
