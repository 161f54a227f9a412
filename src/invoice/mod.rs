mod formatter;
mod generator;
mod instruction;
mod money;

pub use formatter::{InvoiceFormatter, TABLE_HEADERS, TABLE_WIDTHS};
pub use generator::{default_output_path, generate_invoice};
pub use instruction::{Align, DrawInstruction, TextStyle};
pub use money::Money;
