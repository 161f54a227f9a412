use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{Customer, Order};
use crate::error::Result;
use crate::invoice::InvoiceFormatter;
use crate::pdf::DocumentRenderer;

/// Default file name for an order's invoice inside `output_dir`.
pub fn default_output_path(output_dir: &Path, order: &Order, extension: &str) -> PathBuf {
    let id: String = order
        .id
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    output_dir.join(format!("INVOICE-{id}.{extension}"))
}

/// Format `order` for `customer` and hand the layout to `renderer`.
///
/// Nothing is written when the order fails validation.
pub fn generate_invoice(
    formatter: &InvoiceFormatter,
    order: &Order,
    customer: &Customer,
    output_path: &Path,
    renderer: &dyn DocumentRenderer,
) -> Result<PathBuf> {
    let instructions = formatter.format(order, customer)?;
    debug!(
        order = %order.id,
        instructions = instructions.len(),
        "formatted invoice layout"
    );

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    renderer.render(&instructions, output_path)?;
    info!(order = %order.id, path = %output_path.display(), "invoice written");

    Ok(output_path.to_path_buf())
}
