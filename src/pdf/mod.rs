mod text;
mod typst;

pub use text::TextRenderer;
pub use typst::TypstRenderer;

use std::path::Path;

use crate::error::Result;
use crate::invoice::DrawInstruction;

/// Turns a laid-out page into a file.
///
/// Instructions are consumed in the order given, top to bottom, on a
/// single page.
pub trait DocumentRenderer {
    fn render(&self, instructions: &[DrawInstruction], output_path: &Path) -> Result<()>;
}
