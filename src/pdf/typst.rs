use serde::Serialize;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::config::PdfSettings;
use crate::error::{InvoiceError, Result};
use crate::invoice::DrawInstruction;
use crate::pdf::DocumentRenderer;

/// Embedded Typst template that replays draw instructions
/// Uses a placeholder that gets replaced with the actual JSON file path
const LAYOUT_TEMPLATE: &str = r##"// Invoice Layout Template
// Instructions are loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(
  paper: data.paper,
  margin: (x: 1.5cm, y: 1.5cm),
)

#set text(size: 10pt)
#set text(font: data.font) if data.font != none

// Consecutive table rows should read as one grid
#show table: set block(spacing: 0pt)

#let to-align(a) = if a == "center" { center } else if a == "right" { right } else { left }

#for ins in data.instructions {
  if ins.kind == "text" {
    align(to-align(ins.align), text(
      size: ins.style.size_pt * 1pt,
      weight: if ins.style.bold { "bold" } else { "regular" },
      style: if ins.style.italic { "italic" } else { "normal" },
      ins.content,
    ))
  } else if ins.kind == "spacer" {
    v(ins.height_pt * 1pt)
  } else if ins.kind == "table_row" {
    table(
      columns: ins.widths.map(w => w * 1fr),
      stroke: if ins.bordered { 0.5pt + black } else { none },
      align: (x, y) => to-align(ins.align.at(x)),
      inset: 6pt,
      ..ins.cells.map(c => if ins.bold { strong(c) } else { c }),
    )
  }
}
"##;

#[derive(Serialize)]
struct LayoutData<'a> {
    paper: &'a str,
    font: Option<&'a str>,
    instructions: &'a [DrawInstruction],
}

/// Renders through the Typst CLI.
#[derive(Debug, Clone)]
pub struct TypstRenderer {
    binary: String,
    paper: String,
    font: Option<String>,
}

impl TypstRenderer {
    pub fn new(settings: &PdfSettings) -> Self {
        Self {
            binary: settings.typst.clone(),
            paper: settings.paper.clone(),
            font: settings.font.clone(),
        }
    }

    /// Check if typst is available
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary).arg("--version").output().is_ok()
    }

    /// JSON payload read by the embedded template.
    pub fn layout_json(&self, instructions: &[DrawInstruction]) -> Result<String> {
        let data = LayoutData {
            paper: &self.paper,
            font: self.font.as_deref(),
            instructions,
        };
        serde_json::to_string(&data).map_err(|e| InvoiceError::PdfGeneration(e.to_string()))
    }
}

impl DocumentRenderer for TypstRenderer {
    fn render(&self, instructions: &[DrawInstruction], output_path: &Path) -> Result<()> {
        if !self.is_available() {
            return Err(InvoiceError::TypstNotFound);
        }

        // One directory per call; concurrent renders never share files.
        // Dropping it removes the directory on every exit path.
        let temp_dir = tempfile::Builder::new()
            .prefix("invoice-layout-")
            .tempdir()?;

        let json_path = temp_dir.path().join("layout.json");
        std::fs::write(&json_path, self.layout_json(instructions)?)?;

        // Template reads layout.json relative to itself, both live under --root
        let template_path = temp_dir.path().join("invoice.typ");
        std::fs::write(
            &template_path,
            LAYOUT_TEMPLATE.replace("DATA_JSON_PATH", "layout.json"),
        )?;

        debug!(
            binary = %self.binary,
            template = %template_path.display(),
            output = %output_path.display(),
            "running typst compile"
        );
        let output = Command::new(&self.binary)
            .arg("compile")
            .arg("--root")
            .arg(temp_dir.path())
            .arg(&template_path)
            .arg(output_path)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InvoiceError::PdfGeneration(stderr.to_string()));
        }

        Ok(())
    }
}
