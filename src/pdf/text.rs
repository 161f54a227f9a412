use std::path::Path;
use tabled::builder::Builder;
use tabled::settings::object::Cell;
use tabled::settings::{Alignment, Style};

use crate::error::Result;
use crate::invoice::{Align, DrawInstruction};
use crate::pdf::DocumentRenderer;

/// Renders a page as monospaced text, for terminals and `.txt` files.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { width: 80 }
    }
}

impl TextRenderer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn render_to_string(&self, instructions: &[DrawInstruction]) -> String {
        let mut out = String::new();
        let mut rows: Vec<(&[String], &[Align])> = Vec::new();

        for ins in instructions {
            if let DrawInstruction::TableRow { cells, align, .. } = ins {
                rows.push((cells.as_slice(), align.as_slice()));
                continue;
            }
            self.flush_table(&mut rows, &mut out);

            match ins {
                DrawInstruction::Text { content, align, .. } => {
                    out.push_str(&self.align_line(content, *align));
                    out.push('\n');
                }
                DrawInstruction::Spacer { height_pt } => {
                    let blank = ((height_pt / 10.0).round() as usize).max(1);
                    out.push_str(&"\n".repeat(blank));
                }
                DrawInstruction::TableRow { .. } => {}
            }
        }
        self.flush_table(&mut rows, &mut out);

        out
    }

    fn align_line(&self, content: &str, align: Align) -> String {
        let width = self.width;
        let line = match align {
            Align::Left => content.to_string(),
            Align::Center => format!("{content:^width$}"),
            Align::Right => format!("{content:>width$}"),
        };
        line.trim_end().to_string()
    }

    /// Emit buffered table rows as one grid.
    fn flush_table(&self, rows: &mut Vec<(&[String], &[Align])>, out: &mut String) {
        if rows.is_empty() {
            return;
        }

        let mut builder = Builder::default();
        for (cells, _) in rows.iter() {
            builder.push_record(cells.iter().cloned());
        }
        let mut table = builder.build();
        table.with(Style::rounded());

        for (row, (_, align)) in rows.iter().enumerate() {
            for (col, a) in align.iter().enumerate() {
                let alignment = match a {
                    Align::Left => Alignment::left(),
                    Align::Center => Alignment::center(),
                    Align::Right => Alignment::right(),
                };
                table.modify(Cell::new(row, col), alignment);
            }
        }

        out.push_str(&table.to_string());
        out.push('\n');
        rows.clear();
    }
}

impl DocumentRenderer for TextRenderer {
    fn render(&self, instructions: &[DrawInstruction], output_path: &Path) -> Result<()> {
        std::fs::write(output_path, self.render_to_string(instructions))?;
        Ok(())
    }
}
