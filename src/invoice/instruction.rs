use serde::Serialize;

/// Horizontal placement of text or a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub size_pt: f32,
}

impl TextStyle {
    pub fn regular(size_pt: f32) -> Self {
        Self {
            bold: false,
            italic: false,
            size_pt,
        }
    }

    pub fn bold(size_pt: f32) -> Self {
        Self {
            bold: true,
            ..Self::regular(size_pt)
        }
    }

    pub fn italic(size_pt: f32) -> Self {
        Self {
            italic: true,
            ..Self::regular(size_pt)
        }
    }
}

/// One element of a page, placed top to bottom in sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawInstruction {
    Text {
        content: String,
        style: TextStyle,
        align: Align,
    },
    /// `widths` are relative; the renderer scales them to the page.
    TableRow {
        cells: Vec<String>,
        widths: Vec<f32>,
        bordered: bool,
        align: Vec<Align>,
        bold: bool,
    },
    Spacer {
        height_pt: f32,
    },
}

impl DrawInstruction {
    pub fn text(content: impl Into<String>, style: TextStyle, align: Align) -> Self {
        DrawInstruction::Text {
            content: content.into(),
            style,
            align,
        }
    }

    pub fn spacer(height_pt: f32) -> Self {
        DrawInstruction::Spacer { height_pt }
    }

    /// Cells of a table row, `None` for other instructions.
    pub fn cells(&self) -> Option<&[String]> {
        match self {
            DrawInstruction::TableRow { cells, .. } => Some(cells),
            _ => None,
        }
    }

    /// Text content, `None` for other instructions.
    pub fn content(&self) -> Option<&str> {
        match self {
            DrawInstruction::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}
