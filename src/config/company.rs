use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub company: Company,
    pub invoice: InvoiceSettings,
    #[serde(default)]
    pub pdf: PdfSettings,
}

/// Static header block printed at the top of every invoice.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub address: Vec<String>,
    #[serde(default = "default_tax_label")]
    pub tax_label: String,
    #[serde(default)]
    pub tax_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InvoiceSettings {
    pub currency_symbol: String,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_footer")]
    pub footer: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PdfSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_paper")]
    pub paper: String,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default = "default_typst")]
    pub typst: String,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            currency_code: None,
            date_format: default_date_format(),
            footer: default_footer(),
        }
    }
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            paper: default_paper(),
            font: None,
            typst: default_typst(),
        }
    }
}

fn default_tax_label() -> String {
    "GST Reg #".to_string()
}

fn default_date_format() -> String {
    "%B %d, %Y".to_string()
}

fn default_footer() -> String {
    "Thank you for shopping with us!".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_paper() -> String {
    "a4".to_string()
}

fn default_typst() -> String {
    "typst".to_string()
}
