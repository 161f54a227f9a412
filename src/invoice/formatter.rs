use chrono::{DateTime, FixedOffset};

use crate::config::{
    validate_date_format, Company, Customer, FieldValue, InvoiceSettings, LineItem, Order,
};
use crate::error::{Result, ValidationError};
use crate::invoice::instruction::{Align, DrawInstruction, TextStyle};
use crate::invoice::Money;

pub const TABLE_HEADERS: [&str; 5] = [
    "DESCRIPTION",
    "PRICE",
    "DISCOUNT",
    "TOTAL EXCL. GST",
    "GST AMOUNT",
];
pub const TABLE_WIDTHS: [f32; 5] = [60.0, 40.0, 40.0, 50.0, 40.0];

const HEADER_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const FOOTER_SIZE: f32 = 8.0;

/// A line item after validation, with its derived total.
#[derive(Debug)]
struct Line<'a> {
    name: &'a str,
    sale_price: Money,
    line_total: Money,
    gst_amount: Money,
}

/// Everything the layout reads from an order, checked.
#[derive(Debug)]
struct Checked<'a> {
    lines: Vec<Line<'a>>,
    total: Money,
    total_excl_gst: Money,
    amount_due: Money,
    created_at: DateTime<FixedOffset>,
}

/// Lays out an invoice as a sequence of draw instructions.
///
/// Holds only the static header and currency settings, so one formatter
/// can be shared across threads and reused for any number of orders.
#[derive(Debug, Clone)]
pub struct InvoiceFormatter {
    company: Company,
    settings: InvoiceSettings,
}

impl InvoiceFormatter {
    /// Fails with `InvalidConfig` when `settings.date_format` is not a
    /// usable strftime pattern.
    pub fn new(company: Company, settings: InvoiceSettings) -> Result<Self> {
        validate_date_format(&settings.date_format)?;
        Ok(Self { company, settings })
    }

    pub fn currency_symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Build the full page for `order` billed to `customer`.
    ///
    /// Validation happens before any instruction is produced; on error
    /// nothing is returned.
    pub fn format(
        &self,
        order: &Order,
        customer: &Customer,
    ) -> std::result::Result<Vec<DrawInstruction>, ValidationError> {
        let checked = validate(order, customer)?;

        let mut out = Vec::with_capacity(24 + checked.lines.len());

        self.push_header(&mut out);
        out.push(DrawInstruction::spacer(10.0));

        let body = TextStyle::regular(BODY_SIZE);
        let left = |content: String| DrawInstruction::text(content, body, Align::Left);

        out.push(left(format!("Invoice #: {}", order.id)));
        out.push(left(format!("Invoice Issued: {}", self.date(&checked.created_at))));
        out.push(left(format!("Invoice Amount: {}", self.money(checked.total))));
        let next_billing = order
            .next_billing_date
            .as_ref()
            .map(|d| self.date(d))
            .unwrap_or_else(|| "N/A".to_string());
        out.push(left(format!("Next Billing Date: {next_billing}")));
        out.push(DrawInstruction::spacer(5.0));

        out.push(DrawInstruction::text(
            "BILLED TO:",
            TextStyle::bold(BODY_SIZE),
            Align::Left,
        ));
        out.push(left(format!("Name: {}", customer.name)));
        out.push(left(format!("Email: {}", customer.email)));
        out.push(left(format!("Phone: {}", order.customer_phone)));
        out.push(left(format!("Shipping Address: {}", order.shipping_address)));
        out.push(DrawInstruction::spacer(10.0));

        out.push(DrawInstruction::TableRow {
            cells: TABLE_HEADERS.iter().map(|h| h.to_string()).collect(),
            widths: TABLE_WIDTHS.to_vec(),
            bordered: true,
            align: vec![Align::Center; TABLE_HEADERS.len()],
            bold: true,
        });
        for line in &checked.lines {
            out.push(self.item_row(line));
        }
        out.push(DrawInstruction::spacer(5.0));

        let right = |content: String| DrawInstruction::text(content, body, Align::Right);
        out.push(right(format!(
            "Total excl. GST: {}",
            self.money(checked.total_excl_gst)
        )));
        out.push(right(format!("Total incl. GST: {}", self.money(checked.total))));
        let due_label = match self.settings.currency_code.as_deref() {
            Some(code) if !code.is_empty() => format!("Amount Due ({code})"),
            _ => "Amount Due".to_string(),
        };
        out.push(right(format!("{due_label}: {}", self.money(checked.amount_due))));

        out.push(DrawInstruction::text(
            self.settings.footer.clone(),
            TextStyle::italic(FOOTER_SIZE),
            Align::Center,
        ));

        Ok(out)
    }

    fn push_header(&self, out: &mut Vec<DrawInstruction>) {
        let style = TextStyle::regular(HEADER_SIZE);
        out.push(DrawInstruction::text(
            self.company.name.clone(),
            style,
            Align::Center,
        ));
        for line in &self.company.address {
            out.push(DrawInstruction::text(line.clone(), style, Align::Center));
        }
        if let Some(tax_id) = self.company.tax_id.as_deref() {
            out.push(DrawInstruction::text(
                format!("{}: {tax_id}", self.company.tax_label),
                style,
                Align::Center,
            ));
        }
    }

    fn item_row(&self, line: &Line<'_>) -> DrawInstruction {
        DrawInstruction::TableRow {
            cells: vec![
                line.name.to_string(),
                self.money(line.sale_price),
                // no discount model; the column is always zero
                self.money(Money::ZERO),
                self.money(line.line_total),
                self.money(line.gst_amount),
            ],
            widths: TABLE_WIDTHS.to_vec(),
            bordered: true,
            align: vec![
                Align::Left,
                Align::Right,
                Align::Right,
                Align::Right,
                Align::Right,
            ],
            bold: false,
        }
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with(&self.settings.currency_symbol)
    }

    // date_format was checked in `new`, so this cannot hit chrono's panic
    fn date(&self, date: &DateTime<FixedOffset>) -> String {
        date.format(&self.settings.date_format).to_string()
    }
}

type Checks<T> = std::result::Result<T, ValidationError>;

fn validate<'a>(order: &'a Order, customer: &Customer) -> Checks<Checked<'a>> {
    require("order", "id", &order.id)?;
    require("order", "customerPhone", &order.customer_phone)?;
    require("order", "shippingAddress", &order.shipping_address)?;
    require("customer", "name", &customer.name)?;
    require("customer", "email", &customer.email)?;

    let total = amount("total", &order.total)?;
    let total_excl_gst = amount("totalExclGST", &order.total_excl_gst)?;
    let amount_due = amount("amountDue", &order.amount_due)?;

    let items = order.items.as_ref().ok_or(ValidationError::MissingItems)?;
    let lines = items
        .iter()
        .enumerate()
        .map(|(i, item)| validate_item(i + 1, item))
        .collect::<Checks<Vec<_>>>()?;

    let created_at = order.created_at.ok_or(ValidationError::MissingField {
        record: "order",
        field: "createdAt",
    })?;

    Ok(Checked {
        lines,
        total,
        total_excl_gst,
        amount_due,
        created_at,
    })
}

fn validate_item(index: usize, item: &LineItem) -> Checks<Line<'_>> {
    if item.name.trim().is_empty() {
        return Err(ValidationError::MissingItemField {
            index,
            field: "name",
        });
    }
    let sale_price = item
        .sale_price
        .as_ref()
        .ok_or(ValidationError::MissingItemField {
            index,
            field: "salePrice",
        })?;
    let sale_price = amount(&format!("items[{index}].salePrice"), sale_price)?;

    let quantity = match item.quantity.as_ref() {
        None => {
            return Err(ValidationError::MissingItemField {
                index,
                field: "quantity",
            })
        }
        Some(FieldValue::Malformed(value)) => {
            return Err(malformed(&format!("items[{index}].quantity"), value))
        }
        Some(FieldValue::Valid(quantity)) => *quantity,
    };
    if quantity < 1 {
        return Err(ValidationError::InvalidQuantity { index, quantity });
    }

    let gst_amount = match item.gst_amount.as_ref() {
        Some(gst) => amount(&format!("items[{index}].gstAmount"), gst)?,
        None => Money::ZERO,
    };

    let line_total = sale_price
        .checked_mul(quantity)
        .ok_or(ValidationError::AmountOverflow { index })?;

    Ok(Line {
        name: &item.name,
        sale_price,
        line_total,
        gst_amount,
    })
}

fn require(record: &'static str, field: &'static str, value: &str) -> Checks<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { record, field });
    }
    Ok(())
}

/// A well-formed, non-negative amount.
fn amount(field: &str, value: &FieldValue<Money>) -> Checks<Money> {
    match value {
        FieldValue::Valid(amount) if amount.is_negative() => {
            Err(ValidationError::NegativeAmount {
                field: field.to_string(),
            })
        }
        FieldValue::Valid(amount) => Ok(*amount),
        FieldValue::Malformed(value) => Err(malformed(field, value)),
    }
}

fn malformed(field: &str, value: &serde_json::Value) -> ValidationError {
    ValidationError::MalformedValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}
