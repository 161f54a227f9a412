use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::invoice::Money;

/// An order as the order API hands it over.
///
/// Fields the formatter needs are loosely typed here (empty strings,
/// `None`, [`FieldValue::Malformed`]) so that a missing or bad value
/// surfaces as a validation error at format time rather than as a parse
/// error.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub items: Option<Vec<LineItem>>,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub total: FieldValue<Money>,
    #[serde(default, rename = "totalExclGST")]
    pub total_excl_gst: FieldValue<Money>,
    #[serde(default)]
    pub amount_due: FieldValue<Money>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub next_billing_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sale_price: Option<FieldValue<Money>>,
    #[serde(default)]
    pub quantity: Option<FieldValue<i64>>,
    #[serde(default)]
    pub gst_amount: Option<FieldValue<Money>>,
}

/// A record value that either parsed as `T` or is kept verbatim.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldValue<T> {
    Valid(T),
    Malformed(serde_json::Value),
}

impl<T> FieldValue<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            FieldValue::Valid(value) => Some(value),
            FieldValue::Malformed(_) => None,
        }
    }
}

impl<T: Default> Default for FieldValue<T> {
    fn default() -> Self {
        FieldValue::Valid(T::default())
    }
}

impl<T> From<T> for FieldValue<T> {
    fn from(value: T) -> Self {
        FieldValue::Valid(value)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        };
        f.write_str(s)
    }
}
