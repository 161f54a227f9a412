use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A currency amount held in minor units (hundredths).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Whole currency units, e.g. `Money::from_major(1000)` is 1000.00.
    #[cfg(test)]
    pub(crate) fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_mul(self, quantity: i64) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    /// Two-decimal rendering with a currency symbol prefix, e.g. `₹1000.00`.
    pub fn format_with(self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{sign}{symbol}{}.{:02}", abs / 100, abs % 100)
    }

    /// Parse a decimal string such as `"1000"`, `"12.5"` or `"-3.07"`.
    pub fn parse(input: &str) -> Result<Money, String> {
        let s = input.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(format!("'{input}' is not an amount"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(format!("'{input}' is not an amount"));
        }
        if frac.len() > 2 {
            return Err(format!("'{input}' has more than two decimal places"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| format!("'{input}' is out of range"))?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse().unwrap_or(0),
        };

        let minor = whole
            .checked_mul(100)
            .and_then(|m| m.checked_add(frac))
            .ok_or_else(|| format!("'{input}' is out of range"))?;

        Ok(Money(if negative { -minor } else { minor }))
    }

    fn from_f64(value: f64) -> Result<Money, String> {
        if !value.is_finite() {
            return Err(format!("{value} is not a finite amount"));
        }
        let minor = (value * 100.0).round();
        if minor.abs() > i64::MAX as f64 {
            return Err(format!("{value} is out of range"));
        }
        Ok(Money(minor as i64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(""))
    }
}

// Order APIs emit amounts as plain numbers; hand-edited files may quote them.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Int(major) => major
                .checked_mul(100)
                .map(Money)
                .ok_or_else(|| de::Error::custom(format!("{major} is out of range"))),
            RawAmount::Float(value) => Money::from_f64(value).map_err(de::Error::custom),
            RawAmount::Text(text) => Money::parse(&text).map_err(de::Error::custom),
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
