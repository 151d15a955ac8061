// 🧾 Receipt Model - Wire format for submitted purchases
// Every scalar stays a string on the wire; parsing happens in validation/points

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// RECEIPT
// ============================================================================

/// A submitted purchase receipt
///
/// Missing fields deserialize as empty so the validator reports them as
/// empty fields instead of failing at the JSON layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(default)]
    pub retailer: String,

    /// Calendar date, `YYYY-MM-DD`
    #[serde(default)]
    pub purchase_date: String,

    /// 24-hour time of day, `HH:MM`
    #[serde(default)]
    pub purchase_time: String,

    #[serde(default)]
    pub items: Vec<Item>,

    /// Decimal amount as text, e.g. "35.35"
    #[serde(default)]
    pub total: String,
}

/// One line entry on a receipt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub short_description: String,

    #[serde(default)]
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Item {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

// ============================================================================
// AMOUNT PARSING
// ============================================================================

/// Parse a monetary amount written as a plain decimal string.
///
/// Accepts an optional sign, digits, and an optional fractional part
/// (`"12"`, `"12.5"`, `"12."`, `".5"`, `"+3.00"`). Surrounding whitespace,
/// exponents, and values too large for a 96-bit decimal are rejected.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'+' => (false, &text[1..]),
        b'-' => (true, &text[1..]),
        _ => (false, text),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let mut normalized = String::with_capacity(unsigned.len() + 2);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_part);
    }

    Decimal::from_str(&normalized).ok()
}

/// Largest accepted total or item price: one trillion
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Parse an amount and require it to be within `0..=MAX_AMOUNT`
pub fn parse_non_negative_amount(text: &str) -> Option<Decimal> {
    parse_amount(text)
        .filter(|amount| !amount.is_sign_negative() || amount.is_zero())
        .filter(|amount| *amount <= MAX_AMOUNT)
}

// ============================================================================
// TESTS
// ============================================================================
