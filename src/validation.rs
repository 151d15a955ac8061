// 📐 Receipt Validation - Shape and format checks before scoring
// A receipt that fails here never reaches the points calculator or the store

use crate::receipt::{parse_non_negative_amount, Receipt};
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

// ============================================================================
// VALIDATION ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is missing or empty")]
    EmptyField { field: &'static str },

    #[error("receipt has no items")]
    NoItems,

    #[error("total is not a decimal amount between 0 and 1000000000000: {value:?}")]
    InvalidTotal { value: String },

    #[error("item {index} has an empty shortDescription")]
    EmptyItemDescription { index: usize },

    #[error("item {index} price is not a decimal amount between 0 and 1000000000000: {value:?}")]
    InvalidItemPrice { index: usize, value: String },

    #[error("purchaseDate must use YYYY-MM-DD: {value:?}")]
    InvalidDate { value: String },

    #[error("purchaseTime must use 24-hour HH:MM: {value:?}")]
    InvalidTime { value: String },
}

impl ValidationError {
    /// Stable name for the class of failure
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::EmptyField { .. } => "empty_field",
            ValidationError::NoItems => "no_items",
            ValidationError::InvalidTotal { .. } => "invalid_total",
            ValidationError::EmptyItemDescription { .. } => "empty_item_description",
            ValidationError::InvalidItemPrice { .. } => "invalid_item_price",
            ValidationError::InvalidDate { .. } => "invalid_date",
            ValidationError::InvalidTime { .. } => "invalid_time",
        }
    }
}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

// ============================================================================
// FORMAT PARSERS
// ============================================================================

/// Parse a purchase date in the exact `YYYY-MM-DD` layout
pub fn parse_purchase_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Parse a purchase time in the exact 24-hour `HH:MM` layout
pub fn parse_purchase_time(text: &str) -> Option<NaiveTime> {
    let bytes = text.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 2 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validate a receipt, collecting every violated rule
pub fn validate(receipt: &Receipt) -> ValidationResult {
    let mut errors = Vec::new();

    let required = [
        ("retailer", &receipt.retailer),
        ("purchaseDate", &receipt.purchase_date),
        ("purchaseTime", &receipt.purchase_time),
        ("total", &receipt.total),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyField { field });
        }
    }

    if receipt.items.is_empty() {
        errors.push(ValidationError::NoItems);
    }

    if !receipt.total.trim().is_empty()
        && parse_non_negative_amount(&receipt.total).is_none()
    {
        errors.push(ValidationError::InvalidTotal {
            value: receipt.total.clone(),
        });
    }

    for (index, item) in receipt.items.iter().enumerate() {
        if item.short_description.trim().is_empty() {
            errors.push(ValidationError::EmptyItemDescription { index });
        }
        if parse_non_negative_amount(&item.price).is_none() {
            errors.push(ValidationError::InvalidItemPrice {
                index,
                value: item.price.clone(),
            });
        }
    }

    if !receipt.purchase_date.trim().is_empty()
        && parse_purchase_date(&receipt.purchase_date).is_none()
    {
        errors.push(ValidationError::InvalidDate {
            value: receipt.purchase_date.clone(),
        });
    }

    if !receipt.purchase_time.trim().is_empty()
        && parse_purchase_time(&receipt.purchase_time).is_none()
    {
        errors.push(ValidationError::InvalidTime {
            value: receipt.purchase_time.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn is_valid(receipt: &Receipt) -> bool {
    validate(receipt).is_ok()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::Item;

    fn create_valid_receipt() -> Receipt {
        Receipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            items: vec![
                Item::new("Mountain Dew 12PK", "6.49"),
                Item::new("Emils Cheese Pizza", "12.25"),
            ],
            total: "18.74".to_string(),
        }
    }

    #[test]
    fn test_valid_receipt() {
        let receipt = create_valid_receipt();
        assert_eq!(validate(&receipt), Ok(()));
        assert!(is_valid(&receipt));
    }

    #[test]
    fn test_blank_retailer() {
        let mut receipt = create_valid_receipt();
        receipt.retailer = "   ".to_string();

        let errors = validate(&receipt).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyField { field: "retailer" }]);
    }

    #[test]
    fn test_empty_items() {
        let mut receipt = create_valid_receipt();
        receipt.items.clear();

        let errors = validate(&receipt).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoItems]);
        assert_eq!(errors[0].kind(), "no_items");
    }

    #[test]
    fn test_negative_total() {
        let mut receipt = create_valid_receipt();
        receipt.total = "-1.00".to_string();

        let errors = validate(&receipt).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), "invalid_total");
    }

    #[test]
    fn test_amounts_above_bound_rejected() {
        let mut receipt = create_valid_receipt();
        receipt.total = "1000000000000.00".to_string();
        receipt.items[0].price = "1000000000000.00".to_string();
        assert!(is_valid(&receipt));

        receipt.total = "79228162514264337593543950335".to_string();
        receipt.items[0].price = "1000000000000.01".to_string();
        let kinds: Vec<_> = validate(&receipt)
            .unwrap_err()
            .iter()
            .map(|e| e.kind())
            .collect();
        assert_eq!(kinds, vec!["invalid_total", "invalid_item_price"]);
    }

    #[test]
    fn test_bad_item_fields_report_index() {
        let mut receipt = create_valid_receipt();
        receipt.items[1] = Item::new(" ", "free");

        let errors = validate(&receipt).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyItemDescription { index: 1 },
                ValidationError::InvalidItemPrice {
                    index: 1,
                    value: "free".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let receipt = Receipt::default();
        let errors = validate(&receipt).unwrap_err();

        // four empty fields plus missing items
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_strict_date_format() {
        assert!(parse_purchase_date("2022-01-01").is_some());
        assert!(parse_purchase_date("2022-1-1").is_none());
        assert!(parse_purchase_date("01/01/2022").is_none());
        assert!(parse_purchase_date("2022-02-30").is_none());
        assert!(parse_purchase_date(" 2022-01-01").is_none());
    }

    #[test]
    fn test_strict_time_format() {
        assert!(parse_purchase_time("00:00").is_some());
        assert!(parse_purchase_time("23:59").is_some());
        assert!(parse_purchase_time("24:00").is_none());
        assert!(parse_purchase_time("2:05").is_none());
        assert!(parse_purchase_time("14:00:00").is_none());
        assert!(parse_purchase_time("2:05PM").is_none());
    }

    #[test]
    fn test_invalid_date_and_time_in_receipt() {
        let mut receipt = create_valid_receipt();
        receipt.purchase_date = "2022/01/01".to_string();
        receipt.purchase_time = "1:01 PM".to_string();

        let kinds: Vec<_> = validate(&receipt)
            .unwrap_err()
            .iter()
            .map(|e| e.kind())
            .collect();
        assert_eq!(kinds, vec!["invalid_date", "invalid_time"]);
    }
}
