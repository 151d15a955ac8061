// 🏷️ Points Rules - Loyalty score for a receipt
// Seven independent additive rules; every rule is a pure function of the receipt

use crate::receipt::{parse_non_negative_amount, Receipt};
use crate::validation::{parse_purchase_date, parse_purchase_time};
use chrono::{Datelike, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use unicode_general_category::{get_general_category, GeneralCategory};

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// +1 per Unicode letter or number in the retailer name
    RetailerCharacters,
    /// +50 when the total has no cents
    RoundDollarTotal,
    /// +25 when the total is a multiple of 0.25
    QuarterMultiple,
    /// +5 for every two items
    ItemPairs,
    /// ceil(price * 0.2) per item whose trimmed description length is a multiple of 3
    DescriptionLength,
    /// +6 when the purchase day is odd
    OddPurchaseDay,
    /// +10 when purchased in [14:00, 16:00)
    AfternoonWindow,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::RetailerCharacters,
        Rule::RoundDollarTotal,
        Rule::QuarterMultiple,
        Rule::ItemPairs,
        Rule::DescriptionLength,
        Rule::OddPurchaseDay,
        Rule::AfternoonWindow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rule::RetailerCharacters => "retailer_characters",
            Rule::RoundDollarTotal => "round_dollar_total",
            Rule::QuarterMultiple => "quarter_multiple",
            Rule::ItemPairs => "item_pairs",
            Rule::DescriptionLength => "description_length",
            Rule::OddPurchaseDay => "odd_purchase_day",
            Rule::AfternoonWindow => "afternoon_window",
        }
    }

    /// Points this rule awards. Unparseable inputs award 0.
    pub fn points(&self, receipt: &Receipt) -> u64 {
        match self {
            Rule::RetailerCharacters => receipt
                .retailer
                .chars()
                .filter(|c| is_letter_or_number(*c))
                .count() as u64,

            Rule::RoundDollarTotal => match rounded_total(&receipt.total) {
                Some(total) if total.fract().is_zero() => 50,
                _ => 0,
            },

            Rule::QuarterMultiple => match rounded_total(&receipt.total) {
                Some(total) if is_quarter_multiple(total) => 25,
                _ => 0,
            },

            Rule::ItemPairs => (receipt.items.len() as u64 / 2).saturating_mul(5),

            Rule::DescriptionLength => receipt
                .items
                .iter()
                .filter(|item| item.short_description.trim().chars().count() % 3 == 0)
                .filter_map(|item| parse_non_negative_amount(&item.price))
                .filter_map(description_bonus)
                .fold(0u64, u64::saturating_add),

            Rule::OddPurchaseDay => match parse_purchase_date(&receipt.purchase_date) {
                Some(date) if date.day() % 2 == 1 => 6,
                _ => 0,
            },

            Rule::AfternoonWindow => match parse_purchase_time(&receipt.purchase_time) {
                Some(time) if in_afternoon_window(time) => 10,
                _ => 0,
            },
        }
    }
}

/// Unicode general category L* or N*
fn is_letter_or_number(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// Total rounded to whole cents, half away from zero
fn rounded_total(total: &str) -> Option<Decimal> {
    let amount = parse_non_negative_amount(total)?;
    Some(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

fn is_quarter_multiple(total: Decimal) -> bool {
    let cents = total.fract() * Decimal::ONE_HUNDRED;
    (cents % Decimal::from(25)).is_zero()
}

/// ceil(price * 0.2); prices are bounded by `MAX_AMOUNT` so this fits in u64
fn description_bonus(price: Decimal) -> Option<u64> {
    (price * Decimal::new(2, 1)).ceil().to_u64()
}

fn in_afternoon_window(time: NaiveTime) -> bool {
    let start = NaiveTime::from_hms_opt(14, 0, 0);
    let end = NaiveTime::from_hms_opt(16, 0, 0);
    match (start, end) {
        (Some(start), Some(end)) => time >= start && time < end,
        _ => false,
    }
}

// ============================================================================
// BREAKDOWN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleScore {
    pub rule: Rule,
    pub points: u64,
}

/// Per-rule contributions for one receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub scores: Vec<RuleScore>,
}

impl PointsBreakdown {
    pub fn total(&self) -> u64 {
        self.scores
            .iter()
            .map(|score| score.points)
            .fold(0, u64::saturating_add)
    }

    pub fn points_for(&self, rule: Rule) -> u64 {
        self.scores
            .iter()
            .find(|score| score.rule == rule)
            .map_or(0, |score| score.points)
    }

    pub fn summary(&self) -> String {
        let parts: Vec<String> = self
            .scores
            .iter()
            .filter(|score| score.points > 0)
            .map(|score| format!("{}={}", score.rule.name(), score.points))
            .collect();
        format!("{} points ({})", self.total(), parts.join(", "))
    }
}

pub fn breakdown(receipt: &Receipt) -> PointsBreakdown {
    PointsBreakdown {
        scores: Rule::ALL
            .iter()
            .map(|rule| RuleScore {
                rule: *rule,
                points: rule.points(receipt),
            })
            .collect(),
    }
}

/// Score a receipt. Callers validate first; malformed fields simply score 0.
pub fn calculate(receipt: &Receipt) -> u64 {
    breakdown(receipt).total()
}

// ============================================================================
// TESTS
// ============================================================================
