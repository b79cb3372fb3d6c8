//! Offer amount calculation from loosely typed calendar fields.
//!
//! Calendar data is not trusted: a field that cannot be read as a number
//! degrades to zero instead of producing an error, which keeps the record
//! below any positive threshold without aborting the batch.
//!
//! The zeroing rules:
//! - a missing or falsy field (`null`, `0`, `""`, `false`) counts as `0`;
//! - a price string containing `-` is a `low-high` range and resolves to its
//!   midpoint, or to `0` when it is not exactly two numeric tokens (shares are
//!   unaffected in that case);
//! - any other price that is not a number, or a share count that is not an
//!   integer, zeroes *both* price and shares.
//!
//! The last rule couples the two fields: a bad share count also wipes a valid
//! price. It is kept because it decides which records qualify.

use super::ipo::NumericField;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offer {
    pub price: f64,
    pub shares: i64,
    pub offer_amount: f64,
}

impl Offer {
    fn new(price: f64, shares: i64) -> Self {
        Offer {
            price,
            shares,
            offer_amount: price * shares as f64,
        }
    }

    fn zero() -> Self {
        Self::new(0.0, 0)
    }
}

/// Computes price, share count and offer amount (`price * shares`).
pub fn compute_offer(
    price_field: Option<&NumericField>,
    shares_field: Option<&NumericField>,
) -> Offer {
    let price = match price_field.filter(|f| !is_falsy(f)) {
        None => Some(0.0),
        Some(NumericField::Text(text)) if text.contains('-') => {
            Some(range_midpoint(text).unwrap_or(0.0))
        }
        Some(field) => coerce_price(field),
    };
    let shares = match shares_field.filter(|f| !is_falsy(f)) {
        None => Some(0),
        Some(field) => coerce_shares(field),
    };

    match (price, shares) {
        (Some(price), Some(shares)) => Offer::new(price, shares),
        _ => Offer::zero(),
    }
}

fn is_falsy(field: &NumericField) -> bool {
    match field {
        NumericField::Number(n) => *n == 0.0,
        NumericField::Text(s) => s.is_empty(),
        NumericField::Other(value) => match value {
            Value::Null | Value::Bool(false) => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        },
    }
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

fn range_midpoint(text: &str) -> Option<f64> {
    let mut tokens = text.split('-');
    let (Some(low), Some(high), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return None;
    };
    Some((parse_float(low)? + parse_float(high)?) / 2.0)
}

fn coerce_price(field: &NumericField) -> Option<f64> {
    match field {
        NumericField::Number(n) => Some(*n),
        NumericField::Text(text) => parse_float(text),
        NumericField::Other(_) => None,
    }
}

fn coerce_shares(field: &NumericField) -> Option<i64> {
    match field {
        NumericField::Number(n) if n.is_finite() => Some(n.trunc() as i64),
        NumericField::Number(_) => None,
        NumericField::Text(text) => text.trim().parse::<i64>().ok(),
        NumericField::Other(_) => None,
    }
}
