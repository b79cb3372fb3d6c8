//! IPO calendar records and the calendar provider abstraction

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A numeric field as the calendar provider sends it.
///
/// Providers are loose about numeric types: the same field arrives as a JSON
/// number, a quoted number, a `"low-high"` range or something else entirely.
/// Anything that is neither a number nor a string lands in `Other` and is
/// treated as malformed by the offer calculation instead of failing the
/// whole calendar response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
    Other(Value),
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        NumericField::Number(value)
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        NumericField::Text(value.to_string())
    }
}

/// Reads a text field without failing on other JSON types. Numbers keep
/// their textual form; `null`, booleans, arrays and objects read as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Like [`lenient_text`], with an absent date read as empty so it never
/// matches a target date.
fn lenient_date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// One entry of the provider's IPO calendar.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIpoRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: String,
    pub price: Option<NumericField>,
    #[serde(rename = "numberOfShares")]
    pub number_of_shares: Option<NumericField>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub exchange: Option<String>,
}

/// An IPO scheduled for the target date whose offer meets the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifyingIpo {
    pub symbol: String,
    pub name: String,
    pub date: String,
    pub price: f64,
    pub shares: i64,
    pub offer_amount: f64,
    pub exchange: String,
}

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Fetches calendar entries between `from` and `to`, both inclusive.
    async fn fetch_calendar(&self, from: &str, to: &str) -> Result<Vec<RawIpoRecord>>;
}
