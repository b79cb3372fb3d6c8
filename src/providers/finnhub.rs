use crate::core::ipo::{CalendarProvider, RawIpoRecord};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::USER_AGENT;

const IPO_CALENDAR_PATH: &str = "/api/v1/calendar/ipo";

// FinnhubProvider implementation for CalendarProvider
pub struct FinnhubProvider {
    base_url: String,
    api_key: String,
}

impl FinnhubProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        FinnhubProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct IpoCalendarResponse {
    #[serde(rename = "ipoCalendar", default)]
    ipo_calendar: Option<Vec<Value>>,
}

/// Converts entries one at a time so a single unreadable entry is skipped
/// instead of failing the whole calendar.
fn parse_records(entries: Vec<Value>) -> Vec<RawIpoRecord> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable IPO calendar entry");
                None
            }
        })
        .collect()
}

#[async_trait]
impl CalendarProvider for FinnhubProvider {
    #[instrument(name = "FinnhubIpoCalendar", skip(self))]
    async fn fetch_calendar(&self, from: &str, to: &str) -> Result<Vec<RawIpoRecord>> {
        let endpoint = format!("{}{}", self.base_url, IPO_CALENDAR_PATH);
        let url = reqwest::Url::parse_with_params(
            &endpoint,
            &[("from", from), ("to", to), ("token", self.api_key.as_str())],
        )
        .with_context(|| format!("Invalid calendar URL: {endpoint}"))?;
        debug!("Requesting IPO calendar from {}", endpoint);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client
            .get(url)
            .send()
            .await
            // The URL carries the API token, keep it out of the message
            .map_err(|e| {
                anyhow!(
                    "Request error: {} for IPO calendar {}..{}",
                    e.without_url(),
                    from,
                    to
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("IPO calendar request failed with status {}", status));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to get IPO calendar response text: {}",
                    e.without_url()
                )
            })?;

        let data: IpoCalendarResponse = serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to parse IPO calendar response: '{response_text}'"))?;

        let records = parse_records(data.ipo_calendar.unwrap_or_default());
        debug!(records = records.len(), "Received IPO calendar");
        Ok(records)
    }
}
