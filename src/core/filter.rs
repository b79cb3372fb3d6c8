use super::ipo::{QualifyingIpo, RawIpoRecord};
use super::offer::compute_offer;
use tracing::debug;

/// Minimum offer amount, in the provider's currency, for an IPO to qualify.
pub const MIN_OFFER_AMOUNT: f64 = 200_000_000.0;

const NOT_AVAILABLE: &str = "N/A";

/// Selects the records scheduled for `target_date` whose offer amount is at
/// least [`MIN_OFFER_AMOUNT`].
pub fn filter_qualifying_ipos(records: &[RawIpoRecord], target_date: &str) -> Vec<QualifyingIpo> {
    filter_with_threshold(records, target_date, MIN_OFFER_AMOUNT)
}

/// Same as [`filter_qualifying_ipos`] with an explicit threshold.
///
/// Dates are compared as plain strings. The threshold is inclusive and the
/// input order is preserved.
pub fn filter_with_threshold(
    records: &[RawIpoRecord],
    target_date: &str,
    min_offer_amount: f64,
) -> Vec<QualifyingIpo> {
    records
        .iter()
        .filter(|record| record.date == target_date)
        .filter_map(|record| {
            let offer = compute_offer(record.price.as_ref(), record.number_of_shares.as_ref());
            if offer.offer_amount < min_offer_amount {
                debug!(
                    symbol = record.symbol.as_deref().unwrap_or(NOT_AVAILABLE),
                    offer_amount = offer.offer_amount,
                    "Skipping IPO below threshold"
                );
                return None;
            }

            Some(QualifyingIpo {
                symbol: or_not_available(&record.symbol),
                name: or_not_available(&record.name),
                date: record.date.clone(),
                price: offer.price,
                shares: offer.shares,
                offer_amount: offer.offer_amount,
                exchange: or_not_available(&record.exchange),
            })
        })
        .collect()
}

fn or_not_available(value: &Option<String>) -> String {
    value.as_deref().unwrap_or(NOT_AVAILABLE).to_string()
}
