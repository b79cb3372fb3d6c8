//! Runs one day's IPO check: fetch, filter, report, deliver.
use crate::core::filter::filter_with_threshold;
use crate::core::ipo::{CalendarProvider, QualifyingIpo};
use crate::core::mail::Mailer;
use crate::core::report::{Report, ReportFormatter};
use tracing::{error, info, warn};

/// Result of checking the calendar for a single date.
#[derive(Debug, Clone)]
pub struct DailyCheck {
    pub target_date: String,
    /// Number of calendar entries the provider returned.
    pub fetched: usize,
    pub qualifying: Vec<QualifyingIpo>,
    pub report: Report,
}

/// Fetches the calendar for `target_date` and builds the report.
///
/// A failed fetch is logged and treated as an empty calendar so the run
/// still produces the "no IPOs" report.
pub async fn check_date(
    calendar: &(dyn CalendarProvider + Send + Sync),
    target_date: &str,
    min_offer_amount: f64,
) -> DailyCheck {
    let records = match calendar.fetch_calendar(target_date, target_date).await {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Failed to fetch IPO calendar, continuing with no records");
            Vec::new()
        }
    };
    info!(target_date, count = records.len(), "Fetched IPO calendar");

    let qualifying = filter_with_threshold(&records, target_date, min_offer_amount);
    info!(count = qualifying.len(), min_offer_amount, "Filtered qualifying IPOs");

    let formatter = ReportFormatter::new(min_offer_amount);
    let report = if qualifying.is_empty() {
        formatter.build_empty_report(target_date)
    } else {
        formatter.build_report(&qualifying, target_date)
    };

    DailyCheck {
        target_date: target_date.to_string(),
        fetched: records.len(),
        qualifying,
        report,
    }
}

/// Mails the report. Returns whether the mail provider accepted it.
pub async fn deliver(mailer: &(dyn Mailer + Send + Sync), report: &Report) -> bool {
    let subject = report.subject();
    match mailer.send(&subject, &report.to_html()).await {
        Ok(()) => {
            info!(subject = %subject, "Report delivered");
            true
        }
        Err(e) => {
            error!(error = %e, subject = %subject, "Failed to deliver report");
            false
        }
    }
}
