pub mod check;
pub mod preview;
pub mod setup;
pub mod ui;

use crate::core::date;
use crate::core::monitor::DailyCheck;
use crate::core::report::format_currency;
use anyhow::Result;

/// Uses the given `YYYY-MM-DD` date, or today at the configured offset.
pub fn resolve_target_date(requested: Option<&str>, utc_offset_hours: i32) -> Result<String> {
    match requested {
        Some(requested) => date::parse_target_date(requested),
        None => date::today(utc_offset_hours),
    }
}

fn print_check_summary(check: &DailyCheck, min_offer_amount: f64) {
    println!(
        "Checking IPOs for: {}",
        ui::style_text(&check.target_date, ui::StyleType::Title)
    );
    println!("Found {} IPO(s) in calendar", check.fetched);
    println!(
        "Qualifying IPOs (offer amount >= {}): {}",
        format_currency(min_offer_amount),
        check.qualifying.len()
    );
    if !check.qualifying.is_empty() {
        println!(
            "Qualifying tickers: {}",
            ui::style_text(&check.report.symbols().join(", "), ui::StyleType::Heading)
        );
    } else {
        println!("{}", ui::style_text("No qualifying IPOs", ui::StyleType::Subtle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_explicit_date() {
        assert_eq!(resolve_target_date(Some("2024-05-01"), 4).unwrap(), "2024-05-01");
        assert!(resolve_target_date(Some("yesterday"), 4).is_err());
    }

    #[test]
    fn test_resolve_today() {
        let date = resolve_target_date(None, 4).unwrap();
        assert!(date::parse_target_date(&date).is_ok());
    }
}
