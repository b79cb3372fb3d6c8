use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Offset used when none is configured (UTC+4).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 4;

/// Returns today's date at the given UTC offset as `YYYY-MM-DD`.
pub fn today(utc_offset_hours: i32) -> Result<String> {
    date_at(Utc::now(), utc_offset_hours)
}

/// Formats `now` as the calendar date observed at the given UTC offset.
pub fn date_at(now: DateTime<Utc>, utc_offset_hours: i32) -> Result<String> {
    let offset = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| anyhow!("Invalid UTC offset: {} hours", utc_offset_hours))?;
    Ok(now.with_timezone(&offset).format(DATE_FORMAT).to_string())
}

/// Checks that a user supplied date is a valid `YYYY-MM-DD` date.
pub fn parse_target_date(date: &str) -> Result<String> {
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| anyhow!("Invalid date '{}': {}", date, e))?;
    Ok(parsed.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_rolls_over_at_offset_midnight() {
        let before = Utc.with_ymd_and_hms(2024, 4, 30, 19, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 4, 30, 20, 0, 0).unwrap();

        assert_eq!(date_at(before, 4).unwrap(), "2024-04-30");
        assert_eq!(date_at(after, 4).unwrap(), "2024-05-01");
        assert_eq!(date_at(after, 0).unwrap(), "2024-04-30");
    }

    #[test]
    fn test_negative_offset() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap();
        assert_eq!(date_at(now, -5).unwrap(), "2024-04-30");
    }

    #[test]
    fn test_invalid_offset() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap();
        assert!(date_at(now, 24).is_err());
        assert!(date_at(now, -24).is_err());
    }

    #[test]
    fn test_huge_offset_is_an_error() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap();
        assert!(date_at(now, 1_000_000).is_err());
        assert!(date_at(now, i32::MIN).is_err());
    }

    #[test]
    fn test_today_is_formatted() {
        let date = today(DEFAULT_UTC_OFFSET_HOURS).unwrap();
        assert!(parse_target_date(&date).is_ok());
        assert_eq!(date.len(), 10);
    }

    #[test]
    fn test_parse_target_date() {
        assert_eq!(parse_target_date("2024-05-01").unwrap(), "2024-05-01");
        assert!(parse_target_date("05/01/2024").is_err());
        assert!(parse_target_date("2024-02-30").is_err());
    }
}
