//! Parses the `--after` / `since` filter (§4.7): RFC 3339, or one of the
//! symbolic values `today`, `yesterday`, `this-week`, `last-week`,
//! `this-month`, `last-month`, all resolved against UTC midnight.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::IngestError;

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Monday 00:00:00 UTC of the ISO week containing `date`.
fn start_of_iso_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// # Errors
/// Returns `IngestError::Configuration` if `raw` is neither a recognized
/// symbolic value nor a parseable RFC 3339 timestamp.
pub fn parse_since(raw: &str) -> Result<DateTime<Utc>, IngestError> {
    let today = Utc::now().date_naive();

    match raw {
        "today" => Ok(midnight_utc(today)),
        "yesterday" => Ok(midnight_utc(today - Duration::days(1))),
        "this-week" => Ok(midnight_utc(start_of_iso_week(today))),
        "last-week" => Ok(midnight_utc(start_of_iso_week(today) - Duration::days(7))),
        "this-month" => Ok(midnight_utc(
            NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
                .ok_or_else(|| IngestError::Configuration("invalid current month".to_string()))?,
        )),
        "last-month" => {
            let (year, month) = if today.month() == 1 { (today.year() - 1, 12) } else { (today.year(), today.month() - 1) };
            let first = NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or_else(|| IngestError::Configuration("invalid previous month".to_string()))?;
            Ok(midnight_utc(first))
        }
        other => DateTime::parse_from_rfc3339(other)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| IngestError::Configuration(format!("invalid --after value '{other}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::parse_since;

    #[test]
    fn today_is_utc_midnight() {
        let parsed = parse_since("today").unwrap();
        assert_eq!(parsed.time().hour(), 0);
        assert_eq!(parsed.time().minute(), 0);
    }

    #[test]
    fn this_week_lands_on_a_monday() {
        let parsed = parse_since("this-week").unwrap();
        assert_eq!(parsed.weekday().num_days_from_monday(), 0);
    }

    #[test]
    fn last_month_precedes_this_month() {
        let this_month = parse_since("this-month").unwrap();
        let last_month = parse_since("last-month").unwrap();
        assert!(last_month < this_month);
    }

    #[test]
    fn rfc3339_passes_through() {
        let parsed = parse_since("2024-03-01T00:00:00Z").unwrap();
        assert_eq!(parsed.year(), 2024);
    }

    #[test]
    fn unrecognized_value_is_a_configuration_error() {
        assert!(parse_since("not-a-date").is_err());
    }
}
