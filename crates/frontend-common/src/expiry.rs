//! Key expiry display

use crate::messages;
use chrono::{DateTime, Local, Locale, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::fmt::Write;

/// Long-form date, e.g. `1 Haziran 2025`
const LONG_DATE_FORMAT: &str = "%-d %B %Y";

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// How an expiry value ended up on screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpiryDisplay {
    /// Parsed and formatted
    Date(String),
    /// Does not parse as a calendar date, including out-of-range parts
    Invalid,
    /// Parsed but could not be formatted
    Unknown,
}

impl ExpiryDisplay {
    pub fn text(&self) -> &str {
        match self {
            Self::Date(text) => text,
            Self::Invalid => messages::EXPIRY_INVALID,
            Self::Unknown => messages::EXPIRY_UNKNOWN,
        }
    }
}

/// Format a backend expiry for display. Empty input yields `None`: the field is left as is.
pub fn format_expiry(raw: &str) -> Option<ExpiryDisplay> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let display = match parse_expiry(raw) {
        Some(date) => render(date).map_or(ExpiryDisplay::Unknown, ExpiryDisplay::Date),
        None => ExpiryDisplay::Invalid,
    };
    Some(display)
}

/// Calendar date of `raw`. Zoned timestamps land on the local calendar day; naive ones are
/// taken as written.
fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

fn render(date: NaiveDate) -> Option<String> {
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let mut out = String::new();
    write!(
        out,
        "{}",
        midnight.format_localized(LONG_DATE_FORMAT, Locale::tr_TR)
    )
    .ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn plain_date_is_long_turkish() {
        assert_eq!(
            format_expiry("2025-06-01"),
            Some(ExpiryDisplay::Date("1 Haziran 2025".to_string()))
        );
    }

    #[test]
    fn backend_timestamp_format() {
        assert_eq!(
            format_expiry("2025-01-15 08:30:00").unwrap().text(),
            "15 Ocak 2025"
        );
    }

    #[test]
    fn zoned_timestamp_uses_local_calendar_day() {
        let local_day = DateTime::parse_from_rfc3339("2025-12-31T23:00:00Z")
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        let expected = if local_day.day() == 1 {
            "1 Ocak 2026"
        } else {
            "31 Aralık 2025"
        };
        assert_eq!(format_expiry("2025-12-31T23:00:00Z").unwrap().text(), expected);
    }

    #[test]
    fn iso_variants() {
        assert_eq!(
            format_expiry("2025-08-09T10:11:12.345").unwrap().text(),
            "9 Ağustos 2025"
        );
    }

    #[test]
    fn non_dates_are_invalid() {
        assert_eq!(format_expiry("Sınırsız"), Some(ExpiryDisplay::Invalid));
        assert_eq!(
            format_expiry("next tuesday").unwrap().text(),
            "Tarih Bilgisi Geçersiz"
        );
    }

    #[test]
    fn out_of_range_dates_are_invalid() {
        assert_eq!(format_expiry("2025-13-45"), Some(ExpiryDisplay::Invalid));
        assert_eq!(
            format_expiry("2025-02-30").unwrap().text(),
            "Tarih Bilgisi Geçersiz"
        );
    }

    #[test]
    fn empty_leaves_field_alone() {
        assert_eq!(format_expiry(""), None);
        assert_eq!(format_expiry("   "), None);
    }
}
