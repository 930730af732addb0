//! Date helper functions
//!
//! Record dates are display strings ("Nov 15, 2024") and are rendered as
//! written. They are only parsed where a machine-readable date is needed,
//! such as the Atom feed.

use chrono::{DateTime, NaiveDate, Utc};

const DISPLAY_FORMATS: &[&str] = &["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d"];

/// Parse a display date, if it is in one of the known formats
pub fn parse_display_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DISPLAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Midnight UTC of a display date, in RFC 3339
pub fn date_rfc3339(s: &str) -> Option<String> {
    let date = parse_display_date(s)?;
    let datetime: DateTime<Utc> = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some(datetime.to_rfc3339())
}

/// Current year for the footer
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}
