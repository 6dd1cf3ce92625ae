//! Loose date parsing for content item dates.
//!
//! Source datasets carry dates in whatever shape their upstream feeds
//! used: bare years, year-month, ISO dates, slashed dates, or prose.
//! Date-range filters only need a comparable day, so everything
//! normalizes to a [`NaiveDate`] and anything unrecognizable is simply
//! "no date" rather than an error.

use chrono::NaiveDate;

/// Full-date formats tried in order after the partial-date forms.
const FULL_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

/// Parses a loosely formatted date string.
///
/// Accepts `YYYY` (normalized to January 1), `YYYY-MM` (normalized to
/// the first of the month), `YYYY-MM-DD`, and a few common fallbacks
/// including slashed dates, `Month DD, YYYY` prose, and RFC 3339
/// timestamps (the date part is used). Returns `None` for anything
/// else, including empty input and out-of-range components.
pub fn parse_loose_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Bare year: normalize to January 1 so year-only dates fall inside
    // any range that covers that year.
    if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = trimmed.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    // Year-month: normalize to the first of the month.
    if let Some((year_part, month_part)) = trimmed.split_once('-')
        && year_part.len() == 4
        && year_part.bytes().all(|b| b.is_ascii_digit())
        && (1..=2).contains(&month_part.len())
        && month_part.bytes().all(|b| b.is_ascii_digit())
    {
        let year: i32 = year_part.parse().ok()?;
        let month: u32 = month_part.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    // Timestamps: keep only the date part.
    let candidate = match trimmed.split_once('T') {
        Some((date_part, _)) if date_part.len() == 10 => date_part,
        _ => trimmed,
    };

    for format in FULL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(candidate, format) {
            return Some(date);
        }
    }

    None
}
