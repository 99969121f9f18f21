//! Parsing and formatting of calendar dates.

use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::validation::ValidationError;

/// The `YYYY-MM-DD` format used for dates in JSON, SQL and CSV.
pub(crate) const ISO_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Parse a date sent by a client.
///
/// Accepts either a plain date (`2024-01-15`) or an RFC 3339 date-time
/// (`2024-01-15T09:30:00.000Z`), in which case the date in the given offset is used.
///
/// # Errors
/// Returns [ValidationError::InvalidDate] if `text` is in neither format.
pub(crate) fn parse_date(text: &str) -> Result<Date, ValidationError> {
    let text = text.trim();

    Date::parse(text, ISO_DATE)
        .or_else(|_| OffsetDateTime::parse(text, &Rfc3339).map(|date_time| date_time.date()))
        .map_err(|_| ValidationError::InvalidDate(text.to_owned()))
}

/// Format `date` as `YYYY-MM-DD`.
pub(crate) fn format_date(date: Date) -> String {
    // Fall back to the `Display` form, which uses the same layout.
    date.format(ISO_DATE).unwrap_or_else(|_| date.to_string())
}

/// Serde helpers for dates stored as `YYYY-MM-DD` strings.
pub(crate) mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::{ISO_DATE, format_date};

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        Date::parse(&text, ISO_DATE).map_err(serde::de::Error::custom)
    }
}
