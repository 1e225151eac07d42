//! Request field validation shared by the handlers.
//!
//! Request bodies deserialize into `Option` fields so a missing value can be
//! reported with the field name instead of a bare serde message.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::domain::Error;

/// `details.code` for an absent field.
pub(crate) const MISSING_FIELD: &str = "missing_field";
/// `details.code` for a value that does not parse.
pub(crate) const INVALID_VALUE: &str = "invalid_value";

/// `400` naming the absent field.
pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("missing required field: {field}"))
        .with_details(json!({ "field": field, "code": MISSING_FIELD }))
}

/// `400` naming the field and the rejected value.
pub(crate) fn invalid_field_error(field: &'static str, value: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message)
        .with_details(json!({ "field": field, "value": value, "code": INVALID_VALUE }))
}

/// Unwrap a required field.
pub(crate) fn required<T>(value: Option<T>, field: &'static str) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a snake_case label such as a status or condition.
pub(crate) fn parse_label<T: FromStr>(raw: &str, field: &'static str) -> Result<T, Error>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err: T::Err| invalid_field_error(field, raw, err.to_string()))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| invalid_field_error(field, raw, format!("{field} must be a YYYY-MM-DD date")))
}

/// Parse an RFC 3339 instant, or a bare date taken as midnight UTC.
pub(crate) fn parse_instant(raw: &str, field: &'static str) -> Result<DateTime<Utc>, Error> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    parse_date(trimmed, field)
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|_| {
            invalid_field_error(
                field,
                raw,
                format!("{field} must be an RFC 3339 timestamp or YYYY-MM-DD date"),
            )
        })
}
