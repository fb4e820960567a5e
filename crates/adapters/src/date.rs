//! Vendor date normalization — reformats vendor-specific timestamps into
//! ISO-8601 instants with millisecond precision.

use chrono::{NaiveDateTime, SecondsFormat};
use thiserror::Error;

/// A fixed source pattern for vendor timestamps, interpreted in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pattern: &'static str,
}

impl DateFormat {
    /// `chrono` strftime pattern, e.g. `%Y-%m-%d %H:%M:%S`.
    pub const fn new(pattern: &'static str) -> Self {
        Self { pattern }
    }
}

/// `yyyy-MM-dd HH:mm:ss`, as sent by Marketo webhooks.
pub const MARKETO_DATE_FORMAT: DateFormat = DateFormat::new("%Y-%m-%d %H:%M:%S");

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{value}] does not match {pattern}: {reason}")]
pub struct DateParseError {
    pub value: String,
    pub pattern: &'static str,
    pub reason: String,
}

/// Normalize `raw` into `yyyy-MM-ddTHH:mm:ss.sssZ`.
///
/// An empty string means "no value" and is returned unchanged.
pub fn normalize(raw: &str, format: &DateFormat) -> Result<String, DateParseError> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    let parsed = NaiveDateTime::parse_from_str(raw, format.pattern).map_err(|e| DateParseError {
        value: raw.to_string(),
        pattern: format.pattern,
        reason: e.to_string(),
    })?;

    Ok(parsed
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}
