use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Naive formats that are interpreted in the site's time zone.
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// An instant in time, normalized to UTC.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

/// Formats the timestamp as ISO-8601 in UTC with millisecond precision.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseTimestampError {
    #[error("unrecognized timestamp '{0}'")]
    Unrecognized(String),

    #[error("'{text}' does not exist in time zone {timezone}")]
    NonexistentLocalTime { text: String, timezone: Tz },
}

/// Parses a front matter timestamp.
///
/// Values that carry an offset are taken as-is. Values without one (including
/// plain dates, which resolve to midnight) are interpreted in `timezone`.
pub fn parse_timestamp(text: &str, timezone: Tz) -> Result<Timestamp, ParseTimestampError> {
    let text = text.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(Timestamp(datetime.with_timezone(&Utc)));
    }

    if let Ok(datetime) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f %:z") {
        return Ok(Timestamp(datetime.with_timezone(&Utc)));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return localize(naive, text, timezone);
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return localize(midnight, text, timezone);
    }

    Err(ParseTimestampError::Unrecognized(text.to_string()))
}

fn localize(
    naive: NaiveDateTime,
    text: &str,
    timezone: Tz,
) -> Result<Timestamp, ParseTimestampError> {
    timezone
        .from_local_datetime(&naive)
        .earliest()
        .map(|datetime| Timestamp(datetime.with_timezone(&Utc)))
        .ok_or_else(|| ParseTimestampError::NonexistentLocalTime {
            text: text.to_string(),
            timezone,
        })
}
