// Timestamp codec shared by every date field on the wire.
// The API sends local wall-clock times in the Europe/London zone as "yyyy-MM-dd HH:mm:ss".

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Europe::London;
use chrono_tz::Tz;
use thiserror::Error;

pub const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const WIRE_ZONE: Tz = London;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimestampError {
    #[error("invalid timestamp {raw:?}: expected yyyy-MM-dd HH:mm:ss")]
    InvalidFormat { raw: String },

    #[error("timestamp {raw:?} does not exist in Europe/London")]
    NonExistent { raw: String },
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let naive = NaiveDateTime::parse_from_str(raw, WIRE_FORMAT).map_err(|_| {
        TimestampError::InvalidFormat {
            raw: raw.to_string(),
        }
    })?;

    let local = match WIRE_ZONE.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        // Autumn fall-back: the hour repeats, take the first occurrence
        LocalResult::Ambiguous(earliest, _) => earliest,
        // Spring-forward gap: the clock skipped this hour, move past it
        LocalResult::None => WIRE_ZONE
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .ok_or_else(|| TimestampError::NonExistent {
                raw: raw.to_string(),
            })?,
    };

    Ok(local.with_timezone(&Utc))
}

pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.with_timezone(&WIRE_ZONE).format(WIRE_FORMAT).to_string()
}
