//! `HH:MM:SS` time codec
//!
//! Source documents carry scene positions as `HH:MM:SS` strings. Parsing is
//! deliberately lenient about field ranges: `00:75:00` is accepted as 4500
//! seconds, because several upstream producers emit overflowing minute
//! fields and downstream averaging tolerates them. Anything that is not
//! three colon-separated digit runs is rejected.

use crate::{Error, Result};

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Parse an `HH:MM:SS` string into whole seconds.
///
/// # Examples
///
/// ```
/// use ffx_common::timecode::parse_hms;
///
/// assert_eq!(parse_hms("00:10:05").unwrap(), 605);
/// assert_eq!(parse_hms("01:00:00").unwrap(), 3600);
/// // Minutes/seconds are not range-checked
/// assert_eq!(parse_hms("00:75:00").unwrap(), 4500);
/// assert!(parse_hms("10:05").is_err());
/// ```
pub fn parse_hms(text: &str) -> Result<u64> {
    let mut fields = [0u64; 3];
    let mut count = 0;

    for part in text.split(':') {
        if count == 3 {
            return Err(Error::time_format(text, "expected exactly three fields"));
        }
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::time_format(
                text,
                format!("field '{}' is not a non-negative integer", part),
            ));
        }
        fields[count] = part
            .parse::<u64>()
            .map_err(|e| Error::time_format(text, e.to_string()))?;
        count += 1;
    }

    if count != 3 {
        return Err(Error::time_format(text, "expected exactly three fields"));
    }

    let [hours, minutes, seconds] = fields;
    hours
        .checked_mul(SECONDS_PER_HOUR)
        .and_then(|h| minutes.checked_mul(SECONDS_PER_MINUTE)?.checked_add(h))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| Error::time_format(text, "value out of range"))
}

/// Format whole seconds as `HH:MM:SS`.
///
/// Every field is padded to two digits; the hour field grows past two
/// digits rather than wrapping.
///
/// ```
/// use ffx_common::timecode::format_hms;
///
/// assert_eq!(format_hms(605), "00:10:05");
/// assert_eq!(format_hms(360_000), "100:00:00");
/// ```
pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Serde adapter storing seconds as `HH:MM:SS` on the wire.
///
/// Use with `#[serde(with = "ffx_common::timecode::serde_hms")]`.
pub mod serde_hms {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(seconds: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_hms(*seconds))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_hms(&text).map_err(de::Error::custom)
    }
}
