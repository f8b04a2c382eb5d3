//! Conversions between the catalog's date strings and calendar timestamps.
//!
//! Close-approach tables encode times in a compact `1900-Jan-01 12:00` layout.
//! Everything shown to users or written to export files uses the numeric
//! `1900-01-01 12:00` layout instead. Neither carries seconds.

use chrono::NaiveDateTime;

use crate::error::{NeoError, Result};

/// Layout of the `cd` field in close-approach tables.
pub const COMPACT_FORMAT: &str = "%Y-%b-%d %H:%M";
/// Layout used for display and for the `datetime_utc` export column.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses a compact close-approach date such as `2020-Jan-01 12:30`.
pub fn cd_to_datetime(value: &str) -> Result<NaiveDateTime> {
    parse_with(value, COMPACT_FORMAT)
}

/// Renders a timestamp in the compact close-approach layout.
pub fn datetime_to_cd(value: &NaiveDateTime) -> String {
    value.format(COMPACT_FORMAT).to_string()
}

/// Renders a timestamp for display, truncated to minutes.
pub fn datetime_to_str(value: &NaiveDateTime) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

/// Parses a string previously produced by [`datetime_to_str`].
pub fn str_to_datetime(value: &str) -> Result<NaiveDateTime> {
    parse_with(value, DISPLAY_FORMAT)
}

fn parse_with(value: &str, format: &'static str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), format).map_err(|_| NeoError::InvalidDate {
        value: value.to_string(),
        format,
    })
}
