//! Field-level normalization rules.
//!
//! Each function takes the raw text of one field (`None` when the field is
//! absent or null) and applies a single missing-value policy. Diameter and
//! distance use different sentinels: an unknown diameter is `NaN`, a missing
//! distance or velocity is `0.0`.

use chrono::NaiveDateTime;

use crate::dates;
use crate::error::{NeoError, Result};

/// Code marking a potentially hazardous object.
pub const HAZARD_CODE: &str = "Y";

/// Trimmed text, or `None` when the field is empty or absent.
pub fn string_or_null(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Parsed float, or `NaN` when the field is empty or absent.
pub fn float_or_nan(field: &str, value: Option<&str>) -> Result<f64> {
    parse_float(field, value).map(|parsed| parsed.unwrap_or(f64::NAN))
}

/// Parsed float, or `0.0` when the field is empty or absent.
pub fn float_or_zero(field: &str, value: Option<&str>) -> Result<f64> {
    parse_float(field, value).map(|parsed| parsed.unwrap_or(0.0))
}

/// `true` only for the exact hazard code.
pub fn bool_from_code(value: Option<&str>) -> bool {
    value == Some(HAZARD_CODE)
}

/// Timestamp parsed from the compact close-approach layout, or `None` when
/// the field is empty or absent.
pub fn datetime_from_compact(value: Option<&str>) -> Result<Option<NaiveDateTime>> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(text) => dates::cd_to_datetime(text).map(Some),
        None => Ok(None),
    }
}

fn parse_float(field: &str, value: Option<&str>) -> Result<Option<f64>> {
    let Some(text) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| NeoError::InvalidNumber {
            field: field.to_string(),
            value: text.to_string(),
        })
}
