use std::fs::File;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::database::LinkedApproach;
use crate::error::Result;

/// Column order of the exported CSV file.
pub const FIELDNAMES: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

/// Token written for a diameter that is not a finite number.
pub const UNKNOWN_DIAMETER: &str = "nan";

#[derive(Debug, Serialize)]
struct CsvRow {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    designation: String,
    name: String,
    diameter_km: String,
    potentially_hazardous: &'static str,
}

impl CsvRow {
    fn from_linked(linked: &LinkedApproach<'_>) -> Result<Self> {
        let approach = linked.approach.serialize()?;
        let neo = linked.neo.serialize();
        Ok(Self {
            datetime_utc: approach.datetime_utc,
            distance_au: approach.distance_au,
            velocity_km_s: approach.velocity_km_s,
            designation: neo.designation,
            name: neo.name.unwrap_or_default(),
            diameter_km: format_diameter(neo.diameter_km),
            potentially_hazardous: format_hazard(neo.potentially_hazardous),
        })
    }
}

/// Formats a diameter cell. Non-finite values become [`UNKNOWN_DIAMETER`];
/// `NaN` never compares equal to itself, so this must not be an equality test.
pub fn format_diameter(diameter_km: f64) -> String {
    if diameter_km.is_finite() {
        format!("{diameter_km:?}")
    } else {
        UNKNOWN_DIAMETER.to_string()
    }
}

/// Formats the hazard cell as `True` or `False`.
pub fn format_hazard(hazardous: bool) -> &'static str {
    if hazardous { "True" } else { "False" }
}

/// Writes one row per close approach, joined with its object's fields.
///
/// The header is always written, even for an empty result set. Returns the
/// number of data rows written.
pub fn write_to_csv<'a, I>(results: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(FIELDNAMES)?;

    let mut count = 0;
    for linked in results {
        writer.serialize(CsvRow::from_linked(&linked)?)?;
        count += 1;
    }
    writer.flush()?;

    debug!(path = %path.display(), row_count = count, "wrote CSV export");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_diameters_use_the_nan_token() {
        assert_eq!(format_diameter(f64::NAN), "nan");
        assert_eq!(format_diameter(f64::INFINITY), "nan");
        assert_eq!(format_diameter(16.84), "16.84");
        assert_eq!(format_diameter(1.0), "1.0");
    }

    #[test]
    fn hazard_flags_are_capitalized() {
        assert_eq!(format_hazard(true), "True");
        assert_eq!(format_hazard(false), "False");
    }

    #[test]
    fn equality_against_nan_never_matches() {
        let unknown = f64::NAN;
        #[allow(clippy::eq_op, invalid_nan_comparisons)]
        let equal_to_itself = unknown == f64::NAN;
        assert!(!equal_to_itself);
        assert!(!unknown.is_finite());
        assert_eq!(format_diameter(unknown), UNKNOWN_DIAMETER);
    }
}
