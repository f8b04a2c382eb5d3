use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::warn;

use crate::database::NeoId;
use crate::dates;
use crate::error::{NeoError, Result};
use crate::model::RawRecord;
use crate::model::normalize::{datetime_from_compact, float_or_zero, string_or_null};
use crate::model::schema::APPROACH_SCHEMA;

/// A single close approach of a near-Earth object to Earth.
///
/// The designation read from the source is kept only as the key the
/// [`NeoDatabase`](crate::database::NeoDatabase) joins on. Once linked, the
/// owning object is reached through [`CloseApproach::neo`].
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    designation: String,
    /// Time of closest approach (UTC), minute precision.
    pub time: Option<NaiveDateTime>,
    /// Nominal approach distance in astronomical units.
    pub distance: f64,
    /// Relative approach velocity in km/s.
    pub velocity: f64,
    pub(crate) neo: Option<NeoId>,
}

/// Export-facing form of a [`CloseApproach`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializedApproach {
    /// Approach time in display form, `YYYY-MM-DD HH:MM`.
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
}

impl CloseApproach {
    /// Builds an approach from a record keyed by constructor attributes
    /// (`designation`, `time`, `distance`, `velocity`).
    pub fn from_record(record: &RawRecord) -> Result<Self> {
        APPROACH_SCHEMA.trace_ignored(record);

        let designation = string_or_null(record.text("designation").as_deref());
        if designation.is_none() {
            warn!("close approach record has no designation");
        }

        Ok(Self {
            designation: designation.unwrap_or_default(),
            time: datetime_from_compact(record.text("time").as_deref())?,
            distance: float_or_zero("distance", record.text("distance").as_deref())?,
            velocity: float_or_zero("velocity", record.text("velocity").as_deref())?,
            neo: None,
        })
    }

    /// Designation of the owning object as read from the source. Only
    /// meaningful for linking.
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Handle of the owning object once linked.
    pub fn neo(&self) -> Option<NeoId> {
        self.neo
    }

    /// Approach time in the display layout. Fails when the record had no time.
    pub fn time_str(&self) -> Result<String> {
        self.time
            .as_ref()
            .map(dates::datetime_to_str)
            .ok_or_else(|| NeoError::MissingTime {
                designation: self.designation.clone(),
            })
    }

    /// Export-facing form. Fails when the approach has no time.
    pub fn serialize(&self) -> Result<SerializedApproach> {
        Ok(SerializedApproach {
            datetime_utc: self.time_str()?,
            distance_au: self.distance,
            velocity_km_s: self.velocity,
        })
    }
}

impl SerializedApproach {
    /// Re-keys the serialized form under the constructor's attribute names,
    /// converting the display time back to the compact layout.
    pub fn into_record(self, designation: &str) -> Result<RawRecord> {
        let time = dates::str_to_datetime(&self.datetime_utc)?;
        Ok(RawRecord::new()
            .with("designation", designation)
            .with("time", dates::datetime_to_cd(&time))
            .with("distance", self.distance_au)
            .with("velocity", self.velocity_km_s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_table_values() {
        let record = RawRecord::new()
            .with("designation", "433")
            .with("time", "1900-Jan-01 12:00")
            .with("distance", "0.15")
            .with("velocity", "5.5");
        let approach = CloseApproach::from_record(&record).expect("approach built");

        assert_eq!(approach.designation(), "433");
        assert_eq!(approach.distance, 0.15);
        assert_eq!(approach.velocity, 5.5);
        assert_eq!(approach.neo(), None);
        assert_eq!(approach.time_str().expect("time present"), "1900-01-01 12:00");
    }

    #[test]
    fn empty_measurements_default_to_zero() {
        let record = RawRecord::new()
            .with("designation", "433")
            .with("distance", "")
            .with("velocity", "");
        let approach = CloseApproach::from_record(&record).expect("approach built");

        assert_eq!(approach.distance, 0.0);
        assert_eq!(approach.velocity, 0.0);
        assert!(approach.distance.is_finite());
        assert_eq!(approach.time, None);
    }

    #[test]
    fn serializing_without_time_is_an_error() {
        let record = RawRecord::new().with("designation", "433");
        let approach = CloseApproach::from_record(&record).expect("approach built");

        assert!(matches!(
            approach.serialize(),
            Err(NeoError::MissingTime { .. })
        ));
    }
}
