use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::database::ApproachId;
use crate::error::Result;
use crate::model::RawRecord;
use crate::model::normalize::{HAZARD_CODE, bool_from_code, float_or_nan, string_or_null};
use crate::model::schema::NEO_SCHEMA;

/// A near-Earth object from the NEO catalog.
///
/// The designation is the identity key and cannot change after construction.
/// Close approaches are attached later by
/// [`NeoDatabase`](crate::database::NeoDatabase) as index handles.
#[derive(Debug, Clone, PartialEq)]
pub struct NearEarthObject {
    designation: String,
    /// IAU name, when the object has one.
    pub name: Option<String>,
    /// Diameter in kilometers; `NaN` when unknown.
    pub diameter: f64,
    /// Whether the catalog flags the object as potentially hazardous.
    pub hazardous: bool,
    pub(crate) approaches: Vec<ApproachId>,
}

/// Export-facing form of a [`NearEarthObject`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializedNeo {
    pub designation: String,
    pub name: Option<String>,
    /// `NaN` when unknown; writers decide how to spell it.
    pub diameter_km: f64,
    pub potentially_hazardous: bool,
}

impl NearEarthObject {
    /// Builds an object from a record keyed by constructor attributes
    /// (`designation`, `name`, `diameter`, `hazardous`).
    pub fn from_record(record: &RawRecord) -> Result<Self> {
        NEO_SCHEMA.trace_ignored(record);

        let designation = string_or_null(record.text("designation").as_deref());
        if designation.is_none() {
            warn!("near-Earth object record has no designation");
        }

        Ok(Self {
            designation: designation.unwrap_or_default(),
            name: string_or_null(record.text("name").as_deref()),
            diameter: float_or_nan("diameter", record.text("diameter").as_deref())?,
            hazardous: bool_from_code(record.text("hazardous").as_deref()),
            approaches: Vec::new(),
        })
    }

    /// Primary designation; empty when the catalog row had none.
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Handles of the linked close approaches, in input order.
    pub fn approaches(&self) -> &[ApproachId] {
        &self.approaches
    }

    /// Designation followed by the name, when there is one.
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} {}", self.designation, name),
            None => self.designation.clone(),
        }
    }

    /// Export-facing form with output key names.
    pub fn serialize(&self) -> SerializedNeo {
        SerializedNeo {
            designation: self.designation.clone(),
            name: self.name.clone(),
            diameter_km: self.diameter,
            potentially_hazardous: self.hazardous,
        }
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard = if self.hazardous { "is" } else { "is not" };
        if self.diameter.is_finite() {
            write!(
                f,
                "NEO {} has a diameter of {:.3} km and {} potentially hazardous.",
                self.fullname(),
                self.diameter,
                hazard
            )
        } else {
            write!(
                f,
                "NEO {} has an unknown diameter and {} potentially hazardous.",
                self.fullname(),
                hazard
            )
        }
    }
}

impl SerializedNeo {
    /// Re-keys the serialized form under the constructor's attribute names.
    ///
    /// A missing name and an unknown diameter are left out, and the hazard
    /// flag is written back as its source code, so that
    /// [`NearEarthObject::from_record`] rebuilds the same values.
    pub fn into_record(self) -> RawRecord {
        let mut record = RawRecord::new().with("designation", self.designation);
        if let Some(name) = self.name {
            record.insert("name", name);
        }
        if self.diameter_km.is_finite() {
            record.insert("diameter", self.diameter_km);
        }
        let code = if self.potentially_hazardous { HAZARD_CODE } else { "N" };
        record.insert("hazardous", code);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eros() -> RawRecord {
        RawRecord::new()
            .with("designation", "433")
            .with("name", "Eros")
            .with("diameter", "16.84")
            .with("hazardous", "N")
    }

    #[test]
    fn builds_from_catalog_values() {
        let neo = NearEarthObject::from_record(&eros()).expect("NEO built");
        assert_eq!(neo.designation(), "433");
        assert_eq!(neo.name.as_deref(), Some("Eros"));
        assert_eq!(neo.diameter, 16.84);
        assert!(!neo.hazardous);
        assert!(neo.approaches().is_empty());
        assert_eq!(neo.fullname(), "433 Eros");
    }

    #[test]
    fn missing_fields_fall_back_to_sentinels() {
        let record = RawRecord::new()
            .with("designation", "2020 AB")
            .with("name", "")
            .with("diameter", "");
        let neo = NearEarthObject::from_record(&record).expect("NEO built");
        assert_eq!(neo.name, None);
        assert!(neo.diameter.is_nan());
        assert!(!neo.hazardous);
        assert_eq!(neo.fullname(), "2020 AB");
        assert_eq!(
            neo.to_string(),
            "NEO 2020 AB has an unknown diameter and is not potentially hazardous."
        );
    }

    #[test]
    fn non_numeric_diameter_is_fatal() {
        let record = eros().with("diameter", "n/a");
        assert!(NearEarthObject::from_record(&record).is_err());
    }

    #[test]
    fn display_uses_three_decimals() {
        let neo = NearEarthObject::from_record(&eros().with("hazardous", "Y")).expect("NEO built");
        assert_eq!(
            neo.to_string(),
            "NEO 433 Eros has a diameter of 16.840 km and is potentially hazardous."
        );
    }
}
