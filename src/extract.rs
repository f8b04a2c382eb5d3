//! Loads the NEO catalog and the close-approach table into entities.
//!
//! Each raw record is re-keyed through its [`EntitySchema`] before
//! construction. A record that fails to construct aborts the load, and the
//! error names the record's position in the source.

use std::path::Path;

use tracing::{info, instrument};

use crate::error::Result;
use crate::io::{csv_read, json_read};
use crate::model::schema::{APPROACH_SCHEMA, EntitySchema, NEO_SCHEMA};
use crate::model::{CloseApproach, NearEarthObject, RawRecord};

/// Reads near-Earth objects from a CSV catalog.
#[instrument(level = "info", skip_all, fields(path = %neo_csv_path.display()))]
pub fn load_neos(neo_csv_path: &Path) -> Result<Vec<NearEarthObject>> {
    let records = csv_read::read_records(neo_csv_path)?;
    let neos = build_all(&NEO_SCHEMA, &records, NearEarthObject::from_record)?;
    info!(neo_count = neos.len(), "loaded near-Earth objects");
    Ok(neos)
}

/// Reads close approaches from a `fields`/`data` JSON table.
#[instrument(level = "info", skip_all, fields(path = %cad_json_path.display()))]
pub fn load_approaches(cad_json_path: &Path) -> Result<Vec<CloseApproach>> {
    let records = json_read::read_records(cad_json_path)?;
    let approaches = build_all(&APPROACH_SCHEMA, &records, CloseApproach::from_record)?;
    info!(approach_count = approaches.len(), "loaded close approaches");
    Ok(approaches)
}

fn build_all<T>(
    schema: &EntitySchema,
    records: &[RawRecord],
    build: impl Fn(&RawRecord) -> Result<T>,
) -> Result<Vec<T>> {
    records
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            build(&schema.rekey(raw)).map_err(|err| err.in_record(schema.entity, index))
        })
        .collect()
}
