use std::fs::File;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, error};

use crate::error::Result;
use crate::model::RawRecord;

/// Reads a headed CSV file into one record per data row, keyed by the header.
///
/// A file that cannot be opened is logged and yields no records. Rows shorter
/// than the header leave the missing columns absent; rows that fail to parse
/// are returned as errors.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            error!(path = %path.display(), error = %err, "unable to open CSV source");
            return Ok(Vec::new());
        }
    };

    // Short rows leave their trailing columns absent.
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| (header, Value::String(cell.to_string())))
            .collect();
        records.push(record);
    }

    debug!(path = %path.display(), record_count = records.len(), "read CSV records");
    Ok(records)
}
