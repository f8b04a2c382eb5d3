use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{NeoError, Result};
use crate::model::RawRecord;

/// Column-once table layout: `fields` names the columns, `data` holds the
/// rows as positional arrays.
#[derive(Debug, Deserialize)]
struct FieldTable {
    fields: Vec<String>,
    data: Vec<Vec<Value>>,
}

/// Reads a `fields`/`data` JSON table into one record per row.
///
/// A file that cannot be opened is logged and yields no records. A document
/// that is not valid JSON, or a row longer than `fields`, is an error.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            error!(path = %path.display(), error = %err, "unable to open JSON source");
            return Ok(Vec::new());
        }
    };

    let table: FieldTable = serde_json::from_reader(BufReader::new(file))?;
    let records = zip_rows(table)?;

    debug!(path = %path.display(), record_count = records.len(), "read JSON records");
    Ok(records)
}

fn zip_rows(table: FieldTable) -> Result<Vec<RawRecord>> {
    let FieldTable { fields, data } = table;

    data.into_iter()
        .enumerate()
        .map(|(index, row)| {
            if row.len() > fields.len() {
                return Err(NeoError::MalformedTable(format!(
                    "row {index} has {} values but only {} fields are declared",
                    row.len(),
                    fields.len()
                )));
            }
            Ok(fields
                .iter()
                .map(String::as_str)
                .zip(row)
                .collect::<RawRecord>())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn table(value: Value) -> FieldTable {
        serde_json::from_value(value).expect("table deserialized")
    }

    #[test]
    fn zips_rows_against_fields() {
        let records = zip_rows(table(json!({
            "fields": ["des", "cd", "dist", "v_rel"],
            "data": [
                ["433", "1900-Jan-01 12:00", "0.15", "5.5"],
                ["99942", "2029-Apr-13 21:46", 0.00025, null]
            ]
        })))
        .expect("rows zipped");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text("des").as_deref(), Some("433"));
        assert_eq!(records[1].text("dist").as_deref(), Some("0.00025"));
        assert_eq!(records[1].text("v_rel"), None);
    }

    #[test]
    fn short_rows_leave_fields_absent() {
        let records = zip_rows(table(json!({
            "fields": ["des", "cd", "dist"],
            "data": [["433"]]
        })))
        .expect("rows zipped");

        assert!(records[0].get("cd").is_none());
    }

    #[test]
    fn long_rows_are_rejected() {
        let result = zip_rows(table(json!({
            "fields": ["des"],
            "data": [["433", "extra"]]
        })));

        assert!(matches!(result, Err(NeoError::MalformedTable(_))));
    }
}
