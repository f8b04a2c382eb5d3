use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::database::LinkedApproach;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct JsonApproach {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    neo: JsonNeo,
}

#[derive(Debug, Serialize)]
struct JsonNeo {
    designation: String,
    name: String,
    /// `null` when the diameter is unknown.
    diameter_km: Option<f64>,
    potentially_hazardous: bool,
}

impl JsonApproach {
    fn from_linked(linked: &LinkedApproach<'_>) -> Result<Self> {
        let approach = linked.approach.serialize()?;
        let neo = linked.neo.serialize();
        Ok(Self {
            datetime_utc: approach.datetime_utc,
            distance_au: approach.distance_au,
            velocity_km_s: approach.velocity_km_s,
            neo: JsonNeo {
                designation: neo.designation,
                name: neo.name.unwrap_or_default(),
                diameter_km: Some(neo.diameter_km).filter(|value| value.is_finite()),
                potentially_hazardous: neo.potentially_hazardous,
            },
        })
    }
}

/// Writes the close approaches as a pretty-printed JSON array, nesting each
/// object's fields under `neo`. Returns the number of entries written.
pub fn write_to_json<'a, I>(results: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let entries = results
        .into_iter()
        .map(|linked| JsonApproach::from_linked(&linked))
        .collect::<Result<Vec<_>>>()?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &entries)?;
    writer.flush()?;

    debug!(path = %path.display(), entry_count = entries.len(), "wrote JSON export");
    Ok(entries.len())
}
