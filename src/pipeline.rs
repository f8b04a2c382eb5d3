use std::path::Path;

use tracing::{debug, info, instrument};

use crate::database::{LinkedApproach, NeoDatabase};
use crate::error::{NeoError, Result};
use crate::extract;
use crate::io::{csv_write, json_write};

/// Output formats supported by [`export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("json") => Ok(OutputFormat::Json),
            _ => Err(NeoError::UnsupportedOutput(path.to_path_buf())),
        }
    }
}

/// Loads both source files and links approaches to their objects.
///
/// A source that cannot be opened contributes no records; see
/// [`crate::io::csv_read::read_records`].
#[instrument(
    level = "info",
    skip_all,
    fields(neofile = %neofile.display(), cadfile = %cadfile.display())
)]
pub fn load_database(neofile: &Path, cadfile: &Path) -> Result<NeoDatabase> {
    let neos = extract::load_neos(neofile)?;
    let approaches = extract::load_approaches(cadfile)?;
    Ok(NeoDatabase::new(neos, approaches))
}

/// Writes linked approaches to `output`, choosing the writer from its
/// extension. Returns the number of approaches written.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn export<'a, I>(results: I, output: &Path) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let format = OutputFormat::from_path(output)?;
    debug!(?format, "selected output writer");
    let count = match format {
        OutputFormat::Csv => csv_write::write_to_csv(results, output)?,
        OutputFormat::Json => json_write::write_to_json(results, output)?,
    };
    info!(approach_count = count, "exported close approaches");
    Ok(count)
}
