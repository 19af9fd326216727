use crate::error::TrackerError;
use crate::models::RosterEntry;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use tracing::debug;

const NAME_COLUMN: usize = 0;
const URL_COLUMN: usize = 6;

pub fn load_roster(path: &str) -> Result<Vec<RosterEntry>, TrackerError> {
    let file = File::open(path).map_err(|e| TrackerError::Input {
        path: path.to_string(),
        source: csv::Error::from(e),
    })?;

    read_roster(file, path)
}

/// Read every roster row up front. Short rows and rows without a profile URL are skipped.
pub fn read_roster<R: Read>(reader: R, source: &str) -> Result<Vec<RosterEntry>, TrackerError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();

    for (i, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| TrackerError::Input {
            path: source.to_string(),
            source: e,
        })?;

        if record.len() <= URL_COLUMN {
            debug!(row = i + 1, fields = record.len(), "skipping short roster row");
            continue;
        }

        let profile_url = record[URL_COLUMN].trim();
        if profile_url.is_empty() {
            debug!(row = i + 1, "skipping roster row without profile URL");
            continue;
        }

        entries.push(RosterEntry {
            name: record[NAME_COLUMN].trim().to_string(),
            profile_url: profile_url.to_string(),
        });
    }

    Ok(entries)
}
