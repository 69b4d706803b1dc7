use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, warn};

use crate::{error::DatasetError, record::PatientRecord};

/// Zero-width space/non-joiner/joiner and the byte-order mark.
fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}

/// Drop invisible characters anywhere in a header name, then trim it.
/// Removing them first means a BOM sitting between spaces (`" \u{FEFF} dob"`)
/// still leaves a bare `dob` rather than a leading space.
pub fn clean_header(raw: &str) -> String {
    let visible: String = raw.chars().filter(|c| !is_invisible(*c)).collect();
    visible.trim().to_string()
}

/// A parsed input table. `headers` holds the cleaned column names in order
/// (duplicates collapsed to their first position), so the column layout is
/// known even when there are no data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<PatientRecord>,
}

/// Read a delimited file whose first row names the fields.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_records<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Dataset> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open input file: {:?}", path.as_ref()))?;
    read_records_from(file, delimiter, path.as_ref())
}

/// Same as [`read_records`] over any reader; `source` only labels errors.
///
/// - empty cell → null
/// - row shorter than the header → trailing fields null
/// - row longer than the header → extra cells dropped
pub fn read_records_from<R: Read>(
    reader: R,
    delimiter: u8,
    source: &Path,
) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let raw_headers = rdr
        .headers()
        .with_context(|| format!("CSV header error in {}", source.display()))?
        .clone();
    if raw_headers.is_empty() {
        return Err(DatasetError::MissingHeader {
            path: source.to_path_buf(),
        }
        .into());
    }

    let mut headers = Vec::with_capacity(raw_headers.len());
    for (index, raw) in raw_headers.iter().enumerate() {
        let name = clean_header(raw);
        if name.is_empty() {
            return Err(DatasetError::EmptyHeaderName {
                path: source.to_path_buf(),
                index,
            }
            .into());
        }
        headers.push(name);
    }
    debug!(?headers, "header row");

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = result.with_context(|| {
            format!("CSV parse error in {} at record {}", source.display(), idx)
        })?;

        if row.len() > headers.len() {
            warn!(
                record = idx,
                cells = row.len(),
                headers = headers.len(),
                "row has more cells than headers, extra cells dropped"
            );
        } else if row.len() < headers.len() {
            debug!(record = idx, cells = row.len(), "short row, missing cells read as null");
        }

        let record: PatientRecord = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let cell = row.get(i).filter(|c| !c.is_empty());
                (name.as_str(), cell)
            })
            .collect();
        records.push(record);
    }

    if records.is_empty() {
        warn!(source = %source.display(), "input has a header but no data rows");
    }

    let mut unique: Vec<String> = Vec::with_capacity(headers.len());
    for name in headers {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    Ok(Dataset {
        headers: unique,
        records,
    })
}
