use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{fs, io::Write, path::Path};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::record::PatientRecord;

/// Write records as a delimited table, header taken from the first record,
/// or `empty_header` when there are no records.
///
/// Goes through a temp file in the destination directory and is renamed into
/// place, so the target is either the previous file or the complete new one.
#[tracing::instrument(
    level = "info",
    skip(path, records, empty_header),
    fields(path = %path.as_ref().display())
)]
pub fn write_records<P: AsRef<Path>>(
    path: P,
    records: &[PatientRecord],
    empty_header: &[String],
    delimiter: u8,
) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {:?}", dir))?;
    write_records_to(&mut tmp, records, empty_header, delimiter)?;
    tmp.persist(path)
        .with_context(|| format!("Failed to move output into place: {:?}", path))?;

    info!(rows = records.len(), "output written");
    Ok(())
}

/// Header row = field names of the first record. Each record is written by
/// looking those names up, so a record missing a field gets an empty cell.
///
/// With no records the output is just `empty_header`; if that is empty too
/// nothing is written at all.
pub fn write_records_to<W: Write>(
    writer: W,
    records: &[PatientRecord],
    empty_header: &[String],
    delimiter: u8,
) -> Result<()> {
    let header = match records.first() {
        Some(first) => first.header(),
        None if empty_header.is_empty() => {
            warn!("no records and no header, output left empty");
            return Ok(());
        }
        None => {
            warn!("no records to write, output is header only");
            empty_header.to_vec()
        }
    };

    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(false)
        .from_writer(writer);

    wtr.write_record(&header).context("writing header row")?;

    for (idx, record) in records.iter().enumerate() {
        let row: Vec<String> = header
            .iter()
            .map(|name| record.cell(name).unwrap_or_default())
            .collect();
        wtr.write_record(&row)
            .with_context(|| format!("writing record {}", idx))?;
    }
    wtr.flush().context("flushing output")?;
    Ok(())
}
