use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::{fs, path::Path};
use tracing::info;

use crate::record::PatientRecord;

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Counts for one run. Records that never got a verdict count as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl RunSummary {
    pub fn from_records(records: &[PatientRecord]) -> Self {
        let total = records.len();
        let valid = records.iter().filter(|r| r.valid() == Some(true)).count();
        Self {
            total,
            valid,
            invalid: total - valid,
        }
    }
}

pub fn render_report(
    summary: &RunSummary,
    input: &Path,
    output: &Path,
    report: &Path,
    at: NaiveDateTime,
) -> String {
    format!(
        "Data pre-processed successfully at {}\n\
         Input file: {}\n\
         Output file: {}\n\
         Report file: {}\n\
         Total patients: {}\n\
         Valid patients: {}\n\
         Invalid patients: {}\n",
        at.format(TIMESTAMP_FORMAT),
        input.display(),
        output.display(),
        report.display(),
        summary.total,
        summary.valid,
        summary.invalid,
    )
}

#[tracing::instrument(level = "info", skip_all, fields(path = %report.display()))]
pub fn write_report(
    summary: &RunSummary,
    input: &Path,
    output: &Path,
    report: &Path,
    at: NaiveDateTime,
) -> Result<()> {
    if let Some(dir) = report.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create report directory: {:?}", dir))?;
    }
    let text = render_report(summary, input, output, report, at);
    fs::write(report, text).with_context(|| format!("Failed to write report: {:?}", report))?;
    info!(?summary, "report written");
    Ok(())
}
