use anyhow::Result;
use chrono::Local;
use patientprep::{
    config::Config,
    dataset::{read_records, write_records, write_report, RunSummary},
    process::{output_header, process_records},
};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let config = Config::load()?;

    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!(?config, "startup");

    let delimiter = config.delimiter_byte()?;
    let start = Instant::now();

    // ─── 2) read ─────────────────────────────────────────────────────
    let input = read_records(&config.input, delimiter)?;
    info!(
        "read {} records from {}",
        input.records.len(),
        config.input.display()
    );

    // ─── 3) clean + validate ─────────────────────────────────────────
    let header = output_header(&input.headers);
    let records = process_records(input.records, config.parallel);

    // ─── 4) write output + report ────────────────────────────────────
    write_records(&config.output, &records, &header, delimiter)?;
    let summary = RunSummary::from_records(&records);
    write_report(
        &summary,
        &config.input,
        &config.output,
        &config.report,
        Local::now().naive_local(),
    )?;

    info!(
        total = summary.total,
        valid = summary.valid,
        invalid = summary.invalid,
        elapsed = ?start.elapsed(),
        "all done"
    );
    Ok(())
}
