//! File-facing side of a run: read the input table, write the cleaned table,
//! write the summary report.

pub mod read;
pub mod report;
pub mod write;

pub use read::{clean_header, read_records, read_records_from, Dataset};
pub use report::{render_report, write_report, RunSummary};
pub use write::{write_records, write_records_to};
