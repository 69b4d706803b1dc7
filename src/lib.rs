pub mod config;
pub mod dataset;
pub mod error;
pub mod process;
pub mod record;

pub use record::PatientRecord;
