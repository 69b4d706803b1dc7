//! Per-record cleaning: trim → phone → dates → validity.

pub mod date_parser;
pub mod phone;
pub mod pipeline;
pub mod trimming;
pub mod validate;

pub use date_parser::{normalize_date, normalize_date_fields, parse_date};
pub use phone::{normalize_phone, normalize_phone_field};
pub use pipeline::{output_header, process_record, process_records};
pub use trimming::trim_fields;
pub use validate::{is_valid, validate_phone_number, validate_required_fields};
