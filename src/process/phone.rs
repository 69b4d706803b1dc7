use tracing::debug;

use crate::record::{PatientRecord, PHONE_FIELD};

/// Canonicalise a phone number toward E.164 (`+1XXXXXXXXXX`).
///
/// Every non-digit is dropped first, including a leading `+`, so a number
/// that arrives as `+44...` comes out as bare digits and is left for the
/// validator to reject. Only the North American shapes get a country code:
///  - 10 digits → `+1` prefix
///  - 11 digits starting with `1` → `+` prefix
///  - anything else → digits only, no guess
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        10 => format!("+1{}", digits),
        11 if digits.starts_with('1') => format!("+{}", digits),
        n => {
            debug!(digits = n, "phone number left without country code");
            digits
        }
    }
}

/// Apply [`normalize_phone`] to the record's phone field, if it has one.
pub fn normalize_phone_field(mut record: PatientRecord) -> PatientRecord {
    if let Some(phone) = record.take(PHONE_FIELD) {
        record.set(PHONE_FIELD, Some(normalize_phone(&phone)));
    }
    record
}
