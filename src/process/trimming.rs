use crate::record::PatientRecord;

/// Strip surrounding whitespace from every non-null field. Keys, order and
/// null values are untouched.
pub fn trim_fields(mut record: PatientRecord) -> PatientRecord {
    for value in record.values_mut() {
        if let Some(v) = value {
            let trimmed = v.trim();
            if trimmed.len() != v.len() {
                let owned = trimmed.to_string();
                *v = owned;
            }
        }
    }
    record
}
