use tracing::debug;

use crate::record::{PatientRecord, PHONE_FIELD, REQUIRED_FIELDS};

/// True iff every required field is present and non-null. An empty string
/// still counts as present.
pub fn validate_required_fields(record: &PatientRecord) -> bool {
    match REQUIRED_FIELDS.iter().find(|f| record.get(f).is_none()) {
        Some(missing) => {
            debug!(field = *missing, "required field missing");
            false
        }
        None => true,
    }
}

/// A missing phone is fine; a present one must be `+1` followed by exactly
/// ten ASCII digits.
pub fn validate_phone_number(record: &PatientRecord) -> bool {
    let Some(phone) = record.get(PHONE_FIELD) else {
        return true;
    };
    let ok = is_e164_nanp(phone);
    if !ok {
        debug!(phone, "phone number not in +1XXXXXXXXXX form");
    }
    ok
}

fn is_e164_nanp(phone: &str) -> bool {
    phone.len() == 12
        && phone.starts_with("+1")
        && phone[2..].bytes().all(|b| b.is_ascii_digit())
}

/// Both checks must pass.
pub fn is_valid(record: &PatientRecord) -> bool {
    validate_required_fields(record) && validate_phone_number(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::init_test_logging;

    fn clean() -> PatientRecord {
        [
            ("first_name", Some("Brent")),
            ("last_name", Some("Wilson")),
            ("dob", Some("1988-01-01")),
            ("member_id", Some("349090")),
            ("effective_date", Some("2019-09-30")),
            ("expiry_date", Some("2020-09-30")),
            ("phone_number", Some("+13038873456")),
        ]
        .into_iter()
        .collect()
    }

    fn with_phone(phone: &str) -> PatientRecord {
        let mut r = clean();
        r.set(PHONE_FIELD, Some(phone.to_string()));
        r
    }

    #[test]
    fn all_required_present() {
        assert!(validate_required_fields(&clean()));
        assert!(is_valid(&clean()));
    }

    #[test]
    fn optional_fields_may_be_null() {
        let mut r = clean();
        r.set("phone_number", None);
        r.set("expiry_date", None);
        assert!(validate_required_fields(&r));
        assert!(validate_phone_number(&r));
        assert!(is_valid(&r));
    }

    #[test]
    fn each_required_field_gates_validity() {
        init_test_logging();
        for field in REQUIRED_FIELDS {
            let mut r = clean();
            r.set(field, None);
            assert!(!validate_required_fields(&r), "null {}", field);
            assert!(!is_valid(&r), "null {}", field);
        }
    }

    #[test]
    fn absent_required_field_counts_as_missing() {
        let r: PatientRecord = clean()
            .iter()
            .filter(|(k, _)| *k != "member_id")
            .collect();
        assert!(!validate_required_fields(&r));
    }

    #[test]
    fn empty_string_counts_as_present() {
        let mut r = clean();
        r.set("first_name", Some(String::new()));
        assert!(validate_required_fields(&r));
    }

    #[test]
    fn phone_boundaries() {
        init_test_logging();
        assert!(validate_phone_number(&with_phone("+13038873456")));
        assert!(!validate_phone_number(&with_phone("+1303887345")));
        assert!(!validate_phone_number(&with_phone("3038873456")));
        assert!(!validate_phone_number(&with_phone("+1(303)887345")));
        assert!(!validate_phone_number(&with_phone("+1(303)88734")));
        assert!(!validate_phone_number(&with_phone("+23038873456")));
        assert!(!validate_phone_number(&with_phone("")));
    }

    #[test]
    fn bad_phone_alone_fails_the_record() {
        let r = with_phone("303887345");
        assert!(validate_required_fields(&r));
        assert!(!is_valid(&r));
    }
}
