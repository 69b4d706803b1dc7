use rayon::prelude::*;
use tracing::{info, instrument};

use crate::record::PatientRecord;

use super::{
    date_parser::normalize_date_fields, phone::normalize_phone_field, trimming::trim_fields,
    validate::is_valid,
};

/// Trim, normalise phone, normalise dates, then judge. Validation only ever
/// sees normalised values, so an unparseable required date fails the record.
pub fn process_record(record: PatientRecord) -> PatientRecord {
    let record = trim_fields(record);
    let record = normalize_phone_field(record);
    let mut record = normalize_date_fields(record);
    let valid = is_valid(&record);
    record.set_valid(valid);
    record
}

/// Column layout a processed record would have for the given input header:
/// the input columns, any date field the input lacks, then `valid`.
pub fn output_header(input_header: &[String]) -> Vec<String> {
    let template: PatientRecord = input_header
        .iter()
        .map(|name| (name.as_str(), None::<&str>))
        .collect();
    process_record(template).header()
}

/// Run every record through [`process_record`], keeping input order.
#[instrument(level = "info", skip(records), fields(records = records.len()))]
pub fn process_records(records: Vec<PatientRecord>, parallel: bool) -> Vec<PatientRecord> {
    let processed: Vec<PatientRecord> = if parallel {
        records.into_par_iter().map(process_record).collect()
    } else {
        records.into_iter().map(process_record).collect()
    };

    let valid = processed
        .iter()
        .filter(|r| r.valid() == Some(true))
        .count();
    info!(
        total = processed.len(),
        valid,
        invalid = processed.len() - valid,
        "records processed"
    );
    processed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::VALID_FIELD;
    use crate::test_support::init_test_logging;

    fn brent() -> PatientRecord {
        [
            ("first_name", Some(" Brent ")),
            ("last_name", Some("Wilson  ")),
            ("dob", Some(" 1/1/1988 ")),
            ("member_id", Some("  349090 ")),
            ("effective_date", Some(" 9/30/19 ")),
            ("expiry_date", Some(" 9-30-2020 ")),
            ("phone_number", Some("  (303) 887 3456 ")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn cleans_example_record() {
        init_test_logging();
        let r = process_record(brent());
        let expected: PatientRecord = [
            ("first_name", Some("Brent")),
            ("last_name", Some("Wilson")),
            ("dob", Some("1988-01-01")),
            ("member_id", Some("349090")),
            ("effective_date", Some("2019-09-30")),
            ("expiry_date", Some("2020-09-30")),
            ("phone_number", Some("+13038873456")),
        ]
        .into_iter()
        .collect();

        assert_eq!(r.iter().collect::<Vec<_>>(), expected.iter().collect::<Vec<_>>());
        assert_eq!(r.valid(), Some(true));
        assert_eq!(r.cell(VALID_FIELD).as_deref(), Some("true"));
    }

    #[test]
    fn unparseable_required_date_fails_record() {
        init_test_logging();
        let mut input = brent();
        input.set("dob", Some(" 13/40/2020 ".to_string()));
        let r = process_record(input);
        assert_eq!(r.get("dob"), None);
        assert_eq!(r.valid(), Some(false));
    }

    #[test]
    fn unparseable_optional_date_keeps_record_valid() {
        let mut input = brent();
        input.set("expiry_date", Some("someday".to_string()));
        let r = process_record(input);
        assert_eq!(r.get("expiry_date"), None);
        assert_eq!(r.valid(), Some(true));
    }

    #[test]
    fn short_phone_is_normalised_then_rejected() {
        let mut input = brent();
        input.set("phone_number", Some("(303) 887 345".to_string()));
        let r = process_record(input);
        assert_eq!(r.get("phone_number"), Some("303887345"));
        assert_eq!(r.valid(), Some(false));
    }

    #[test]
    fn whitespace_padded_iso_date_is_accepted() {
        let mut input = brent();
        input.set("dob", Some("  1988-1-1\t".to_string()));
        assert_eq!(process_record(input).get("dob"), Some("1988-01-01"));
    }

    #[test]
    fn output_header_matches_processed_records() {
        let input = vec!["first_name".to_string(), "dob".to_string()];
        assert_eq!(
            output_header(&input),
            vec!["first_name", "dob", "effective_date", "expiry_date", "valid"]
        );

        let full = brent().header();
        assert_eq!(output_header(&full), process_record(brent()).header());
    }

    #[test]
    fn every_record_gets_a_verdict() {
        init_test_logging();
        let records = vec![brent(), PatientRecord::new(), brent()];
        let out = process_records(records, false);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|r| r.valid().is_some()));
        assert_eq!(out[1].valid(), Some(false));
    }

    #[test]
    fn parallel_preserves_order() {
        init_test_logging();
        let records: Vec<PatientRecord> = (0..500)
            .map(|i| {
                let mut r = brent();
                r.set("member_id", Some(format!(" {} ", i)));
                if i % 3 == 0 {
                    r.set("dob", None);
                }
                r
            })
            .collect();

        let sequential = process_records(records.clone(), false);
        let parallel = process_records(records, true);
        assert_eq!(sequential, parallel);
        for (i, r) in parallel.iter().enumerate() {
            assert_eq!(r.get("member_id"), Some(i.to_string().as_str()));
            assert_eq!(r.valid(), Some(i % 3 != 0));
        }
    }
}
