use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::record::{PatientRecord, DATE_FIELDS};

/// Two-digit years below this land in the 2000s, the rest in the 1900s
/// (`00..=68` → 2000–2068, `69..=99` → 1969–1999).
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Order {
    /// month, day, year
    Mdy,
    /// year, month, day
    Ymd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum YearDigits {
    Two,
    Four,
}

/// One accepted textual layout: the exact shape it must have, and how to
/// read the captured numbers once the shape matches.
struct DateRule {
    name: &'static str,
    shape: Regex,
    order: Order,
    year: YearDigits,
}

impl DateRule {
    fn new(name: &'static str, pattern: &str, order: Order, year: YearDigits) -> Self {
        Self {
            name,
            // patterns are literals below
            shape: Regex::new(pattern).expect("date shape pattern"),
            order,
            year,
        }
    }

    /// Read the captured numbers as a date; `None` when they are not a real
    /// calendar date.
    fn to_date(&self, caps: &Captures<'_>) -> Option<NaiveDate> {
        let num = |i: usize| -> Option<u32> { caps.get(i)?.as_str().parse().ok() };

        let (year, month, day) = match self.order {
            Order::Mdy => (num(3)?, num(1)?, num(2)?),
            Order::Ymd => (num(1)?, num(2)?, num(3)?),
        };
        let year = match self.year {
            YearDigits::Two => expand_two_digit_year(year as i32),
            YearDigits::Four => year as i32,
        };

        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Tried in this order. The shape picks the rule, so `01/02/1920` can never
/// be read as a two-digit year and `01/02/20` never as year 20 AD.
static DATE_RULES: Lazy<Vec<DateRule>> = Lazy::new(|| {
    vec![
        DateRule::new(
            "M/D/YY",
            r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{2})$",
            Order::Mdy,
            YearDigits::Two,
        ),
        DateRule::new(
            "M/D/YYYY",
            r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$",
            Order::Mdy,
            YearDigits::Four,
        ),
        DateRule::new(
            "M-D-YY",
            r"^([0-9]{1,2})-([0-9]{1,2})-([0-9]{2})$",
            Order::Mdy,
            YearDigits::Two,
        ),
        DateRule::new(
            "M-D-YYYY",
            r"^([0-9]{1,2})-([0-9]{1,2})-([0-9]{4})$",
            Order::Mdy,
            YearDigits::Four,
        ),
        DateRule::new(
            "YYYY-M-D",
            r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$",
            Order::Ymd,
            YearDigits::Four,
        ),
    ]
});

pub fn expand_two_digit_year(yy: i32) -> i32 {
    if yy < TWO_DIGIT_YEAR_PIVOT {
        2000 + yy
    } else {
        1900 + yy
    }
}

/// Parse a date written in any of the accepted layouts.
///
/// Each rule whose shape matches gets one attempt; a calendar failure
/// (e.g. `2/30/2020`) falls through to the next rule rather than stopping.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    for rule in DATE_RULES.iter() {
        let Some(caps) = rule.shape.captures(s) else {
            continue;
        };
        match rule.to_date(&caps) {
            Some(date) => {
                trace!(input = s, rule = rule.name, "date parsed");
                return Some(date);
            }
            None => trace!(input = s, rule = rule.name, "shape matched, not a calendar date"),
        }
    }
    None
}

/// `YYYY-MM-DD` for a parseable date, `None` otherwise.
pub fn normalize_date(s: &str) -> Option<String> {
    let parsed = parse_date(s);
    if parsed.is_none() {
        debug!(input = s, "unparseable date");
    }
    parsed.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Rewrite every date field of the record into ISO form. Unparseable values
/// become null, and a date field missing from the record is added as null.
pub fn normalize_date_fields(mut record: PatientRecord) -> PatientRecord {
    for field in DATE_FIELDS {
        let normalized = record.take(field).and_then(|v| normalize_date(&v));
        record.set(field, normalized);
    }
    record
}
