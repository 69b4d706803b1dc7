/// Fields that must be non-null for a record to be usable downstream.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "first_name",
    "last_name",
    "dob",
    "member_id",
    "effective_date",
];

/// Fields holding a calendar date.
pub const DATE_FIELDS: [&str; 3] = ["dob", "effective_date", "expiry_date"];

pub const PHONE_FIELD: &str = "phone_number";

/// Added by the pipeline; never present on raw input.
pub const VALID_FIELD: &str = "valid";

/// One row of patient data: field name → optional text, in source column order.
///
/// The key set is open. Stages that care about specific fields look them up by
/// the constants above, the container itself knows nothing about the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientRecord {
    fields: Vec<(String, Option<String>)>,
    valid: Option<bool>,
}

impl PatientRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key`. Absent and null both read as `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Overwrite `key` in place, or append it if it is new.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Take the value out of `key`, leaving the key in place with a null value.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.fields
            .iter_mut()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.take())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Option<String>> {
        self.fields.iter_mut().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validity attached by the pipeline, `None` until the record has been judged.
    pub fn valid(&self) -> Option<bool> {
        self.valid
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.valid = Some(valid);
    }

    /// Field names in output order: the data fields, then `valid` once judged.
    /// A source column already named `valid` keeps its position and is shadowed.
    pub fn header(&self) -> Vec<String> {
        let mut names: Vec<String> = self.keys().map(str::to_string).collect();
        if self.valid.is_some() && !self.contains_key(VALID_FIELD) {
            names.push(VALID_FIELD.to_string());
        }
        names
    }

    /// Text of a named column as it should be written out.
    pub fn cell(&self, name: &str) -> Option<String> {
        if name == VALID_FIELD {
            if let Some(valid) = self.valid {
                return Some(valid.to_string());
            }
        }
        self.get(name).map(str::to_string)
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for PatientRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut record = PatientRecord::new();
        for (k, v) in iter {
            record.set(k, v.map(Into::into));
        }
        record
    }
}
