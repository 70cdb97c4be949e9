//! Record validation
//!
//! Requests arrive as untyped JSON. Every candidate record goes through the
//! checks below before being converted into a typed payload:
//!
//! - required fields: absent, `null` or blank strings are missing
//!   (`0` and `false` are present values)
//! - format checks, only for fields that are present
//!
//! All checks run, so the error list is exhaustive for the record.

mod employee;
mod task;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::models::{EmployeeCreate, EmployeeUpdate, TaskCreate, TaskUpdate};

/// Kind of record being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Employee,
    Task,
}

impl RecordKind {
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Employee => employee::REQUIRED,
            RecordKind::Task => task::REQUIRED,
        }
    }
}

/// Whether absent required fields are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Full record (create)
    Create,
    /// Only the fields present (update); required fields may not be blanked
    Partial,
}

/// Validate one candidate record, returning every error found
pub fn validate(kind: RecordKind, record: &Value, mode: Mode) -> Vec<String> {
    let Some(fields) = record.as_object() else {
        return vec!["Record must be a JSON object".to_string()];
    };

    let mut checker = Checker::new(fields);
    for field in kind.required_fields() {
        match mode {
            Mode::Create => checker.required(field),
            Mode::Partial => checker.not_blank(field),
        }
    }
    match kind {
        RecordKind::Employee => employee::check_formats(&mut checker),
        RecordKind::Task => task::check_formats(&mut checker),
    }
    checker.into_errors()
}

/// Typed payload built from a validated candidate record
pub trait FromCandidate: DeserializeOwned {
    const KIND: RecordKind;
    const MODE: Mode;

    /// Validate `record` and convert it; any failure yields the full error list
    fn from_candidate(record: &Value) -> Result<Self, Vec<String>> {
        let errors = validate(Self::KIND, record, Self::MODE);
        if !errors.is_empty() {
            return Err(errors);
        }
        serde_json::from_value(without_nulls(record)).map_err(|e| vec![e.to_string()])
    }
}

impl FromCandidate for EmployeeCreate {
    const KIND: RecordKind = RecordKind::Employee;
    const MODE: Mode = Mode::Create;
}

impl FromCandidate for EmployeeUpdate {
    const KIND: RecordKind = RecordKind::Employee;
    const MODE: Mode = Mode::Partial;
}

impl FromCandidate for TaskCreate {
    const KIND: RecordKind = RecordKind::Task;
    const MODE: Mode = Mode::Create;
}

impl FromCandidate for TaskUpdate {
    const KIND: RecordKind = RecordKind::Task;
    const MODE: Mode = Mode::Partial;
}

/// Null members behave as absent so serde defaults apply
fn without_nulls(record: &Value) -> Value {
    match record {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Error accumulator over the members of one record
pub(crate) struct Checker<'a> {
    fields: &'a Map<String, Value>,
    errors: Vec<String>,
}

impl<'a> Checker<'a> {
    fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields,
            errors: Vec::new(),
        }
    }

    /// Present and not null
    pub(crate) fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub(crate) fn push(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    fn required(&mut self, field: &str) {
        if is_missing(self.fields.get(field)) {
            self.push(format!("{} is required", field));
        }
    }

    fn not_blank(&mut self, field: &str) {
        if self.fields.contains_key(field) && is_missing(self.fields.get(field)) {
            self.push(format!("{} cannot be empty", field));
        }
    }

    /// Text fields must be strings
    pub(crate) fn string(&mut self, field: &str) -> Option<&'a str> {
        let value = self.get(field)?;
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.push(format!("{} must be a string", field));
                None
            }
        }
    }

    pub(crate) fn strings(&mut self, fields: &[&str]) {
        for field in fields {
            self.string(field);
        }
    }

    pub(crate) fn boolean(&mut self, field: &str) {
        if let Some(value) = self.get(field)
            && !value.is_boolean()
        {
            self.push(format!("{} must be a boolean", field));
        }
    }

    /// Integer not below `min`; whole floats such as `2.0` count as integers
    pub(crate) fn integer_at_least(&mut self, field: &str, min: i64) {
        if let Some(value) = self.get(field)
            && !value
                .as_number()
                .and_then(shared::util::whole_number)
                .is_some_and(|n| n >= min)
        {
            self.push(format!(
                "{} must be an integer greater than or equal to {}",
                field, min
            ));
        }
    }

    /// Calendar date (`YYYY-MM-DD` or RFC 3339)
    pub(crate) fn date(&mut self, field: &str) {
        if let Some(value) = self.get(field)
            && !value
                .as_str()
                .is_some_and(|s| shared::util::parse_calendar_date(s).is_some())
        {
            self.push(format!("{} must be a valid date", field));
        }
    }

    /// Member of a fixed set of string values
    pub(crate) fn one_of(&mut self, field: &str, allowed: &[&str]) {
        if let Some(value) = self.get(field)
            && !value.as_str().is_some_and(|s| allowed.contains(&s))
        {
            self.push(format!("{} must be one of: {}", field, allowed.join(", ")));
        }
    }

    fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}
