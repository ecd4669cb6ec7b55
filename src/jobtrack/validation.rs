//! # Form Validation
//!
//! Required-field checks shared by the add flow and the inline edit flow.
//!
//! Validation never fails fast: every field is checked and every failure is
//! reported, keyed by [`Field`]. An empty [`FieldErrors`] means the form is
//! acceptable. Validation is a pure function of the form; it never looks at
//! the store.

use crate::model::{ApplicationFields, ApplicationForm, Field, DATE_FORMAT};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

/// Field-scoped validation messages, ordered by form field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

fn required_message(field: Field) -> String {
    format!("{} is required", field.label())
}

/// Checks every required field of `form`.
pub fn validate(form: &ApplicationForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let required_text = [
        (Field::CompanyName, &form.company_name),
        (Field::JobTitle, &form.job_title),
        (Field::Location, &form.location),
    ];
    for (field, value) in required_text {
        if value.trim().is_empty() {
            errors.insert(field, required_message(field));
        }
    }

    if form.job_type.is_none() {
        errors.insert(Field::JobType, required_message(Field::JobType));
    }
    if form.status.is_none() {
        errors.insert(Field::Status, required_message(Field::Status));
    }

    let date = form.applied_date.trim();
    if date.is_empty() {
        errors.insert(Field::AppliedDate, required_message(Field::AppliedDate));
    } else if parse_date(date).is_none() {
        errors.insert(
            Field::AppliedDate,
            format!("{} must be a valid date (YYYY-MM-DD)", Field::AppliedDate.label()),
        );
    }

    errors
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

impl ApplicationForm {
    /// Validates the form and, when it is acceptable, builds the typed fields.
    ///
    /// Text fields are trimmed; notes are kept verbatim.
    pub fn to_fields(&self) -> Result<ApplicationFields, FieldErrors> {
        let errors = validate(self);
        match (self.job_type, self.status, parse_date(&self.applied_date)) {
            (Some(job_type), Some(status), Some(applied_date)) if errors.is_empty() => {
                Ok(ApplicationFields {
                    company_name: self.company_name.trim().to_string(),
                    job_title: self.job_title.trim().to_string(),
                    job_type,
                    status,
                    location: self.location.trim().to_string(),
                    applied_date,
                    notes: self.notes.clone(),
                })
            }
            _ => Err(errors),
        }
    }
}
