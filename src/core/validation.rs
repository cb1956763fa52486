//! Field validation for donation payloads.
//!
//! Validation works on a [`DonationDraft`], the raw shape of a request payload,
//! and produces either a typed [`NewDonation`] / [`DonationPatch`] or the full
//! list of field errors. Nothing in here knows about JSON; the HTTP layer builds
//! the draft.

use crate::{
    core::donation::{DonationPatch, NewDonation},
    entities::DonationType,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Wire format of donation dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

impl FieldError {
    /// Creates an error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All field errors found in one payload. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Wraps a single field error.
    #[must_use]
    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    /// Adds an error to the list.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Returns `true` if no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded errors in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns `true` if any error concerns `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Records the error side of `result` and passes the value through.
    fn collect<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        result.map_err(|e| self.push(e)).ok()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A payload field before any checks have run.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawField {
    /// The field was not supplied
    #[default]
    Missing,
    /// The field was supplied as an explicit null
    Null,
    /// A string value
    Text(String),
    /// A numeric value
    Number(f64),
    /// Any other kind of value, named for the error message
    Other(&'static str),
}

/// Unvalidated donation payload, used for both create and update requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationDraft {
    /// Raw `donor_name`
    pub donor_name: RawField,
    /// Raw `donation_type`
    pub donation_type: RawField,
    /// Raw `amount`
    pub amount: RawField,
    /// Raw `date`
    pub date: RawField,
}

impl DonationDraft {
    /// Validates every field for a create request. All four fields are required.
    pub fn into_new_donation(self) -> Result<NewDonation, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let donor_name = errors.collect(required("donor_name", self.donor_name, parse_donor_name));
        let donation_type =
            errors.collect(required("donation_type", self.donation_type, parse_donation_type));
        let amount = errors.collect(required("amount", self.amount, parse_amount));
        let date = errors.collect(required("date", self.date, parse_date));

        match (donor_name, donation_type, amount, date) {
            (Some(donor_name), Some(donation_type), Some(amount), Some(date))
                if errors.is_empty() =>
            {
                Ok(NewDonation {
                    donor_name,
                    donation_type,
                    amount,
                    date,
                })
            }
            _ => Err(errors),
        }
    }

    /// Validates the supplied fields for an update request. Missing fields stay `None`.
    pub fn into_patch(self) -> Result<DonationPatch, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let patch = DonationPatch {
            donor_name: errors
                .collect(optional("donor_name", self.donor_name, parse_donor_name))
                .flatten(),
            donation_type: errors
                .collect(optional("donation_type", self.donation_type, parse_donation_type))
                .flatten(),
            amount: errors
                .collect(optional("amount", self.amount, parse_amount))
                .flatten(),
            date: errors.collect(optional("date", self.date, parse_date)).flatten(),
        };

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

type Rule<T> = fn(&'static str, RawField) -> Result<T, FieldError>;

fn required<T>(field: &'static str, raw: RawField, rule: Rule<T>) -> Result<T, FieldError> {
    match raw {
        RawField::Missing => Err(FieldError::new(field, "field required")),
        RawField::Null => Err(FieldError::new(field, "must not be null")),
        other => rule(field, other),
    }
}

fn optional<T>(field: &'static str, raw: RawField, rule: Rule<T>) -> Result<Option<T>, FieldError> {
    match raw {
        RawField::Missing => Ok(None),
        // Every donation field is mandatory, so null cannot overwrite one.
        RawField::Null => Err(FieldError::new(field, "must not be null")),
        other => rule(field, other).map(Some),
    }
}

fn kind_of(raw: &RawField) -> &'static str {
    match raw {
        RawField::Missing => "nothing",
        RawField::Null => "null",
        RawField::Text(_) => "string",
        RawField::Number(_) => "number",
        RawField::Other(kind) => kind,
    }
}

fn parse_donor_name(field: &'static str, raw: RawField) -> Result<String, FieldError> {
    match raw {
        RawField::Text(name) => {
            check_donor_name(&name).map_err(|message| FieldError::new(field, message))
        }
        other => Err(FieldError::new(
            field,
            format!("must be a string, got {}", kind_of(&other)),
        )),
    }
}

fn parse_donation_type(field: &'static str, raw: RawField) -> Result<DonationType, FieldError> {
    match raw {
        RawField::Text(name) => name.parse().map_err(|_| {
            FieldError::new(field, "must be one of: money, food, clothing, other")
        }),
        other => Err(FieldError::new(
            field,
            format!("must be a string, got {}", kind_of(&other)),
        )),
    }
}

fn parse_amount(field: &'static str, raw: RawField) -> Result<f64, FieldError> {
    match raw {
        RawField::Number(value) => {
            check_amount(value).map_err(|message| FieldError::new(field, message))
        }
        other => Err(FieldError::new(
            field,
            format!("must be a number, got {}", kind_of(&other)),
        )),
    }
}

fn parse_date(field: &'static str, raw: RawField) -> Result<NaiveDate, FieldError> {
    match raw {
        RawField::Text(text) => check_date(&text)
            .ok_or_else(|| FieldError::new(field, "must be a date in YYYY-MM-DD format")),
        other => Err(FieldError::new(
            field,
            format!("must be a date string, got {}", kind_of(&other)),
        )),
    }
}

/// Parses a calendar date written exactly as `YYYY-MM-DD`.
///
/// Unpadded parts, a leading sign and surrounding spaces are all rejected.
#[must_use]
pub fn check_date(text: &str) -> Option<NaiveDate> {
    let well_formed = text.len() == 10
        && text.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Trims a donor name and rejects it if nothing is left.
pub fn check_donor_name(name: &str) -> Result<String, &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("must not be empty");
    }
    Ok(trimmed.to_string())
}

/// Accepts only finite, strictly positive amounts.
pub fn check_amount(amount: f64) -> Result<f64, &'static str> {
    if !amount.is_finite() {
        return Err("must be a finite number");
    }
    if amount <= 0.0 {
        return Err("must be greater than 0");
    }
    Ok(amount)
}
