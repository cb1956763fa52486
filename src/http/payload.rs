//! Conversion of JSON request bodies into unvalidated donation drafts.

use crate::core::validation::{DonationDraft, FieldError, RawField, ValidationErrors};
use serde_json::{Map, Value};

/// Splits a JSON object into a [`DonationDraft`]. Unknown keys are ignored.
///
/// # Errors
/// Returns a `body` field error if the payload is not a JSON object.
pub fn draft_from_json(value: Value) -> Result<DonationDraft, ValidationErrors> {
    let Value::Object(mut fields) = value else {
        return Err(ValidationErrors::single(FieldError::new(
            "body",
            "must be a JSON object",
        )));
    };

    Ok(DonationDraft {
        donor_name: take(&mut fields, "donor_name"),
        donation_type: take(&mut fields, "donation_type"),
        amount: take(&mut fields, "amount"),
        date: take(&mut fields, "date"),
    })
}

fn take(fields: &mut Map<String, Value>, key: &str) -> RawField {
    match fields.remove(key) {
        None => RawField::Missing,
        Some(Value::Null) => RawField::Null,
        Some(Value::String(text)) => RawField::Text(text),
        Some(Value::Number(number)) => number
            .as_f64()
            .map_or(RawField::Other("number"), RawField::Number),
        Some(Value::Bool(_)) => RawField::Other("boolean"),
        Some(Value::Array(_)) => RawField::Other("array"),
        Some(Value::Object(_)) => RawField::Other("object"),
    }
}
