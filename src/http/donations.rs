//! Donation route handlers.
//!
//! Handlers validate the request, call exactly one store operation and serialize the
//! result. A store `None` becomes [`Error::DonationNotFound`] here.

use crate::{
    core::{
        DonationStore,
        report::{self, TypeTotal},
        validation::{DonationDraft, FieldError, ValidationErrors},
    },
    entities::DonationModel,
    errors::{Error, Result},
    http::payload::draft_from_json,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Optional filters of the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Only return donations from this donor
    pub donor_name: Option<String>,
}

fn donation_id(path: std::result::Result<Path<i64>, PathRejection>) -> Result<i64> {
    path.map(|Path(id)| id).map_err(|_| {
        ValidationErrors::single(FieldError::new("id", "must be an integer")).into()
    })
}

fn read_draft(body: std::result::Result<Json<Value>, JsonRejection>) -> Result<DonationDraft> {
    let Json(value) = body.map_err(|rejection| Error::MalformedBody {
        message: rejection.body_text(),
    })?;
    Ok(draft_from_json(value)?)
}

/// `GET /donations`: every donation, newest first.
pub async fn list_donations<S: DonationStore>(
    State(store): State<Arc<S>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<DonationModel>>> {
    let donations = match params.donor_name.as_deref() {
        Some(donor_name) => store.list_by_donor(donor_name).await?,
        None => store.list().await?,
    };
    Ok(Json(donations))
}

/// `GET /donations/{id}`
pub async fn get_donation<S: DonationStore>(
    State(store): State<Arc<S>>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<DonationModel>> {
    let id = donation_id(id)?;
    store
        .get(id)
        .await?
        .map(Json)
        .ok_or(Error::DonationNotFound { id })
}

/// `POST /donations`: validates all fields and records a new donation.
pub async fn create_donation<S: DonationStore>(
    State(store): State<Arc<S>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DonationModel>)> {
    let new_donation = read_draft(body)?.into_new_donation()?;
    let created = store.create(new_donation).await?;
    info!(id = created.id, donation_type = created.donation_type.as_str(), "Donation recorded");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /donations/{id}`: overwrites only the fields present in the body.
pub async fn update_donation<S: DonationStore>(
    State(store): State<Arc<S>>,
    id: std::result::Result<Path<i64>, PathRejection>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<DonationModel>> {
    let id = donation_id(id)?;
    let patch = read_draft(body)?.into_patch()?;
    let updated = store
        .update(id, patch)
        .await?
        .ok_or(Error::DonationNotFound { id })?;
    info!(id, "Donation updated");
    Ok(Json(updated))
}

/// `DELETE /donations/{id}`
pub async fn delete_donation<S: DonationStore>(
    State(store): State<Arc<S>>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let id = donation_id(id)?;
    if !store.delete(id).await? {
        return Err(Error::DonationNotFound { id });
    }
    info!(id, "Donation deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /reports/totals`: count and amount per donation type.
pub async fn donation_totals<S: DonationStore>(
    State(store): State<Arc<S>>,
) -> Result<Json<Vec<TypeTotal>>> {
    let donations = store.list().await?;
    Ok(Json(report::totals_by_type(&donations)))
}
