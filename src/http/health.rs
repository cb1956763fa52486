//! Liveness check for deployment monitoring.

use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

/// Body of the health response
#[derive(Debug, Serialize)]
pub struct Health {
    /// Always `true` while the process can answer
    pub ok: bool,
    /// Server's current local date
    pub today: NaiveDate,
}

/// `GET /health`
pub async fn health() -> Json<Health> {
    Json(Health {
        ok: true,
        today: chrono::Local::now().date_naive(),
    })
}
