//! Shared test utilities.
//!
//! Helpers for setting up test databases and creating donations with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::donation::{self, NewDonation},
    entities::{DonationModel, DonationType},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for a calendar day. Panics on an impossible date.
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Builds a money donation input.
pub fn new_donation(donor_name: &str, amount: f64, date: NaiveDate) -> NewDonation {
    NewDonation {
        donor_name: donor_name.to_string(),
        donation_type: DonationType::Money,
        amount,
        date,
    }
}

/// Creates a test donation with sensible defaults.
///
/// # Defaults
/// * `donation_type`: money
/// * `amount`: 25.0
pub async fn create_test_donation(
    db: &DatabaseConnection,
    donor_name: &str,
    date: NaiveDate,
) -> Result<DonationModel> {
    donation::create_donation(db, new_donation(donor_name, 25.0, date)).await
}
