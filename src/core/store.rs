//! Donation store abstraction.
//!
//! [`DonationStore`] is the contract the HTTP layer talks to. [`SqlStore`] keeps donations
//! in the `SQLite` `donations` table; [`crate::core::memory::MemoryStore`] keeps them in a
//! list guarded by a lock. Both assign integer ids, never reuse them, and list records
//! newest first.

use crate::{
    core::donation::{self, DonationPatch, NewDonation},
    entities::DonationModel,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::future::Future;

/// Owner of the authoritative donation collection.
///
/// Absence is reported as `None` / `false`, never as an error; the caller decides
/// what "not found" means.
pub trait DonationStore: Send + Sync + 'static {
    /// All donations ordered by date descending, then id descending.
    fn list(&self) -> impl Future<Output = Result<Vec<DonationModel>>> + Send;

    /// Donations of one donor (exact, trimmed name), in listing order.
    fn list_by_donor(
        &self,
        donor_name: &str,
    ) -> impl Future<Output = Result<Vec<DonationModel>>> + Send;

    /// The donation with `id`, if any.
    fn get(&self, id: i64) -> impl Future<Output = Result<Option<DonationModel>>> + Send;

    /// Validates and stores a new donation, returning it with its assigned id.
    fn create(
        &self,
        new_donation: NewDonation,
    ) -> impl Future<Output = Result<DonationModel>> + Send;

    /// Validates and applies `patch` to the donation with `id`, if it exists.
    fn update(
        &self,
        id: i64,
        patch: DonationPatch,
    ) -> impl Future<Output = Result<Option<DonationModel>>> + Send;

    /// Removes the donation with `id`, returning whether one was removed.
    fn delete(&self, id: i64) -> impl Future<Output = Result<bool>> + Send;
}

/// Store backed by the `donations` table.
#[derive(Debug)]
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    /// Wraps an open connection. Tables must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl DonationStore for SqlStore {
    async fn list(&self) -> Result<Vec<DonationModel>> {
        donation::list_donations(&self.db).await
    }

    async fn list_by_donor(&self, donor_name: &str) -> Result<Vec<DonationModel>> {
        donation::get_donations_by_donor(&self.db, donor_name).await
    }

    async fn get(&self, id: i64) -> Result<Option<DonationModel>> {
        donation::get_donation_by_id(&self.db, id).await
    }

    async fn create(&self, new_donation: NewDonation) -> Result<DonationModel> {
        donation::create_donation(&self.db, new_donation).await
    }

    async fn update(&self, id: i64, patch: DonationPatch) -> Result<Option<DonationModel>> {
        donation::update_donation(&self.db, id, patch).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        donation::delete_donation(&self.db, id).await
    }
}
