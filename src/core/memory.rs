//! In-memory donation store.
//!
//! Keeps donations in a `Vec` behind a `tokio::sync::RwLock`. Ids come from a counter
//! that only moves forward, so an id freed by a delete is never handed out again.
//! Nothing survives a restart.

use crate::{
    core::{
        donation::{DonationPatch, NewDonation},
        store::DonationStore,
    },
    entities::DonationModel,
    errors::Result,
};
use std::cmp::Reverse;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug)]
struct Records {
    donations: Vec<DonationModel>,
    next_id: i64,
}

/// Store that holds donations in process memory.
#[derive(Debug)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store whose first id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records {
                donations: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

fn sorted(mut donations: Vec<DonationModel>) -> Vec<DonationModel> {
    donations.sort_by_key(|d| (Reverse(d.date), Reverse(d.id)));
    donations
}

impl DonationStore for MemoryStore {
    async fn list(&self) -> Result<Vec<DonationModel>> {
        let records = self.records.read().await;
        Ok(sorted(records.donations.clone()))
    }

    async fn list_by_donor(&self, donor_name: &str) -> Result<Vec<DonationModel>> {
        let donor_name = donor_name.trim();
        let records = self.records.read().await;
        Ok(sorted(
            records
                .donations
                .iter()
                .filter(|d| d.donor_name == donor_name)
                .cloned()
                .collect(),
        ))
    }

    async fn get(&self, id: i64) -> Result<Option<DonationModel>> {
        let records = self.records.read().await;
        Ok(records.donations.iter().find(|d| d.id == id).cloned())
    }

    async fn create(&self, new_donation: NewDonation) -> Result<DonationModel> {
        let new_donation = new_donation.validated()?;

        let mut records = self.records.write().await;
        let donation = DonationModel {
            id: records.next_id,
            donor_name: new_donation.donor_name,
            donation_type: new_donation.donation_type,
            amount: new_donation.amount,
            date: new_donation.date,
        };
        records.next_id += 1;
        records.donations.push(donation.clone());

        debug!(id = donation.id, "Donation created in memory");
        Ok(donation)
    }

    async fn update(&self, id: i64, patch: DonationPatch) -> Result<Option<DonationModel>> {
        let patch = patch.validated()?;

        let mut records = self.records.write().await;
        let Some(donation) = records.donations.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        patch.apply_to(donation);

        debug!(id, "Donation updated in memory");
        Ok(Some(donation.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.donations.len();
        records.donations.retain(|d| d.id != id);
        Ok(records.donations.len() < before)
    }
}
