//! Startup seeding of the donation log from `[[seed]]` entries in config.toml.

use crate::{
    config::app::SeedDonation,
    core::{DonationStore, donation::NewDonation},
    errors::Result,
};
use tracing::{info, instrument};

/// Inserts `seeds` through `store` when the store holds no donations yet.
///
/// Seeds go through the regular create path, so an invalid entry aborts startup with a
/// validation error. Returns the number of donations inserted.
#[instrument(skip_all, fields(seeds = seeds.len()))]
pub async fn seed_initial_donations<S: DonationStore>(
    store: &S,
    seeds: &[SeedDonation],
) -> Result<usize> {
    if seeds.is_empty() {
        return Ok(0);
    }
    if !store.list().await?.is_empty() {
        info!("Store already holds donations, skipping seed entries");
        return Ok(0);
    }

    let today = chrono::Local::now().date_naive();
    for seed in seeds {
        store
            .create(NewDonation {
                donor_name: seed.donor_name.clone(),
                donation_type: seed.donation_type,
                amount: seed.amount,
                date: seed.date.unwrap_or(today),
            })
            .await?;
    }

    info!("Seeded {} initial donations", seeds.len());
    Ok(seeds.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::MemoryStore,
        entities::DonationType,
        errors::Error,
        test_utils::{day, new_donation},
    };

    fn seed(donor_name: &str, amount: f64) -> SeedDonation {
        SeedDonation {
            donor_name: donor_name.to_string(),
            donation_type: DonationType::Food,
            amount,
            date: Some(day(2025, 1, 1)),
        }
    }

    #[tokio::test]
    async fn test_seeds_empty_store() -> Result<()> {
        let store = MemoryStore::new();
        let seeds = vec![seed("Initial Donor", 50.0), seed("Second Donor", 5.0)];

        assert_eq!(seed_initial_donations(&store, &seeds).await?, 2);
        assert_eq!(store.list().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_skips_populated_store() -> Result<()> {
        let store = MemoryStore::new();
        store
            .create(new_donation("Existing", 1.0, day(2025, 1, 1)))
            .await?;

        assert_eq!(
            seed_initial_donations(&store, &[seed("Initial Donor", 50.0)]).await?,
            0
        );
        assert_eq!(store.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_date_defaults_to_today() -> Result<()> {
        let store = MemoryStore::new();
        let undated = SeedDonation {
            date: None,
            ..seed("Initial Donor", 50.0)
        };

        seed_initial_donations(&store, &[undated]).await?;
        let listed = store.list().await?;
        assert_eq!(listed[0].date, chrono::Local::now().date_naive());
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_seed_is_rejected() {
        let store = MemoryStore::new();
        let result = seed_initial_donations(&store, &[seed("Bad", -1.0)]).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
