//! Donation business logic - Handles all donation-related database operations.
//!
//! This module provides functions for listing, retrieving, creating, updating and deleting
//! donation records in the `donations` table. Inputs arrive as [`NewDonation`] and
//! [`DonationPatch`] values, which are re-validated here before anything is written, so a
//! rejected request never touches the table.

use crate::{
    core::validation::{FieldError, ValidationErrors, check_amount, check_donor_name},
    entities::{Donation, DonationType, donation},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Fields of a donation that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonation {
    /// Name of the donor
    pub donor_name: String,
    /// Kind of contribution
    pub donation_type: DonationType,
    /// Amount or quantity, must be positive
    pub amount: f64,
    /// Day of the donation
    pub date: NaiveDate,
}

impl NewDonation {
    /// Checks the constraints the type system cannot express and trims the donor name.
    ///
    /// # Errors
    /// Returns every failing field when the name is blank or the amount is not positive.
    pub fn validated(self) -> std::result::Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let donor_name = check_donor_name(&self.donor_name)
            .map_err(|message| errors.push(FieldError::new("donor_name", message)))
            .ok();
        let amount = check_amount(self.amount)
            .map_err(|message| errors.push(FieldError::new("amount", message)))
            .ok();

        match (donor_name, amount) {
            (Some(donor_name), Some(amount)) => Ok(Self {
                donor_name,
                amount,
                ..self
            }),
            _ => Err(errors),
        }
    }
}

/// Partial update of a donation. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationPatch {
    /// Replacement donor name
    pub donor_name: Option<String>,
    /// Replacement donation type
    pub donation_type: Option<DonationType>,
    /// Replacement amount
    pub amount: Option<f64>,
    /// Replacement date
    pub date: Option<NaiveDate>,
}

impl DonationPatch {
    /// Returns `true` if the patch would not change any field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.donor_name.is_none()
            && self.donation_type.is_none()
            && self.amount.is_none()
            && self.date.is_none()
    }

    /// Re-checks the supplied fields only.
    ///
    /// # Errors
    /// Returns every supplied field that breaks a donation constraint.
    pub fn validated(self) -> std::result::Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let donor_name = match self.donor_name.as_deref().map(check_donor_name) {
            Some(Err(message)) => {
                errors.push(FieldError::new("donor_name", message));
                None
            }
            Some(Ok(name)) => Some(name),
            None => None,
        };
        let amount = match self.amount.map(check_amount) {
            Some(Err(message)) => {
                errors.push(FieldError::new("amount", message));
                None
            }
            other => other.and_then(std::result::Result::ok),
        };

        if errors.is_empty() {
            Ok(Self {
                donor_name,
                amount,
                ..self
            })
        } else {
            Err(errors)
        }
    }

    /// Merges the patch into `donation`, overwriting only the supplied fields.
    pub fn apply_to(self, donation: &mut donation::Model) {
        if let Some(donor_name) = self.donor_name {
            donation.donor_name = donor_name;
        }
        if let Some(donation_type) = self.donation_type {
            donation.donation_type = donation_type;
        }
        if let Some(amount) = self.amount {
            donation.amount = amount;
        }
        if let Some(date) = self.date {
            donation.date = date;
        }
    }

    fn apply_to_active(self, donation: &mut donation::ActiveModel) {
        if let Some(donor_name) = self.donor_name {
            donation.donor_name = Set(donor_name);
        }
        if let Some(donation_type) = self.donation_type {
            donation.donation_type = Set(donation_type);
        }
        if let Some(amount) = self.amount {
            donation.amount = Set(amount);
        }
        if let Some(date) = self.date {
            donation.date = Set(date);
        }
    }
}

/// Retrieves every donation, newest date first and, within a day, newest id first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_donations(db: &DatabaseConnection) -> Result<Vec<donation::Model>> {
    Donation::find()
        .order_by_desc(donation::Column::Date)
        .order_by_desc(donation::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific donation by its unique ID, returning None if it does not exist.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_donation_by_id(
    db: &DatabaseConnection,
    donation_id: i64,
) -> Result<Option<donation::Model>> {
    Donation::find_by_id(donation_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds donations whose donor name matches exactly, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_donations_by_donor(
    db: &DatabaseConnection,
    donor_name: &str,
) -> Result<Vec<donation::Model>> {
    Donation::find()
        .filter(donation::Column::DonorName.eq(donor_name.trim()))
        .order_by_desc(donation::Column::Date)
        .order_by_desc(donation::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new donation after validating its fields.
///
/// The donor name is stored trimmed. The database assigns the id; `AUTOINCREMENT`
/// guarantees it was never handed out before, even to a deleted row.
///
/// # Errors
/// Returns an error if:
/// - The donor name is empty or whitespace-only
/// - The amount is zero, negative or not finite
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_donation(
    db: &DatabaseConnection,
    new_donation: NewDonation,
) -> Result<donation::Model> {
    let new_donation = new_donation.validated()?;

    let model = donation::ActiveModel {
        donor_name: Set(new_donation.donor_name),
        donation_type: Set(new_donation.donation_type),
        amount: Set(new_donation.amount),
        date: Set(new_donation.date),
        ..Default::default()
    };
    let created = model.insert(db).await?;
    debug!(id = created.id, "Donation created");
    Ok(created)
}

/// Applies a partial update to an existing donation.
///
/// Returns `Ok(None)` when no donation has `donation_id`. An empty patch returns the
/// stored record without issuing a write.
///
/// # Errors
/// Returns an error if a supplied field is invalid or the database update fails.
#[instrument(skip(db))]
pub async fn update_donation(
    db: &DatabaseConnection,
    donation_id: i64,
    patch: DonationPatch,
) -> Result<Option<donation::Model>> {
    let patch = patch.validated()?;

    let Some(existing) = Donation::find_by_id(donation_id).one(db).await? else {
        return Ok(None);
    };

    if patch.is_empty() {
        return Ok(Some(existing));
    }

    let mut donation: donation::ActiveModel = existing.into();
    patch.apply_to_active(&mut donation);

    let updated = donation.update(db).await?;
    debug!(id = updated.id, "Donation updated");
    Ok(Some(updated))
}

/// Permanently deletes a donation, returning whether a row was removed.
///
/// # Errors
/// Returns an error if the database delete operation fails.
#[instrument(skip(db))]
pub async fn delete_donation(db: &DatabaseConnection, donation_id: i64) -> Result<bool> {
    let result = Donation::delete_by_id(donation_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_donation_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Blank donor name
        let result = create_donation(&db, new_donation("   ", 10.0, day(2025, 1, 1))).await;
        assert!(matches!(result.unwrap_err(), Error::Validation(e) if e.has_field("donor_name")));

        // Zero and negative amounts
        let result = create_donation(&db, new_donation("Jane Doe", 0.0, day(2025, 1, 1))).await;
        assert!(matches!(result.unwrap_err(), Error::Validation(e) if e.has_field("amount")));

        let result = create_donation(&db, new_donation("Jane Doe", -5.0, day(2025, 1, 1))).await;
        assert!(matches!(result.unwrap_err(), Error::Validation(e) if e.has_field("amount")));

        // NaN amount
        let result =
            create_donation(&db, new_donation("Jane Doe", f64::NAN, day(2025, 1, 1))).await;
        assert!(matches!(result.unwrap_err(), Error::Validation(_)));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_donation_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_donation(&db, new_donation("  Jane Doe ", 100.0, day(2025, 10, 7)))
            .await?;

        assert_eq!(created.donor_name, "Jane Doe");
        assert_eq!(created.donation_type, DonationType::Money);
        assert_eq!(created.amount, 100.0);
        assert_eq!(created.date, day(2025, 10, 7));

        let found = get_donation_by_id(&db, created.id).await?;
        assert_eq!(found, Some(created));

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_create_leaves_table_unchanged() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_donation(&db, "Existing Donor", day(2025, 1, 1)).await?;

        let result = create_donation(&db, new_donation("", 10.0, day(2025, 1, 2))).await;
        assert!(result.is_err());

        assert_eq!(list_donations(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_donations_orders_by_date_then_id() -> Result<()> {
        let db = setup_test_db().await?;

        let older = create_test_donation(&db, "Older", day(2025, 1, 1)).await?;
        let newer = create_test_donation(&db, "Newer", day(2025, 3, 1)).await?;
        let same_day_first = create_test_donation(&db, "Same Day A", day(2025, 2, 1)).await?;
        let same_day_second = create_test_donation(&db, "Same Day B", day(2025, 2, 1)).await?;

        let listed = list_donations(&db).await?;
        let ids: Vec<i64> = listed.iter().map(|d| d.id).collect();
        assert_eq!(
            ids,
            vec![newer.id, same_day_second.id, same_day_first.id, older.id]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_list_donations_empty() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(list_donations(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_donations_by_donor() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_donation(&db, "Jane Doe", day(2025, 1, 1)).await?;
        create_test_donation(&db, "John Roe", day(2025, 1, 2)).await?;
        create_test_donation(&db, "Jane Doe", day(2025, 1, 3)).await?;

        let janes = get_donations_by_donor(&db, "Jane Doe").await?;
        assert_eq!(janes.len(), 2);
        assert_eq!(janes[0].date, day(2025, 1, 3));

        assert!(get_donations_by_donor(&db, "Nobody").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_donation_overwrites_only_supplied_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_donation(&db, "Jane Doe", day(2025, 10, 7)).await?;

        let patch = DonationPatch {
            amount: Some(150.0),
            ..DonationPatch::default()
        };
        let updated = update_donation(&db, created.id, patch).await?.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount, 150.0);
        assert_eq!(updated.donor_name, "Jane Doe");
        assert_eq!(updated.donation_type, created.donation_type);
        assert_eq!(updated.date, created.date);

        // Verify the update persisted
        let retrieved = get_donation_by_id(&db, created.id).await?.unwrap();
        assert_eq!(retrieved, updated);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_donation_empty_patch_returns_unchanged() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_donation(&db, "Jane Doe", day(2025, 10, 7)).await?;

        let updated = update_donation(&db, created.id, DonationPatch::default()).await?;
        assert_eq!(updated, Some(created));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_donation_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let patch = DonationPatch {
            donor_name: Some("Someone".to_string()),
            ..DonationPatch::default()
        };
        assert!(update_donation(&db, 999, patch).await?.is_none());
        assert!(update_donation(&db, 999, DonationPatch::default()).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_donation_rejects_invalid_patch() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_donation(&db, "Jane Doe", day(2025, 10, 7)).await?;

        let patch = DonationPatch {
            donor_name: Some("  ".to_string()),
            amount: Some(0.0),
            ..DonationPatch::default()
        };
        let result = update_donation(&db, created.id, patch).await;
        assert!(
            matches!(result.unwrap_err(), Error::Validation(e) if e.errors().len() == 2)
        );

        let retrieved = get_donation_by_id(&db, created.id).await?.unwrap();
        assert_eq!(retrieved, created);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_donation_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_donation(&db, "Jane Doe", day(2025, 10, 7)).await?;

        assert!(delete_donation(&db, created.id).await?);
        assert!(get_donation_by_id(&db, created.id).await?.is_none());
        assert!(list_donations(&db).await?.is_empty());

        // Deleting again reports nothing removed
        assert!(!delete_donation(&db, created.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_test_donation(&db, "First", day(2025, 1, 1)).await?;
        let second = create_test_donation(&db, "Second", day(2025, 1, 1)).await?;
        assert!(delete_donation(&db, second.id).await?);

        let third = create_test_donation(&db, "Third", day(2025, 1, 1)).await?;
        assert!(third.id > second.id);
        assert_ne!(third.id, first.id);

        Ok(())
    }

    #[test]
    fn test_apply_to_merges_supplied_fields() {
        let mut donation = donation::Model {
            id: 1,
            donor_name: "Jane Doe".to_string(),
            donation_type: DonationType::Food,
            amount: 20.0,
            date: day(2025, 5, 5),
        };

        DonationPatch {
            donation_type: Some(DonationType::Clothing),
            date: Some(day(2025, 6, 1)),
            ..DonationPatch::default()
        }
        .apply_to(&mut donation);

        assert_eq!(donation.donor_name, "Jane Doe");
        assert_eq!(donation.donation_type, DonationType::Clothing);
        assert_eq!(donation.amount, 20.0);
        assert_eq!(donation.date, day(2025, 6, 1));
    }
}
