//! Donation report generation.
//!
//! Summaries are computed from an already-fetched list of donations, so they work the
//! same over any store.

use crate::entities::{DonationModel, DonationType};
use serde::Serialize;

/// Count and sum of donations of one type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeTotal {
    /// Donation type being summarized
    pub donation_type: DonationType,
    /// Number of donations of this type
    pub count: u64,
    /// Sum of their amounts
    pub total_amount: f64,
}

/// Totals per donation type, one entry for every type in declaration order.
///
/// Types without donations are reported with zero count and amount.
#[must_use]
pub fn totals_by_type(donations: &[DonationModel]) -> Vec<TypeTotal> {
    DonationType::ALL
        .into_iter()
        .map(|donation_type| {
            let (count, total_amount) = donations
                .iter()
                .filter(|d| d.donation_type == donation_type)
                .fold((0, 0.0), |(count, sum), d| (count + 1, sum + d.amount));
            TypeTotal {
                donation_type,
                count,
                total_amount,
            }
        })
        .collect()
}
