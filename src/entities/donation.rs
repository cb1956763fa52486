//! Donation entity - The single table of the donation log.
//!
//! Each row records one contribution: who gave it, what kind it was, how much,
//! and on which day. The `donation_type` column is stored as its lowercase name.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of contribution a donation represents
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum DonationType {
    /// Cash or other monetary gifts
    #[sea_orm(string_value = "money")]
    Money,
    /// Food items
    #[sea_orm(string_value = "food")]
    Food,
    /// Clothing items
    #[sea_orm(string_value = "clothing")]
    Clothing,
    /// Anything else
    #[sea_orm(string_value = "other")]
    Other,
}

impl DonationType {
    /// All donation types in declaration order.
    pub const ALL: [Self; 4] = [Self::Money, Self::Food, Self::Clothing, Self::Other];

    /// Wire and storage name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Money => "money",
            Self::Food => "food",
            Self::Clothing => "clothing",
            Self::Other => "other",
        }
    }
}

/// Returned when a string names no known donation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDonationType(pub String);

impl FromStr for DonationType {
    type Err = UnknownDonationType;

    // Matching is exact: "Money" is not "money".
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownDonationType(s.to_string()))
    }
}

/// Donation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    /// Unique identifier, assigned on insert and never reused
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the donor, stored trimmed
    #[sea_orm(indexed)]
    pub donor_name: String,
    /// Kind of contribution
    pub donation_type: DonationType,
    /// Amount of money or quantity of goods, always positive
    pub amount: f64,
    /// Day the donation was made
    pub date: Date,
}

/// Donations have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
