//! Entity module - Contains the `SeaORM` entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod donation;

pub use donation::{DonationType, Entity as Donation, Model as DonationModel};
