//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`. Tables and
//! indexes are generated from the entity definitions with `Schema::create_table_from_entity`
//! and `Schema::create_index_from_entity`, so the database schema always matches the Rust
//! structs without hand-written SQL. Both statements use `IF NOT EXISTS`, which makes
//! startup against an existing database file a no-op.

use crate::entities::Donation;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

/// Database used when neither the config file nor `DATABASE_URL` names one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://donations.db?mode=rwc";

/// Opens a connection to `database_url` and makes sure the tables exist.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    info!("Connected to database at {database_url}");
    create_tables(&db).await?;
    Ok(db)
}

/// Creates the `donations` table and its `donor_name` index if they are missing.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut donation_table = schema.create_table_from_entity(Donation);
    donation_table.if_not_exists();
    db.execute(builder.build(&donation_table)).await?;

    for mut index in schema.create_index_from_entity(Donation) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }

    Ok(())
}
