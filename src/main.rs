use dotenvy::dotenv;
use shelter_donations::{
    config::{self, StorageBackend, database, seed},
    core::{DonationStore, MemoryStore, SqlStore},
    errors::Result,
    http,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 4. Open the selected store and serve
    match app_config.storage.backend {
        StorageBackend::Sqlite => {
            let db = database::create_connection(&app_config.storage.database_url)
                .await
                .inspect(|_| info!("Database initialized successfully."))
                .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
            run(SqlStore::new(db), &app_config).await
        }
        StorageBackend::Memory => {
            info!("Using in-memory store; donations are lost on shutdown.");
            run(MemoryStore::new(), &app_config).await
        }
    }
}

async fn run<S: DonationStore>(store: S, app_config: &config::AppConfig) -> Result<()> {
    // 5. Seed initial donations (only into an empty store)
    seed::seed_initial_donations(&store, &app_config.seed)
        .await
        .inspect_err(|e| error!("Failed to seed initial donations: {}", e))?;

    // 6. Run the HTTP server
    http::serve(store, &app_config.server).await
}
