use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trainer_hub::api::{create_routes, AppState};
use trainer_hub::config::{run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder, StorageBackend};
use trainer_hub::repositories::{InMemoryStore, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if config.is_development() {
        info!("Running in development mode");
    }

    let (state, seeder) = match config.storage_backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            let store = Arc::new(InMemoryStore::new());
            (
                AppState::from_store(store.clone(), &config.jwt_secret),
                DatabaseSeeder::new(store.clone(), store),
            )
        }
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = db_config.create_pool().await?;
            run_migrations(&pool).await?;
            info!("Connected to PostgreSQL");
            let store = Arc::new(PgStore::new(pool));
            (
                AppState::from_store(store.clone(), &config.jwt_secret),
                DatabaseSeeder::new(store.clone(), store),
            )
        }
    };

    if config.seed_demo_data {
        seeder.seed_all().await?;
    }

    let app = create_routes(state);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!("Trainer Hub server starting on http://{}", config.server_address());
    info!("Health check available at http://{}/health", config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
