use std::sync::Arc;

use anyhow::Result;
use sqlx::{PgPool, Postgres, migrate::MigrateDatabase, postgres::PgPoolOptions};

use crate::config::Config;

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;
pub mod types;
pub mod utils;

pub use memory::MemoryStore;
pub use store::{AttendanceStore, StoreError, TeamStore};

use repositories::{AttendanceRepository, TeamRepository};

pub async fn init_database(database_url: &str) -> Result<PgPool> {
    // Create database if it doesn't exist
    if !Postgres::database_exists(database_url).await.unwrap_or(false) {
        log::info!("Creating database {}", database_url);
        Postgres::create_database(database_url).await?;
    }

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    log::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Migrations completed successfully");

    Ok(pool)
}

/// The two store handles every service is built from.
#[derive(Clone)]
pub struct Stores {
    pub teams: Arc<dyn TeamStore>,
    pub attendance: Arc<dyn AttendanceStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            teams: Arc::new(TeamRepository::new(pool.clone())),
            attendance: Arc::new(AttendanceRepository::new(pool)),
        }
    }

    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            teams: store.clone(),
            attendance: store,
        }
    }

    pub async fn connect(config: &Config) -> Result<Self> {
        if config.uses_memory_store() {
            log::warn!("Using the in-memory store; nothing will be persisted");
            return Ok(Self::memory(Arc::new(MemoryStore::new())));
        }

        let pool = init_database(&config.database_url).await?;
        Ok(Self::postgres(pool))
    }
}
