//! SQLite-backed translation record store.
//!
//! Split into focused submodules:
//! - `records`: the `TranslationStore` implementation (find, upsert, delete, list)

mod records;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;
use translatable_core::{config::StoreConfig, error::TranslatableError, shellexpand};

/// Persistent translation store backed by SQLite.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Create a new store, running migrations on first use.
    pub async fn new(config: &StoreConfig) -> Result<Self, TranslatableError> {
        if config.backend != "sqlite" {
            return Err(TranslatableError::Config(format!(
                "unsupported store backend: {}",
                config.backend
            )));
        }

        let db_path = shellexpand(&config.db_path);

        // Ensure parent directory exists.
        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TranslatableError::Storage(format!("failed to create data dir: {e}"))
            })?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| TranslatableError::Storage(format!("invalid db path: {e}")))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .map_err(|e| TranslatableError::Storage(format!("failed to connect to sqlite: {e}")))?;

        let store = Self::from_pool(pool).await?;

        info!("Translation store initialized at {db_path}");

        Ok(store)
    }

    /// Wrap an existing pool (e.g. one shared with the host application),
    /// running migrations on it.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, TranslatableError> {
        Self::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run SQL migrations, tracking which have already been applied.
    async fn run_migrations(pool: &SqlitePool) -> Result<(), TranslatableError> {
        sqlx::raw_sql(
            "CREATE TABLE IF NOT EXISTS _migrations (
                name TEXT PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )
        .execute(pool)
        .await
        .map_err(|e| {
            TranslatableError::Storage(format!("failed to create migrations table: {e}"))
        })?;

        let migrations: &[(&str, &str)] =
            &[("001_init", include_str!("../../migrations/001_init.sql"))];

        for (name, sql) in migrations {
            let applied: Option<(String,)> =
                sqlx::query_as("SELECT name FROM _migrations WHERE name = ?")
                    .bind(name)
                    .fetch_optional(pool)
                    .await
                    .map_err(|e| {
                        TranslatableError::Storage(format!("failed to check migration {name}: {e}"))
                    })?;

            if applied.is_some() {
                continue;
            }

            sqlx::raw_sql(sql)
                .execute(pool)
                .await
                .map_err(|e| TranslatableError::Storage(format!("migration {name} failed: {e}")))?;

            sqlx::query("INSERT INTO _migrations (name) VALUES (?)")
                .bind(name)
                .execute(pool)
                .await
                .map_err(|e| {
                    TranslatableError::Storage(format!("failed to record migration {name}: {e}"))
                })?;

            info!("Applied migration {name}");
        }
        Ok(())
    }
}
