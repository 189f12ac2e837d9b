//! Database module for postboard.
//!
//! This module provides the sqlx connection pool and migration management.
//! SQLite is the default backend; PostgreSQL is selected with the `postgres`
//! feature (build with `--no-default-features --features postgres`).

mod schema;

pub use schema::MIGRATIONS;

use std::time::Duration;

use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::datetime::now_timestamp;
use crate::Result;

#[cfg(all(feature = "sqlite", feature = "postgres"))]
compile_error!("features `sqlite` and `postgres` are mutually exclusive");

#[cfg(not(any(feature = "sqlite", feature = "postgres")))]
compile_error!("enable one of the `sqlite` or `postgres` features");

/// Connection pool for the selected backend.
#[cfg(feature = "sqlite")]
pub type DbPool = sqlx::SqlitePool;
/// Connection pool for the selected backend.
#[cfg(feature = "postgres")]
pub type DbPool = sqlx::PgPool;

/// sqlx database marker for the selected backend.
#[cfg(feature = "sqlite")]
pub type DbBackend = sqlx::Sqlite;
/// sqlx database marker for the selected backend.
#[cfg(feature = "postgres")]
pub type DbBackend = sqlx::Postgres;

/// Database wrapper owning the connection pool.
///
/// `Database` is `Send + Sync`; share it between tasks with `Arc<Database>`.
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Connect using the given configuration and apply pending migrations.
    #[cfg(feature = "sqlite")]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        use std::str::FromStr;

        use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

        info!("Connecting to database at {}", config.url);

        let in_memory = config.url.contains(":memory:") || config.url.contains("mode=memory");
        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if in_memory {
            return Self::from_sqlite_options(options, 1, config.acquire_timeout_secs).await;
        }

        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        options = options.journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Connect using the given configuration and apply pending migrations.
    #[cfg(feature = "postgres")]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        use sqlx::postgres::PgPoolOptions;

        info!("Connecting to PostgreSQL database");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Open a SQLite database file, creating it and its parent directories if needed.
    #[cfg(feature = "sqlite")]
    pub async fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.as_ref().display()),
            ..DatabaseConfig::default()
        };
        Self::connect(&config).await
    }

    /// Open an in-memory database for testing.
    ///
    /// The pool holds a single connection; every connection to `:memory:`
    /// would otherwise get its own empty database.
    #[cfg(feature = "sqlite")]
    pub async fn open_in_memory() -> Result<Self> {
        use std::str::FromStr;

        use sqlx::sqlite::SqliteConnectOptions;

        debug!("Opening in-memory database");
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        Self::from_sqlite_options(options, 1, 5).await
    }

    #[cfg(feature = "sqlite")]
    async fn from_sqlite_options(
        options: sqlx::sqlite::SqliteConnectOptions,
        max_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self> {
        use sqlx::sqlite::SqlitePoolOptions;

        // Keep the single connection alive so the in-memory database survives.
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Get the current schema version (0 for a fresh database).
    pub async fn schema_version(&self) -> Result<i64> {
        if !self.table_exists("schema_version").await? {
            return Ok(0);
        }

        let version: (i64,) = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM schema_version")
            .fetch_one(&self.pool)
            .await?;
        Ok(version.0)
    }

    /// Apply pending migrations, each in its own transaction.
    pub async fn migrate(&self) -> Result<()> {
        let current_version = self.schema_version().await?;

        if current_version as usize >= MIGRATIONS.len() {
            debug!("Database is up to date (version {})", current_version);
            return Ok(());
        }

        info!(
            "Migrating database from version {} to {}",
            current_version,
            MIGRATIONS.len()
        );

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version     BIGINT PRIMARY KEY,
                applied_at  TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        for (i, migration) in MIGRATIONS.iter().enumerate().skip(current_version as usize) {
            let version = (i + 1) as i64;
            info!("Applying migration v{}", version);

            let mut tx = self.pool.begin().await?;
            sqlx::raw_sql(migration).execute(&mut *tx).await?;
            sqlx::query("INSERT INTO schema_version (version, applied_at) VALUES ($1, $2)")
                .bind(version)
                .bind(now_timestamp())
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            debug!("Migration v{} applied successfully", version);
        }

        info!(
            "Database migration complete (now at version {})",
            MIGRATIONS.len()
        );
        Ok(())
    }

    /// Check if a table exists.
    #[cfg(feature = "sqlite")]
    pub async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = $1)",
        )
        .bind(table_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0)
    }

    /// Check if a table exists.
    #[cfg(feature = "postgres")]
    pub async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM information_schema.tables
                           WHERE table_schema = current_schema() AND table_name = $1)",
        )
        .bind(table_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(db.schema_version().await.unwrap() > 0);
    }

    #[tokio::test]
    async fn test_migrations_applied() {
        let db = Database::open_in_memory().await.unwrap();

        let version = db.schema_version().await.unwrap();
        assert_eq!(version as usize, MIGRATIONS.len());
    }

    #[tokio::test]
    async fn test_tables_exist() {
        let db = Database::open_in_memory().await.unwrap();

        assert!(db.table_exists("posts").await.unwrap());
        assert!(db.table_exists("schema_version").await.unwrap());
        assert!(!db.table_exists("nonexistent").await.unwrap());
    }

    #[tokio::test]
    async fn test_posts_table_columns() {
        let db = Database::open_in_memory().await.unwrap();

        // Fails if any column is missing
        sqlx::query(
            "SELECT id, board_id, user_id, title, content, post_type, fixed, view_count,
                    comments_count, likes_count, created_at, updated_at
             FROM posts LIMIT 0",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_migrate_twice_is_noop() {
        let db = Database::open_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        assert_eq!(db.schema_version().await.unwrap() as usize, MIGRATIONS.len());
    }

    #[tokio::test]
    async fn test_connect_memory_url() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        };
        let db = Database::connect(&config).await.unwrap();
        assert!(db.table_exists("posts").await.unwrap());
    }

    #[tokio::test]
    async fn test_open_file_database() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");

        {
            let db = Database::open(&db_path).await.unwrap();
            assert!(db.table_exists("posts").await.unwrap());
            db.close().await;
        }

        assert!(db_path.exists());

        // Reopening must not reapply migrations
        let db = Database::open(&db_path).await.unwrap();
        assert_eq!(db.schema_version().await.unwrap() as usize, MIGRATIONS.len());
        db.close().await;
    }
}
