// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and the per-entity storage layers

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::commands::CommandStorage;
use crate::error::StorageResult;
use crate::sections::SectionStorage;
use crate::workspaces::WorkspaceStorage;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub workspace_storage: Arc<WorkspaceStorage>,
    pub section_storage: Arc<SectionStorage>,
    pub command_storage: Arc<CommandStorage>,
}

impl DbState {
    /// Create database state from an already prepared pool
    pub fn new(pool: SqlitePool) -> Self {
        let workspace_storage = Arc::new(WorkspaceStorage::new(pool.clone()));
        let section_storage = Arc::new(SectionStorage::new(pool.clone()));
        let command_storage = Arc::new(CommandStorage::new(pool.clone()));

        Self {
            pool,
            workspace_storage,
            section_storage,
            command_storage,
        }
    }

    /// Open (or create) the database file, apply the schema, and seed it if empty
    pub async fn init_with_path(database_path: &Path) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        debug!("Connecting to database: {}", database_path.display());

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("Database connection established");

        Self::prepare(pool).await
    }

    /// Private in-memory database, used by tests.
    ///
    /// The pool holds exactly one connection that never expires; every other
    /// connection would see a different empty database.
    pub async fn in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::prepare(pool).await
    }

    async fn prepare(pool: SqlitePool) -> StorageResult<Self> {
        // Every statement is CREATE ... IF NOT EXISTS, so reopening an existing file is safe
        sqlx::migrate!("./migrations").run(&pool).await?;

        debug!("Database migrations completed");

        let state = Self::new(pool);

        if let Some(seeded) = state.workspace_storage.seed_default_workspace().await? {
            info!("Seeded default workspace: {}", seeded.id);
        }

        Ok(state)
    }
}
