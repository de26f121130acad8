// ABOUTME: Workspace storage layer using SQLite
// ABOUTME: Handles CRUD operations for workspaces and the default-workspace seed

use sqlx::{Row, SqlitePool};
use tracing::debug;

use cmdvault_core::{
    format_timestamp, generate_id, timestamp_now, Workspace, WorkspaceInput,
    DEFAULT_WORKSPACE_NAME,
};

use crate::error::{StorageError, StorageResult};

pub struct WorkspaceStorage {
    pool: SqlitePool,
}

impl WorkspaceStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all workspaces, newest first
    pub async fn list_workspaces(&self) -> StorageResult<Vec<Workspace>> {
        debug!("Fetching workspaces");

        let rows = sqlx::query("SELECT * FROM workspaces ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(|row| self.row_to_workspace(row)).collect()
    }

    /// Get a single workspace by ID
    pub async fn get_workspace(&self, workspace_id: &str) -> StorageResult<Workspace> {
        debug!("Fetching workspace: {}", workspace_id);

        let row = sqlx::query("SELECT * FROM workspaces WHERE id = ?")
            .bind(workspace_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        self.row_to_workspace(&row)
    }

    pub async fn count_workspaces(&self) -> StorageResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workspaces")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Create a new workspace
    pub async fn create_workspace(&self, input: WorkspaceInput) -> StorageResult<Workspace> {
        let workspace_id = generate_id();
        let now = timestamp_now();

        debug!("Creating workspace: {} (name: {})", workspace_id, input.name);

        sqlx::query("INSERT INTO workspaces (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&workspace_id)
            .bind(&input.name)
            .bind(format_timestamp(&now))
            .execute(&self.pool)
            .await?;

        self.get_workspace(&workspace_id).await
    }

    /// Rename a workspace
    pub async fn update_workspace(
        &self,
        workspace_id: &str,
        input: WorkspaceInput,
    ) -> StorageResult<Workspace> {
        debug!("Updating workspace: {}", workspace_id);

        let result = sqlx::query("UPDATE workspaces SET name = ? WHERE id = ?")
            .bind(&input.name)
            .bind(workspace_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_workspace(workspace_id).await
    }

    /// Delete a workspace together with its sections and commands.
    /// Returns whether a row was removed; a missing ID is not an error.
    pub async fn delete_workspace(&self, workspace_id: &str) -> StorageResult<bool> {
        debug!("Deleting workspace: {}", workspace_id);

        let result = sqlx::query("DELETE FROM workspaces WHERE id = ?")
            .bind(workspace_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert the default workspace when the store has none.
    /// Only the workspace is seeded, never sections or commands.
    pub async fn seed_default_workspace(&self) -> StorageResult<Option<Workspace>> {
        if self.count_workspaces().await? > 0 {
            return Ok(None);
        }

        let workspace = self
            .create_workspace(WorkspaceInput {
                name: DEFAULT_WORKSPACE_NAME.to_string(),
            })
            .await?;

        Ok(Some(workspace))
    }

    /// Convert a database row to a Workspace
    fn row_to_workspace(&self, row: &sqlx::sqlite::SqliteRow) -> StorageResult<Workspace> {
        Ok(Workspace {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
