// ABOUTME: Section storage layer using SQLite
// ABOUTME: Handles CRUD operations for sections scoped to a workspace

use sqlx::{Row, SqlitePool};
use tracing::debug;

use cmdvault_core::{
    format_timestamp, generate_id, timestamp_now, Section, SectionCreateInput,
    SectionUpdateInput,
};

use crate::error::{StorageError, StorageResult};

pub struct SectionStorage {
    pool: SqlitePool,
}

impl SectionStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List the sections of one workspace by position, then creation time
    pub async fn list_sections(&self, workspace_id: &str) -> StorageResult<Vec<Section>> {
        debug!("Fetching sections for workspace: {}", workspace_id);

        let rows = sqlx::query(
            "SELECT * FROM sections WHERE workspace_id = ? ORDER BY position ASC, created_at ASC",
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| self.row_to_section(row)).collect()
    }

    /// Get a single section by ID
    pub async fn get_section(&self, section_id: &str) -> StorageResult<Section> {
        debug!("Fetching section: {}", section_id);

        let row = sqlx::query("SELECT * FROM sections WHERE id = ?")
            .bind(section_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        self.row_to_section(&row)
    }

    /// Create a new section. Fails with a foreign key violation if the workspace is missing.
    pub async fn create_section(&self, input: SectionCreateInput) -> StorageResult<Section> {
        let section_id = generate_id();
        let now = timestamp_now();

        debug!(
            "Creating section: {} (workspace: {}, title: {})",
            section_id, input.workspace_id, input.title
        );

        sqlx::query(
            r#"
            INSERT INTO sections (id, workspace_id, title, icon, position, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&section_id)
        .bind(&input.workspace_id)
        .bind(&input.title)
        .bind(&input.icon)
        .bind(input.position)
        .bind(format_timestamp(&now))
        .execute(&self.pool)
        .await?;

        self.get_section(&section_id).await
    }

    /// Replace a section's title, icon, and position
    pub async fn update_section(
        &self,
        section_id: &str,
        input: SectionUpdateInput,
    ) -> StorageResult<Section> {
        debug!("Updating section: {}", section_id);

        let result =
            sqlx::query("UPDATE sections SET title = ?, icon = ?, position = ? WHERE id = ?")
                .bind(&input.title)
                .bind(&input.icon)
                .bind(input.position)
                .bind(section_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_section(section_id).await
    }

    /// Delete a section and its commands; a missing ID is not an error
    pub async fn delete_section(&self, section_id: &str) -> StorageResult<bool> {
        debug!("Deleting section: {}", section_id);

        let result = sqlx::query("DELETE FROM sections WHERE id = ?")
            .bind(section_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Convert a database row to a Section
    fn row_to_section(&self, row: &sqlx::sqlite::SqliteRow) -> StorageResult<Section> {
        Ok(Section {
            id: row.try_get("id")?,
            workspace_id: row.try_get("workspace_id")?,
            title: row.try_get("title")?,
            icon: row.try_get("icon")?,
            position: row.try_get("position")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
