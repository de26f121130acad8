// ABOUTME: Command storage layer using SQLite
// ABOUTME: Handles CRUD operations for command snippets scoped to a section

use sqlx::{Row, SqlitePool};
use tracing::debug;

use cmdvault_core::{
    format_timestamp, generate_id, normalize_language, timestamp_now, CommandCreateInput,
    CommandEntry, CommandUpdateInput,
};

use crate::error::{StorageError, StorageResult};

pub struct CommandStorage {
    pool: SqlitePool,
}

impl CommandStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List the commands of one section by position, most recently updated first
    pub async fn list_commands(&self, section_id: &str) -> StorageResult<Vec<CommandEntry>> {
        debug!("Fetching commands for section: {}", section_id);

        let rows = sqlx::query(
            "SELECT * FROM commands WHERE section_id = ? ORDER BY position ASC, updated_at DESC",
        )
        .bind(section_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| self.row_to_command(row)).collect()
    }

    /// Get a single command by ID
    pub async fn get_command(&self, command_id: &str) -> StorageResult<CommandEntry> {
        debug!("Fetching command: {}", command_id);

        let row = sqlx::query("SELECT * FROM commands WHERE id = ?")
            .bind(command_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        self.row_to_command(&row)
    }

    /// Create a new command. Fails with a foreign key violation if the section is missing.
    pub async fn create_command(&self, input: CommandCreateInput) -> StorageResult<CommandEntry> {
        let command_id = generate_id();
        let now = format_timestamp(&timestamp_now());

        debug!(
            "Creating command: {} (section: {}, title: {})",
            command_id, input.section_id, input.title
        );

        sqlx::query(
            r#"
            INSERT INTO commands (id, section_id, title, description, language, command, position, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&command_id)
        .bind(&input.section_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(normalize_language(&input.language))
        .bind(&input.command)
        .bind(input.position)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_command(&command_id).await
    }

    /// Replace a command's editable fields and refresh its update timestamp
    pub async fn update_command(
        &self,
        command_id: &str,
        input: CommandUpdateInput,
    ) -> StorageResult<CommandEntry> {
        debug!("Updating command: {}", command_id);

        let now = timestamp_now();

        let result = sqlx::query(
            r#"
            UPDATE commands
            SET title = ?, description = ?, language = ?, command = ?, position = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(normalize_language(&input.language))
        .bind(&input.command)
        .bind(input.position)
        .bind(format_timestamp(&now))
        .bind(command_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_command(command_id).await
    }

    /// Delete a command; a missing ID is not an error
    pub async fn delete_command(&self, command_id: &str) -> StorageResult<bool> {
        debug!("Deleting command: {}", command_id);

        let result = sqlx::query("DELETE FROM commands WHERE id = ?")
            .bind(command_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Convert a database row to a CommandEntry
    fn row_to_command(&self, row: &sqlx::sqlite::SqliteRow) -> StorageResult<CommandEntry> {
        Ok(CommandEntry {
            id: row.try_get("id")?,
            section_id: row.try_get("section_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            language: row.try_get("language")?,
            command: row.try_get("command")?,
            position: row.try_get("position")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
