// ABOUTME: Entity and payload types for workspaces, sections, and commands
// ABOUTME: Records mirror the stored rows; inputs are the validated write payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level container of sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Manually ordered group of commands inside a workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub workspace_id: String,
    pub title: String,
    pub icon: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

/// A stored snippet with its explanation and language tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub id: String,
    pub section_id: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub command: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or renaming a workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceInput {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCreateInput {
    pub workspace_id: String,
    pub title: String,
    pub icon: String,
    pub position: i64,
}

/// Full replacement of a section's editable fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionUpdateInput {
    pub title: String,
    pub icon: String,
    pub position: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandCreateInput {
    pub section_id: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub command: String,
    pub position: i64,
}

/// Full replacement of a command's editable fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandUpdateInput {
    pub title: String,
    pub description: String,
    pub language: String,
    pub command: String,
    pub position: i64,
}
