// ABOUTME: Data layer and persistence for Command Vault
// ABOUTME: SQLite pool setup, schema migrations, and CRUD storage per entity

pub mod commands;
pub mod db;
pub mod error;
pub mod sections;
pub mod workspaces;

pub use commands::CommandStorage;
pub use db::DbState;
pub use error::{StorageError, StorageResult};
pub use sections::SectionStorage;
pub use workspaces::WorkspaceStorage;
