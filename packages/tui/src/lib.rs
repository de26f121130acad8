//! Command Vault TUI - terminal client for a Command Vault server
//!
//! Browses workspaces, sections, and commands over the REST API and
//! edits them through modal forms, built with ratatui.

pub mod api;
pub mod app;
pub mod controller;
pub mod editor;
pub mod events;
pub mod highlight;
pub mod input;
pub mod state;
pub mod ui;

#[cfg(test)]
mod testing;

pub use api::{VaultApi, VaultClient};
pub use app::App;
pub use controller::VaultController;
