// ABOUTME: HTTP API layer for Command Vault providing REST endpoints and routing
// ABOUTME: One router per resource, all sharing the storage handle as state

use axum::{
    routing::{get, put},
    Router,
};

use cmdvault_storage::DbState;

pub mod commands_handlers;
pub mod health;
pub mod response;
pub mod sections_handlers;
pub mod workspaces_handlers;

pub use response::{Ack, ApiError};

/// Creates the workspaces API router (nested under /api/workspaces)
pub fn create_workspaces_router() -> Router<DbState> {
    Router::new()
        .route(
            "/",
            get(workspaces_handlers::list_workspaces).post(workspaces_handlers::create_workspace),
        )
        .route(
            "/{id}",
            put(workspaces_handlers::update_workspace).delete(workspaces_handlers::delete_workspace),
        )
}

/// Creates the sections API router (nested under /api/sections)
pub fn create_sections_router() -> Router<DbState> {
    Router::new()
        .route(
            "/",
            get(sections_handlers::list_sections).post(sections_handlers::create_section),
        )
        .route(
            "/{id}",
            put(sections_handlers::update_section).delete(sections_handlers::delete_section),
        )
}

/// Creates the commands API router (nested under /api/commands)
pub fn create_commands_router() -> Router<DbState> {
    Router::new()
        .route(
            "/",
            get(commands_handlers::list_commands).post(commands_handlers::create_command),
        )
        .route(
            "/{id}",
            put(commands_handlers::update_command).delete(commands_handlers::delete_command),
        )
}

/// Creates the full `/api` router with every resource and the health check,
/// bound to the given storage handle.
pub fn create_api_router(db: DbState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/workspaces", create_workspaces_router())
        .nest("/sections", create_sections_router())
        .nest("/commands", create_commands_router())
        .with_state(db)
}
