// ABOUTME: HTTP request handlers for workspace operations
// ABOUTME: List, create, rename, and cascading delete of workspaces

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json as ResponseJson,
    Json,
};
use serde_json::Value;
use tracing::info;

use cmdvault_core::{parse_workspace_input, Workspace};
use cmdvault_storage::DbState;

use crate::response::{Ack, ApiResult};

/// List all workspaces, newest first
pub async fn list_workspaces(State(db): State<DbState>) -> ApiResult<ResponseJson<Vec<Workspace>>> {
    info!("Listing workspaces");

    let workspaces = db.workspace_storage.list_workspaces().await?;
    Ok(ResponseJson(workspaces))
}

/// Create a new workspace
pub async fn create_workspace(
    State(db): State<DbState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ResponseJson<Workspace>> {
    let Json(body) = body?;
    let input = parse_workspace_input(&body)?;

    info!("Creating workspace: {}", input.name);

    let workspace = db.workspace_storage.create_workspace(input).await?;
    Ok(ResponseJson(workspace))
}

/// Rename a workspace
pub async fn update_workspace(
    State(db): State<DbState>,
    Path(workspace_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ResponseJson<Workspace>> {
    let Json(body) = body?;
    let input = parse_workspace_input(&body)?;

    info!("Updating workspace: {}", workspace_id);

    let workspace = db
        .workspace_storage
        .update_workspace(&workspace_id, input)
        .await?;
    Ok(ResponseJson(workspace))
}

/// Delete a workspace along with its sections and commands
pub async fn delete_workspace(
    State(db): State<DbState>,
    Path(workspace_id): Path<String>,
) -> ApiResult<ResponseJson<Ack>> {
    info!("Deleting workspace: {}", workspace_id);

    db.workspace_storage.delete_workspace(&workspace_id).await?;
    Ok(Ack::ok())
}
