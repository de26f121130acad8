// ABOUTME: HTTP request handlers for section operations
// ABOUTME: Sections are listed per workspace and carry an icon and manual position

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json as ResponseJson,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use cmdvault_core::{parse_section_create, parse_section_update, Section};
use cmdvault_storage::DbState;

use crate::response::{Ack, ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ListSectionsQuery {
    #[serde(rename = "workspaceId")]
    pub workspace_id: Option<String>,
}

/// List the sections of a workspace
pub async fn list_sections(
    State(db): State<DbState>,
    query: Result<Query<ListSectionsQuery>, QueryRejection>,
) -> ApiResult<ResponseJson<Vec<Section>>> {
    let Query(params) = query?;
    let workspace_id = params
        .workspace_id
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingFilter("workspaceId"))?;

    info!("Listing sections for workspace: {}", workspace_id);

    let sections = db.section_storage.list_sections(&workspace_id).await?;
    Ok(ResponseJson(sections))
}

/// Create a new section inside a workspace
pub async fn create_section(
    State(db): State<DbState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ResponseJson<Section>> {
    let Json(body) = body?;
    let input = parse_section_create(&body)?;

    info!(
        "Creating section '{}' in workspace: {}",
        input.title, input.workspace_id
    );

    let section = db.section_storage.create_section(input).await?;
    Ok(ResponseJson(section))
}

pub async fn update_section(
    State(db): State<DbState>,
    Path(section_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ResponseJson<Section>> {
    let Json(body) = body?;
    let input = parse_section_update(&body)?;

    info!("Updating section: {}", section_id);

    let section = db.section_storage.update_section(&section_id, input).await?;
    Ok(ResponseJson(section))
}

/// Delete a section and its commands
pub async fn delete_section(
    State(db): State<DbState>,
    Path(section_id): Path<String>,
) -> ApiResult<ResponseJson<Ack>> {
    info!("Deleting section: {}", section_id);

    db.section_storage.delete_section(&section_id).await?;
    Ok(Ack::ok())
}
