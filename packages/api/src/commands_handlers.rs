// ABOUTME: HTTP request handlers for command snippet operations
// ABOUTME: Commands are listed per section; updates refresh the update timestamp

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

use cmdvault_core::{parse_command_create, parse_command_update, CommandEntry};
use cmdvault_storage::DbState;

use crate::response::{Ack, ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ListCommandsQuery {
    #[serde(rename = "sectionId")]
    pub section_id: Option<String>,
}

/// List the commands of a section
pub async fn list_commands(
    State(db): State<DbState>,
    query: Result<Query<ListCommandsQuery>, QueryRejection>,
) -> ApiResult<ResponseJson<Vec<CommandEntry>>> {
    let Query(params) = query?;
    let section_id = params
        .section_id
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingFilter("sectionId"))?;

    info!("Listing commands for section: {}", section_id);

    let commands = db.command_storage.list_commands(&section_id).await?;
    Ok(ResponseJson(commands))
}

/// Create a new command inside a section
pub async fn create_command(
    State(db): State<DbState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ResponseJson<CommandEntry>> {
    let Json(body) = body?;
    let input = parse_command_create(&body)?;

    info!(
        "Creating command '{}' in section: {}",
        input.title, input.section_id
    );

    let command = db.command_storage.create_command(input).await?;
    Ok(ResponseJson(command))
}

/// Replace every editable field of a command
pub async fn update_command(
    State(db): State<DbState>,
    Path(command_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ResponseJson<CommandEntry>> {
    let Json(body) = body?;
    let input = parse_command_update(&body)?;

    info!("Updating command: {}", command_id);

    let command = db.command_storage.update_command(&command_id, input).await?;
    Ok(ResponseJson(command))
}

pub async fn delete_command(
    State(db): State<DbState>,
    Path(command_id): Path<String>,
) -> ApiResult<ResponseJson<Ack>> {
    info!("Deleting command: {}", command_id);

    db.command_storage.delete_command(&command_id).await?;
    Ok(Ack::ok())
}
