use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use cmdvault_core::{
    CommandCreateInput, CommandEntry, CommandUpdateInput, Section, SectionCreateInput,
    SectionUpdateInput, Workspace, WorkspaceInput,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response; `message` is the server's `error` field when present
    #[error("{message}")]
    Status { status: u16, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Operations the terminal client needs from the vault server
#[async_trait]
pub trait VaultApi: Send + Sync {
    async fn list_workspaces(&self) -> ClientResult<Vec<Workspace>>;
    async fn create_workspace(&self, input: &WorkspaceInput) -> ClientResult<Workspace>;
    async fn update_workspace(&self, id: &str, input: &WorkspaceInput) -> ClientResult<Workspace>;
    async fn delete_workspace(&self, id: &str) -> ClientResult<()>;

    async fn list_sections(&self, workspace_id: &str) -> ClientResult<Vec<Section>>;
    async fn create_section(&self, input: &SectionCreateInput) -> ClientResult<Section>;
    async fn update_section(&self, id: &str, input: &SectionUpdateInput) -> ClientResult<Section>;
    async fn delete_section(&self, id: &str) -> ClientResult<()>;

    async fn list_commands(&self, section_id: &str) -> ClientResult<Vec<CommandEntry>>;
    async fn create_command(&self, input: &CommandCreateInput) -> ClientResult<CommandEntry>;
    async fn update_command(
        &self,
        id: &str,
        input: &CommandUpdateInput,
    ) -> ClientResult<CommandEntry>;
    async fn delete_command(&self, id: &str) -> ClientResult<()>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP API client for communicating with the Command Vault server
pub struct VaultClient {
    client: Client,
    base_url: String,
}

impl VaultClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Check server health
    pub async fn health_check(&self) -> ClientResult<bool> {
        let response = self.client.get(self.url("/health")).send().await?;
        Ok(response.status().is_success())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });

            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    async fn send_delete(&self, path: &str) -> ClientResult<()> {
        self.send::<serde_json::Value>(self.client.delete(self.url(path)))
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl VaultApi for VaultClient {
    async fn list_workspaces(&self) -> ClientResult<Vec<Workspace>> {
        self.send(self.client.get(self.url("/workspaces"))).await
    }

    async fn create_workspace(&self, input: &WorkspaceInput) -> ClientResult<Workspace> {
        self.send(self.client.post(self.url("/workspaces")).json(input))
            .await
    }

    async fn update_workspace(&self, id: &str, input: &WorkspaceInput) -> ClientResult<Workspace> {
        let path = format!("/workspaces/{}", id);
        self.send(self.client.put(self.url(&path)).json(input)).await
    }

    async fn delete_workspace(&self, id: &str) -> ClientResult<()> {
        self.send_delete(&format!("/workspaces/{}", id)).await
    }

    async fn list_sections(&self, workspace_id: &str) -> ClientResult<Vec<Section>> {
        let request = self
            .client
            .get(self.url("/sections"))
            .query(&[("workspaceId", workspace_id)]);
        self.send(request).await
    }

    async fn create_section(&self, input: &SectionCreateInput) -> ClientResult<Section> {
        self.send(self.client.post(self.url("/sections")).json(input))
            .await
    }

    async fn update_section(&self, id: &str, input: &SectionUpdateInput) -> ClientResult<Section> {
        let path = format!("/sections/{}", id);
        self.send(self.client.put(self.url(&path)).json(input)).await
    }

    async fn delete_section(&self, id: &str) -> ClientResult<()> {
        self.send_delete(&format!("/sections/{}", id)).await
    }

    async fn list_commands(&self, section_id: &str) -> ClientResult<Vec<CommandEntry>> {
        let request = self
            .client
            .get(self.url("/commands"))
            .query(&[("sectionId", section_id)]);
        self.send(request).await
    }

    async fn create_command(&self, input: &CommandCreateInput) -> ClientResult<CommandEntry> {
        self.send(self.client.post(self.url("/commands")).json(input))
            .await
    }

    async fn update_command(
        &self,
        id: &str,
        input: &CommandUpdateInput,
    ) -> ClientResult<CommandEntry> {
        let path = format!("/commands/{}", id);
        self.send(self.client.put(self.url(&path)).json(input)).await
    }

    async fn delete_command(&self, id: &str) -> ClientResult<()> {
        self.send_delete(&format!("/commands/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdvault_storage::DbState;
    use pretty_assertions::assert_eq;
    use tokio::net::TcpListener;

    /// Serve the real API on an ephemeral port and point a client at it
    async fn live_client() -> VaultClient {
        let db = DbState::in_memory().await.unwrap();
        let app = axum::Router::new().nest("/api", cmdvault_api::create_api_router(db));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        VaultClient::new(format!("http://{}", addr))
    }

    fn section_input(workspace_id: &str, title: &str, position: i64) -> SectionCreateInput {
        SectionCreateInput {
            workspace_id: workspace_id.to_string(),
            title: title.to_string(),
            icon: "terminal".to_string(),
            position,
        }
    }

    fn command_input(section_id: &str, title: &str, command: &str) -> CommandCreateInput {
        CommandCreateInput {
            section_id: section_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            language: "bash".to_string(),
            command: command.to_string(),
            position: 0,
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = VaultClient::new("http://localhost:5179/");
        assert_eq!(client.base_url(), "http://localhost:5179");
        assert_eq!(client.url("/health"), "http://localhost:5179/api/health");
    }

    #[test]
    fn test_status_error_displays_server_message() {
        let err = ClientError::Status {
            status: 400,
            message: "workspaceId required".to_string(),
        };
        assert_eq!(err.to_string(), "workspaceId required");
    }

    #[tokio::test]
    async fn test_health_check_against_live_server() {
        let client = live_client().await;
        assert!(client.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_workspace_round_trip() {
        let client = live_client().await;

        let seeded = client.list_workspaces().await.unwrap();
        assert_eq!(seeded.len(), 1);

        let created = client
            .create_workspace(&WorkspaceInput {
                name: "Ops".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.name, "Ops");

        let renamed = client
            .update_workspace(
                &created.id,
                &WorkspaceInput {
                    name: "Platform".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.id, created.id);
        assert_eq!(renamed.name, "Platform");

        client.delete_workspace(&created.id).await.unwrap();
        let remaining = client.list_workspaces().await.unwrap();
        assert!(remaining.iter().all(|w| w.id != created.id));
        assert_eq!(remaining.len(), 1);
    }

    #[tokio::test]
    async fn test_section_round_trip_filters_by_workspace() {
        let client = live_client().await;
        let workspace_id = client.list_workspaces().await.unwrap()[0].id.clone();
        let other = client
            .create_workspace(&WorkspaceInput {
                name: "Other".to_string(),
            })
            .await
            .unwrap();

        let docker = client
            .create_section(&section_input(&workspace_id, "Docker", 2))
            .await
            .unwrap();
        let git = client
            .create_section(&section_input(&workspace_id, "Git", 1))
            .await
            .unwrap();
        client
            .create_section(&section_input(&other.id, "Elsewhere", 0))
            .await
            .unwrap();

        let titles: Vec<String> = client
            .list_sections(&workspace_id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Git".to_string(), "Docker".to_string()]);

        let updated = client
            .update_section(
                &docker.id,
                &SectionUpdateInput {
                    title: "Containers".to_string(),
                    icon: "cpu".to_string(),
                    position: 0,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Containers");
        assert_eq!(updated.icon, "cpu");
        assert_eq!(updated.position, 0);

        client.delete_section(&git.id).await.unwrap();
        let remaining = client.list_sections(&workspace_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, docker.id);
    }

    #[tokio::test]
    async fn test_command_round_trip_filters_by_section() {
        let client = live_client().await;
        let workspace_id = client.list_workspaces().await.unwrap()[0].id.clone();
        let section = client
            .create_section(&section_input(&workspace_id, "Git", 0))
            .await
            .unwrap();
        let other = client
            .create_section(&section_input(&workspace_id, "Docker", 1))
            .await
            .unwrap();

        let status = client
            .create_command(&command_input(&section.id, "Status", "git status"))
            .await
            .unwrap();
        client
            .create_command(&command_input(&other.id, "Ps", "docker ps"))
            .await
            .unwrap();

        let listed = client.list_commands(&section.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].command, "git status");

        let updated = client
            .update_command(
                &status.id,
                &CommandUpdateInput {
                    title: "Short status".to_string(),
                    description: "Compact output".to_string(),
                    language: "bash".to_string(),
                    command: "git status -sb".to_string(),
                    position: 3,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.command, "git status -sb");
        assert_eq!(updated.position, 3);
        assert!(updated.updated_at >= status.updated_at);

        client.delete_command(&status.id).await.unwrap();
        assert!(client.list_commands(&section.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_surfaces_server_message() {
        let client = live_client().await;

        let err = client
            .create_workspace(&WorkspaceInput {
                name: String::new(),
            })
            .await
            .unwrap_err();

        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "name: Must contain at least 1 character(s)");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_resource_surfaces_not_found() {
        let client = live_client().await;

        let err = client
            .update_workspace(
                "missing",
                &WorkspaceInput {
                    name: "Nope".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Status { status: 404, .. }));
    }
}
