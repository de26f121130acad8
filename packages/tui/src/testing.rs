use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use cmdvault_core::{
    CommandCreateInput, CommandEntry, CommandUpdateInput, Section, SectionCreateInput,
    SectionUpdateInput, Workspace, WorkspaceInput,
};

use crate::api::{ClientError, ClientResult, VaultApi};

/// In-memory stand-in for the server that records every call
#[derive(Default)]
pub(crate) struct FakeApi {
    store: Mutex<FakeStore>,
}

#[derive(Default)]
pub(crate) struct FakeStore {
    workspaces: Vec<Workspace>,
    sections: Vec<Section>,
    commands: Vec<CommandEntry>,
    calls: Vec<String>,
    next_id: u32,
    fail_writes: bool,
}

impl FakeStore {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }

    fn write_guard(&self) -> ClientResult<()> {
        if self.fail_writes {
            return Err(ClientError::Status {
                status: 500,
                message: "Database error".to_string(),
            });
        }
        Ok(())
    }
}

impl FakeApi {
    pub(crate) fn with_workspaces(names: &[&str]) -> Self {
        let api = FakeApi::default();
        {
            let mut store = api.store.lock().unwrap();
            for name in names {
                let id = store.id("w");
                store.workspaces.push(Workspace {
                    id,
                    name: name.to_string(),
                    created_at: Utc::now(),
                });
            }
        }
        api
    }

    pub(crate) fn add_section(&self, workspace_id: &str, title: &str) -> String {
        let mut store = self.store.lock().unwrap();
        let id = store.id("s");
        store.sections.push(Section {
            id: id.clone(),
            workspace_id: workspace_id.to_string(),
            title: title.to_string(),
            icon: "terminal".to_string(),
            position: 0,
            created_at: Utc::now(),
        });
        id
    }

    pub(crate) fn add_command(&self, section_id: &str, title: &str) -> String {
        let mut store = self.store.lock().unwrap();
        let id = store.id("c");
        store.commands.push(CommandEntry {
            id: id.clone(),
            section_id: section_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            language: "bash".to_string(),
            command: "ls".to_string(),
            position: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.store.lock().unwrap().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.store.lock().unwrap().calls.clear();
    }

    pub(crate) fn fail_writes(&self) {
        self.store.lock().unwrap().fail_writes = true;
    }

    fn record(&self, call: String) -> std::sync::MutexGuard<'_, FakeStore> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(call);
        store
    }
}

#[async_trait]
impl VaultApi for FakeApi {
    async fn list_workspaces(&self) -> ClientResult<Vec<Workspace>> {
        let store = self.record("list_workspaces".to_string());
        Ok(store.workspaces.clone())
    }

    async fn create_workspace(&self, input: &WorkspaceInput) -> ClientResult<Workspace> {
        let mut store = self.record("create_workspace".to_string());
        store.write_guard()?;
        let workspace = Workspace {
            id: store.id("w"),
            name: input.name.clone(),
            created_at: Utc::now(),
        };
        store.workspaces.insert(0, workspace.clone());
        Ok(workspace)
    }

    async fn update_workspace(
        &self,
        id: &str,
        input: &WorkspaceInput,
    ) -> ClientResult<Workspace> {
        let mut store = self.record(format!("update_workspace {}", id));
        store.write_guard()?;
        let workspace = store
            .workspaces
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(ClientError::Status {
                status: 404,
                message: "Record not found".to_string(),
            })?;
        workspace.name = input.name.clone();
        Ok(workspace.clone())
    }

    async fn delete_workspace(&self, id: &str) -> ClientResult<()> {
        let mut store = self.record(format!("delete_workspace {}", id));
        store.write_guard()?;
        store.workspaces.retain(|w| w.id != id);
        let doomed: Vec<String> = store
            .sections
            .iter()
            .filter(|s| s.workspace_id == id)
            .map(|s| s.id.clone())
            .collect();
        store.sections.retain(|s| s.workspace_id != id);
        store.commands.retain(|c| !doomed.contains(&c.section_id));
        Ok(())
    }

    async fn list_sections(&self, workspace_id: &str) -> ClientResult<Vec<Section>> {
        let store = self.record(format!("list_sections {}", workspace_id));
        Ok(store
            .sections
            .iter()
            .filter(|s| s.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn create_section(&self, input: &SectionCreateInput) -> ClientResult<Section> {
        let mut store = self.record("create_section".to_string());
        store.write_guard()?;
        let section = Section {
            id: store.id("s"),
            workspace_id: input.workspace_id.clone(),
            title: input.title.clone(),
            icon: input.icon.clone(),
            position: input.position,
            created_at: Utc::now(),
        };
        store.sections.push(section.clone());
        Ok(section)
    }

    async fn update_section(
        &self,
        id: &str,
        input: &SectionUpdateInput,
    ) -> ClientResult<Section> {
        let mut store = self.record(format!("update_section {}", id));
        store.write_guard()?;
        let section = store
            .sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ClientError::Status {
                status: 404,
                message: "Record not found".to_string(),
            })?;
        section.title = input.title.clone();
        section.icon = input.icon.clone();
        section.position = input.position;
        Ok(section.clone())
    }

    async fn delete_section(&self, id: &str) -> ClientResult<()> {
        let mut store = self.record(format!("delete_section {}", id));
        store.write_guard()?;
        store.sections.retain(|s| s.id != id);
        store.commands.retain(|c| c.section_id != id);
        Ok(())
    }

    async fn list_commands(&self, section_id: &str) -> ClientResult<Vec<CommandEntry>> {
        let store = self.record(format!("list_commands {}", section_id));
        Ok(store
            .commands
            .iter()
            .filter(|c| c.section_id == section_id)
            .cloned()
            .collect())
    }

    async fn create_command(&self, input: &CommandCreateInput) -> ClientResult<CommandEntry> {
        let mut store = self.record("create_command".to_string());
        store.write_guard()?;
        let now = Utc::now();
        let command = CommandEntry {
            id: store.id("c"),
            section_id: input.section_id.clone(),
            title: input.title.clone(),
            description: input.description.clone(),
            language: input.language.to_lowercase(),
            command: input.command.clone(),
            position: input.position,
            created_at: now,
            updated_at: now,
        };
        store.commands.push(command.clone());
        Ok(command)
    }

    async fn update_command(
        &self,
        id: &str,
        input: &CommandUpdateInput,
    ) -> ClientResult<CommandEntry> {
        let mut store = self.record(format!("update_command {}", id));
        store.write_guard()?;
        let command = store
            .commands
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ClientError::Status {
                status: 404,
                message: "Record not found".to_string(),
            })?;
        command.title = input.title.clone();
        command.command = input.command.clone();
        command.updated_at = Utc::now();
        Ok(command.clone())
    }

    async fn delete_command(&self, id: &str) -> ClientResult<()> {
        let mut store = self.record(format!("delete_command {}", id));
        store.write_guard()?;
        store.commands.retain(|c| c.id != id);
        Ok(())
    }
}
