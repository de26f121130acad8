use cmdvault_core::{
    CommandCreateInput, CommandUpdateInput, SectionCreateInput, SectionUpdateInput,
    WorkspaceInput,
};

use crate::api::{ClientResult, VaultApi};
use crate::state::{Notifications, VaultState};

/// Editable section fields as submitted from the editor
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDraft {
    pub title: String,
    pub icon: String,
    pub position: i64,
}

/// Editable command fields as submitted from the editor
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDraft {
    pub title: String,
    pub description: String,
    pub language: String,
    pub command: String,
    pub position: i64,
}

pub struct VaultController<A> {
    api: A,
    pub state: VaultState,
    pub notifications: Notifications,
}

impl<A: VaultApi> VaultController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: VaultState::new(),
            notifications: Notifications::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Initial fetch of workspaces and, through the selection, sections and commands
    pub async fn load(&mut self) {
        if let Err(e) = self.sync_workspaces().await {
            self.notifications
                .error(format!("Failed to load workspaces: {}", e));
        }
    }

    pub async fn refresh_workspaces(&mut self) -> ClientResult<()> {
        let workspaces = self.api.list_workspaces().await?;
        self.state.set_workspaces(workspaces);
        Ok(())
    }

    pub async fn refresh_sections(&mut self) -> ClientResult<()> {
        match self.state.selected_workspace_id.clone() {
            Some(workspace_id) => {
                let sections = self.api.list_sections(&workspace_id).await?;
                self.state.set_sections(sections);
            }
            None => self.state.set_sections(Vec::new()),
        }
        Ok(())
    }

    /// Fetch the commands of the selected section; no section means an empty
    /// list without a request
    pub async fn refresh_commands(&mut self) -> ClientResult<()> {
        let section_id = self.state.selected_section_id.clone().unwrap_or_default();
        if section_id.is_empty() {
            self.state.set_commands(Vec::new());
            return Ok(());
        }

        let commands = self.api.list_commands(&section_id).await?;
        self.state.set_commands(commands);
        Ok(())
    }

    /// Refetch workspaces, following through to sections when the selection moved
    async fn sync_workspaces(&mut self) -> ClientResult<()> {
        let previous_workspace = self.state.selected_workspace_id.clone();
        let previous_section = self.state.selected_section_id.clone();

        self.refresh_workspaces().await?;

        if self.state.selected_workspace_id != previous_workspace {
            self.sync_sections(previous_section).await?;
        }
        Ok(())
    }

    /// Refetch sections, following through to commands when the section
    /// selection differs from `previous_section`
    async fn sync_sections(&mut self, previous_section: Option<String>) -> ClientResult<()> {
        self.refresh_sections().await?;

        if self.state.selected_section_id != previous_section {
            self.refresh_commands().await?;
        }
        Ok(())
    }

    /// Reload everything from the server, keeping the current selection where possible
    pub async fn reload(&mut self) {
        let result = self.reload_all().await;
        self.report_refresh(result);
    }

    async fn reload_all(&mut self) -> ClientResult<()> {
        self.refresh_workspaces().await?;
        self.refresh_sections().await?;
        self.refresh_commands().await
    }

    pub async fn select_workspace(&mut self, workspace_id: &str) {
        let previous_section = self.state.selected_section_id.clone();
        if !self.state.select_workspace(workspace_id) {
            return;
        }

        if let Err(e) = self.sync_sections(previous_section).await {
            self.notifications
                .error(format!("Failed to load sections: {}", e));
        }
    }

    pub async fn select_section(&mut self, section_id: &str) {
        if !self.state.select_section(section_id) {
            return;
        }

        if let Err(e) = self.refresh_commands().await {
            self.notifications
                .error(format!("Failed to load commands: {}", e));
        }
    }

    /// Create a workspace, or rename `existing`. Returns whether the write succeeded.
    pub async fn save_workspace(&mut self, existing: Option<&str>, name: String) -> bool {
        let input = WorkspaceInput { name };
        let previous_section = self.state.selected_section_id.clone();

        let result = match existing {
            Some(id) => self
                .api
                .update_workspace(id, &input)
                .await
                .map(|_| "Workspace updated"),
            None => match self.api.create_workspace(&input).await {
                Ok(created) => {
                    self.state.select_workspace(&created.id);
                    Ok("Workspace created")
                }
                Err(e) => Err(e),
            },
        };

        match result {
            Ok(message) => {
                self.notifications.success(message);
                let refreshed = self.refresh_after_workspace_write(previous_section).await;
                self.report_refresh(refreshed);
                true
            }
            Err(e) => {
                self.notifications.error(format!("Workspace failed: {}", e));
                false
            }
        }
    }

    async fn refresh_after_workspace_write(
        &mut self,
        previous_section: Option<String>,
    ) -> ClientResult<()> {
        self.refresh_workspaces().await?;
        self.sync_sections(previous_section).await
    }

    pub async fn delete_workspace(&mut self, workspace_id: &str) -> bool {
        match self.api.delete_workspace(workspace_id).await {
            Ok(()) => {
                self.notifications.success("Workspace deleted");
                let previous_section = self.state.selected_section_id.clone();
                if self.state.selected_workspace_id.as_deref() == Some(workspace_id) {
                    self.state.clear_selection();
                }
                let refreshed = self.refresh_after_workspace_write(previous_section).await;
                self.report_refresh(refreshed);
                true
            }
            Err(e) => {
                self.notifications.error(format!("Delete failed: {}", e));
                false
            }
        }
    }

    /// Create a section in the active workspace, or update `existing`
    pub async fn save_section(&mut self, existing: Option<&str>, draft: SectionDraft) -> bool {
        let Some(workspace_id) = self.state.selected_workspace_id.clone() else {
            return false;
        };
        let previous_section = self.state.selected_section_id.clone();

        let result = match existing {
            Some(id) => {
                let input = SectionUpdateInput {
                    title: draft.title,
                    icon: draft.icon,
                    position: draft.position,
                };
                self.api
                    .update_section(id, &input)
                    .await
                    .map(|_| "Section updated")
            }
            None => {
                let input = SectionCreateInput {
                    workspace_id,
                    title: draft.title,
                    icon: draft.icon,
                    position: draft.position,
                };
                match self.api.create_section(&input).await {
                    Ok(created) => {
                        self.state.select_section(&created.id);
                        Ok("Section created")
                    }
                    Err(e) => Err(e),
                }
            }
        };

        match result {
            Ok(message) => {
                self.notifications.success(message);
                let refreshed = self.sync_sections(previous_section).await;
                self.report_refresh(refreshed);
                true
            }
            Err(e) => {
                self.notifications.error(format!("Section failed: {}", e));
                false
            }
        }
    }

    pub async fn delete_section(&mut self, section_id: &str) -> bool {
        match self.api.delete_section(section_id).await {
            Ok(()) => {
                self.notifications.success("Section deleted");
                let previous_section = self.state.selected_section_id.clone();
                if previous_section.as_deref() == Some(section_id) {
                    self.state.clear_section_selection();
                }
                let refreshed = self.sync_sections(previous_section).await;
                self.report_refresh(refreshed);
                true
            }
            Err(e) => {
                self.notifications.error(format!("Delete failed: {}", e));
                false
            }
        }
    }

    /// Create a command in the active section, or update `existing`
    pub async fn save_command(&mut self, existing: Option<&str>, draft: CommandDraft) -> bool {
        let Some(section_id) = self.state.selected_section_id.clone() else {
            return false;
        };

        let result = match existing {
            Some(id) => {
                let input = CommandUpdateInput {
                    title: draft.title,
                    description: draft.description,
                    language: draft.language,
                    command: draft.command,
                    position: draft.position,
                };
                self.api
                    .update_command(id, &input)
                    .await
                    .map(|_| "Command updated")
            }
            None => {
                let input = CommandCreateInput {
                    section_id,
                    title: draft.title,
                    description: draft.description,
                    language: draft.language,
                    command: draft.command,
                    position: draft.position,
                };
                self.api
                    .create_command(&input)
                    .await
                    .map(|_| "Command saved")
            }
        };

        match result {
            Ok(message) => {
                self.notifications.success(message);
                let refreshed = self.refresh_commands().await;
                self.report_refresh(refreshed);
                true
            }
            Err(e) => {
                self.notifications.error(format!("Command failed: {}", e));
                false
            }
        }
    }

    pub async fn delete_command(&mut self, command_id: &str) -> bool {
        match self.api.delete_command(command_id).await {
            Ok(()) => {
                self.notifications.success("Command deleted");
                let refreshed = self.refresh_commands().await;
                self.report_refresh(refreshed);
                true
            }
            Err(e) => {
                self.notifications.error(format!("Delete failed: {}", e));
                false
            }
        }
    }

    fn report_refresh(&mut self, result: ClientResult<()>) {
        if let Err(e) = result {
            self.notifications.error(format!("Refresh failed: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NotificationKind;
    use crate::testing::FakeApi;
    use pretty_assertions::assert_eq;

    fn section_draft(title: &str) -> SectionDraft {
        SectionDraft {
            title: title.to_string(),
            icon: "terminal".to_string(),
            position: 0,
        }
    }

    fn command_draft(title: &str) -> CommandDraft {
        CommandDraft {
            title: title.to_string(),
            description: String::new(),
            language: "bash".to_string(),
            command: "echo hi".to_string(),
            position: 0,
        }
    }

    fn last_notification(controller: &VaultController<FakeApi>) -> (NotificationKind, String) {
        let latest = controller.notifications.latest().unwrap();
        (latest.kind, latest.message.clone())
    }

    #[tokio::test]
    async fn test_load_selects_first_workspace_and_section() {
        let api = FakeApi::with_workspaces(&["Default Workspace", "Other"]);
        let s1 = api.add_section("w1", "Git");
        api.add_section("w1", "Docker");
        api.add_command(&s1, "Status");

        let mut controller = VaultController::new(api);
        controller.load().await;

        assert_eq!(controller.state.selected_workspace_id.as_deref(), Some("w1"));
        assert_eq!(controller.state.selected_section_id.as_deref(), Some(s1.as_str()));
        assert_eq!(controller.state.sections.len(), 2);
        assert_eq!(controller.state.commands.len(), 1);
        assert_eq!(
            controller.api().calls(),
            vec![
                "list_workspaces".to_string(),
                "list_sections w1".to_string(),
                format!("list_commands {}", s1),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_section_selection_skips_command_request() {
        let api = FakeApi::with_workspaces(&["Empty"]);
        let mut controller = VaultController::new(api);
        controller.load().await;

        assert_eq!(controller.state.selected_section_id, None);
        assert!(controller.state.commands.is_empty());
        assert!(!controller
            .api()
            .calls()
            .iter()
            .any(|call| call.starts_with("list_commands")));
    }

    #[tokio::test]
    async fn test_select_workspace_refetches_sections_and_commands() {
        let api = FakeApi::with_workspaces(&["A", "B"]);
        api.add_section("w1", "In A");
        let in_b = api.add_section("w2", "In B");
        api.add_command(&in_b, "B command");

        let mut controller = VaultController::new(api);
        controller.load().await;
        controller.api().clear_calls();

        controller.select_workspace("w2").await;

        assert_eq!(controller.state.selected_section_id.as_deref(), Some(in_b.as_str()));
        assert_eq!(controller.state.commands.len(), 1);
        assert_eq!(
            controller.api().calls(),
            vec!["list_sections w2".to_string(), format!("list_commands {}", in_b)]
        );
    }

    #[tokio::test]
    async fn test_create_workspace_selects_it() {
        let api = FakeApi::with_workspaces(&["Default Workspace"]);
        let mut controller = VaultController::new(api);
        controller.load().await;

        assert!(controller.save_workspace(None, "Infra".to_string()).await);

        let active = controller.state.active_workspace().unwrap();
        assert_eq!(active.name, "Infra");
        assert_eq!(controller.state.workspaces.len(), 2);
        assert_eq!(
            last_notification(&controller),
            (NotificationKind::Success, "Workspace created".to_string())
        );
    }

    #[tokio::test]
    async fn test_rename_workspace_refetches_list() {
        let api = FakeApi::with_workspaces(&["Old"]);
        let mut controller = VaultController::new(api);
        controller.load().await;

        assert!(controller.save_workspace(Some("w1"), "New".to_string()).await);

        assert_eq!(controller.state.workspaces[0].name, "New");
        assert_eq!(controller.state.selected_workspace_id.as_deref(), Some("w1"));
        assert_eq!(
            last_notification(&controller),
            (NotificationKind::Success, "Workspace updated".to_string())
        );
    }

    #[tokio::test]
    async fn test_deleting_active_workspace_clears_and_reselects() {
        let api = FakeApi::with_workspaces(&["First", "Second"]);
        let s = api.add_section("w1", "Doomed");
        api.add_command(&s, "Gone");
        let keep = api.add_section("w2", "Kept");

        let mut controller = VaultController::new(api);
        controller.load().await;
        assert_eq!(controller.state.commands.len(), 1);

        assert!(controller.delete_workspace("w1").await);

        assert_eq!(controller.state.selected_workspace_id.as_deref(), Some("w2"));
        assert_eq!(controller.state.selected_section_id.as_deref(), Some(keep.as_str()));
        assert!(controller.state.commands.is_empty());
    }

    #[tokio::test]
    async fn test_deleting_last_workspace_empties_everything() {
        let api = FakeApi::with_workspaces(&["Only"]);
        api.add_section("w1", "S");

        let mut controller = VaultController::new(api);
        controller.load().await;
        assert!(controller.delete_workspace("w1").await);

        assert!(controller.state.workspaces.is_empty());
        assert!(controller.state.sections.is_empty());
        assert_eq!(controller.state.selected_workspace_id, None);
        assert_eq!(controller.state.selected_section_id, None);
    }

    #[tokio::test]
    async fn test_create_section_selects_it() {
        let api = FakeApi::with_workspaces(&["W"]);
        api.add_section("w1", "Existing");

        let mut controller = VaultController::new(api);
        controller.load().await;

        assert!(controller.save_section(None, section_draft("Fresh")).await);

        let active = controller.state.active_section().unwrap();
        assert_eq!(active.title, "Fresh");
        assert!(controller.state.commands.is_empty());
        assert_eq!(
            last_notification(&controller),
            (NotificationKind::Success, "Section created".to_string())
        );
    }

    #[tokio::test]
    async fn test_save_section_without_workspace_is_ignored() {
        let api = FakeApi::default();
        let mut controller = VaultController::new(api);
        controller.load().await;

        assert!(!controller.save_section(None, section_draft("Nowhere")).await);
        assert!(controller.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_deleting_active_section_falls_back_to_first() {
        let api = FakeApi::with_workspaces(&["W"]);
        let first = api.add_section("w1", "First");
        let second = api.add_section("w1", "Second");

        let mut controller = VaultController::new(api);
        controller.load().await;
        controller.select_section(&second).await;

        assert!(controller.delete_section(&second).await);

        assert_eq!(controller.state.selected_section_id.as_deref(), Some(first.as_str()));
        assert_eq!(controller.state.sections.len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_inactive_section_keeps_selection() {
        let api = FakeApi::with_workspaces(&["W"]);
        let first = api.add_section("w1", "First");
        let second = api.add_section("w1", "Second");

        let mut controller = VaultController::new(api);
        controller.load().await;
        controller.api().clear_calls();

        assert!(controller.delete_section(&second).await);

        assert_eq!(controller.state.selected_section_id.as_deref(), Some(first.as_str()));
        assert_eq!(
            controller.api().calls(),
            vec![format!("delete_section {}", second), "list_sections w1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_command_mutations_refetch_commands() {
        let api = FakeApi::with_workspaces(&["W"]);
        let section = api.add_section("w1", "S");

        let mut controller = VaultController::new(api);
        controller.load().await;

        assert!(controller.save_command(None, command_draft("Hello")).await);
        assert_eq!(controller.state.commands.len(), 1);
        assert_eq!(
            last_notification(&controller),
            (NotificationKind::Success, "Command saved".to_string())
        );

        let id = controller.state.commands[0].id.clone();
        assert!(controller.save_command(Some(&id), command_draft("Hello again")).await);
        assert_eq!(controller.state.commands[0].title, "Hello again");

        assert!(controller.delete_command(&id).await);
        assert!(controller.state.commands.is_empty());
        assert!(controller
            .api()
            .calls()
            .ends_with(&[format!("delete_command {}", id), format!("list_commands {}", section)]));
    }

    #[tokio::test]
    async fn test_failed_write_notifies_and_keeps_state() {
        let api = FakeApi::with_workspaces(&["W"]);
        api.add_section("w1", "S");

        let mut controller = VaultController::new(api);
        controller.load().await;
        let before = controller.state.clone();
        controller.api().fail_writes();

        assert!(!controller.save_command(None, command_draft("Nope")).await);
        assert_eq!(
            last_notification(&controller),
            (NotificationKind::Error, "Command failed: Database error".to_string())
        );

        assert!(!controller.delete_workspace("w1").await);
        assert_eq!(
            last_notification(&controller),
            (NotificationKind::Error, "Delete failed: Database error".to_string())
        );

        assert_eq!(controller.state, before);
    }
}
