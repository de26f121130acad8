pub mod dialog;
pub mod form;
pub mod notifications;
pub mod status_bar;

pub use dialog::{ConfirmationDialog, ConfirmationDialogWidget, DialogResult};
pub use form::EditorWidget;
pub use notifications::NotificationsWidget;
pub use status_bar::StatusBarWidget;
