//! Destructive operations that wait for the operator's confirmation.

use serde::{Deserialize, Serialize};

use crate::domain::report::CascadeTarget;
use crate::domain::types::ReportStatus;
use crate::dto::confirm::ConfirmDialog;
use crate::services::lists::Screen;

/// Action held by the confirmation dialog until confirmed or cancelled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PendingAction {
    DeleteUser {
        id: String,
        label: String,
    },
    ChangeReportStatus {
        id: i32,
        status: ReportStatus,
        cascade: Option<CascadeTarget>,
    },
    DeleteFlashcardSet {
        id: i32,
        title: String,
    },
    DeleteTest {
        id: i32,
        title: String,
    },
}

impl PendingAction {
    /// Screen the operator returns to once the action ran.
    pub fn screen(&self) -> Screen {
        match self {
            PendingAction::DeleteUser { .. } => Screen::Users,
            PendingAction::ChangeReportStatus { .. } => Screen::Reports,
            PendingAction::DeleteFlashcardSet { .. } => Screen::FlashcardSets,
            PendingAction::DeleteTest { .. } => Screen::Tests,
        }
    }

    pub fn dialog(&self) -> ConfirmDialog {
        match self {
            PendingAction::DeleteUser { label, .. } => ConfirmDialog {
                title: "Delete user".to_string(),
                message: format!("Are you sure you want to delete {label}?"),
                confirm_label: "Delete".to_string(),
                tone: "danger",
            },
            PendingAction::ChangeReportStatus {
                id,
                status,
                cascade,
            } => {
                let mut message = format!(
                    "Set the status of report #{id} to {}?",
                    status.label().to_lowercase()
                );
                if let Some(target) = cascade {
                    message.push_str(&format!(
                        " The reported {} will be deleted as well.",
                        target.describe()
                    ));
                }
                ConfirmDialog {
                    title: "Change report status".to_string(),
                    message,
                    confirm_label: status.label().to_string(),
                    tone: match status {
                        ReportStatus::Approved if cascade.is_some() => "danger",
                        ReportStatus::Approved => "success",
                        ReportStatus::Rejected => "warning",
                        ReportStatus::Pending => "secondary",
                    },
                }
            }
            PendingAction::DeleteFlashcardSet { title, .. } => ConfirmDialog {
                title: "Delete flashcard set".to_string(),
                message: format!("Delete the flashcard set \"{title}\" and all of its cards?"),
                confirm_label: "Delete".to_string(),
                tone: "danger",
            },
            PendingAction::DeleteTest { title, .. } => ConfirmDialog {
                title: "Delete test".to_string(),
                message: format!("Delete the multiple-choice test \"{title}\"?"),
                confirm_label: "Delete".to_string(),
                tone: "danger",
            },
        }
    }
}
