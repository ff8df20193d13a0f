use serde::Serialize;

/// Text of the confirmation dialog.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    /// Bootstrap contextual class of the confirm button.
    pub tone: &'static str,
}
