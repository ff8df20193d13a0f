use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ContentType, ReportId, ReportStatus};
use crate::listing::Identified;

/// A user complaint about a piece of content.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContentReport {
    pub id: ReportId,
    pub user_id: Option<String>,
    pub content_id: Option<i32>,
    pub content_type: Option<ContentType>,
    pub reason: String,
    pub description: Option<String>,
    pub status: ReportStatus,
    pub created_at: Option<NaiveDateTime>,
}

impl ContentReport {
    pub fn is_pending(&self) -> bool {
        self.status == ReportStatus::Pending
    }
}

impl Identified for ContentReport {
    fn identity(&self) -> String {
        self.id.to_string()
    }
}

/// Content removed as a consequence of approving a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeTarget {
    FlashcardSet(i32),
    Test(i32),
}

impl CascadeTarget {
    /// Content types without a delete endpoint have no cascade.
    pub fn for_report(report_type: Option<ContentType>, content_id: Option<i32>) -> Option<Self> {
        let content_id = content_id.filter(|id| *id > 0)?;
        match report_type? {
            ContentType::FlashcardSet => Some(CascadeTarget::FlashcardSet(content_id)),
            ContentType::Lesson => Some(CascadeTarget::Test(content_id)),
            ContentType::Flashcard | ContentType::Comment => None,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            CascadeTarget::FlashcardSet(_) => "flashcard set",
            CascadeTarget::Test(_) => "multiple-choice test",
        }
    }
}
