//! DTOs shaped for the content report templates.

use serde::Serialize;

use crate::domain::report::ContentReport;
use crate::domain::types::{ContentType, ReportStatus};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A report row with display-ready text. Free text is sanitized.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportView {
    pub id: i32,
    pub user_id: Option<String>,
    pub content_id: Option<i32>,
    pub content_type: Option<&'static str>,
    pub reason: String,
    pub description: Option<String>,
    pub status: &'static str,
    pub status_code: i32,
    pub badge: &'static str,
    pub created_at: Option<String>,
    pub pending: bool,
}

impl From<&ContentReport> for ReportView {
    fn from(report: &ContentReport) -> Self {
        Self {
            id: report.id.get(),
            user_id: report.user_id.clone(),
            content_id: report.content_id,
            content_type: report.content_type.map(ContentType::label),
            reason: ammonia::clean(&report.reason),
            description: report.description.as_deref().map(ammonia::clean),
            status: report.status.label(),
            status_code: report.status.code(),
            badge: report.status.badge(),
            created_at: report
                .created_at
                .map(|at| at.format(DATE_FORMAT).to_string()),
            pending: report.is_pending(),
        }
    }
}

/// Select options for the report filters.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterOption {
    pub value: i32,
    pub label: &'static str,
}

pub fn status_options() -> Vec<FilterOption> {
    ReportStatus::ALL
        .into_iter()
        .map(|status| FilterOption {
            value: status.code(),
            label: status.label(),
        })
        .collect()
}

pub fn content_type_options() -> Vec<FilterOption> {
    ContentType::ALL
        .into_iter()
        .map(|kind| FilterOption {
            value: kind.code(),
            label: kind.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::ReportId;

    #[test]
    fn view_sanitizes_free_text() {
        let report = ContentReport {
            id: ReportId::new(4).unwrap(),
            user_id: Some("u-1".into()),
            content_id: Some(9),
            content_type: Some(ContentType::FlashcardSet),
            reason: "spam <script>alert(1)</script>".into(),
            description: Some("<b>bold</b>".into()),
            status: ReportStatus::Approved,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 2)
                .and_then(|d| d.and_hms_opt(3, 4, 5)),
        };

        let view = ReportView::from(&report);

        assert_eq!(view.reason, "spam ");
        assert_eq!(view.description.as_deref(), Some("<b>bold</b>"));
        assert_eq!(view.content_type, Some("Flashcard Set"));
        assert_eq!(view.badge, "success");
        assert_eq!(view.created_at.as_deref(), Some("2024-01-02 03:04"));
        assert!(!view.pending);
    }
}
