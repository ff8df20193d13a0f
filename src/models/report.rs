use serde::Deserialize;

use crate::domain::report::ContentReport as DomainContentReport;
use crate::domain::types::{ContentType, ReportId, ReportStatus, TypeConstraintError};
use crate::models::{CodeOrName, parse_timestamp};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReport {
    #[serde(alias = "id")]
    pub report_id: i32,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub content_id: Option<i32>,
    #[serde(default)]
    pub content_type: Option<CodeOrName>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<CodeOrName>,
    #[serde(default, alias = "createdAt")]
    pub create_at: Option<String>,
}

/// Envelope of `/api/ContentReport/GetAllReport`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    #[serde(default, alias = "items", alias = "reports")]
    pub content_reports: Vec<ContentReport>,
    #[serde(default)]
    pub total_count: Option<usize>,
    #[serde(default, alias = "totalPage")]
    pub total_pages: Option<usize>,
    #[serde(default)]
    pub item_per_page: Option<usize>,
}

fn report_status(value: &CodeOrName) -> Result<ReportStatus, TypeConstraintError> {
    match value {
        CodeOrName::Code(code) => ReportStatus::from_code(*code),
        CodeOrName::Name(name) => name.parse(),
    }
}

fn content_type(value: &CodeOrName) -> Result<ContentType, TypeConstraintError> {
    match value {
        CodeOrName::Code(code) => ContentType::from_code(*code),
        CodeOrName::Name(name) => name.parse(),
    }
}

impl TryFrom<ContentReport> for DomainContentReport {
    type Error = TypeConstraintError;

    fn try_from(report: ContentReport) -> Result<Self, Self::Error> {
        let status = match &report.status {
            Some(value) => report_status(value)?,
            None => ReportStatus::Pending,
        };
        // Unknown content types still render, just without a cascade.
        let content_type = report
            .content_type
            .as_ref()
            .and_then(|value| content_type(value).ok());

        Ok(Self {
            id: ReportId::new(report.report_id)?,
            user_id: report.user_id.filter(|id| !id.trim().is_empty()),
            content_id: report.content_id,
            content_type,
            reason: report.reason.unwrap_or_default(),
            description: report.description.filter(|d| !d.trim().is_empty()),
            status,
            created_at: report.create_at.as_deref().and_then(parse_timestamp),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_named_enums_are_accepted() {
        let body = r#"{"contentReports": [
            {"reportId": 1, "contentType": 1, "status": 0, "reason": "spam", "createAt": "2024-03-02T08:00:00"},
            {"reportId": 2, "contentType": "Lesson", "status": "Approved", "reason": "rude"}
        ], "totalPages": 3}"#;
        let page: ReportPage = serde_json::from_str(body).unwrap();
        let reports: Vec<DomainContentReport> = page
            .content_reports
            .into_iter()
            .map(DomainContentReport::try_from)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(page.total_pages, Some(3));
        assert_eq!(reports[0].content_type, Some(ContentType::FlashcardSet));
        assert!(reports[0].created_at.is_some());
        assert_eq!(reports[1].content_type, Some(ContentType::Lesson));
        assert_eq!(reports[1].status, ReportStatus::Approved);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let report: ContentReport =
            serde_json::from_str(r#"{"reportId": 5, "status": 9}"#).unwrap();
        assert!(DomainContentReport::try_from(report).is_err());
    }
}
