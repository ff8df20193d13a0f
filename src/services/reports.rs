//! Content report moderation.

use async_trait::async_trait;

use crate::domain::report::{CascadeTarget, ContentReport};
use crate::domain::types::{
    ContentType, FlashcardSetId, ReportId, ReportStatus, TestId,
};
use crate::listing::mutation::{MutationOutcome, Notice, Reconcile};
use crate::listing::{ListController, PageRequest, PageSource, RawPage, SORT_DESC_KEY, SORT_FIELD_KEY};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    FlashcardSetWriter, ReportListQuery, ReportReader, ReportWriter, TestWriter,
};
use crate::services::actions::PendingAction;
use crate::services::{ServiceError, ServiceResult, fetch_into};

const STATUS_SUCCESS_FALLBACK: &str = "Set status report successfully.";
const STATUS_FAILURE_FALLBACK: &str = "Failed to update report status.";

/// Maps the reports screen's filters to a backend query.
pub fn report_query(request: &PageRequest) -> ReportListQuery {
    let filters = &request.filters;
    let mut query = ReportListQuery::new().paginate(request.page_number(), request.page_size);

    if let Some(report_id) = filters.number("reportId").and_then(|id| i32::try_from(id).ok()) {
        query = query.report_id(report_id);
    }
    if let Some(user_id) = filters.query_value("userId") {
        query = query.user_id(user_id);
    }
    if let Some(content_type) = filters
        .query_value("contentType")
        .and_then(|raw| raw.parse::<ContentType>().ok())
    {
        query = query.content_type(content_type);
    }
    if let Some(status) = filters
        .query_value("status")
        .and_then(|raw| raw.parse::<ReportStatus>().ok())
    {
        query = query.status(status);
    }
    if let Some(sort_by) = filters.query_value(SORT_FIELD_KEY) {
        query = query.sort(sort_by, filters.flag(SORT_DESC_KEY).unwrap_or(true));
    }
    query
}

pub struct ReportsSource<'a, R: ?Sized> {
    repo: &'a R,
}

impl<'a, R: ?Sized> ReportsSource<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> PageSource<ContentReport> for ReportsSource<'_, R>
where
    R: ReportReader + ?Sized,
{
    async fn fetch_page(&self, request: &PageRequest) -> RepositoryResult<RawPage<ContentReport>> {
        self.repo.list_reports(report_query(request)).await
    }
}

pub async fn load_reports<R>(repo: &R, list: &mut ListController<ContentReport>) -> ServiceResult<()>
where
    R: ReportReader + ?Sized,
{
    fetch_into(list, &ReportsSource::new(repo), "content reports").await
}

pub async fn load_report<R>(repo: &R, id: i32) -> ServiceResult<ContentReport>
where
    R: ReportReader + ?Sized,
{
    let id = ReportId::new(id)?;
    repo.get_report_by_id(id)
        .await
        .map_err(|err| {
            log::error!("Failed to load report {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Builds the confirmation for a status change, including what approval removes.
pub async fn prepare_status_change<R>(
    repo: &R,
    id: i32,
    status: ReportStatus,
) -> ServiceResult<PendingAction>
where
    R: ReportReader + ?Sized,
{
    let report = load_report(repo, id).await?;
    let cascade = match status {
        ReportStatus::Approved => {
            CascadeTarget::for_report(report.content_type, report.content_id)
        }
        _ => None,
    };
    Ok(PendingAction::ChangeReportStatus {
        id: report.id.get(),
        status,
        cascade,
    })
}

/// Sets the status, then removes the reported content when approval implies it.
///
/// The removal is best effort: if it fails the new status stands and a
/// warning is added to the outcome.
pub async fn change_report_status<R>(
    repo: &R,
    id: i32,
    status: ReportStatus,
    cascade: Option<CascadeTarget>,
) -> ServiceResult<MutationOutcome<ContentReport>>
where
    R: ReportWriter + FlashcardSetWriter + TestWriter + ?Sized,
{
    let id = ReportId::new(id)?;
    let message = repo.set_report_status(id, status).await.map_err(|err| {
        log::error!("Failed to set status of report {id}: {err}");
        err
    })?;

    let outcome = MutationOutcome::new(
        Notice::success(message.unwrap_or_else(|| STATUS_SUCCESS_FALLBACK.to_string())),
        Reconcile::patch(id.to_string(), move |report: &mut ContentReport| {
            report.status = status
        }),
    );

    let Some(target) = cascade else {
        return Ok(outcome);
    };

    let removal = match target {
        CascadeTarget::FlashcardSet(content_id) => match FlashcardSetId::new(content_id) {
            Ok(set_id) => repo.delete_flashcard_set(set_id).await,
            Err(err) => Err(RepositoryError::Unexpected(err.to_string())),
        },
        CascadeTarget::Test(content_id) => match TestId::new(content_id) {
            Ok(test_id) => repo.delete_test(test_id).await,
            Err(err) => Err(RepositoryError::Unexpected(err.to_string())),
        },
    };

    Ok(match removal {
        Ok(()) => outcome.with_notice(Notice::info(format!(
            "The reported {} was deleted.",
            target.describe()
        ))),
        Err(err) => {
            log::error!("Report {id} approved but removing the {}: {err}", target.describe());
            outcome.with_notice(Notice::warning(format!(
                "Report status updated, but the reported {} could not be deleted: {}",
                target.describe(),
                err.user_message("unknown error")
            )))
        }
    })
}

/// Message for a failed status change.
pub fn status_failure_message(err: &ServiceError) -> String {
    let ServiceError::Repository(err) = err else {
        return err.user_message(STATUS_FAILURE_FALLBACK);
    };
    match err {
        RepositoryError::Validation { status: 400, .. } => "Invalid report status value.".to_string(),
        RepositoryError::NotFound => "Report not found.".to_string(),
        RepositoryError::Forbidden(_) => {
            "You do not have permission to perform this action.".to_string()
        }
        other => other.user_message(STATUS_FAILURE_FALLBACK),
    }
}
