//! Landing page counters.

use crate::domain::types::ReportStatus;
use crate::dto::dashboard::{DashboardData, DashboardStat};
use crate::listing::{RawPage, TotalCount, normalize};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ContentListQuery, FlashcardSetReader, ReportListQuery, ReportReader, TestReader,
    UserListQuery, UserReader,
};
use crate::services::ServiceResult;

/// One row is enough: only the reported total matters.
const PROBE_PAGE_SIZE: usize = 1;

fn total_of<T>(
    what: &str,
    result: RepositoryResult<RawPage<T>>,
) -> Result<Option<TotalCount>, RepositoryError> {
    match result {
        Ok(raw) => Ok(Some(normalize(raw, PROBE_PAGE_SIZE).total)),
        Err(RepositoryError::Unauthenticated) => Err(RepositoryError::Unauthenticated),
        Err(err) => {
            log::warn!("Dashboard could not count {what}: {err}");
            Ok(None)
        }
    }
}

/// Counts for the dashboard tiles. A failed count renders as unknown.
pub async fn load_dashboard<R>(repo: &R) -> ServiceResult<DashboardData>
where
    R: UserReader + ReportReader + FlashcardSetReader + TestReader + ?Sized,
{
    let users = repo
        .list_users(UserListQuery::new().paginate(1, PROBE_PAGE_SIZE))
        .await;
    let pending = repo
        .list_reports(
            ReportListQuery::new()
                .status(ReportStatus::Pending)
                .paginate(1, PROBE_PAGE_SIZE),
        )
        .await;
    let sets = repo
        .list_flashcard_sets(ContentListQuery::new().paginate(1, PROBE_PAGE_SIZE))
        .await;
    let tests = repo
        .list_tests(ContentListQuery::new().paginate(1, PROBE_PAGE_SIZE))
        .await;

    Ok(DashboardData {
        stats: vec![
            DashboardStat::new("Users", "/users", total_of("users", users)?),
            DashboardStat::new(
                "Pending reports",
                "/reports",
                total_of("pending reports", pending)?,
            ),
            DashboardStat::new(
                "Public flashcard sets",
                "/flashcard-sets",
                total_of("flashcard sets", sets)?,
            ),
            DashboardStat::new(
                "Public tests",
                "/tests",
                total_of("multiple-choice tests", tests)?,
            ),
        ],
    })
}
