//! "Apply mutation, then reconcile" contract for listing screens.
//!
//! A mutation reports what happened as [`Notice`]s and says how the list has
//! to catch up: patch one row in place, re-fetch the page, or nothing.

use std::fmt;

use serde::Serialize;

use super::{Identified, ListController, PageSource};

/// Severity of a notice shown to the operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// One operator-facing message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

type Patch<T> = Box<dyn FnOnce(&mut T) + Send>;

/// How the list catches up after a mutation.
pub enum Reconcile<T> {
    None,
    /// Re-run the fetch for the current request (create, update, delete).
    Refetch,
    /// Update one row in place without a confirming fetch (status changes).
    Patch { identity: String, patch: Patch<T> },
}

impl<T> Reconcile<T> {
    pub fn patch<F>(identity: impl Into<String>, patch: F) -> Self
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        Reconcile::Patch {
            identity: identity.into(),
            patch: Box::new(patch),
        }
    }
}

impl<T> fmt::Debug for Reconcile<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reconcile::None => f.write_str("None"),
            Reconcile::Refetch => f.write_str("Refetch"),
            Reconcile::Patch { identity, .. } => {
                f.debug_struct("Patch").field("identity", identity).finish()
            }
        }
    }
}

/// Result of a mutation that succeeded at least in part.
#[derive(Debug)]
pub struct MutationOutcome<T> {
    pub notices: Vec<Notice>,
    pub reconcile: Reconcile<T>,
}

impl<T> MutationOutcome<T> {
    pub fn new(notice: Notice, reconcile: Reconcile<T>) -> Self {
        Self {
            notices: vec![notice],
            reconcile,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    /// Highest severity among the notices.
    pub fn severity(&self) -> Severity {
        let rank = |severity: &Severity| match severity {
            Severity::Success => 0,
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Error => 3,
        };
        self.notices
            .iter()
            .map(|notice| notice.severity)
            .max_by_key(rank)
            .unwrap_or(Severity::Success)
    }
}

/// Applies the outcome's reconciliation policy to `list` and hands back its notices.
pub async fn settle<T, S>(
    list: &mut ListController<T>,
    source: &S,
    outcome: MutationOutcome<T>,
) -> Vec<Notice>
where
    T: Identified + Send,
    S: PageSource<T> + ?Sized,
{
    match outcome.reconcile {
        Reconcile::None => {}
        Reconcile::Refetch => list.fetch(source).await,
        Reconcile::Patch { identity, patch } => {
            list.patch_item(&identity, patch);
        }
    }
    outcome.notices
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::listing::{PageRequest, RawPage};
    use crate::repository::errors::RepositoryResult;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: u32,
        status: u8,
    }

    impl Identified for Row {
        fn identity(&self) -> String {
            self.id.to_string()
        }
    }

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageSource<Row> for CountingSource {
        async fn fetch_page(&self, _request: &PageRequest) -> RepositoryResult<RawPage<Row>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) as u32;
            Ok(RawPage::new(vec![Row { id: 100 + call, status: 0 }]))
        }
    }

    async fn loaded_list(source: &CountingSource) -> ListController<Row> {
        let mut list = ListController::new(10);
        list.fetch(source).await;
        list
    }

    #[actix_web::test]
    async fn patch_updates_row_without_fetching() {
        let source = CountingSource {
            calls: AtomicUsize::new(0),
        };
        let mut list = loaded_list(&source).await;

        let outcome = MutationOutcome::new(
            Notice::success("done"),
            Reconcile::patch("100", |row: &mut Row| row.status = 1),
        );
        let notices = settle(&mut list, &source, outcome).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(list.items()[0].status, 1);
        assert_eq!(notices, vec![Notice::success("done")]);
    }

    #[actix_web::test]
    async fn refetch_replaces_rows() {
        let source = CountingSource {
            calls: AtomicUsize::new(0),
        };
        let mut list = loaded_list(&source).await;

        let outcome = MutationOutcome::new(Notice::success("deleted"), Reconcile::Refetch);
        settle(&mut list, &source, outcome).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(list.items()[0].id, 101);
    }

    #[test]
    fn outcome_severity_is_the_worst_notice() {
        let outcome: MutationOutcome<Row> =
            MutationOutcome::new(Notice::success("approved"), Reconcile::None)
                .with_notice(Notice::warning("cascade failed"));

        assert_eq!(outcome.severity(), Severity::Warning);
    }
}
