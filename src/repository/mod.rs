use async_trait::async_trait;

use crate::domain::auth::{AdminSession, Credentials};
use crate::domain::flashcard_set::FlashcardSet;
use crate::domain::multiple_choice::MultipleChoiceTest;
use crate::domain::report::ContentReport;
use crate::domain::types::{ContentType, FlashcardSetId, ReportId, ReportStatus, TestId, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::listing::RawPage;
use crate::repository::errors::RepositoryResult;

#[cfg(feature = "server")]
pub mod api;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

#[cfg(feature = "server")]
pub use api::ApiRepository;

/// 1-based page as the backend expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    pub email: Option<String>,
    pub role: Option<String>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportListQuery {
    pub report_id: Option<i32>,
    pub user_id: Option<String>,
    pub content_type: Option<ContentType>,
    pub status: Option<ReportStatus>,
    pub sort_by: Option<String>,
    pub is_desc: Option<bool>,
    pub pagination: Option<Pagination>,
}

/// Listing of flashcard sets or tests: one user's content, or the public feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentListQuery {
    pub user_id: Option<String>,
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl ReportListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_id(mut self, report_id: i32) -> Self {
        self.report_id = Some(report_id);
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sort(mut self, sort_by: impl Into<String>, is_desc: bool) -> Self {
        self.sort_by = Some(sort_by.into());
        self.is_desc = Some(is_desc);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl ContentListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<AdminSession>;
}

#[async_trait]
pub trait UserReader: Send + Sync {
    async fn list_users(&self, query: UserListQuery) -> RepositoryResult<RawPage<User>>;
    async fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>>;
}

#[async_trait]
pub trait UserWriter: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<()>;
    /// Admin and super-admin accounts; only a super-admin token may call it.
    async fn register_admin(&self, user: &NewUser) -> RepositoryResult<()>;
    async fn update_user(&self, id: &UserId, updates: &UpdateUser) -> RepositoryResult<()>;
    async fn delete_user(&self, id: &UserId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ReportReader: Send + Sync {
    async fn list_reports(&self, query: ReportListQuery)
    -> RepositoryResult<RawPage<ContentReport>>;
    async fn get_report_by_id(&self, id: ReportId) -> RepositoryResult<Option<ContentReport>>;
}

#[async_trait]
pub trait ReportWriter: Send + Sync {
    /// Returns the backend's confirmation text, if it sent one.
    async fn set_report_status(
        &self,
        id: ReportId,
        status: ReportStatus,
    ) -> RepositoryResult<Option<String>>;
}

#[async_trait]
pub trait FlashcardSetReader: Send + Sync {
    async fn list_flashcard_sets(
        &self,
        query: ContentListQuery,
    ) -> RepositoryResult<RawPage<FlashcardSet>>;
}

#[async_trait]
pub trait FlashcardSetWriter: Send + Sync {
    async fn delete_flashcard_set(&self, id: FlashcardSetId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait TestReader: Send + Sync {
    async fn list_tests(
        &self,
        query: ContentListQuery,
    ) -> RepositoryResult<RawPage<MultipleChoiceTest>>;
}

#[async_trait]
pub trait TestWriter: Send + Sync {
    async fn delete_test(&self, id: TestId) -> RepositoryResult<()>;
}
