//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::auth::{AdminSession, Credentials};
use crate::domain::flashcard_set::FlashcardSet;
use crate::domain::multiple_choice::MultipleChoiceTest;
use crate::domain::report::ContentReport;
use crate::domain::types::{FlashcardSetId, ReportId, ReportStatus, TestId, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::listing::RawPage;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AuthGateway, ContentListQuery, FlashcardSetReader, FlashcardSetWriter, ReportListQuery,
    ReportReader, ReportWriter, TestReader, TestWriter, UserListQuery, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl AuthGateway for Repository {
        async fn login(&self, credentials: &Credentials) -> RepositoryResult<AdminSession>;
    }

    #[async_trait]
    impl UserReader for Repository {
        async fn list_users(&self, query: UserListQuery) -> RepositoryResult<RawPage<User>>;
        async fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>>;
    }

    #[async_trait]
    impl UserWriter for Repository {
        async fn create_user(&self, user: &NewUser) -> RepositoryResult<()>;
        async fn register_admin(&self, user: &NewUser) -> RepositoryResult<()>;
        async fn update_user(&self, id: &UserId, updates: &UpdateUser) -> RepositoryResult<()>;
        async fn delete_user(&self, id: &UserId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl ReportReader for Repository {
        async fn list_reports(
            &self,
            query: ReportListQuery,
        ) -> RepositoryResult<RawPage<ContentReport>>;
        async fn get_report_by_id(&self, id: ReportId) -> RepositoryResult<Option<ContentReport>>;
    }

    #[async_trait]
    impl ReportWriter for Repository {
        async fn set_report_status(
            &self,
            id: ReportId,
            status: ReportStatus,
        ) -> RepositoryResult<Option<String>>;
    }

    #[async_trait]
    impl FlashcardSetReader for Repository {
        async fn list_flashcard_sets(
            &self,
            query: ContentListQuery,
        ) -> RepositoryResult<RawPage<FlashcardSet>>;
    }

    #[async_trait]
    impl FlashcardSetWriter for Repository {
        async fn delete_flashcard_set(&self, id: FlashcardSetId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl TestReader for Repository {
        async fn list_tests(
            &self,
            query: ContentListQuery,
        ) -> RepositoryResult<RawPage<MultipleChoiceTest>>;
    }

    #[async_trait]
    impl TestWriter for Repository {
        async fn delete_test(&self, id: TestId) -> RepositoryResult<()>;
    }
}
