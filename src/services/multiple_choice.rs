//! Multiple-choice test moderation.

use async_trait::async_trait;

use crate::domain::multiple_choice::MultipleChoiceTest;
use crate::domain::types::TestId;
use crate::listing::mutation::{MutationOutcome, Notice, Reconcile};
use crate::listing::{ListController, PageRequest, PageSource, RawPage};
use crate::repository::errors::RepositoryResult;
use crate::repository::{TestReader, TestWriter};
use crate::services::flashcard_sets::content_query;
use crate::services::{ServiceResult, fetch_into};

pub struct TestsSource<'a, R: ?Sized> {
    repo: &'a R,
}

impl<'a, R: ?Sized> TestsSource<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> PageSource<MultipleChoiceTest> for TestsSource<'_, R>
where
    R: TestReader + ?Sized,
{
    async fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> RepositoryResult<RawPage<MultipleChoiceTest>> {
        self.repo.list_tests(content_query(request)).await
    }
}

pub async fn load_tests<R>(repo: &R, list: &mut ListController<MultipleChoiceTest>) -> ServiceResult<()>
where
    R: TestReader + ?Sized,
{
    fetch_into(list, &TestsSource::new(repo), "multiple-choice tests").await
}

pub async fn delete_test<R>(repo: &R, id: i32) -> ServiceResult<MutationOutcome<MultipleChoiceTest>>
where
    R: TestWriter + ?Sized,
{
    let id = TestId::new(id)?;
    repo.delete_test(id).await.map_err(|err| {
        log::error!("Failed to delete test {id}: {err}");
        err
    })?;
    Ok(MutationOutcome::new(
        Notice::success("Test deleted successfully"),
        Reconcile::Refetch,
    ))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::listing::{FilterValue, Filters};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn test(id: i32) -> MultipleChoiceTest {
        MultipleChoiceTest {
            id: TestId::new(id).unwrap(),
            title: format!("Test {id}"),
            description: None,
            owner_id: Some("u-2".into()),
            is_public: false,
            question_count: 8,
        }
    }

    #[actix_web::test]
    async fn owner_filter_is_forwarded() {
        let mut repo = MockRepository::new();
        repo.expect_list_tests()
            .withf(|query| query.user_id.as_deref() == Some("u-2"))
            .times(1)
            .returning(|_| Ok(RawPage::new(vec![test(1), test(2)]).total_count(Some(7))));
        let mut list = ListController::with_defaults(
            5,
            Filters::new().with("userId", FilterValue::Text("u-2".into())),
        );

        load_tests(&repo, &mut list).await.unwrap();

        assert_eq!(list.items().len(), 2);
        assert_eq!(list.total().value(), 7);
        assert!(!list.total().is_approximate());
    }

    #[actix_web::test]
    async fn failed_delete_is_reported() {
        let mut repo = MockRepository::new();
        repo.expect_delete_test()
            .returning(|_| Err(RepositoryError::NotFound));

        let err = delete_test(&repo, 9).await.unwrap_err();

        assert_eq!(err.user_message("Error deleting test"), "Error deleting test");
    }
}
