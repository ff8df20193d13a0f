//! Flashcard set moderation.

use async_trait::async_trait;

use crate::domain::flashcard_set::FlashcardSet;
use crate::domain::types::FlashcardSetId;
use crate::listing::mutation::{MutationOutcome, Notice, Reconcile};
use crate::listing::{ListController, PageRequest, PageSource, RawPage};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ContentListQuery, FlashcardSetReader, FlashcardSetWriter};
use crate::services::{ServiceResult, fetch_into};

/// Without a `userId` filter the public feed is listed.
pub fn content_query(request: &PageRequest) -> ContentListQuery {
    let mut query = ContentListQuery::new().paginate(request.page_number(), request.page_size);
    if let Some(user_id) = request.filters.query_value("userId") {
        query = query.user_id(user_id);
    }
    query
}

pub struct FlashcardSetsSource<'a, R: ?Sized> {
    repo: &'a R,
}

impl<'a, R: ?Sized> FlashcardSetsSource<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> PageSource<FlashcardSet> for FlashcardSetsSource<'_, R>
where
    R: FlashcardSetReader + ?Sized,
{
    async fn fetch_page(&self, request: &PageRequest) -> RepositoryResult<RawPage<FlashcardSet>> {
        self.repo.list_flashcard_sets(content_query(request)).await
    }
}

pub async fn load_flashcard_sets<R>(
    repo: &R,
    list: &mut ListController<FlashcardSet>,
) -> ServiceResult<()>
where
    R: FlashcardSetReader + ?Sized,
{
    fetch_into(list, &FlashcardSetsSource::new(repo), "flashcard sets").await
}

pub async fn delete_flashcard_set<R>(
    repo: &R,
    id: i32,
) -> ServiceResult<MutationOutcome<FlashcardSet>>
where
    R: FlashcardSetWriter + ?Sized,
{
    let id = FlashcardSetId::new(id)?;
    repo.delete_flashcard_set(id).await.map_err(|err| {
        log::error!("Failed to delete flashcard set {id}: {err}");
        err
    })?;
    Ok(MutationOutcome::new(
        Notice::success("Flashcard set deleted successfully"),
        Reconcile::Refetch,
    ))
}
