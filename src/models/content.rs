//! Flashcard sets and multiple-choice tests.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::flashcard_set::FlashcardSet as DomainFlashcardSet;
use crate::domain::multiple_choice::MultipleChoiceTest as DomainMultipleChoiceTest;
use crate::domain::types::{FlashcardSetId, TestId, TypeConstraintError};

/// Page of user content. Either a bare array or an object wrapping one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentPage<T> {
    Wrapped(ContentEnvelope<T>),
    Bare(Vec<T>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEnvelope<T> {
    #[serde(
        default = "Vec::new",
        alias = "data",
        alias = "results",
        alias = "flashCardSets",
        alias = "flashcardSets",
        alias = "multipleChoiceTests"
    )]
    pub items: Vec<T>,
    #[serde(default, alias = "totalItems")]
    pub total_count: Option<usize>,
    #[serde(default, alias = "totalPage")]
    pub total_pages: Option<usize>,
    #[serde(default, alias = "pageSize")]
    pub item_per_page: Option<usize>,
}

impl<T> Default for ContentPage<T> {
    fn default() -> Self {
        ContentPage::Bare(Vec::new())
    }
}

impl<T> ContentPage<T> {
    pub fn into_envelope(self) -> ContentEnvelope<T> {
        match self {
            ContentPage::Wrapped(envelope) => envelope,
            ContentPage::Bare(items) => ContentEnvelope {
                total_count: Some(items.len()),
                items,
                total_pages: None,
                item_per_page: None,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSet {
    #[serde(alias = "flashCardSetId", alias = "setId")]
    pub id: i32,
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "ownerId", alias = "createdBy")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default, alias = "flashCards")]
    pub flashcards: Option<Vec<Value>>,
    #[serde(default, alias = "flashcardCount", alias = "totalCards")]
    pub card_count: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceTest {
    #[serde(alias = "multipleChoiceTestId", alias = "testId")]
    pub id: i32,
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "ownerId", alias = "createdBy")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub questions: Option<Vec<Value>>,
    #[serde(default, alias = "totalQuestions")]
    pub question_count: Option<usize>,
}

fn untitled(title: Option<String>) -> String {
    title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "(untitled)".to_string())
}

impl TryFrom<FlashcardSet> for DomainFlashcardSet {
    type Error = TypeConstraintError;

    fn try_from(set: FlashcardSet) -> Result<Self, Self::Error> {
        let card_count = set
            .card_count
            .or_else(|| set.flashcards.as_ref().map(Vec::len))
            .unwrap_or(0);
        Ok(Self {
            id: FlashcardSetId::new(set.id)?,
            title: untitled(set.title),
            description: set.description,
            owner_id: set.user_id,
            is_public: set.is_public.unwrap_or(false),
            card_count,
        })
    }
}

impl TryFrom<MultipleChoiceTest> for DomainMultipleChoiceTest {
    type Error = TypeConstraintError;

    fn try_from(test: MultipleChoiceTest) -> Result<Self, Self::Error> {
        let question_count = test
            .question_count
            .or_else(|| test.questions.as_ref().map(Vec::len))
            .unwrap_or(0);
        Ok(Self {
            id: TestId::new(test.id)?,
            title: untitled(test.title),
            description: test.description,
            owner_id: test.user_id,
            is_public: test.is_public.unwrap_or(false),
            question_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_counts_itself() {
        let page: ContentPage<FlashcardSet> =
            serde_json::from_str(r#"[{"id": 1, "title": "Verbs", "flashcards": [{}, {}]}]"#).unwrap();
        let envelope = page.into_envelope();

        assert_eq!(envelope.total_count, Some(1));
        let set = DomainFlashcardSet::try_from(envelope.items[0].clone()).unwrap();
        assert_eq!(set.card_count, 2);
        assert_eq!(set.title, "Verbs");
    }

    #[test]
    fn wrapped_page_keeps_page_counts() {
        let page: ContentPage<MultipleChoiceTest> = serde_json::from_str(
            r#"{"items": [{"id": 7, "isPublic": true}], "totalPages": 2, "itemPerPage": 5}"#,
        )
        .unwrap();
        let envelope = page.into_envelope();

        assert_eq!(envelope.total_pages, Some(2));
        assert_eq!(envelope.item_per_page, Some(5));
        let test = DomainMultipleChoiceTest::try_from(envelope.items[0].clone()).unwrap();
        assert_eq!(test.title, "(untitled)");
        assert!(test.is_public);
    }
}
