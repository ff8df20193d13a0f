use serde::{Deserialize, Serialize};

use crate::domain::types::FlashcardSetId;
use crate::listing::Identified;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FlashcardSet {
    pub id: FlashcardSetId,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    pub is_public: bool,
    pub card_count: usize,
}

impl Identified for FlashcardSet {
    fn identity(&self) -> String {
        self.id.to_string()
    }
}
