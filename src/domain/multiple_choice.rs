use serde::{Deserialize, Serialize};

use crate::domain::types::TestId;
use crate::listing::Identified;

/// A multiple-choice test (shown as "lessons" in the learner app).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MultipleChoiceTest {
    pub id: TestId,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    pub is_public: bool,
    pub question_count: usize,
}

impl Identified for MultipleChoiceTest {
    fn identity(&self) -> String {
        self.id.to_string()
    }
}
