//! Domain aggregates exposed by the console service layer.

pub mod auth;
pub mod flashcard_set;
pub mod multiple_choice;
pub mod report;
pub mod types;
pub mod user;
