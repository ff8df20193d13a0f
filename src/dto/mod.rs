//! DTO modules that bridge services with templates.

pub mod confirm;
pub mod dashboard;
pub mod reports;
pub mod users;
