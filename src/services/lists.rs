//! Listing screens and the commands that drive their controllers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::listing::{
    FilterValue, Filters, ListController, ListState, SORT_DESC_KEY, SORT_FIELD_KEY,
};
use crate::services::{ServiceError, ServiceResult};

/// Screen owning one paginated list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Users,
    Reports,
    FlashcardSets,
    Tests,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Users,
        Screen::Reports,
        Screen::FlashcardSets,
        Screen::Tests,
    ];

    /// Path segment used by `/lists/{screen}/...`.
    pub const fn slug(self) -> &'static str {
        match self {
            Screen::Users => "users",
            Screen::Reports => "reports",
            Screen::FlashcardSets => "flashcard-sets",
            Screen::Tests => "tests",
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Screen::Users => "/users",
            Screen::Reports => "/reports",
            Screen::FlashcardSets => "/flashcard-sets",
            Screen::Tests => "/tests",
        }
    }

    /// Session key holding the screen's [`ListState`].
    pub fn session_key(self) -> String {
        format!("list:{}", self.slug())
    }

    /// Filter names the screen understands. Anything else is dropped.
    pub const fn filter_keys(self) -> &'static [&'static str] {
        match self {
            Screen::Users => &["email", "role"],
            Screen::Reports => &["reportId", "userId", "contentType", "status"],
            Screen::FlashcardSets | Screen::Tests => &["userId"],
        }
    }

    pub const fn sort_fields(self) -> &'static [&'static str] {
        match self {
            Screen::Reports => &["ReportId", "UserId", "ContentType", "Status", "CreateAt"],
            _ => &[],
        }
    }

    /// Filters restored by a reset.
    pub fn defaults(self) -> Filters {
        match self {
            Screen::Reports => Filters::new()
                .with(SORT_FIELD_KEY, FilterValue::Text("CreateAt".to_string()))
                .with(SORT_DESC_KEY, FilterValue::Flag(true)),
            _ => Filters::new(),
        }
    }

    pub fn initial_state(self, page_size: usize) -> ListState {
        ListState::new(page_size, self.defaults())
    }

    /// Keeps the known filter keys of a submitted form.
    pub fn accept_filters<'a, I>(self, raw: I) -> Filters
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        raw.into_iter()
            .filter(|(key, _)| self.filter_keys().contains(key))
            .map(|(key, value)| (key.to_string(), FilterValue::from_input(value)))
            .collect()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Screen {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.slug() == s)
            .ok_or(ServiceError::NotFound)
    }
}

/// One operator interaction with a list's controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListCommand {
    /// Remember filter input without fetching.
    Draft(Filters),
    /// Submit the filter form: merge into the draft, then apply it.
    Apply(Filters),
    Reset,
    Page(usize),
    PageSize(usize),
    Sort(String),
}

/// Applies `command` to a stored list state.
pub fn apply_command(
    screen: Screen,
    state: ListState,
    command: ListCommand,
) -> ServiceResult<ListState> {
    let mut list: ListController<()> = ListController::from_state(state);
    match command {
        ListCommand::Draft(patch) => list.set_filter_draft(patch),
        ListCommand::Apply(patch) => {
            list.set_filter_draft(patch);
            list.apply_filters();
        }
        ListCommand::Reset => list.reset_filters(),
        ListCommand::Page(index) => list.set_page(index),
        ListCommand::PageSize(size) => list.set_page_size(size),
        ListCommand::Sort(field) => {
            if !screen.sort_fields().contains(&field.as_str()) {
                return Err(ServiceError::Form(format!("Cannot sort by {field}.")));
            }
            list.sort_by(&field);
        }
    }
    Ok(list.into_state())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(screen.slug().parse::<Screen>().unwrap(), screen);
        }
        assert!("lessons".parse::<Screen>().is_err());
    }

    #[test]
    fn unknown_filter_keys_are_dropped() {
        let filters = Screen::Users.accept_filters([("email", "ann@"), ("page", "3")]);

        assert_eq!(filters.query_value("email").as_deref(), Some("ann@"));
        assert!(filters.get("page").is_none());
    }

    #[test]
    fn draft_command_keeps_applied_filters() {
        let state = Screen::Users.initial_state(10);
        let patch = Screen::Users.accept_filters([("role", "Admin")]);

        let state = apply_command(Screen::Users, state, ListCommand::Draft(patch)).unwrap();

        assert!(state.applied.is_empty());
        assert_eq!(state.draft.query_value("role").as_deref(), Some("Admin"));
    }

    #[test]
    fn apply_command_resets_page() {
        let mut state = Screen::Reports.initial_state(10);
        state.page_index = 3;
        let patch = Screen::Reports.accept_filters([("status", "0")]);

        let state = apply_command(Screen::Reports, state, ListCommand::Apply(patch)).unwrap();

        assert_eq!(state.page_index, 0);
        assert_eq!(state.applied.number("status"), Some(0));
        assert_eq!(
            state.applied.query_value(SORT_FIELD_KEY).as_deref(),
            Some("CreateAt")
        );
    }

    #[test]
    fn reset_restores_report_sort() {
        let state = Screen::Reports.initial_state(10);
        let state =
            apply_command(Screen::Reports, state, ListCommand::Sort("Status".into())).unwrap();

        let state = apply_command(Screen::Reports, state, ListCommand::Reset).unwrap();

        assert_eq!(state.applied, Screen::Reports.defaults());
    }

    #[test]
    fn sorting_is_limited_to_known_columns() {
        let state = Screen::Users.initial_state(10);
        let result = apply_command(Screen::Users, state, ListCommand::Sort("email".into()));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
