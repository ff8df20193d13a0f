//! Single-slot confirmation dialog.

use serde::{Deserialize, Serialize};

/// `Closed` or `Open` with the action waiting for the operator's answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confirmation<A> {
    Closed,
    Open(A),
}

impl<A> Default for Confirmation<A> {
    fn default() -> Self {
        Confirmation::Closed
    }
}

impl<A> Confirmation<A> {
    /// Opens the dialog for `action`.
    ///
    /// There is no stacking: a pending action is replaced and returned
    /// without having run.
    pub fn open(&mut self, action: A) -> Option<A> {
        match std::mem::replace(self, Confirmation::Open(action)) {
            Confirmation::Open(previous) => Some(previous),
            Confirmation::Closed => None,
        }
    }

    /// Closes the dialog and yields the action to execute, if one was pending.
    pub fn confirm(&mut self) -> Option<A> {
        match std::mem::replace(self, Confirmation::Closed) {
            Confirmation::Open(action) => Some(action),
            Confirmation::Closed => None,
        }
    }

    /// Closes the dialog, discarding any pending action.
    pub fn cancel(&mut self) {
        *self = Confirmation::Closed;
    }

    pub fn pending(&self) -> Option<&A> {
        match self {
            Confirmation::Open(action) => Some(action),
            Confirmation::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Confirmation::Open(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_yields_the_action_once() {
        let mut dialog = Confirmation::default();
        dialog.open("delete 7");

        assert_eq!(dialog.confirm(), Some("delete 7"));
        assert_eq!(dialog.confirm(), None);
        assert!(!dialog.is_open());
    }

    #[test]
    fn cancel_discards_the_action() {
        let mut dialog = Confirmation::default();
        dialog.open("delete 7");

        dialog.cancel();

        assert_eq!(dialog, Confirmation::Closed);
        assert_eq!(dialog.confirm(), None);
    }

    #[test]
    fn opening_again_replaces_the_pending_action() {
        let mut dialog = Confirmation::default();
        assert_eq!(dialog.open("delete 7"), None);

        assert_eq!(dialog.open("delete 8"), Some("delete 7"));
        assert_eq!(dialog.pending(), Some(&"delete 8"));
    }
}
