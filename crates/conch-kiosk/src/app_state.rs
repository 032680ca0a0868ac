//! Application state shared with every kiosk command.

use crate::user::UserManager;

/// The kiosk's context value: the account table plus the active session.
pub struct AppState {
    /// All registered accounts.
    pub users: UserManager,
    /// Index of the logged-in user, if any.
    pub current: Option<usize>,
}

impl AppState {
    /// Fresh state with an empty account table and nobody logged in.
    pub fn new() -> Self {
        Self {
            users: UserManager::new(),
            current: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
