use serde::Serialize;

use super::User;

/// Three-valued session state. `Bootstrapping` is distinct from `SignedOut`
/// so a UI shell never mistakes "not yet restored" for "logged out".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionStatus {
    Bootstrapping,
    SignedOut,
    SignedIn(User),
}

impl SessionStatus {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionStatus::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    /// The session token, which is the user identifier itself; no separate
    /// token is minted by the mock Identity Store.
    pub fn token(&self) -> Option<&str> {
        self.user().map(|u| u.id.as_str())
    }
}
