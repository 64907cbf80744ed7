//! User directory port for resolving changelog authors.

use serde::{Deserialize, Serialize};

/// A resolved user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier, usually the login name.
    pub id: String,
    /// Name shown in reports.
    pub display_name: String,
}

/// Looks up user identities by name.
pub trait UserDirectory: Send + Sync {
    /// Resolves `name` to a user, or `None` when it is blank or unknown.
    fn resolve(&self, name: &str) -> Option<User>;
}
