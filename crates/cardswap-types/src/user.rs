//! User types

use serde::{Deserialize, Serialize};

/// User account as stored in the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Argon2 PHC string, or clear text for rows written before hashing was introduced.
    #[serde(skip_serializing)]
    pub password: String,
}

/// Result of a login attempt.
///
/// Login doubles as sign-up: an unseen name is registered on the spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// No user had this name; one was created with the supplied password.
    Created(User),
    /// The user exists and the password matched.
    Authenticated(User),
    /// The user exists and the password did not match.
    Rejected,
}

impl LoginOutcome {
    pub fn user(&self) -> Option<&User> {
        match self {
            LoginOutcome::Created(user) | LoginOutcome::Authenticated(user) => Some(user),
            LoginOutcome::Rejected => None,
        }
    }
}
