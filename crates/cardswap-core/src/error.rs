//! Error types for Cardswap

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CardswapError>;

#[derive(Error, Debug)]
pub enum CardswapError {
    #[error("Incorrect password")]
    Unauthorized,

    #[error("Username already taken: {0}")]
    AlreadyExists(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// A write hit a storage-level uniqueness constraint.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

impl CardswapError {
    /// Short machine-readable kind, used as the `code` of error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            CardswapError::Unauthorized => "unauthorized",
            CardswapError::AlreadyExists(_) => "already_exists",
            CardswapError::UserNotFound(_) | CardswapError::CardNotFound(_) => "not_found",
            CardswapError::ConstraintViolation(_) => "conflict",
            CardswapError::InvalidInput(_) => "invalid_input",
            CardswapError::Database(_) | CardswapError::PasswordHash(_) => "internal",
        }
    }

    /// Human-readable detail safe to send to clients.
    pub fn detail(&self) -> String {
        match self {
            CardswapError::Unauthorized => "Incorrect password".to_string(),
            CardswapError::AlreadyExists(_) => "Username already taken".to_string(),
            CardswapError::UserNotFound(_) => "User not found".to_string(),
            CardswapError::CardNotFound(_) => "Card not found".to_string(),
            CardswapError::ConstraintViolation(_) => "Conflicting write".to_string(),
            CardswapError::InvalidInput(msg) => msg.clone(),
            CardswapError::Database(_) | CardswapError::PasswordHash(_) => {
                "Internal server error".to_string()
            }
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CardswapError::Database(_) | CardswapError::PasswordHash(_)
        )
    }
}
