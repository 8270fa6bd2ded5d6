//! Request and response bodies of the HTTP API

use serde::{Deserialize, Serialize};

/// Body of `POST /login/` and `POST /register/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

/// Body of `POST /cards/` and `DELETE /cards/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRequest {
    pub name: String,
    pub user_name: String,
}

/// Confirmation returned by every mutating endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `GET /cards/{user_name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCards {
    pub user: String,
    pub cards: Vec<String>,
}

/// Error body shared by every failing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}
