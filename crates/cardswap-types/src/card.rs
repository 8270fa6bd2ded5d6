//! Card types

use serde::{Deserialize, Serialize};

/// A named card owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
}
