//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use cardswap_types::{Card, User};

/// User store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. Fails with `ConstraintViolation` if the name is taken.
    async fn insert_user(&self, name: &str, password: &str) -> Result<User>;
    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>>;
    async fn update_user_password(&self, id: i64, password: &str) -> Result<()>;
}

/// Card store
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn insert_card(&self, owner_id: i64, name: &str) -> Result<Card>;
    /// Cards of one owner, in ascending id order.
    async fn list_cards_by_owner(&self, owner_id: i64) -> Result<Vec<Card>>;
    /// Removes the lowest-id card with this name and owner. Returns false if none matched.
    async fn delete_first_card(&self, owner_id: i64, name: &str) -> Result<bool>;
}

/// Everything the services need from a backend
pub trait Store: UserStore + CardStore {}

impl<T: UserStore + CardStore> Store for T {}
