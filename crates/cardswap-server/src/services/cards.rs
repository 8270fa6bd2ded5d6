//! Card service: owner-scoped card operations

use cardswap_core::{Card, CardStore, CardswapError, Result, Store, User, UserCards, UserStore};
use std::sync::Arc;
use tracing::{debug, info};

pub struct CardService {
    store: Arc<dyn Store>,
}

impl CardService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn resolve_owner(&self, user_name: &str) -> Result<User> {
        self.store
            .find_user_by_name(user_name)
            .await?
            .ok_or_else(|| CardswapError::UserNotFound(user_name.to_string()))
    }

    pub async fn add_card(&self, card_name: &str, user_name: &str) -> Result<Card> {
        let owner = self.resolve_owner(user_name).await?;
        let card = self.store.insert_card(owner.id, card_name).await?;

        info!("Added card {} ({}) for {}", card.name, card.id, owner.name);
        Ok(card)
    }

    pub async fn list_cards(&self, user_name: &str) -> Result<UserCards> {
        let owner = self.resolve_owner(user_name).await?;
        let cards = self.store.list_cards_by_owner(owner.id).await?;

        debug!("Listing {} cards for {}", cards.len(), owner.name);
        Ok(UserCards {
            user: user_name.to_string(),
            cards: cards.into_iter().map(|c| c.name).collect(),
        })
    }

    /// Deletes one card with this name. With duplicates, the oldest goes.
    pub async fn delete_card(&self, card_name: &str, user_name: &str) -> Result<()> {
        let owner = self.resolve_owner(user_name).await?;

        if !self.store.delete_first_card(owner.id, card_name).await? {
            return Err(CardswapError::CardNotFound(card_name.to_string()));
        }

        info!("Removed card {} for {}", card_name, owner.name);
        Ok(())
    }
}
