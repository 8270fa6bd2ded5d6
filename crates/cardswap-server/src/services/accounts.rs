//! Account service: registration and login

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use cardswap_core::{CardswapError, LoginOutcome, Result, Store, User, UserStore};
use rand::rngs::OsRng;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AccountService {
    store: Arc<dyn Store>,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a user. The unique index on the name is the only source of
    /// truth for "already taken", so concurrent sign-ups cannot both win.
    pub async fn register(&self, name: &str, password: &str) -> Result<User> {
        let password_hash = hash_password(password)?;

        match self.store.insert_user(name, &password_hash).await {
            Ok(user) => {
                info!("Registered user {} (id {})", user.name, user.id);
                Ok(user)
            }
            Err(CardswapError::ConstraintViolation(_)) => {
                Err(CardswapError::AlreadyExists(name.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Logs in, registering the name first if nobody holds it yet.
    pub async fn login(&self, name: &str, password: &str) -> Result<LoginOutcome> {
        if let Some(user) = self.store.find_user_by_name(name).await? {
            return self.authenticate(user, password).await;
        }

        let password_hash = hash_password(password)?;
        match self.store.insert_user(name, &password_hash).await {
            Ok(user) => {
                info!("Created user {} on first login", user.name);
                Ok(LoginOutcome::Created(user))
            }
            Err(CardswapError::ConstraintViolation(_)) => {
                // Lost a race with a concurrent sign-up; check against the winner
                let user = self
                    .store
                    .find_user_by_name(name)
                    .await?
                    .ok_or_else(|| CardswapError::UserNotFound(name.to_string()))?;
                self.authenticate(user, password).await
            }
            Err(e) => Err(e),
        }
    }

    async fn authenticate(&self, user: User, password: &str) -> Result<LoginOutcome> {
        match verify_password(&user.password, password) {
            Verification::Match => Ok(LoginOutcome::Authenticated(user)),
            Verification::LegacyMatch => {
                info!("Upgrading clear-text credential for user {}", user.name);
                let password_hash = hash_password(password)?;
                self.store
                    .update_user_password(user.id, &password_hash)
                    .await?;
                Ok(LoginOutcome::Authenticated(User {
                    password: password_hash,
                    ..user
                }))
            }
            Verification::Mismatch => {
                warn!("Rejected password for user {}", user.name);
                Ok(LoginOutcome::Rejected)
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Verification {
    Match,
    /// Stored value is clear text from before hashing, and it matched.
    LegacyMatch,
    Mismatch,
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CardswapError::PasswordHash(e.to_string()))
}

fn verify_password(stored: &str, supplied: &str) -> Verification {
    match PasswordHash::new(stored) {
        Ok(parsed) => {
            if Argon2::default()
                .verify_password(supplied.as_bytes(), &parsed)
                .is_ok()
            {
                Verification::Match
            } else {
                Verification::Mismatch
            }
        }
        Err(_) if stored == supplied => Verification::LegacyMatch,
        Err(_) => Verification::Mismatch,
    }
}
