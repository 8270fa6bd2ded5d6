//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use cardswap_core::{Card, CardStore, CardswapError, User, UserStore};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Sqlite, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Path value that selects a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(15),
        }
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_path: &str, settings: &PoolSettings) -> Result<Self> {
        if database_path == IN_MEMORY {
            return Self::in_memory().await;
        }

        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = Path::new(database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::from_pool(pool).await
    }

    /// Opens a fresh database that lives only as long as this value.
    ///
    /// The pool holds a single connection that never expires: every
    /// in-memory SQLite connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        tracing::info!("SQLite connection established, creating schema...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    /// Creates the tables if absent. Table, column and index names match
    /// databases created by earlier releases, so those open unchanged.
    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                password TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS ix_users_name ON users (name)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS ix_users_id ON users (id)")
            .execute(pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                owner_id INTEGER NOT NULL REFERENCES users (id)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS ix_cards_name ON cards (name)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS ix_cards_id ON cards (id)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS ix_cards_owner_id ON cards (owner_id)")
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Checks out a connection for one storage call. It goes back to the
    /// pool when dropped, including on early return through `?`.
    async fn acquire(&self) -> cardswap_core::Result<PoolConnection<Sqlite>> {
        self.pool.acquire().await.map_err(db_error)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for Database {
    async fn insert_user(&self, name: &str, password: &str) -> cardswap_core::Result<User> {
        let mut conn = self.acquire().await?;

        let id = sqlx::query("INSERT INTO users (name, password) VALUES (?1, ?2)")
            .bind(name)
            .bind(password)
            .execute(&mut *conn)
            .await
            .map_err(db_error)?
            .last_insert_rowid();

        Ok(User {
            id,
            name: name.to_string(),
            password: password.to_string(),
        })
    }

    async fn find_user_by_name(&self, name: &str) -> cardswap_core::Result<Option<User>> {
        let mut conn = self.acquire().await?;

        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, name, password FROM users WHERE name = ?1")
                .bind(name)
                .fetch_optional(&mut *conn)
                .await
                .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn update_user_password(&self, id: i64, password: &str) -> cardswap_core::Result<()> {
        let mut conn = self.acquire().await?;

        sqlx::query("UPDATE users SET password = ?1 WHERE id = ?2")
            .bind(password)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl CardStore for Database {
    async fn insert_card(&self, owner_id: i64, name: &str) -> cardswap_core::Result<Card> {
        let mut conn = self.acquire().await?;

        let id = sqlx::query("INSERT INTO cards (name, owner_id) VALUES (?1, ?2)")
            .bind(name)
            .bind(owner_id)
            .execute(&mut *conn)
            .await
            .map_err(db_error)?
            .last_insert_rowid();

        Ok(Card {
            id,
            name: name.to_string(),
            owner_id,
        })
    }

    async fn list_cards_by_owner(&self, owner_id: i64) -> cardswap_core::Result<Vec<Card>> {
        let mut conn = self.acquire().await?;

        let rows: Vec<CardRow> = sqlx::query_as(
            r#"
            SELECT id, name, owner_id FROM cards
            WHERE owner_id = ?1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_first_card(&self, owner_id: i64, name: &str) -> cardswap_core::Result<bool> {
        let mut conn = self.acquire().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM cards WHERE id = (
                SELECT id FROM cards
                WHERE owner_id = ?1 AND name = ?2
                ORDER BY id
                LIMIT 1
            )
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .execute(&mut *conn)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn db_error(e: sqlx::Error) -> CardswapError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            CardswapError::ConstraintViolation(db.message().to_string())
        }
        _ => CardswapError::Database(e.to_string()),
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    password: String,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            name: r.name,
            password: r.password,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CardRow {
    id: i64,
    name: String,
    owner_id: i64,
}

impl From<CardRow> for Card {
    fn from(r: CardRow) -> Self {
        Card {
            id: r.id,
            name: r.name,
            owner_id: r.owner_id,
        }
    }
}
