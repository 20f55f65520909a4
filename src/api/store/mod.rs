//! Persistence for user records.
//!
//! [`Store`] is either a PostgreSQL pool or an in-process map. The map is
//! used when the server starts without a DSN and throughout the tests.

mod memory;
mod postgres;

pub use self::memory::MemoryStore;

use crate::users::{NewUser, User, UserId};
use anyhow::Result;
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,

    #[error("email already exists")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Clone, Debug)]
pub enum Store {
    Postgres(PgPool),
    Memory(MemoryStore),
}

impl Store {
    /// Connects to PostgreSQL and applies the schema.
    ///
    /// # Errors
    /// Returns an error if the connection or the schema statements fail.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let pool = postgres::connect(dsn).await?;
        Ok(Self::Postgres(pool))
    }

    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgresql",
            Self::Memory(_) => "memory",
        }
    }

    /// # Errors
    /// Returns an error if the database cannot be reached.
    pub async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Self::Postgres(pool) => postgres::ping(pool).await,
            Self::Memory(_) => Ok(()),
        }
    }

    /// All users ordered by id.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] on query failure.
    pub async fn list(&self) -> Result<Vec<User>, StoreError> {
        match self {
            Self::Postgres(pool) => postgres::list(pool).await,
            Self::Memory(memory) => Ok(memory.list().await),
        }
    }

    /// # Errors
    /// Returns [`StoreError::NotFound`] for unknown ids.
    pub async fn get(&self, id: UserId) -> Result<User, StoreError> {
        match self {
            Self::Postgres(pool) => postgres::get(pool, id).await,
            Self::Memory(memory) => memory.get(id).await,
        }
    }

    /// Inserts a user and returns it with its assigned id.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateEmail`] if the email is taken.
    pub async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        match self {
            Self::Postgres(pool) => postgres::create(pool, user).await,
            Self::Memory(memory) => memory.create(user).await,
        }
    }

    /// Replaces every field of user `id`.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] for unknown ids and
    /// [`StoreError::DuplicateEmail`] if another user owns the email.
    pub async fn update(&self, id: UserId, user: NewUser) -> Result<User, StoreError> {
        match self {
            Self::Postgres(pool) => postgres::update(pool, id, user).await,
            Self::Memory(memory) => memory.update(id, user).await,
        }
    }

    /// Hard-deletes user `id`.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when nothing was deleted.
    pub async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        match self {
            Self::Postgres(pool) => postgres::delete(pool, id).await,
            Self::Memory(memory) => memory.delete(id).await,
        }
    }
}
