//! # voyager-db
//!
//! libSQL persistence for Space Voyagers.
//!
//! Owns the relational side of the service: the bounded connection pool,
//! the ordered migration ledger, list-query construction, and the exoplanet
//! repository. The database handle is constructed once at startup and passed
//! down explicitly; nothing here is process-global.

pub mod error;
pub mod helpers;
pub mod migrations;
pub mod pool;
pub mod query;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use pool::{ConnectionPool, PoolConfig, PooledConnection};
use voyager_config::DatabaseConfig;

/// Path that selects a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Central database handle.
///
/// Wraps a libSQL database behind a [`ConnectionPool`]. Every statement runs
/// on a connection checked out through [`VoyagerDb::acquire`].
pub struct VoyagerDb {
    pool: ConnectionPool,
}

impl VoyagerDb {
    /// Open a local database file (or `:memory:`).
    ///
    /// In-memory databases always get [`PoolConfig::single`], whatever
    /// `pool` says.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open_local(path: &str, pool: PoolConfig) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let pool = if path == MEMORY_PATH {
            PoolConfig::single()
        } else {
            pool
        };
        tracing::debug!(path, max_open = pool.max_open, "opened local database");
        Ok(Self {
            pool: ConnectionPool::new(db, pool),
        })
    }

    /// Open a remote libSQL database (e.g., Turso).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the client cannot be built.
    pub async fn open_remote(
        url: &str,
        auth_token: &str,
        pool: PoolConfig,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        tracing::debug!(url, max_open = pool.max_open, "opened remote database");
        Ok(Self {
            pool: ConnectionPool::new(db, pool),
        })
    }

    /// Open whichever database the configuration selects.
    ///
    /// Remote when both `url` and `auth_token` are set, local `path` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = PoolConfig::from(config);
        if config.is_remote() {
            Self::open_remote(&config.url, &config.auth_token, pool).await
        } else {
            Self::open_local(&config.path, pool).await
        }
    }

    /// Check out a pooled connection.
    ///
    /// Hold it only for the statements of one unit of work; with a
    /// single-connection pool a second `acquire` in the same task waits forever.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if no connection can be obtained.
    pub async fn acquire(&self) -> Result<PooledConnection<'_>, DatabaseError> {
        self.pool.acquire().await
    }

    #[must_use]
    pub const fn pool(&self) -> &ConnectionPool {
        &self.pool
    }
}
