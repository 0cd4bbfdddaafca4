//! Bounded libSQL connection pool.
//!
//! A semaphore caps the number of connections checked out at once. Returned
//! connections are kept for reuse up to `max_idle`, and any connection older
//! than `max_lifetime` is dropped instead of being handed out again.

use std::ops::Deref;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::{Semaphore, SemaphorePermit};
use voyager_config::DatabaseConfig;

use crate::error::DatabaseError;

/// Pool sizing and recycling limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum connections checked out at once. Further acquirers wait.
    pub max_open: usize,
    /// Maximum connections kept for reuse.
    pub max_idle: usize,
    /// Connections older than this are discarded. `None` keeps them forever.
    pub max_lifetime: Option<Duration>,
}

impl PoolConfig {
    /// One connection, reused forever.
    ///
    /// Required for `:memory:` databases, where every new connection would
    /// open a separate, empty database.
    #[must_use]
    pub const fn single() -> Self {
        Self {
            max_open: 1,
            max_idle: 1,
            max_lifetime: None,
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::from(&DatabaseConfig::default())
    }
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_open: config.max_open_connections as usize,
            max_idle: config.max_idle_connections as usize,
            max_lifetime: config.max_lifetime(),
        }
    }
}

struct IdleConnection {
    conn: libsql::Connection,
    opened_at: Instant,
}

pub struct ConnectionPool {
    db: libsql::Database,
    permits: Semaphore,
    idle: Mutex<Vec<IdleConnection>>,
    config: PoolConfig,
}

impl ConnectionPool {
    #[must_use]
    pub fn new(db: libsql::Database, config: PoolConfig) -> Self {
        Self {
            db,
            permits: Semaphore::new(config.max_open),
            idle: Mutex::new(Vec::with_capacity(config.max_idle)),
            config,
        }
    }

    /// Check out a connection, waiting while `max_open` are already in use.
    ///
    /// Reuses the most recently returned idle connection that has not
    /// outlived `max_lifetime`; otherwise opens a new one.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Pool` if the pool has been closed, or
    /// `DatabaseError::LibSql` if a new connection cannot be opened.
    pub async fn acquire(&self) -> Result<PooledConnection<'_>, DatabaseError> {
        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| DatabaseError::Pool("connection pool is closed".into()))?;

        let (conn, opened_at) = match self.take_idle() {
            Some(idle) => (idle.conn, idle.opened_at),
            None => {
                tracing::debug!("opening new pooled connection");
                (self.db.connect()?, Instant::now())
            }
        };

        Ok(PooledConnection {
            pool: self,
            conn,
            opened_at,
            _permit: permit,
        })
    }

    /// Stop handing out connections. Pending and future `acquire` calls fail.
    pub fn close(&self) {
        self.permits.close();
        self.lock_idle().clear();
    }

    /// Number of connections that can be checked out right now without waiting.
    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Number of connections currently held for reuse.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.lock_idle().len()
    }

    #[must_use]
    pub const fn config(&self) -> PoolConfig {
        self.config
    }

    fn take_idle(&self) -> Option<IdleConnection> {
        let mut idle = self.lock_idle();
        while let Some(candidate) = idle.pop() {
            if !self.is_expired(candidate.opened_at) {
                return Some(candidate);
            }
            tracing::debug!("discarding pooled connection past its max lifetime");
        }
        None
    }

    fn release(&self, conn: libsql::Connection, opened_at: Instant) {
        if self.permits.is_closed() || self.is_expired(opened_at) {
            return;
        }
        let mut idle = self.lock_idle();
        if idle.len() < self.config.max_idle {
            idle.push(IdleConnection { conn, opened_at });
        }
    }

    fn is_expired(&self, opened_at: Instant) -> bool {
        self.config
            .max_lifetime
            .is_some_and(|lifetime| opened_at.elapsed() >= lifetime)
    }

    // The idle list holds no invariants a panicking holder could break.
    fn lock_idle(&self) -> MutexGuard<'_, Vec<IdleConnection>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A checked-out connection. Returned to the pool on drop.
pub struct PooledConnection<'a> {
    pool: &'a ConnectionPool,
    conn: libsql::Connection,
    opened_at: Instant,
    _permit: SemaphorePermit<'a>,
}

impl Deref for PooledConnection<'_> {
    type Target = libsql::Connection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl Drop for PooledConnection<'_> {
    fn drop(&mut self) {
        // The permit field drops after this body, so the connection is back
        // in the idle list before a waiter can proceed.
        self.pool.release(self.conn.clone(), self.opened_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn file_pool(dir: &TempDir, config: PoolConfig) -> ConnectionPool {
        let path = dir.path().join("pool.db");
        let db = libsql::Builder::new_local(path).build().await.unwrap();
        ConnectionPool::new(db, config)
    }

    #[tokio::test]
    async fn never_exceeds_max_open() {
        let dir = TempDir::new().unwrap();
        let pool = file_pool(
            &dir,
            PoolConfig {
                max_open: 2,
                max_idle: 2,
                max_lifetime: None,
            },
        )
        .await;

        let first = pool.acquire().await.unwrap();
        let _second = pool.acquire().await.unwrap();
        assert_eq!(pool.available(), 0);

        let blocked = tokio::time::timeout(Duration::from_millis(50), pool.acquire()).await;
        assert!(blocked.is_err(), "third acquire should wait");

        drop(first);
        let third = tokio::time::timeout(Duration::from_millis(500), pool.acquire()).await;
        assert!(third.is_ok(), "acquire should proceed once a connection is returned");
    }

    #[tokio::test]
    async fn idle_list_is_bounded() {
        let dir = TempDir::new().unwrap();
        let pool = file_pool(
            &dir,
            PoolConfig {
                max_open: 3,
                max_idle: 1,
                max_lifetime: None,
            },
        )
        .await;

        let a = pool.acquire().await.unwrap();
        let b = pool.acquire().await.unwrap();
        let c = pool.acquire().await.unwrap();
        drop(a);
        drop(b);
        drop(c);
        assert_eq!(pool.idle_count(), 1);
        assert_eq!(pool.available(), 3);
    }

    #[tokio::test]
    async fn expired_connections_are_not_reused() {
        let dir = TempDir::new().unwrap();
        let pool = file_pool(
            &dir,
            PoolConfig {
                max_open: 1,
                max_idle: 1,
                max_lifetime: Some(Duration::from_millis(20)),
            },
        )
        .await;

        {
            let conn = pool.acquire().await.unwrap();
            conn.execute("CREATE TABLE t (x INTEGER)", ()).await.unwrap();
        }
        assert_eq!(pool.idle_count(), 1);

        tokio::time::sleep(Duration::from_millis(40)).await;
        let conn = pool.acquire().await.unwrap();
        assert_eq!(pool.idle_count(), 0);

        // A fresh connection to the same file still sees the schema.
        conn.execute("INSERT INTO t (x) VALUES (1)", ()).await.unwrap();
    }

    #[tokio::test]
    async fn single_pool_reuses_one_memory_connection() {
        let db = libsql::Builder::new_local(":memory:").build().await.unwrap();
        let pool = ConnectionPool::new(db, PoolConfig::single());

        {
            let conn = pool.acquire().await.unwrap();
            conn.execute("CREATE TABLE t (x INTEGER)", ()).await.unwrap();
        }
        let conn = pool.acquire().await.unwrap();
        conn.execute("INSERT INTO t (x) VALUES (1)", ())
            .await
            .expect("table created on the first checkout should still exist");
    }

    #[tokio::test]
    async fn closed_pool_rejects_acquire() {
        let db = libsql::Builder::new_local(":memory:").build().await.unwrap();
        let pool = ConnectionPool::new(db, PoolConfig::single());
        pool.close();
        assert!(matches!(pool.acquire().await, Err(DatabaseError::Pool(_))));
    }

    #[test]
    fn config_from_database_section() {
        let config = PoolConfig::from(&DatabaseConfig {
            max_open_connections: 8,
            max_idle_connections: 3,
            max_lifetime_secs: 0,
            ..Default::default()
        });
        assert_eq!(
            config,
            PoolConfig {
                max_open: 8,
                max_idle: 3,
                max_lifetime: None,
            }
        );
    }
}
