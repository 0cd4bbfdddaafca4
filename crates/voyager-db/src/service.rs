//! Service layer over the database handle.
//!
//! `VoyagerService` wraps `VoyagerDb`. Repository methods are implemented as
//! `impl VoyagerService` blocks under `repos/`.

use crate::VoyagerDb;
use crate::error::DatabaseError;
use crate::pool::PoolConfig;

pub struct VoyagerService {
    db: VoyagerDb,
}

impl VoyagerService {
    /// Open a local database and bring its schema up to date.
    ///
    /// # Arguments
    ///
    /// * `db_path`: path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or a
    /// migration fails.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = VoyagerDb::open_local(db_path, PoolConfig::default()).await?;
        db.run_migrations().await?;
        Ok(Self { db })
    }

    /// Wrap an already-opened database. The caller is responsible for having
    /// run migrations.
    #[must_use]
    pub const fn from_db(db: VoyagerDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &VoyagerDb {
        &self.db
    }
}
