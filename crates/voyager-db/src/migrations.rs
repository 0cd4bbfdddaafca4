//! Ordered, append-only schema migrations tracked in a `migrations` ledger.
//!
//! Each migration runs at most once. Before running one, the runner looks up
//! its name in the ledger; after it succeeds, the name is recorded. The
//! ledger table is created on first use. Re-running against a partially
//! migrated database applies only what is missing, in declaration order.
//!
//! A failed migration stops the run. Nothing is rolled back, and the caller
//! must not serve requests against the resulting schema. Migration and ledger
//! insert are separate statements, so a crash between them leaves the
//! migration applied but unrecorded.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::VoyagerDb;
use crate::error::DatabaseError;
use crate::helpers::parse_datetime;

const LEDGER_TABLE: &str = include_str!("../migrations/ledger.sql");

/// A named schema change. The name is the idempotency key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub name: &'static str,
    pub statement: &'static str,
}

/// Every migration, in application order. Append only; never edit or reorder.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "create_exoplanets_table",
        statement: include_str!("../migrations/001_create_exoplanets_table.sql"),
    },
    Migration {
        name: "add_gravity_column_to_exoplanets",
        statement: include_str!("../migrations/002_add_gravity_column_to_exoplanets.sql"),
    },
];

/// Whether a migration has been recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    Pending,
    Applied,
}

/// A ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    pub name: String,
    pub applied_at: DateTime<Utc>,
}

/// Outcome of one run, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub applied: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

/// Applies a fixed list of migrations against one connection.
pub struct MigrationRunner<'a> {
    migrations: &'a [Migration],
}

impl<'a> MigrationRunner<'a> {
    #[must_use]
    pub const fn new(migrations: &'a [Migration]) -> Self {
        Self { migrations }
    }

    /// Apply every pending migration in order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Migration` naming the first migration whose
    /// status check, statement, or ledger insert failed. Later migrations are
    /// not attempted.
    pub async fn run(&self, conn: &libsql::Connection) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();
        for migration in self.migrations {
            if is_applied(conn, migration.name).await? {
                tracing::debug!(migration = migration.name, "migration already applied");
                report.skipped.push(migration.name);
                continue;
            }
            apply(conn, migration).await?;
            report.applied.push(migration.name);
        }
        Ok(report)
    }

    /// Report each migration's state without changing anything.
    ///
    /// A missing ledger means nothing has been applied.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the ledger cannot be read.
    pub async fn status(
        &self,
        conn: &libsql::Connection,
    ) -> Result<Vec<(&'static str, MigrationState)>, DatabaseError> {
        let applied: HashSet<String> = applied_records(conn)
            .await?
            .into_iter()
            .map(|record| record.name)
            .collect();
        Ok(self
            .migrations
            .iter()
            .map(|migration| {
                let state = if applied.contains(migration.name) {
                    MigrationState::Applied
                } else {
                    MigrationState::Pending
                };
                (migration.name, state)
            })
            .collect())
    }
}

impl Default for MigrationRunner<'static> {
    fn default() -> Self {
        Self::new(MIGRATIONS)
    }
}

impl VoyagerDb {
    /// Run all embedded migrations in sequence.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Migration` if any migration fails; the schema
    /// is then in an unknown state and startup must not continue.
    pub async fn run_migrations(&self) -> Result<MigrationReport, DatabaseError> {
        let conn = self.acquire().await?;
        MigrationRunner::default().run(&conn).await
    }

    /// Ledger rows in the order they were applied.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the ledger cannot be read.
    pub async fn applied_migrations(&self) -> Result<Vec<MigrationRecord>, DatabaseError> {
        let conn = self.acquire().await?;
        applied_records(&conn).await
    }

    /// Every embedded migration with its current state.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the ledger cannot be read.
    pub async fn migration_status(
        &self,
    ) -> Result<Vec<(&'static str, MigrationState)>, DatabaseError> {
        let conn = self.acquire().await?;
        MigrationRunner::default().status(&conn).await
    }
}

/// Look up `name` in the ledger, creating the ledger if it does not exist yet.
async fn is_applied(conn: &libsql::Connection, name: &str) -> Result<bool, DatabaseError> {
    match count_records(conn, name).await {
        Ok(count) => Ok(count > 0),
        Err(DatabaseError::LibSql(e)) if is_missing_ledger(&e) => {
            tracing::info!("migrations table doesn't exist; creating it");
            conn.execute_batch(LEDGER_TABLE)
                .await
                .map_err(|e| migration_error(name, format!("creating migrations table: {e}")))?;
            Ok(false)
        }
        Err(e) => Err(migration_error(name, format!("checking migration status: {e}"))),
    }
}

async fn count_records(conn: &libsql::Connection, name: &str) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query("SELECT COUNT(*) FROM migrations WHERE name = ?1", [name])
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<i64>(0)?)
}

async fn apply(conn: &libsql::Connection, migration: &Migration) -> Result<(), DatabaseError> {
    conn.execute_batch(migration.statement)
        .await
        .map_err(|e| migration_error(migration.name, e.to_string()))?;
    conn.execute("INSERT INTO migrations (name) VALUES (?1)", [migration.name])
        .await
        .map_err(|e| migration_error(migration.name, format!("recording migration: {e}")))?;
    tracing::info!(migration = migration.name, "migration applied");
    Ok(())
}

async fn applied_records(conn: &libsql::Connection) -> Result<Vec<MigrationRecord>, DatabaseError> {
    let mut rows = match conn
        .query("SELECT name, applied_at FROM migrations ORDER BY id", ())
        .await
    {
        Ok(rows) => rows,
        Err(e) if is_missing_ledger(&e) => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    while let Some(row) = rows.next().await? {
        records.push(MigrationRecord {
            name: row.get::<String>(0)?,
            applied_at: parse_datetime(&row.get::<String>(1)?)?,
        });
    }
    Ok(records)
}

/// `SQLite` reports a missing table as a prepare failure with this message.
fn is_missing_ledger(e: &libsql::Error) -> bool {
    e.to_string().contains("no such table: migrations")
}

fn migration_error(name: &str, reason: String) -> DatabaseError {
    DatabaseError::Migration {
        name: name.to_string(),
        reason,
    }
}
