//! Scoped Sessions
//!
//! A `Session` is one pooled connection inside one transaction. Registry
//! calls open their own session, commit on success, and simply drop it on
//! every other exit path, which rolls the transaction back and returns the
//! connection to the pool.
//!
//! Sessions that write start with `BEGIN IMMEDIATE` so they take the write
//! lock up front. A deferred transaction that reads first and writes later
//! fails with `SQLITE_BUSY` on the upgrade instead of waiting.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::shared::error::AppError;

/// Transaction-scoped database session.
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Session {
    /// Create a new session around an open transaction.
    pub fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    /// Connection to run queries on.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Commit the transaction.
    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(AppError::Database)
    }
}

/// Opens sessions on a shared pool.
#[derive(Clone)]
pub struct SessionFactory {
    pool: SqlitePool,
}

impl SessionFactory {
    /// Create a session factory over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin a read-only session.
    pub async fn open(&self) -> Result<Session, AppError> {
        let tx = self.pool.begin().await.map_err(AppError::Database)?;
        Ok(Session::new(tx))
    }

    /// Begin a session that holds the write lock from its first statement.
    ///
    /// Concurrent writers queue on the busy timeout, so a check-then-insert
    /// inside one write session sees every committed row.
    pub async fn open_write(&self) -> Result<Session, AppError> {
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(AppError::Database)?;
        Ok(Session::new(tx))
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
