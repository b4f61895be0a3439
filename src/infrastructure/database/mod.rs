//! Database Module
//!
//! SQLite connection pool, schema bootstrap, and scoped sessions.

pub mod session;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{ConnectOptions, SqlitePool};

use crate::config::DatabaseSettings;
use crate::domain::ChatKind;

pub use session::{Session, SessionFactory};

/// How long a connection waits on a locked database before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether the URL points at a private in-memory database.
fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Build connection options from settings.
///
/// Foreign keys are always enforced so membership rows cascade. Writers
/// wait up to `BUSY_TIMEOUT` for the database lock instead of failing. With
/// `echo` set, every statement is logged at INFO; otherwise statement
/// logging is off.
pub fn connect_options(settings: &DatabaseSettings) -> Result<SqliteConnectOptions, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let options = if settings.echo {
        options.log_statements(log::LevelFilter::Info)
    } else {
        options.disable_statement_logging()
    };

    Ok(options)
}

/// Create a SQLite connection pool
///
/// Every connection to an in-memory URL opens a separate database, so such
/// pools are held to one connection that never expires.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let options = connect_options(settings)?;

    let pool_options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout));

    let pool_options = if is_in_memory(&settings.url) {
        pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(settings.max_connections)
    };

    pool_options.connect_with(options).await
}

/// `CREATE TABLE` statement for one chat kind.
fn chat_table_sql(kind: ChatKind) -> String {
    let extra_columns = match kind {
        ChatKind::Individual => ",\n            username TEXT",
        ChatKind::Group => "",
    };

    format!(
        r#"
        CREATE TABLE IF NOT EXISTS "{table}" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            external_id INTEGER NOT NULL UNIQUE,
            name TEXT NOT NULL,
            active BOOLEAN NOT NULL DEFAULT 1,
            code_phrase TEXT{extra_columns}
        )
        "#,
        table = kind.table_name(),
    )
}

/// `CREATE TABLE` statement for the membership junction table.
fn membership_table_sql() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS memberships (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            group_id INTEGER NOT NULL REFERENCES "{groups}"(id) ON DELETE CASCADE,
            individual_id INTEGER NOT NULL REFERENCES "{individuals}"(id) ON DELETE CASCADE,
            CONSTRAINT idx_membership UNIQUE (individual_id, group_id)
        )
        "#,
        groups = ChatKind::Group.table_name(),
        individuals = ChatKind::Individual.table_name(),
    )
}

/// Create every table that does not exist yet.
///
/// Idempotent; meant to run once at setup time.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let statements = [
        chat_table_sql(ChatKind::Individual),
        chat_table_sql(ChatKind::Group),
        membership_table_sql(),
    ];

    let mut tx = pool.begin().await?;
    for statement in &statements {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!("Database schema ready");
    Ok(())
}
