//! Chat Repository Trait
//!
//! Storage operations shared by both chat kinds. Every function runs on a
//! caller-supplied connection so the registry decides the session scope.

use async_trait::async_trait;
use sqlx::SqliteConnection;

use crate::domain::{ChatEntity, ChatRecord};
use crate::shared::error::AppError;

/// Row shape of the columns common to both chat tables.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct ChatRow {
    pub id: i64,
    pub external_id: i64,
    pub name: String,
    pub active: bool,
    pub code_phrase: Option<String>,
}

impl ChatRow {
    pub fn into_record(self) -> ChatRecord {
        ChatRecord {
            id: self.id,
            external_id: self.external_id,
            name: self.name,
            active: self.active,
            code_phrase: self.code_phrase,
        }
    }
}

/// SQLite persistence for a chat kind.
///
/// Lookups load the counterpart relation (a group's members, an
/// individual's groups) in the same call.
#[async_trait]
pub trait ChatRepository: ChatEntity {
    /// Find a chat by its platform id.
    async fn find_by_external_id(
        conn: &mut SqliteConnection,
        external_id: i64,
    ) -> Result<Option<Self>, AppError>;

    /// Find a chat by its code phrase.
    async fn find_by_code_phrase(
        conn: &mut SqliteConnection,
        code_phrase: &str,
    ) -> Result<Option<Self>, AppError>;

    /// Every chat of this kind, ordered by surrogate id.
    async fn find_all(conn: &mut SqliteConnection) -> Result<Vec<Self>, AppError>;

    /// Number of chats of this kind.
    async fn count(conn: &mut SqliteConnection) -> Result<i64, AppError>;

    /// Insert a new chat with default flags. Fails on a duplicate external id.
    async fn insert(
        conn: &mut SqliteConnection,
        external_id: i64,
        name: &str,
    ) -> Result<Self, AppError>;

    /// Write every column of an existing chat, addressed by surrogate id.
    async fn save(conn: &mut SqliteConnection, chat: &Self) -> Result<(), AppError>;

    /// Delete by platform id, returning the number of rows removed.
    async fn delete_by_external_id(
        conn: &mut SqliteConnection,
        external_id: i64,
    ) -> Result<u64, AppError>;
}
