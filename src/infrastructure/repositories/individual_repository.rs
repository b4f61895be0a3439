//! Individual Repository Implementation
//!
//! SQLite implementation of `ChatRepository` for `Individual`.

use async_trait::async_trait;
use sqlx::SqliteConnection;

use super::chat_repository::{ChatRepository, ChatRow};
use crate::domain::{ChatRecord, Group, Individual};
use crate::shared::error::AppError;

/// Database row representation matching the individuals table schema.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct IndividualRow {
    id: i64,
    external_id: i64,
    name: String,
    active: bool,
    code_phrase: Option<String>,
    username: Option<String>,
}

impl IndividualRow {
    /// Convert database row to domain Individual entity.
    /// Note: groups are loaded separately.
    pub fn into_individual(self, groups: Vec<Group>) -> Individual {
        Individual {
            chat: ChatRecord {
                id: self.id,
                external_id: self.external_id,
                name: self.name,
                active: self.active,
                code_phrase: self.code_phrase,
            },
            username: self.username,
            groups,
        }
    }
}

/// Load the groups an individual belongs to (without their members).
async fn load_groups(conn: &mut SqliteConnection, individual_id: i64) -> Result<Vec<Group>, AppError> {
    let rows = sqlx::query_as::<_, ChatRow>(
        r#"
        SELECT g.id, g.external_id, g.name, g.active, g.code_phrase
        FROM "groups" g
        INNER JOIN memberships m ON m.group_id = g.id
        WHERE m.individual_id = ?1
        ORDER BY g.id ASC
        "#,
    )
    .bind(individual_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Group {
            chat: row.into_record(),
            members: Vec::new(),
        })
        .collect())
}

/// Attach groups to a fetched row.
async fn with_groups(conn: &mut SqliteConnection, row: IndividualRow) -> Result<Individual, AppError> {
    let groups = load_groups(conn, row.id).await?;
    Ok(row.into_individual(groups))
}

#[async_trait]
impl ChatRepository for Individual {
    async fn find_by_external_id(
        conn: &mut SqliteConnection,
        external_id: i64,
    ) -> Result<Option<Self>, AppError> {
        let row = sqlx::query_as::<_, IndividualRow>(
            r#"
            SELECT id, external_id, name, active, code_phrase, username
            FROM individuals
            WHERE external_id = ?1
            "#,
        )
        .bind(external_id)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(r) => Ok(Some(with_groups(conn, r).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_code_phrase(
        conn: &mut SqliteConnection,
        code_phrase: &str,
    ) -> Result<Option<Self>, AppError> {
        let row = sqlx::query_as::<_, IndividualRow>(
            r#"
            SELECT id, external_id, name, active, code_phrase, username
            FROM individuals
            WHERE code_phrase = ?1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(code_phrase)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(r) => Ok(Some(with_groups(conn, r).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(conn: &mut SqliteConnection) -> Result<Vec<Self>, AppError> {
        let rows = sqlx::query_as::<_, IndividualRow>(
            r#"
            SELECT id, external_id, name, active, code_phrase, username
            FROM individuals
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut individuals = Vec::with_capacity(rows.len());
        for row in rows {
            individuals.push(with_groups(conn, row).await?);
        }

        Ok(individuals)
    }

    async fn count(conn: &mut SqliteConnection) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM individuals")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }

    async fn insert(
        conn: &mut SqliteConnection,
        external_id: i64,
        name: &str,
    ) -> Result<Self, AppError> {
        let row = sqlx::query_as::<_, IndividualRow>(
            r#"
            INSERT INTO individuals (external_id, name)
            VALUES (?1, ?2)
            RETURNING id, external_id, name, active, code_phrase, username
            "#,
        )
        .bind(external_id)
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row.into_individual(Vec::new()))
    }

    async fn save(conn: &mut SqliteConnection, chat: &Self) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE individuals
            SET external_id = ?2,
                name = ?3,
                active = ?4,
                code_phrase = ?5,
                username = ?6
            WHERE id = ?1
            "#,
        )
        .bind(chat.chat.id)
        .bind(chat.chat.external_id)
        .bind(&chat.chat.name)
        .bind(chat.chat.active)
        .bind(&chat.chat.code_phrase)
        .bind(&chat.username)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Individual with id {} not found",
                chat.chat.id
            )));
        }

        Ok(())
    }

    async fn delete_by_external_id(
        conn: &mut SqliteConnection,
        external_id: i64,
    ) -> Result<u64, AppError> {
        // memberships are removed via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM individuals WHERE external_id = ?1")
            .bind(external_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
