//! Group Repository Implementation
//!
//! SQLite implementation of `ChatRepository` for `Group`.
//! The table is named `groups`, which is quoted in every statement.

use async_trait::async_trait;
use sqlx::SqliteConnection;

use super::chat_repository::{ChatRepository, ChatRow};
use super::individual_repository::IndividualRow;
use crate::domain::{Group, Individual};
use crate::shared::error::AppError;

/// Load the members of a group (without their other groups).
async fn load_members(conn: &mut SqliteConnection, group_id: i64) -> Result<Vec<Individual>, AppError> {
    let rows = sqlx::query_as::<_, IndividualRow>(
        r#"
        SELECT i.id, i.external_id, i.name, i.active, i.code_phrase, i.username
        FROM individuals i
        INNER JOIN memberships m ON m.individual_id = i.id
        WHERE m.group_id = ?1
        ORDER BY i.id ASC
        "#,
    )
    .bind(group_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| row.into_individual(Vec::new()))
        .collect())
}

async fn with_members(conn: &mut SqliteConnection, row: ChatRow) -> Result<Group, AppError> {
    let members = load_members(conn, row.id).await?;
    Ok(Group {
        chat: row.into_record(),
        members,
    })
}

#[async_trait]
impl ChatRepository for Group {
    async fn find_by_external_id(
        conn: &mut SqliteConnection,
        external_id: i64,
    ) -> Result<Option<Self>, AppError> {
        let row = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT id, external_id, name, active, code_phrase
            FROM "groups"
            WHERE external_id = ?1
            "#,
        )
        .bind(external_id)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(r) => Ok(Some(with_members(conn, r).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_code_phrase(
        conn: &mut SqliteConnection,
        code_phrase: &str,
    ) -> Result<Option<Self>, AppError> {
        let row = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT id, external_id, name, active, code_phrase
            FROM "groups"
            WHERE code_phrase = ?1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(code_phrase)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(r) => Ok(Some(with_members(conn, r).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(conn: &mut SqliteConnection) -> Result<Vec<Self>, AppError> {
        let rows = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT id, external_id, name, active, code_phrase
            FROM "groups"
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            groups.push(with_members(conn, row).await?);
        }

        Ok(groups)
    }

    async fn count(conn: &mut SqliteConnection) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM "groups""#)
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }

    async fn insert(
        conn: &mut SqliteConnection,
        external_id: i64,
        name: &str,
    ) -> Result<Self, AppError> {
        let row = sqlx::query_as::<_, ChatRow>(
            r#"
            INSERT INTO "groups" (external_id, name)
            VALUES (?1, ?2)
            RETURNING id, external_id, name, active, code_phrase
            "#,
        )
        .bind(external_id)
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        Ok(Group {
            chat: row.into_record(),
            members: Vec::new(),
        })
    }

    async fn save(conn: &mut SqliteConnection, chat: &Self) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE "groups"
            SET external_id = ?2,
                name = ?3,
                active = ?4,
                code_phrase = ?5
            WHERE id = ?1
            "#,
        )
        .bind(chat.chat.id)
        .bind(chat.chat.external_id)
        .bind(&chat.chat.name)
        .bind(chat.chat.active)
        .bind(&chat.chat.code_phrase)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Group with id {} not found",
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
        let result = sqlx::query(r#"DELETE FROM "groups" WHERE external_id = ?1"#)
            .bind(external_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
