//! Membership Repository Implementation
//!
//! SQLite access to the `memberships` junction table. Rows are addressed by
//! surrogate ids; callers resolve external ids first.

use sqlx::SqliteConnection;

use crate::domain::Membership;
use crate::shared::error::AppError;

/// Database row representation matching the memberships table schema.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: i64,
    individual_id: i64,
    group_id: i64,
}

impl MembershipRow {
    fn into_membership(self) -> Membership {
        Membership {
            id: self.id,
            individual_id: self.individual_id,
            group_id: self.group_id,
        }
    }
}

/// SQLite membership repository.
pub struct MembershipRepository;

impl MembershipRepository {
    /// Find the membership linking an individual to a group.
    pub async fn find(
        conn: &mut SqliteConnection,
        individual_id: i64,
        group_id: i64,
    ) -> Result<Option<Membership>, AppError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, individual_id, group_id
            FROM memberships
            WHERE individual_id = ?1 AND group_id = ?2
            "#,
        )
        .bind(individual_id)
        .bind(group_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(|r| r.into_membership()))
    }

    /// Insert a membership. A duplicate pair fails with a unique violation.
    pub async fn insert(
        conn: &mut SqliteConnection,
        individual_id: i64,
        group_id: i64,
    ) -> Result<Membership, AppError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r#"
            INSERT INTO memberships (individual_id, group_id)
            VALUES (?1, ?2)
            RETURNING id, individual_id, group_id
            "#,
        )
        .bind(individual_id)
        .bind(group_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row.into_membership())
    }

    /// Remove a membership, returning the number of rows removed.
    pub async fn delete(
        conn: &mut SqliteConnection,
        individual_id: i64,
        group_id: i64,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "DELETE FROM memberships WHERE individual_id = ?1 AND group_id = ?2",
        )
        .bind(individual_id)
        .bind(group_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Total number of membership rows.
    pub async fn count(conn: &mut SqliteConnection) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM memberships")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
