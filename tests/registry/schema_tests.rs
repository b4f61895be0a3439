//! Schema Bootstrap Tests

use chat_registry::domain::{ChatKind, Individual};

use crate::common::{register_individual, test_registry};

#[tokio::test]
async fn test_schema_creates_all_tables() {
    let registry = test_registry().await;

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(registry.pool())
    .await
    .unwrap();

    assert_eq!(
        tables,
        vec![
            ChatKind::Group.table_name(),
            ChatKind::Individual.table_name(),
            "memberships".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_schema_creation_is_idempotent() {
    let registry = test_registry().await;

    register_individual(&registry, 100, "Alice").await;
    registry.create_schema().await.unwrap();

    assert_eq!(registry.count_chats::<Individual>().await.unwrap(), 1);
}

#[tokio::test]
async fn test_foreign_keys_are_enforced() {
    let registry = test_registry().await;

    let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(registry.pool())
        .await
        .unwrap();

    assert_eq!(enabled, 1);
}
