//! Concurrency Tests
//!
//! Parallel writers against a file database with a multi-connection pool.

use pretty_assertions::assert_eq;

use chat_registry::domain::{Group, Individual, IndividualPatch, MembershipOutcome};
use chat_registry::ChatRegistry;

use crate::common::{file_registry, register_group, register_individual};

const WRITERS: i64 = 40;

async fn race_create_group(registry: &ChatRegistry, external_id: i64, writers: i64) -> Vec<Option<Group>> {
    let handles: Vec<_> = (0..writers)
        .map(|i| {
            let registry = registry.clone();
            tokio::spawn(async move {
                registry
                    .create_chat::<Group>(external_id, &format!("Writer {i}"))
                    .await
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.unwrap().expect("create should not fail"));
    }
    results
}

#[tokio::test]
async fn test_file_database_uses_wal() {
    let (registry, _dir) = file_registry().await;

    let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(registry.pool())
        .await
        .unwrap();

    assert_eq!(mode.to_lowercase(), "wal");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_creates_of_distinct_ids_all_succeed() {
    let (registry, _dir) = file_registry().await;

    let handles: Vec<_> = (0..WRITERS)
        .map(|id| {
            let registry = registry.clone();
            tokio::spawn(async move {
                registry
                    .create_chat::<Individual>(id, &format!("User {id}"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let created = handle.await.unwrap().expect("create should not fail");
        assert!(created.is_some());
    }

    assert_eq!(registry.count_chats::<Individual>().await.unwrap(), WRITERS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_creates_of_same_id_insert_once() {
    let (registry, _dir) = file_registry().await;

    let results = race_create_group(&registry, 7, 10).await;

    assert_eq!(results.iter().flatten().count(), 1);
    assert_eq!(registry.count_chats::<Group>().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_membership_adds_link_once() {
    let (registry, _dir) = file_registry().await;

    register_individual(&registry, 100, "Alice").await;
    register_group(&registry, 200, "Team").await;

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let registry = registry.clone();
            tokio::spawn(async move { registry.add_membership(100, 200).await })
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap().expect("add should not fail"));
    }

    let added = outcomes.iter().filter(|o| o.is_added()).count();
    let duplicates = outcomes
        .iter()
        .filter(|o| **o == MembershipOutcome::AlreadyMember)
        .count();
    assert_eq!(added, 1);
    assert_eq!(duplicates, outcomes.len() - 1);
    assert_eq!(registry.count_memberships().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_updates_and_deletes_do_not_lock_out() {
    let (registry, _dir) = file_registry().await;

    for id in 0..WRITERS {
        register_individual(&registry, id, &format!("User {id}")).await;
    }

    let handles: Vec<_> = (0..WRITERS)
        .map(|id| {
            let registry = registry.clone();
            tokio::spawn(async move {
                if id % 2 == 0 {
                    registry
                        .update_chat::<Individual>(id, IndividualPatch::default().username(Some(format!("user{id}"))))
                        .await
                        .map(|_| ())
                } else {
                    registry.delete_chat::<Individual>(id).await
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().expect("write should not fail");
    }

    let remaining = registry.list_chats::<Individual>().await.unwrap();
    assert_eq!(remaining.len() as i64, WRITERS / 2);
    assert!(remaining
        .iter()
        .all(|i| i.username.as_deref() == Some(format!("user{}", i.chat.external_id).as_str())));
}
