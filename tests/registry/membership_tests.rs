//! Membership Tests
//!
//! Linking individuals to groups, relation loading, and cascade on delete.

use pretty_assertions::assert_eq;

use chat_registry::domain::{ChatEntity, Group, Individual, MembershipOutcome};

use crate::common::{register_group, register_individual, test_registry};

#[tokio::test]
async fn test_group_lists_added_member() {
    let registry = test_registry().await;

    register_individual(&registry, 100, "Alice").await;
    register_group(&registry, 200, "Team").await;

    let outcome = registry.add_membership(100, 200).await.unwrap();
    assert_eq!(outcome, MembershipOutcome::Added);

    let group = registry
        .get_chat::<Group>(Some(200), None)
        .await
        .unwrap()
        .expect("group should exist");

    assert_eq!(group.members.len(), 1);
    assert_eq!(group.members[0].external_id(), 100);
    assert_eq!(group.members[0].name(), "Alice");
    assert!(group.members[0].groups.is_empty());
}

#[tokio::test]
async fn test_individual_lists_its_groups() {
    let registry = test_registry().await;

    register_individual(&registry, 100, "Alice").await;
    register_group(&registry, 200, "Team").await;
    register_group(&registry, 201, "Book Club").await;
    register_group(&registry, 202, "Unrelated").await;

    assert!(registry.add_membership(100, 200).await.unwrap().is_added());
    assert!(registry.add_membership(100, 201).await.unwrap().is_added());

    let alice = registry
        .get_chat::<Individual>(Some(100), None)
        .await
        .unwrap()
        .unwrap();

    let group_ids: Vec<i64> = alice.groups.iter().map(|g| g.external_id()).collect();
    assert_eq!(group_ids, vec![200, 201]);
    assert!(alice.is_in_group(201));
    assert!(!alice.is_in_group(202));
}

#[tokio::test]
async fn test_repeated_add_keeps_single_membership() {
    let registry = test_registry().await;

    register_individual(&registry, 100, "Alice").await;
    register_group(&registry, 200, "Team").await;

    assert_eq!(registry.add_membership(100, 200).await.unwrap(), MembershipOutcome::Added);
    assert_eq!(
        registry.add_membership(100, 200).await.unwrap(),
        MembershipOutcome::AlreadyMember
    );

    assert_eq!(registry.count_memberships().await.unwrap(), 1);

    let group = registry
        .get_chat::<Group>(Some(200), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(group.members.len(), 1);
    assert!(group.has_member(100));
}

#[tokio::test]
async fn test_add_with_missing_individual_writes_nothing() {
    let registry = test_registry().await;

    register_group(&registry, 200, "Team").await;

    let outcome = registry.add_membership(100, 200).await.unwrap();

    assert_eq!(outcome, MembershipOutcome::IndividualMissing);
    assert_eq!(registry.count_memberships().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_with_missing_group_writes_nothing() {
    let registry = test_registry().await;

    register_individual(&registry, 100, "Alice").await;

    let outcome = registry.add_membership(100, 200).await.unwrap();

    assert_eq!(outcome, MembershipOutcome::GroupMissing);
    assert_eq!(registry.count_memberships().await.unwrap(), 0);
}

#[tokio::test]
async fn test_remove_membership() {
    let registry = test_registry().await;

    register_individual(&registry, 100, "Alice").await;
    register_group(&registry, 200, "Team").await;
    registry.add_membership(100, 200).await.unwrap();

    assert!(registry.remove_membership(100, 200).await.unwrap());
    assert!(!registry.remove_membership(100, 200).await.unwrap());
    assert!(!registry.remove_membership(100, 999).await.unwrap());

    let group = registry
        .get_chat::<Group>(Some(200), None)
        .await
        .unwrap()
        .unwrap();
    assert!(group.members.is_empty());
}

#[tokio::test]
async fn test_deleting_individual_cascades_to_memberships() {
    let registry = test_registry().await;

    register_individual(&registry, 100, "Alice").await;
    register_individual(&registry, 101, "Bob").await;
    register_group(&registry, 200, "Team").await;
    registry.add_membership(100, 200).await.unwrap();
    registry.add_membership(101, 200).await.unwrap();

    registry.delete_chat::<Individual>(100).await.unwrap();

    assert_eq!(registry.count_memberships().await.unwrap(), 1);
    let group = registry
        .get_chat::<Group>(Some(200), None)
        .await
        .unwrap()
        .unwrap();
    assert!(!group.has_member(100));
    assert!(group.has_member(101));
}

#[tokio::test]
async fn test_deleting_group_cascades_to_memberships() {
    let registry = test_registry().await;

    register_individual(&registry, 100, "Alice").await;
    register_group(&registry, 200, "Team").await;
    register_group(&registry, 201, "Book Club").await;
    registry.add_membership(100, 200).await.unwrap();
    registry.add_membership(100, 201).await.unwrap();

    registry.delete_chats::<Group>(&[200]).await.unwrap();

    assert_eq!(registry.count_memberships().await.unwrap(), 1);
    let alice = registry
        .get_chat::<Individual>(Some(100), None)
        .await
        .unwrap()
        .unwrap();
    assert!(!alice.is_in_group(200));
    assert!(alice.is_in_group(201));
}

#[tokio::test]
async fn test_alice_joins_team_scenario() {
    let registry = test_registry().await;

    registry
        .create_chat::<Individual>(100, "Alice")
        .await
        .unwrap()
        .unwrap();
    registry
        .create_chat::<Group>(200, "Team")
        .await
        .unwrap()
        .unwrap();
    registry.add_membership(100, 200).await.unwrap();

    let team = registry
        .get_chat::<Group>(Some(200), None)
        .await
        .unwrap()
        .expect("team should exist");

    let member_ids: Vec<i64> = team.members.iter().map(|m| m.external_id()).collect();
    assert_eq!(member_ids, vec![100]);
}

#[tokio::test]
async fn test_list_chats_loads_relations() {
    let registry = test_registry().await;

    register_individual(&registry, 100, "Alice").await;
    register_individual(&registry, 101, "Bob").await;
    register_group(&registry, 200, "Team").await;
    registry.add_membership(101, 200).await.unwrap();

    let individuals = registry.list_chats::<Individual>().await.unwrap();

    assert_eq!(individuals.len(), 2);
    assert!(individuals[0].groups.is_empty());
    assert_eq!(individuals[1].groups.len(), 1);
    assert_eq!(individuals[1].groups[0].name(), "Team");
}
