use deathwall::domain::lifecycle::SessionPhase;
use deathwall::services::sessions::MAX_SESSION_COUNT;
use deathwall::ErrorCode;
use deathwall_test_support::unique_str;

use crate::support::factory::{create_session, create_session_with_members, play_round, start_round};
use crate::support::test_state::coordinator;

#[tokio::test]
async fn create_session_makes_caller_leader() {
    let coordinator = coordinator().await;
    let fixture = create_session(&coordinator, 3, 2).await;

    assert_eq!(fixture.session.goal, 3);
    assert_eq!(fixture.session.restrictions_per_round, 2);
    assert_eq!(fixture.session.successful_rounds, 0);
    assert!(!fixture.session.finished);
    assert_eq!(fixture.session.phase(), SessionPhase::Open);

    let members = coordinator.list_members(fixture.session.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert!(members[0].is_leader);
    assert_eq!(members[0].user_id, fixture.leader);
}

#[tokio::test]
async fn create_session_uses_configured_default_per_round() {
    let coordinator = coordinator().await;
    let session = coordinator
        .create_session(&unique_str("guild"), &unique_str("leader"), 2, None)
        .await
        .unwrap();
    assert_eq!(
        session.restrictions_per_round,
        coordinator.state().config.default_restrictions_per_round
    );
}

#[tokio::test]
async fn create_session_rejects_zero_goal_and_zero_restrictions() {
    let coordinator = coordinator().await;
    let guild = unique_str("guild");

    let err = coordinator
        .create_session(&guild, "u1", 0, Some(2))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidGoal);

    let err = coordinator
        .create_session(&guild, "u1", 3, Some(0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidRestrictionCount);

    assert!(coordinator
        .find_active_session(&guild, "u1")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn create_session_rejects_counts_beyond_storage_range() {
    let coordinator = coordinator().await;
    let guild = unique_str("guild");

    let err = coordinator
        .create_session(&guild, "u1", u32::MAX, Some(2))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidGoal);

    let err = coordinator
        .create_session(&guild, "u1", 3, Some(u32::MAX))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidRestrictionCount);

    assert!(coordinator
        .find_active_session(&guild, "u1")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn largest_per_round_count_draws_at_most_the_catalog() {
    let coordinator = coordinator().await;
    let fixture = create_session(&coordinator, 3, MAX_SESSION_COUNT).await;

    let start = start_round(&coordinator, &fixture).await;
    let catalog_size = coordinator.state().config.catalog.list_templates().len();
    assert!(!start.restrictions.is_empty());
    assert!(start.restrictions.len() <= catalog_size);
}

#[tokio::test]
async fn user_cannot_lead_two_sessions_in_one_guild() {
    let coordinator = coordinator().await;
    let fixture = create_session(&coordinator, 3, 2).await;

    let err = coordinator
        .create_session(&fixture.guild, &fixture.leader, 3, Some(2))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyInSession);

    // Another guild is fine
    coordinator
        .create_session(&unique_str("guild"), &fixture.leader, 3, Some(2))
        .await
        .unwrap();
}

#[tokio::test]
async fn invite_rejects_user_already_in_another_session_of_the_guild() {
    let coordinator = coordinator().await;
    let first = create_session(&coordinator, 3, 2).await;
    let other_leader = unique_str("leader");
    let second = coordinator
        .create_session(&first.guild, &other_leader, 3, Some(2))
        .await
        .unwrap();

    let err = coordinator
        .invite_member(second.id, &other_leader, &first.leader)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyInSession);

    let members = coordinator.list_members(second.id).await.unwrap();
    assert_eq!(members.len(), 1);
}

#[tokio::test]
async fn only_leader_can_invite_or_remove() {
    let coordinator = coordinator().await;
    let (fixture, users) = create_session_with_members(&coordinator, 3, 2, 1).await;
    let member = &users[0];

    let err = coordinator
        .invite_member(fixture.session.id, member, &unique_str("user"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotLeader);

    let err = coordinator
        .remove_member(fixture.session.id, member, &fixture.leader)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotLeader);
}

#[tokio::test]
async fn leader_cannot_be_removed_or_leave() {
    let coordinator = coordinator().await;
    let fixture = create_session(&coordinator, 3, 2).await;

    let err = coordinator
        .remove_member(fixture.session.id, &fixture.leader, &fixture.leader)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::LeaderRemoval);

    let err = coordinator
        .leave_session(fixture.session.id, &fixture.leader)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::LeaderRemoval);
}

#[tokio::test]
async fn remove_and_leave_free_the_user_for_other_sessions() {
    let coordinator = coordinator().await;
    let (fixture, users) = create_session_with_members(&coordinator, 3, 2, 2).await;

    coordinator
        .remove_member(fixture.session.id, &fixture.leader, &users[0])
        .await
        .unwrap();
    coordinator
        .leave_session(fixture.session.id, &users[1])
        .await
        .unwrap();

    let members = coordinator.list_members(fixture.session.id).await.unwrap();
    assert_eq!(members.len(), 1);

    for user in &users {
        assert!(coordinator
            .find_active_session(&fixture.guild, user)
            .await
            .unwrap()
            .is_none());
    }

    let err = coordinator
        .remove_member(fixture.session.id, &fixture.leader, &users[0])
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserNotInSession);
}

#[tokio::test]
async fn membership_is_frozen_after_first_round() {
    let coordinator = coordinator().await;
    let (fixture, users) = create_session_with_members(&coordinator, 3, 1, 1).await;
    start_round(&coordinator, &fixture).await;

    let err = coordinator
        .invite_member(fixture.session.id, &fixture.leader, &unique_str("late"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionAlreadyStarted);

    let err = coordinator
        .remove_member(fixture.session.id, &fixture.leader, &users[0])
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionAlreadyStarted);

    let err = coordinator
        .leave_session(fixture.session.id, &users[0])
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionAlreadyStarted);

    let overview = coordinator.session_overview(fixture.session.id).await.unwrap();
    assert_eq!(overview.phase, SessionPhase::Active);
    assert!(overview.active_round.is_some());
    assert!(overview.session.started_at.is_some());
}

#[tokio::test]
async fn finished_session_frees_members_and_rejects_commands() {
    let coordinator = coordinator().await;
    let fixture = create_session(&coordinator, 1, 1).await;
    let result = play_round(&coordinator, &fixture, true).await;
    assert!(result.outcome.is_finished());

    assert!(coordinator
        .find_active_session(&fixture.guild, &fixture.leader)
        .await
        .unwrap()
        .is_none());

    let err = coordinator
        .start_round(fixture.session.id, &fixture.leader)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionFinished);

    let err = coordinator
        .invite_member(fixture.session.id, &fixture.leader, &unique_str("late"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionFinished);

    // The leader may start a new session in the same guild
    coordinator
        .create_session(&fixture.guild, &fixture.leader, 2, Some(1))
        .await
        .unwrap();
}

#[tokio::test]
async fn overview_lists_leader_first() {
    let coordinator = coordinator().await;
    let (fixture, users) = create_session_with_members(&coordinator, 4, 2, 2).await;

    let overview = coordinator.session_overview(fixture.session.id).await.unwrap();
    assert_eq!(overview.phase, SessionPhase::Open);
    assert_eq!(overview.goal, 4);
    assert_eq!(overview.successful_rounds, 0);
    assert!(overview.active_round.is_none());

    let ids: Vec<&str> = overview.members.iter().map(|m| m.user_id.as_str()).collect();
    assert_eq!(ids, [fixture.leader.as_str(), users[0].as_str(), users[1].as_str()]);
}

#[tokio::test]
async fn missing_session_is_not_found() {
    let coordinator = coordinator().await;
    let err = coordinator.session_overview(9_999).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);

    let err = coordinator.list_members(9_999).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
}
