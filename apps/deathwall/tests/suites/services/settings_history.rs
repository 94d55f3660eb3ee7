use deathwall::domain::catalog::{EffectValue, ItemPool};
use deathwall::domain::settings::GameSettings;
use deathwall::ErrorCode;

use crate::support::factory::{create_session, play_round, start_round};
use crate::support::test_state::{capped, coordinator, coordinator_with};

#[tokio::test]
async fn fresh_session_has_baseline_settings() {
    let coordinator = coordinator().await;
    let fixture = create_session(&coordinator, 3, 2).await;

    let settings = coordinator.current_settings(fixture.session.id).await.unwrap();
    assert_eq!(settings, GameSettings::baseline());
    assert!(settings.removed_items.is_empty());
}

#[tokio::test]
async fn settings_fold_in_every_round() {
    let coordinator = coordinator_with(vec![
        capped("slow_hunters", 1, 2)
            .with_effect("entitySpeed", EffectValue::Delta(25))
            .with_effect("sanity", EffectValue::Delta(-25)),
        capped("blackout", 1, 3).with_effect("breaker", EffectValue::Flag(false)),
        capped("forgotten_item", 1, 1).with_effect("forgottenItem", EffectValue::Delta(1)),
    ])
    .await;
    let fixture = create_session(&coordinator, 5, 1).await;

    for _ in 0..3 {
        play_round(&coordinator, &fixture, true).await;
    }

    let settings = coordinator.current_settings(fixture.session.id).await.unwrap();
    assert_eq!(settings.modifiers.entity_speed, 125);
    assert_eq!(settings.modifiers.sanity, 75);
    assert!(!settings.modifiers.breaker);
    assert!(settings.modifiers.sprint);
    assert_eq!(settings.removed_items.len(), 1);
    assert!(ItemPool::builtin()
        .items()
        .contains(&settings.removed_items[0]));
}

#[tokio::test]
async fn item_placeholder_is_resolved_when_stored() {
    let coordinator = coordinator_with(vec![
        capped("forgotten_item", 1, 1).with_effect("forgottenItem", EffectValue::Delta(1)),
    ])
    .await;
    let fixture = create_session(&coordinator, 2, 1).await;

    let start = start_round(&coordinator, &fixture).await;
    assert_eq!(start.restrictions.len(), 1);
    match start.restrictions[0].metadata.get("forgottenItem") {
        Some(EffectValue::Tag(item)) => {
            assert!(ItemPool::builtin().items().contains(item));
        }
        other => panic!("expected a resolved item, got {other:?}"),
    }

    // Stored history carries the same resolved item
    let history = coordinator
        .list_restriction_history(fixture.session.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, start.restrictions[0].id);
    assert_eq!(history[0].metadata, start.restrictions[0].metadata);
}

#[tokio::test]
async fn history_lists_rounds_in_start_order() {
    let coordinator = coordinator().await;
    let fixture = create_session(&coordinator, 3, 1).await;

    let first = play_round(&coordinator, &fixture, true).await;
    let second = play_round(&coordinator, &fixture, true).await;

    let rounds = coordinator.list_rounds(fixture.session.id).await.unwrap();
    let ids: Vec<i64> = rounds.iter().map(|r| r.id).collect();
    assert_eq!(ids, [first.round.id, second.round.id]);

    let history = coordinator
        .list_restriction_history(fixture.session.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn history_of_missing_session_is_not_found() {
    let coordinator = coordinator().await;

    let err = coordinator.current_settings(4_242).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);

    let err = coordinator.list_rounds(4_242).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
}
