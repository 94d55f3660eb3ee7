use deathwall::services::SessionOutcome;

use crate::support::factory::{create_session, play_round};
use crate::support::test_state::{capped, coordinator_with};

#[tokio::test]
async fn goal_reached_doubles_the_score() {
    // One template per round keeps the restriction score predictable
    let coordinator = coordinator_with(vec![capped("a", 1, 4), capped("b", 1, 3)]).await;
    let fixture = create_session(&coordinator, 2, 1).await;

    play_round(&coordinator, &fixture, true).await;
    let result = play_round(&coordinator, &fixture, true).await;

    let SessionOutcome::Finished { goal_reached, score } = result.outcome else {
        panic!("expected finished session");
    };
    assert!(goal_reached);
    assert_eq!(score.restriction_score, 7);
    // wins 2*2 doubled for the goal, plus difficulty 3*7
    assert_eq!(score.score, 29);

    let overview = coordinator.session_overview(fixture.session.id).await.unwrap();
    assert_eq!(overview.session.score, Some(29));
}

#[tokio::test]
async fn lost_round_restrictions_do_not_score() {
    let coordinator = coordinator_with(vec![capped("a", 1, 4), capped("b", 1, 4)]).await;
    let fixture = create_session(&coordinator, 3, 1).await;

    play_round(&coordinator, &fixture, true).await;
    let result = play_round(&coordinator, &fixture, false).await;

    let SessionOutcome::Finished { goal_reached, score } = result.outcome else {
        panic!("expected finished session");
    };
    assert!(!goal_reached);
    assert_eq!(score.restriction_score, 4);
    // (2 + 3*4) scaled by one win in two rounds
    assert_eq!(score.score, 7);
}

#[tokio::test]
async fn recomputed_score_matches_persisted_score() {
    let coordinator = coordinator_with(vec![capped("a", 2, 5)]).await;
    let fixture = create_session(&coordinator, 1, 1).await;
    play_round(&coordinator, &fixture, true).await;

    let recomputed = coordinator
        .compute_final_score(fixture.session.id)
        .await
        .unwrap();
    let overview = coordinator.session_overview(fixture.session.id).await.unwrap();
    assert_eq!(overview.session.score, Some(recomputed.score));
    assert!(recomputed.goal_reached);
}

#[tokio::test]
async fn score_of_an_unplayed_session_is_zero() {
    let coordinator = coordinator_with(vec![capped("a", 1, 5)]).await;
    let fixture = create_session(&coordinator, 2, 1).await;

    let score = coordinator
        .compute_final_score(fixture.session.id)
        .await
        .unwrap();
    assert_eq!(score.score, 0);
    assert_eq!(score.successful_rounds, 0);
    assert!(!score.goal_reached);
}
