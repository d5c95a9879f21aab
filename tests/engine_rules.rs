//! Rule tests for the round engine through the public API
//!
//! Each test plays a short game the way a board would report it and checks
//! the published state afterwards.

use oche::{
    BustReason, EngineEvent, GameConfig, GameStatus, RecentEvents, RoundEngine, RoundOutcome,
    Segment, SegmentCategory, SegmentId,
};
use proptest::prelude::*;

fn hit(id: SegmentId) -> Segment {
    id.segment().unwrap()
}

fn engine_from(start_score: u32) -> (RoundEngine, RecentEvents) {
    let log = RecentEvents::new(64);
    let config = GameConfig::default().with_start_score(start_score);
    (RoundEngine::with_sink(config, log.clone()).unwrap(), log)
}

#[test]
fn three_twenties_close_the_round() {
    let (mut engine, log) = engine_from(501);
    for _ in 0..3 {
        engine.process_hit(&hit(SegmentId::Outer(20)));
    }

    assert_eq!(engine.history(), &[RoundOutcome::Scored(60)]);
    assert_eq!(engine.round_number(), 2);
    assert_eq!(engine.score(), 441);
    assert_eq!(log.events()[0], EngineEvent::RoundComplete { round: 1, points: 60 });
}

#[test]
fn win_requires_a_qualifying_out() {
    let (mut engine, log) = engine_from(32);
    engine.process_hit(&hit(SegmentId::Double(16)));
    assert_eq!(engine.status(), GameStatus::Finished);
    assert_eq!(log.events()[0], EngineEvent::GameWon { round: 1 });

    let (mut engine, log) = engine_from(32);
    engine.process_hit(&Segment::new(SegmentId::Miss, SegmentCategory::Other, 32, "Other 32"));
    assert_eq!(engine.score(), 32);
    assert_eq!(engine.status(), GameStatus::AwaitingNextRound);
    assert!(matches!(
        log.events()[0],
        EngineEvent::Bust { reason: BustReason::NoQualifyingOut, .. }
    ));
}

#[test]
fn one_is_a_dead_zone() {
    for id in [SegmentId::Inner(2), SegmentId::Outer(2), SegmentId::Double(1)] {
        let (mut engine, _) = engine_from(3);
        engine.process_hit(&hit(id));
        assert_eq!(engine.score(), 3, "{id}");
        assert_eq!(engine.history(), &[RoundOutcome::Bust], "{id}");
    }
}

#[test]
fn treble_and_bulls_also_check_out() {
    for (start, id) in [(60, SegmentId::Triple(20)), (50, SegmentId::Bull), (50, SegmentId::DoubleBull)] {
        let (mut engine, _) = engine_from(start);
        engine.process_hit(&hit(id));
        assert_eq!(engine.status(), GameStatus::Finished, "{id}");
        assert_eq!(engine.history(), &[RoundOutcome::Scored(start)], "{id}");
    }
}

#[test]
fn reset_is_round_local() {
    let (mut engine, log) = engine_from(501);
    for _ in 0..3 {
        engine.process_hit(&hit(SegmentId::Triple(20)));
    }
    engine.process_hit(&hit(SegmentId::Outer(5)));
    engine.process_hit(&hit(SegmentId::Outer(1)));
    engine.process_hit(&hit(SegmentId::ResetButton));

    assert_eq!(engine.score(), 321);
    assert!(engine.current_round_throws().is_empty());
    assert_eq!(engine.history(), &[RoundOutcome::Scored(180)]);
    assert_eq!(engine.round_number(), 2);
    assert_eq!(log.events()[0], EngineEvent::RoundReset { score: 321 });
}

#[test]
fn manual_end_twice_advances_once() {
    let (mut engine, _) = engine_from(501);
    engine.process_hit(&hit(SegmentId::Inner(7)));
    engine.end_round_manually();
    engine.end_round_manually();

    assert_eq!(engine.round_number(), 2);
    assert_eq!(engine.history(), &[RoundOutcome::Scored(7)]);
}

#[test]
fn display_throws_follow_the_round_lifecycle() {
    let (mut engine, _) = engine_from(501);
    engine.process_hit(&hit(SegmentId::Triple(20)));
    assert_eq!(engine.current_display_throws().len(), 1);

    engine.process_hit(&hit(SegmentId::Triple(20)));
    engine.process_hit(&hit(SegmentId::Triple(20)));
    let shown: Vec<_> = engine.current_display_throws().iter().map(|h| h.points).collect();
    assert_eq!(shown, vec![60, 60, 60]);

    engine.process_hit(&hit(SegmentId::Outer(3)));
    let shown: Vec<_> = engine.current_display_throws().iter().map(|h| h.points).collect();
    assert_eq!(shown, vec![3]);

    engine.reset_game(501).unwrap();
    assert!(engine.current_display_throws().is_empty());
}

#[test]
fn hits_after_a_win_are_ignored() {
    let (mut engine, log) = engine_from(40);
    engine.process_hit(&hit(SegmentId::Double(20)));
    let events_at_win = log.len();

    engine.process_hit(&hit(SegmentId::Triple(20)));
    engine.process_hit(&hit(SegmentId::ResetButton));
    engine.end_round_manually();

    assert_eq!(engine.score(), 0);
    assert_eq!(engine.status(), GameStatus::Finished);
    assert_eq!(log.len(), events_at_win);
}

#[test]
fn snapshot_reflects_the_window_not_the_full_history() {
    let config = GameConfig::default().with_total_rounds(20).with_history_window(3);
    let mut engine = RoundEngine::new(config).unwrap();
    for points in 1..=5u8 {
        engine.process_hit(&hit(SegmentId::Inner(points)));
        engine.end_round_manually();
    }

    let snapshot = engine.snapshot();
    assert_eq!(
        snapshot.recent_history,
        vec![RoundOutcome::Scored(3), RoundOutcome::Scored(4), RoundOutcome::Scored(5)]
    );
    assert_eq!(snapshot.rounds_played, 5);
    assert_eq!(snapshot.round_number, 6);
    assert_eq!(engine.history().len(), 5);
}

fn any_dart() -> impl Strategy<Value = Segment> {
    prop_oneof![
        (1u8..=20).prop_map(|n| hit(SegmentId::Inner(n))),
        (1u8..=20).prop_map(|n| hit(SegmentId::Outer(n))),
        (1u8..=20).prop_map(|n| hit(SegmentId::Double(n))),
        (1u8..=20).prop_map(|n| hit(SegmentId::Triple(n))),
        Just(hit(SegmentId::Bull)),
        Just(hit(SegmentId::DoubleBull)),
        Just(hit(SegmentId::ResetButton)),
    ]
}

proptest! {
    #[test]
    fn score_and_round_stay_in_bounds(
        darts in prop::collection::vec(any_dart(), 0..120),
        total_rounds in 1u32..=10,
    ) {
        let config = GameConfig::default().with_total_rounds(total_rounds);
        let mut engine = RoundEngine::new(config).unwrap();

        for dart in &darts {
            engine.process_hit(dart);
            prop_assert!(engine.score() <= 501);
            prop_assert!(engine.round_number() <= total_rounds);
            prop_assert_ne!(engine.score(), 1);
        }
    }
}
