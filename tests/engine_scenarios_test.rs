//! Accrual engine behaviour over sequences of events

mod common;

use common::{default_engine, scenario_engine};
use zikir::gamification::{
    AccrualError, AccrualEvent, AchievementKind, NotificationSelector, PlayerState,
};

fn scenario_player() -> PlayerState {
    PlayerState {
        amal_score: 450,
        level: 3,
        total_lifetime_count: 95,
        ..Default::default()
    }
}

#[test]
fn test_five_counts_hit_milestone_without_level_up() {
    let engine = scenario_engine();
    let (next, result) = engine
        .apply(&scenario_player(), &AccrualEvent::new(5))
        .unwrap();

    assert_eq!(next.amal_score, 500);
    assert_eq!(next.level, 3);
    assert_eq!(next.total_lifetime_count, 100);
    assert!(!result.leveled_up);
    assert_eq!(result.new_level.map(|l| l.level), Some(3));
    assert_eq!(result.milestone.map(|m| m.trigger_count), Some(100));
}

#[test]
fn test_forty_counts_level_up() {
    let engine = scenario_engine();
    let (next, result) = engine
        .apply(&scenario_player(), &AccrualEvent::new(40))
        .unwrap();

    assert_eq!(next.amal_score, 850);
    assert_eq!(next.level, 4);
    assert!(result.leveled_up);
    assert_eq!(result.new_level.map(|l| l.level), Some(4));
    // 95 -> 135 jumps over 100
    assert!(result.milestone.is_none());
}

#[test]
fn test_non_positive_counts_are_rejected() {
    let engine = scenario_engine();
    let player = scenario_player();

    assert_eq!(
        engine.apply(&player, &AccrualEvent::new(0)),
        Err(AccrualError::InvalidCount(0))
    );
    assert_eq!(
        engine.apply(&player, &AccrualEvent::in_room(-7, 2)),
        Err(AccrualError::InvalidCount(-7))
    );
}

#[test]
fn test_apply_is_deterministic() {
    let engine = default_engine();
    let player = scenario_player();
    let event = AccrualEvent::in_room(33, 9);

    assert_eq!(
        engine.apply(&player, &event).unwrap(),
        engine.apply(&player, &event).unwrap()
    );
}

#[test]
fn test_first_room_tasbih() {
    let engine = default_engine();
    let (next, result) = engine
        .apply(&PlayerState::default(), &AccrualEvent::in_room(33, 1))
        .unwrap();

    let ids: Vec<&str> = result.new_badges.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["first_zikir", "full_tasbih", "room_companion"]);

    // 330 from counts + 10 + 15 + 20 from badges
    assert_eq!(next.amal_score, 375);
    assert_eq!(result.points_awarded.amal_score, 375);
    assert_eq!(next.level, 2);
    assert!(result.leveled_up);
    assert_eq!(result.points_awarded.noor_tokens, 1);
    assert_eq!(result.milestone.as_ref().map(|m| m.trigger_count), Some(33));

    let notification = NotificationSelector::default().select(&result).unwrap();
    assert_eq!(notification.kind, AchievementKind::LevelUp);
}

#[test]
fn test_invariants_hold_across_a_session() {
    let engine = default_engine();
    let mut player = PlayerState::default();
    let mut milestones_seen = Vec::new();

    for (i, count) in [1, 32, 66, 1, 100, 133, 667, 2333, 33, 99].into_iter().enumerate() {
        let event = if i % 3 == 0 {
            AccrualEvent::in_room(count, 5)
        } else {
            AccrualEvent::new(count)
        };
        let before = player.clone();
        let (next, result) = engine.apply(&player, &event).unwrap();

        // Level always matches the score
        assert_eq!(next.level, engine.levels().level_for_score(next.amal_score).level);
        // Badges are never lost and never re-awarded
        assert!(before.unlocked_badge_ids.is_subset(&next.unlocked_badge_ids));
        for badge in &result.new_badges {
            assert!(!before.has_badge(&badge.id), "{} awarded twice", badge.id);
        }
        // Currencies never go down
        assert!(next.amal_score > before.amal_score);
        assert!(next.barakah_coins > before.barakah_coins);
        assert!(next.noor_tokens >= before.noor_tokens);

        if let Some(milestone) = result.milestone {
            assert!(!milestones_seen.contains(&milestone.trigger_count));
            milestones_seen.push(milestone.trigger_count);
        }
        player = next;
    }

    // Running totals: 1, 33, 99, 100, 200, 333, 1000, 3333, 3366, 3465
    assert_eq!(player.total_lifetime_count, 3465);
    assert_eq!(milestones_seen, [33, 99, 100, 333, 1_000, 3_333]);
}
