use balloon_archer::entities::*;
use balloon_archer::levels::default_levels;
use balloon_archer::spawner::{spawn_batch, spawn_target};

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn status_flags_are_consistent() {
    assert!(GameStatus::GameOver.is_game_over());
    assert!(GameStatus::GameComplete.is_game_over());
    assert!(GameStatus::GameComplete.is_game_complete());
    assert!(!GameStatus::GameOver.is_game_complete());
    assert!(GameStatus::LevelComplete.is_level_complete());
    assert!(!GameStatus::LevelComplete.is_game_over());

    for status in [
        GameStatus::Idle,
        GameStatus::Playing,
        GameStatus::LevelComplete,
        GameStatus::GameOver,
        GameStatus::GameComplete,
    ] {
        assert!(!(status.is_game_over() && status.is_level_complete()));
    }
}

#[test]
fn bow_starts_centred_and_loaded() {
    let bow = Bow::new(CANVAS_HEIGHT);
    assert_eq!(bow.x, 0.0);
    assert_eq!(bow.y, 250.0);
    assert_eq!((bow.w, bow.h), (BOW_WIDTH, BOW_HEIGHT));
    assert!(!bow.empty);
    assert_eq!(bow.anim, 0);
}

#[test]
fn bow_clamps_at_both_edges() {
    let mut bow = Bow::new(CANVAS_HEIGHT);
    bow.dy = -1000.0;
    bow.advance(CANVAS_HEIGHT);
    assert_eq!(bow.y, 0.0);

    bow.dy = 1000.0;
    bow.advance(CANVAS_HEIGHT);
    assert_eq!(bow.y, CANVAS_HEIGHT - BOW_HEIGHT);
}

#[test]
fn arrow_flies_right_at_constant_speed() {
    let mut arrow = Arrow::nocked_on(&Bow::new(CANVAS_HEIGHT));
    let y = arrow.y;
    arrow.advance();
    arrow.advance();
    assert_eq!(arrow.x, 50.0 + 2.0 * ARROW_SPEED);
    assert_eq!(arrow.y, y);
}

#[test]
fn target_wraps_to_the_bottom() {
    let mut t = Target::new(400.0, 3.0, 3.0);
    t.advance(CANVAS_HEIGHT);
    assert_eq!(t.y, CANVAS_HEIGHT - TARGET_HEIGHT);
    assert_eq!(t.x, 400.0);
    assert_eq!(t.h, TARGET_HEIGHT);
}

#[test]
fn overlay_matches_status() {
    let mut s = balloon_archer::compute::init_state(CANVAS_WIDTH, CANVAS_HEIGHT);
    assert_eq!(s.overlay(), None);
    s.status = GameStatus::Playing;
    assert_eq!(s.overlay(), None);
    s.status = GameStatus::LevelComplete;
    assert_eq!(s.overlay(), Some(Overlay::LevelComplete));
    s.status = GameStatus::GameOver;
    assert_eq!(s.overlay(), Some(Overlay::GameOver));
    s.status = GameStatus::GameComplete;
    assert_eq!(s.overlay(), Some(Overlay::Victory));
}

#[test]
fn field_is_hidden_behind_terminal_overlays() {
    let mut s = balloon_archer::compute::init_state(CANVAS_WIDTH, CANVAS_HEIGHT);
    assert!(s.shows_field());
    s.status = GameStatus::Playing;
    assert!(s.shows_field());
    s.status = GameStatus::LevelComplete;
    assert!(s.shows_field());
    s.status = GameStatus::GameOver;
    assert!(!s.shows_field());
    s.status = GameStatus::GameComplete;
    assert!(!s.shows_field());
}

#[test]
fn hud_fields_are_labelled_in_order() {
    let hud = HudInfo {
        score: 30,
        high_score: 90,
        arrows_left: 4,
        time_left: 12,
        level_id: 2,
        description: "More balloons".to_string(),
    };
    let labels: Vec<&str> = hud.fields().iter().map(|(l, _)| *l).collect();
    assert_eq!(labels, vec!["Score", "High Score", "Arrows Left", "Time Left", "Level", ""]);
    assert_eq!(hud.fields()[3].1, "12s");
    assert_eq!(HudInfo::default().description, "Press Start");
}

#[test]
fn game_state_clone_is_independent() {
    let original = balloon_archer::compute::init_state(CANVAS_WIDTH, CANVAS_HEIGHT);
    let mut cloned = original.clone();

    cloned.bow.y = 99.0;
    cloned.score = 999;
    cloned.targets.push(Target::new(5.0, 5.0, 1.0));

    assert_eq!(original.bow.y, 250.0);
    assert_eq!(original.score, 0);
    assert!(original.targets.is_empty());
}

// ── Spawner ───────────────────────────────────────────────────────────────────

#[test]
fn line_pattern_puts_every_balloon_on_the_bottom_row() {
    let level = &default_levels()[0];
    let mut rng = StdRng::seed_from_u64(1);
    let batch = spawn_batch(level, CANVAS_WIDTH, CANVAS_HEIGHT, &mut rng);

    assert_eq!(batch.len(), level.targets as usize);
    for (i, t) in batch.iter().enumerate() {
        assert_eq!(t.x, i as f32 * 25.0 + 400.0);
        assert_eq!(t.y, CANVAS_HEIGHT - TARGET_HEIGHT);
        assert_eq!(t.speed, level.speed);
        assert!(!t.hit);
    }
}

#[test]
fn random_pattern_stays_on_the_canvas() {
    let level = &default_levels()[1];
    let mut rng = StdRng::seed_from_u64(99);
    for i in 0..200 {
        let t = spawn_target(level, i % 15, CANVAS_WIDTH, CANVAS_HEIGHT, &mut rng);
        assert!(t.y >= 0.0 && t.y < CANVAS_HEIGHT - TARGET_HEIGHT);
        assert_eq!(t.x, (i % 15) as f32 * 25.0 + 400.0);
    }
}

#[test]
fn seeded_spawns_are_reproducible() {
    let level = &default_levels()[2];
    let a = spawn_batch(level, CANVAS_WIDTH, CANVAS_HEIGHT, &mut StdRng::seed_from_u64(5));
    let b = spawn_batch(level, CANVAS_WIDTH, CANVAS_HEIGHT, &mut StdRng::seed_from_u64(5));
    assert_eq!(a, b);
}
