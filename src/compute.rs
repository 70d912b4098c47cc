/// Game rules.
///
/// Every function takes the session's `GameState` by mutable reference and
/// applies one rule to it.  Timers are not touched here: functions that need
/// the scheduler to react return a value describing what happened and
/// `session::Session` acts on it.  Randomness comes in through an injected
/// `Rng`.

use rand::Rng;

use crate::collision::overlaps;
use crate::entities::{
    Arrow, Bow, GameState, GameStatus, HudInfo, LevelDescriptor, BOW_FRAMES, BOW_SPEED,
    POP_TERMINAL_FRAME,
};
use crate::spawner::spawn_batch;

pub const POINTS_PER_BALLOON: u32 = 10;
pub const BONUS_PER_SECOND: u32 = 10;
pub const BONUS_PER_ARROW: u32 = 10;

/// A status change produced by [`evaluate_transition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// A level other than the last was cleared; the next one follows after
    /// the inter-level pause.
    LevelComplete { bonus: u32 },
    /// The last level was cleared.
    GameComplete { bonus: u32 },
    GameOver,
}

/// What a pointer press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    Fired,
    Reloaded,
    Ignored,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// State before the first start: no level, nothing on the field.
pub fn init_state(width: f32, height: f32) -> GameState {
    GameState {
        bow: Bow::new(height),
        arrows: Vec::new(),
        targets: Vec::new(),
        level_index: 0,
        level: None,
        score: 0,
        high_score: 0,
        time_left: 0,
        arrows_left: 0,
        status: GameStatus::Idle,
        paused: false,
        hud: HudInfo::default(),
        width,
        height,
    }
}

/// Start (or restart) a session at the first level.  The high score survives.
pub fn start_session(state: &mut GameState, levels: &[LevelDescriptor], rng: &mut impl Rng) {
    state.level_index = 0;
    state.score = 0;
    state.bow.empty = false;
    state.bow.anim = 0;
    state.bow.dy = 0.0;
    if let Some(first) = levels.first() {
        setup_level(state, first, 0, rng);
    }
}

/// Reset the field for `level`: fresh ammunition, clock and balloons.
pub fn setup_level(
    state: &mut GameState,
    level: &LevelDescriptor,
    index: usize,
    rng: &mut impl Rng,
) {
    state.level_index = index;
    state.time_left = level.time;
    state.arrows_left = level.arrows;
    state.status = GameStatus::Playing;
    state.paused = false;
    state.arrows.clear();
    state.targets = spawn_batch(level, state.width, state.height, rng);
    state.level = Some(level.clone());
    refresh_hud(state);
}

/// Leave the inter-level pause: bank the high score and set up the next
/// level.  Returns `false` (and does nothing) outside that pause or when no
/// next level exists.
pub fn advance_level(
    state: &mut GameState,
    levels: &[LevelDescriptor],
    rng: &mut impl Rng,
) -> bool {
    if state.status != GameStatus::LevelComplete {
        return false;
    }
    let next = state.level_index + 1;
    let Some(level) = levels.get(next) else {
        return false;
    };
    state.update_high_score();
    setup_level(state, level, next, rng);
    true
}

// ── Per-frame step ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  Does nothing unless the session is
/// playing and unpaused.
pub fn step(state: &mut GameState, level_count: usize) -> Option<Transition> {
    if !state.is_running() {
        return None;
    }

    // 1. Bow
    let height = state.height;
    state.bow.advance(height);

    // 2. Arrows
    advance_arrows(state);

    // 3. Hits
    mark_hits(state);

    // 4. Finished pops
    collect_popped(state);

    // 5. Balloons
    for target in &mut state.targets {
        target.advance(height);
    }

    // 6. HUD
    refresh_hud(state);

    // 7. Transitions
    evaluate_transition(state, level_count)
}

fn advance_arrows(state: &mut GameState) {
    for arrow in &mut state.arrows {
        arrow.advance();
    }
    let width = state.width;
    state.arrows.retain(|a| a.x <= width);
}

/// Mark every balloon touched by any arrow.  Arrows keep flying and can hit
/// again further along.
fn mark_hits(state: &mut GameState) {
    if state.arrows.is_empty() || state.targets.is_empty() {
        return;
    }
    for arrow in &state.arrows {
        let a = arrow.bounds();
        for target in state.targets.iter_mut().filter(|t| !t.hit) {
            if overlaps(&a, &target.bounds()) {
                target.hit = true;
            }
        }
    }
}

/// Score and remove balloons whose pop animation has finished.
fn collect_popped(state: &mut GameState) {
    let mut gained: u32 = 0;
    for target in state.targets.iter_mut().filter(|t| t.pop_finished()) {
        target.popped = true;
        gained = gained.saturating_add(POINTS_PER_BALLOON);
    }
    state.score = state.score.saturating_add(gained);
    state.targets.retain(|t| !t.popped);
}

pub fn refresh_hud(state: &mut GameState) {
    state.hud = HudInfo {
        score: state.score,
        high_score: state.high_score,
        arrows_left: state.arrows_left,
        time_left: state.time_left,
        level_id: state.level.as_ref().map_or(0, |l| l.id),
        description: state
            .level
            .as_ref()
            .map_or_else(|| "Press Start".to_string(), |l| l.description.clone()),
    };
}

// ── Level / game state machine ───────────────────────────────────────────────

pub fn level_bonus(time_left: u32, arrows_left: u32) -> u32 {
    time_left
        .saturating_mul(BONUS_PER_SECOND)
        .saturating_add(arrows_left.saturating_mul(BONUS_PER_ARROW))
}

pub fn is_level_cleared(state: &GameState) -> bool {
    state.time_left > 0 && state.targets.is_empty()
}

/// Balloons are left, nothing is in the air, and either the clock or the
/// quiver is empty.
pub fn is_out_of_resources(state: &GameState) -> bool {
    !state.targets.is_empty()
        && state.arrows.is_empty()
        && (state.time_left == 0 || state.arrows_left == 0)
}

/// Apply at most one status change.  Only a playing session can change
/// status, so calling this again after a transition is a no-op.
pub fn evaluate_transition(state: &mut GameState, level_count: usize) -> Option<Transition> {
    if state.status != GameStatus::Playing {
        return None;
    }

    if is_level_cleared(state) {
        let bonus = level_bonus(state.time_left, state.arrows_left);
        state.score = state.score.saturating_add(bonus);
        if state.level_index + 1 >= level_count {
            state.status = GameStatus::GameComplete;
            state.update_high_score();
            refresh_hud(state);
            return Some(Transition::GameComplete { bonus });
        }
        state.status = GameStatus::LevelComplete;
        refresh_hud(state);
        return Some(Transition::LevelComplete { bonus });
    }

    if is_out_of_resources(state) {
        state.status = GameStatus::GameOver;
        state.update_high_score();
        refresh_hud(state);
        return Some(Transition::GameOver);
    }

    None
}

// ── Timer handlers ───────────────────────────────────────────────────────────

/// One second of level time.  Returns `false` once the clock has run out and
/// the countdown should stop.
pub fn tick_countdown(state: &mut GameState) -> bool {
    state.time_left = state.time_left.saturating_sub(1);
    state.time_left > 0
}

/// Step the pop animation of every hit balloon, holding on the last frame.
pub fn tick_pop_animation(state: &mut GameState) {
    if state.targets.is_empty() {
        return;
    }
    for target in state.targets.iter_mut().filter(|t| t.hit) {
        target.anim = (target.anim + 1).min(POP_TERMINAL_FRAME);
    }
}

/// Next frame of the bow's draw sequence.
pub fn tick_bow_draw(state: &mut GameState) {
    state.bow.anim = (state.bow.anim + 1).min(BOW_FRAMES - 1);
}

// ── Input-driven transitions ─────────────────────────────────────────────────

pub fn move_bow_up(state: &mut GameState) {
    if !state.status.is_game_over() {
        state.bow.dy = -BOW_SPEED;
    }
}

pub fn move_bow_down(state: &mut GameState) {
    if !state.status.is_game_over() {
        state.bow.dy = BOW_SPEED;
    }
}

pub fn stop_bow(state: &mut GameState) {
    if !state.status.is_game_over() {
        state.bow.dy = 0.0;
    }
}

/// Centre the bow on a pointer at canvas height `y`, kept on the canvas.
pub fn point_bow(state: &mut GameState, y: f32) {
    if !state.status.is_game_over() {
        state.bow.y = y - state.bow.h / 2.0;
        state.bow.clamp(state.height);
    }
}

/// Reload an empty bow, or fire if it is loaded.
pub fn press(state: &mut GameState) -> PressOutcome {
    if !state.is_running() || state.time_left == 0 || state.arrows_left == 0 {
        return PressOutcome::Ignored;
    }
    if state.bow.empty {
        state.bow.empty = false;
        state.bow.anim = 0;
        return PressOutcome::Reloaded;
    }
    state.arrows.push(Arrow::nocked_on(&state.bow));
    state.arrows_left -= 1;
    state.bow.anim = 1;
    state.bow.empty = true;
    PressOutcome::Fired
}
