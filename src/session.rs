/// The session controller: owns the game state, the level table, the timer
/// scheduler and the rng, and is the single consumer of every input event,
/// timer delivery and frame.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::compute::{self, PressOutcome, Transition};
use crate::entities::{GameState, GameStatus, LevelDescriptor, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::GameError;
use crate::levels;
use crate::scheduler::{Scheduler, TimerKind};

pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);
pub const POP_PERIOD: Duration = Duration::from_millis(75);
pub const BOW_DRAW_PERIOD: Duration = Duration::from_millis(100);
/// Draw frames played after the shot frame (2, 3, 4, 5).
pub const BOW_DRAW_STEPS: u32 = 4;
pub const LEVEL_ADVANCE_DELAY: Duration = Duration::from_secs(3);

/// Everything the player can do, already translated from raw device events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    MoveUp,
    MoveDown,
    StopVertical,
    /// Pointer moved to this canvas height.
    PointerAt(f32),
    Press,
    Start,
    TogglePause,
}

pub struct Session {
    state: GameState,
    levels: Vec<LevelDescriptor>,
    scheduler: Scheduler,
    rng: StdRng,
}

impl Session {
    pub fn new(levels: Vec<LevelDescriptor>, rng: StdRng) -> Result<Self, GameError> {
        levels::validate(&levels)?;
        Ok(Session {
            state: compute::init_state(CANVAS_WIDTH, CANVAS_HEIGHT),
            levels,
            scheduler: Scheduler::new(),
            rng,
        })
    }

    /// Seeded sessions spawn the same balloons every run.
    pub fn with_seed(levels: Vec<LevelDescriptor>, seed: Option<u64>) -> Result<Self, GameError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(levels, rng)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn levels(&self) -> &[LevelDescriptor] {
        &self.levels
    }

    // ── Session controls ─────────────────────────────────────────────────────

    pub fn start(&mut self) {
        // A restart during the inter-level pause must not let the old
        // advance fire into the new session.
        self.scheduler.cancel_all();
        compute::start_session(&mut self.state, &self.levels, &mut self.rng);
        self.restart_level_timers();
        log::info!("Session started (high score {})", self.state.high_score);
    }

    /// Pause freezes the step and the clock alike.
    pub fn toggle_pause(&mut self) {
        match self.state.status {
            GameStatus::Playing | GameStatus::LevelComplete => {
                self.state.paused = !self.state.paused;
                log::info!("{}", if self.state.paused { "Paused" } else { "Resumed" });
            }
            _ => log::trace!("Pause ignored in {:?}", self.state.status),
        }
    }

    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::MoveUp => compute::move_bow_up(&mut self.state),
            Input::MoveDown => compute::move_bow_down(&mut self.state),
            Input::StopVertical => compute::stop_bow(&mut self.state),
            Input::PointerAt(y) => compute::point_bow(&mut self.state, y),
            Input::Press => self.press(),
            Input::Start => self.start(),
            Input::TogglePause => self.toggle_pause(),
        }
    }

    fn press(&mut self) {
        match compute::press(&mut self.state) {
            PressOutcome::Fired => {
                self.scheduler
                    .repeat(TimerKind::BowDraw, BOW_DRAW_PERIOD, BOW_DRAW_STEPS);
                log::debug!("Arrow fired, {} left", self.state.arrows_left);
            }
            PressOutcome::Reloaded => {
                self.scheduler.cancel(TimerKind::BowDraw);
                log::debug!("Bow reloaded");
            }
            PressOutcome::Ignored => log::trace!("Press ignored"),
        }
    }

    // ── Clock ────────────────────────────────────────────────────────────────

    /// Feed `elapsed` wall time to the timers, delivering each due timer in
    /// order.  A paused session's clock stands still.
    pub fn advance_clock(&mut self, elapsed: Duration) {
        if self.state.paused {
            return;
        }
        let deadline = self.scheduler.now() + elapsed;
        while let Some(kind) = self.scheduler.next_due(deadline) {
            self.on_timer(kind);
        }
        self.scheduler.settle(deadline);
    }

    fn on_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Countdown => {
                if !compute::tick_countdown(&mut self.state) {
                    self.scheduler.cancel(TimerKind::Countdown);
                    log::debug!("Level clock ran out");
                }
            }
            TimerKind::PopAnimation => compute::tick_pop_animation(&mut self.state),
            TimerKind::BowDraw => compute::tick_bow_draw(&mut self.state),
            TimerKind::LevelAdvance => {
                if compute::advance_level(&mut self.state, &self.levels, &mut self.rng) {
                    self.restart_level_timers();
                }
            }
        }
    }

    fn restart_level_timers(&mut self) {
        self.scheduler.every(TimerKind::PopAnimation, POP_PERIOD);
        self.scheduler.every(TimerKind::Countdown, COUNTDOWN_PERIOD);
        if let Some(level) = &self.state.level {
            log::info!(
                "Level {} \"{}\": {} balloons, {} arrows, {}s",
                level.id,
                level.description,
                level.targets,
                level.arrows,
                level.time
            );
        }
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    /// Run one simulation step and react to any status change.
    pub fn frame(&mut self) -> Option<Transition> {
        let transition = compute::step(&mut self.state, self.levels.len())?;
        match transition {
            Transition::LevelComplete { bonus } => {
                self.scheduler.cancel(TimerKind::Countdown);
                self.scheduler.cancel(TimerKind::BowDraw);
                self.scheduler.once(TimerKind::LevelAdvance, LEVEL_ADVANCE_DELAY);
                log::info!(
                    "Level {} complete, bonus {} (score {})",
                    self.state.hud.level_id,
                    bonus,
                    self.state.score
                );
            }
            Transition::GameComplete { bonus } => {
                self.scheduler.cancel_all();
                log::info!("All levels cleared, bonus {} (final score {})", bonus, self.state.score);
            }
            Transition::GameOver => {
                self.scheduler.cancel_all();
                log::info!("Game over (score {})", self.state.score);
            }
        }
        Some(transition)
    }
}
