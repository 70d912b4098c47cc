/// All game entity types — plain data plus the per-frame movement each
/// entity owns.  Rules that touch more than one entity live in `compute`.

use serde::Deserialize;

use crate::collision::Bounds;

// ── Canvas & entity dimensions ───────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

pub const BOW_WIDTH: f32 = 100.0;
pub const BOW_HEIGHT: f32 = 100.0;
/// Vertical speed applied while a movement key is held.
pub const BOW_SPEED: f32 = 5.0;

pub const ARROW_WIDTH: f32 = 32.0;
pub const ARROW_HEIGHT: f32 = 32.0;
pub const ARROW_SPEED: f32 = 3.0;

pub const TARGET_WIDTH: f32 = 25.0;
pub const TARGET_HEIGHT: f32 = 46.0;

/// Frames in the bow draw sequence: 0 = loaded, 1..=4 = drawing, 5 = empty.
pub const BOW_FRAMES: usize = 6;
/// Frames in the balloon pop sequence: 0 = intact, 5 = fully popped.
pub const POP_FRAMES: usize = 6;
pub const POP_TERMINAL_FRAME: usize = POP_FRAMES - 1;

// ── Levels ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnPattern {
    /// Every balloon starts on the bottom row.
    Line,
    /// Balloons are scattered uniformly over the play height.
    Random,
}

/// Immutable configuration for one stage of play.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LevelDescriptor {
    pub id: u32,
    pub description: String,
    /// Number of balloons spawned at level start.
    pub targets: u32,
    /// Arrow allowance.
    pub arrows: u32,
    /// Time budget in seconds.
    pub time: u32,
    /// Upward balloon speed, canvas units per frame.
    pub speed: f32,
    pub spawn: SpawnPattern,
}

// ── Bow ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bow {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub dy: f32,
    /// Index into the bow draw sequence.
    pub anim: usize,
    /// True once an arrow has left the string and the bow needs a reload.
    pub empty: bool,
}

impl Bow {
    pub fn new(canvas_height: f32) -> Self {
        Bow {
            x: 0.0,
            y: canvas_height / 2.0 - BOW_HEIGHT / 2.0,
            w: BOW_WIDTH,
            h: BOW_HEIGHT,
            dy: 0.0,
            anim: 0,
            empty: false,
        }
    }

    /// Move by the current velocity, then clamp.
    pub fn advance(&mut self, canvas_height: f32) {
        self.y += self.dy;
        self.clamp(canvas_height);
    }

    /// Keep the whole bow on the canvas.
    pub fn clamp(&mut self, canvas_height: f32) {
        let lowest = (canvas_height - self.h).max(0.0);
        if self.y < 0.0 {
            self.y = 0.0;
        } else if self.y > lowest {
            self.y = lowest;
        }
    }
}

// ── Arrow ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
}

impl Arrow {
    /// A fresh arrow nocked at the middle of `bow`.
    pub fn nocked_on(bow: &Bow) -> Self {
        Arrow {
            x: bow.x + bow.w / 2.0,
            y: bow.y + bow.h / 2.0 - ARROW_HEIGHT / 2.0 - 5.0,
            w: ARROW_WIDTH,
            h: ARROW_HEIGHT,
            speed: ARROW_SPEED,
        }
    }

    pub fn advance(&mut self) {
        self.x += self.speed;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.w, self.h)
    }
}

// ── Target (balloon) ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Upward speed, copied from the level that spawned it.
    pub speed: f32,
    pub hit: bool,
    /// Index into the pop sequence; only advances once `hit` is set.
    pub anim: usize,
    pub popped: bool,
}

impl Target {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Target {
            x,
            y,
            w: TARGET_WIDTH,
            h: TARGET_HEIGHT,
            speed,
            hit: false,
            anim: 0,
            popped: false,
        }
    }

    /// Rise by `speed`; a balloon whose top edge reaches the canvas top
    /// re-enters from the bottom.
    pub fn advance(&mut self, canvas_height: f32) {
        self.y -= self.speed;
        if self.y <= 0.0 {
            self.y = canvas_height - self.h;
        }
    }

    pub fn pop_finished(&self) -> bool {
        self.hit && self.anim >= POP_TERMINAL_FRAME
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.w, self.h)
    }
}

// ── Session status ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// No session started yet.
    Idle,
    Playing,
    /// Transient: waiting out the inter-level delay.
    LevelComplete,
    GameOver,
    /// Last level cleared.  Also counts as game over.
    GameComplete,
}

impl GameStatus {
    pub fn is_game_over(self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::GameComplete)
    }

    pub fn is_level_complete(self) -> bool {
        self == GameStatus::LevelComplete
    }

    pub fn is_game_complete(self) -> bool {
        self == GameStatus::GameComplete
    }
}

/// Full-screen message drawn over the play field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    GameOver,
    LevelComplete,
    Victory,
}

// ── HUD ──────────────────────────────────────────────────────────────────────

/// The labeled fields shown next to the play field.
#[derive(Clone, Debug, PartialEq)]
pub struct HudInfo {
    pub score: u32,
    pub high_score: u32,
    pub arrows_left: u32,
    pub time_left: u32,
    /// 0 before the first level starts.
    pub level_id: u32,
    pub description: String,
}

impl Default for HudInfo {
    fn default() -> Self {
        HudInfo {
            score: 0,
            high_score: 0,
            arrows_left: 0,
            time_left: 0,
            level_id: 0,
            description: "Press Start".to_string(),
        }
    }
}

impl HudInfo {
    /// `(label, value)` pairs in display order.
    pub fn fields(&self) -> [(&'static str, String); 6] {
        [
            ("Score", self.score.to_string()),
            ("High Score", self.high_score.to_string()),
            ("Arrows Left", self.arrows_left.to_string()),
            ("Time Left", format!("{}s", self.time_left)),
            ("Level", self.level_id.to_string()),
            ("", self.description.clone()),
        ]
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// Everything one play session mutates.  Owned by `session::Session`.
#[derive(Clone, Debug)]
pub struct GameState {
    pub bow: Bow,
    pub arrows: Vec<Arrow>,
    pub targets: Vec<Target>,
    pub level_index: usize,
    /// `None` until the first start.
    pub level: Option<LevelDescriptor>,
    pub score: u32,
    pub high_score: u32,
    pub time_left: u32,
    pub arrows_left: u32,
    pub status: GameStatus,
    pub paused: bool,
    pub hud: HudInfo,
    pub width: f32,
    pub height: f32,
}

impl GameState {
    pub fn overlay(&self) -> Option<Overlay> {
        match self.status {
            GameStatus::GameOver => Some(Overlay::GameOver),
            GameStatus::GameComplete => Some(Overlay::Victory),
            GameStatus::LevelComplete => Some(Overlay::LevelComplete),
            GameStatus::Idle | GameStatus::Playing => None,
        }
    }

    /// True when balloons, arrows and the bow are drawn.  Game over and
    /// victory replace the field; before the first start only the bow shows.
    pub fn shows_field(&self) -> bool {
        !self.status.is_game_over()
    }

    /// True when the per-frame step should run.
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Playing && !self.paused
    }

    pub fn update_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }
}
