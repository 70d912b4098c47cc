/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// canvas coordinates into terminal cells and state into terminal commands.

use std::io::Write;

use balloon_archer::entities::{
    Arrow, Bow, GameState, GameStatus, Overlay, Target, BOW_FRAMES, CANVAS_HEIGHT,
    CANVAS_WIDTH, POP_FRAMES,
};
use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkGreen;
const C_HUD: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_BOW: Color = Color::White;
const C_ARROW: Color = Color::Cyan;
const C_BALLOON: Color = Color::Red;
const C_BALLOON_POP: Color = Color::Yellow;
const C_STRING: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Bow drawn at its middle row: loaded, four draw frames, then empty.
const BOW_SPRITES: [&str; BOW_FRAMES] = ["}->", "}=>", "}≡>", "}", "}", "}·"];
const POP_SPRITES: [&str; POP_FRAMES] = ["O", "Ö", "o", "*", "+", "·"];
const ARROW_SPRITE: &str = "──►";
/// Shown for any frame index without a sprite.
const PLACEHOLDER: &str = "?";

fn sprite(table: &[&'static str], frame: usize) -> &'static str {
    table.get(frame).copied().unwrap_or(PLACEHOLDER)
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the 800×600 canvas onto the bordered play area of the terminal.
///
/// Row 0 is the HUD, row 1 and row `height-2` the border, the last row the
/// controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Viewport {
            width,
            height,
            left: 1,
            top: 2,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
        }
    }

    fn col(&self, x: f32) -> Option<u16> {
        if !(0.0..CANVAS_WIDTH).contains(&x) {
            return None;
        }
        Some(self.left + (x / CANVAS_WIDTH * self.cols as f32) as u16)
    }

    fn row(&self, y: f32) -> Option<u16> {
        if !(0.0..CANVAS_HEIGHT).contains(&y) {
            return None;
        }
        Some(self.top + (y / CANVAS_HEIGHT * self.rows as f32) as u16)
    }

    /// Canvas height under terminal row `row` (used for the mouse).
    pub fn canvas_y(&self, row: u16) -> f32 {
        let inner = row.saturating_sub(self.top).min(self.rows - 1) as f32 + 0.5;
        inner / self.rows as f32 * CANVAS_HEIGHT
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    if state.shows_field() {
        if state.status != GameStatus::Idle {
            for target in &state.targets {
                draw_target(out, target, view)?;
            }
            for arrow in &state.arrows {
                draw_arrow(out, arrow, view)?;
            }
        }
        draw_bow(out, &state.bow, view)?;
    }
    draw_controls_hint(out, view)?;

    match state.overlay() {
        Some(Overlay::GameOver) => draw_game_over(out, state, view)?,
        Some(Overlay::LevelComplete) => draw_banner(
            out,
            view,
            &[
                ("╔════════════════════╗", Color::Green),
                ("║    WELL  DONE!     ║", Color::Green),
                ("╚════════════════════╝", Color::Green),
                ("Next level is on its way", Color::White),
            ],
        )?,
        Some(Overlay::Victory) => {
            let score_line = format!("Final Score: {:>6}", state.score);
            draw_banner(
                out,
                view,
                &[
                    ("╔════════════════════╗", Color::Yellow),
                    ("║     YOU  WIN!      ║", Color::Yellow),
                    ("╚════════════════════╝", Color::Yellow),
                    (score_line.as_str(), Color::White),
                    ("Enter - Play Again  Q - Quit", Color::DarkGrey),
                ],
            )?
        }
        None if state.status == GameStatus::Idle => draw_banner(
            out,
            view,
            &[
                ("BALLOON  ARCHER", Color::Cyan),
                ("Press Enter to start", Color::White),
            ],
        )?,
        None => {}
    }

    if state.paused {
        draw_banner(out, view, &[("║   PAUSED   ║", Color::White)])?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let fields = state.hud.fields();
    let (stats, level) = fields.split_at(4);

    let text: Vec<String> = stats
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect();
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(text.join("  ")))?;

    // Level id and description — right side
    let level_str = format!("{}: {}  {}", level[0].0, level[0].1, level[1].1);
    let lx = view
        .width
        .saturating_sub(level_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(level_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_bow<W: Write>(out: &mut W, bow: &Bow, view: &Viewport) -> std::io::Result<()> {
    let (Some(col), Some(top)) = (view.col(bow.x), view.row(bow.y)) else {
        return Ok(());
    };
    let bottom = view.row(bow.y + bow.h - 1.0).unwrap_or(top);
    let middle = view.row(bow.y + bow.h / 2.0).unwrap_or(top);

    out.queue(style::SetForegroundColor(C_BOW))?;
    for row in top..=bottom {
        out.queue(cursor::MoveTo(col, row))?;
        if row == middle {
            out.queue(Print(sprite(&BOW_SPRITES, bow.anim)))?;
        } else if row == top {
            out.queue(Print("╮"))?;
        } else if row == bottom {
            out.queue(Print("╯"))?;
        } else {
            out.queue(Print("│"))?;
        }
    }
    Ok(())
}

fn draw_arrow<W: Write>(out: &mut W, arrow: &Arrow, view: &Viewport) -> std::io::Result<()> {
    let (Some(col), Some(row)) = (view.col(arrow.x), view.row(arrow.y + arrow.h / 2.0)) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_ARROW))?;
    out.queue(Print(ARROW_SPRITE))?;
    Ok(())
}

fn draw_target<W: Write>(out: &mut W, target: &Target, view: &Viewport) -> std::io::Result<()> {
    let (Some(col), Some(row)) = (view.col(target.x), view.row(target.y)) else {
        return Ok(());
    };
    let color = if target.hit { C_BALLOON_POP } else { C_BALLOON };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite(&POP_SPRITES, target.anim)))?;

    // The string hangs one row below an intact balloon.
    if !target.hit && row + 1 < view.height.saturating_sub(2) {
        out.queue(cursor::MoveTo(col, row + 1))?;
        out.queue(style::SetForegroundColor(C_STRING))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "↑ ↓ / W S / Mouse : Aim   Click / SPACE : Shoot   P : Pause   Enter : Start   Q : Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score);
    let new_best = state.score >= state.high_score && state.score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", state.high_score)
    } else {
        format!("Best Score:  {:>6}", state.high_score)
    };
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    draw_banner(
        out,
        view,
        &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            (best_line.as_str(), best_color),
            ("Enter - Play Again  Q - Quit", Color::White),
        ],
    )
}

/// Centre a block of lines in the play area.
fn draw_banner<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
