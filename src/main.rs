mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use balloon_archer::levels::{default_levels, load_levels};
use balloon_archer::{GameError, Input, Session};

use display::Viewport;

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so ≈133 ms is always refreshed before expiry
/// whatever the frame rate.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

#[derive(Parser, Debug)]
#[command(about = "Pop rising balloons with a bow, in your terminal", version)]
struct Args {
    /// TOML level table to play instead of the built-in levels
    #[arg(long)]
    levels: Option<PathBuf>,
    /// Seed for balloon placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
    /// Write logs to this file (filter with RUST_LOG, default `info`)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW`.
fn is_held(key_seen: &HashMap<KeyCode, Instant>, key: &KeyCode, now: Instant) -> bool {
    key_seen
        .get(key)
        .map(|&last| now.saturating_duration_since(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn init_logging(path: Option<&Path>) -> Result<(), GameError> {
    // The terminal belongs to the game, so without a file there is no logger.
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Every frame: drain input, advance the session clock by the measured wall
/// time, step the simulation, draw.  Held movement keys are tracked in
/// `key_seen` (time of the last press/repeat per key) so both
/// release-reporting and classic terminals stop the bow when the key is let go.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> Result<(), GameError> {
    let mut key_seen: HashMap<KeyCode, Instant> = HashMap::new();
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        let (width, height) = terminal::size()?;
        let view = Viewport::new(width, height);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_seen.insert(code.clone(), frame_start);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                                session.handle_input(Input::Start);
                            }
                            KeyCode::Char('p') | KeyCode::Char('P') => {
                                session.handle_input(Input::TogglePause);
                            }
                            KeyCode::Char(' ') => session.handle_input(Input::Press),
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_seen.insert(code.clone(), frame_start);
                    }
                    KeyEventKind::Release => {
                        key_seen.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, row, .. }) => match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        session.handle_input(Input::PointerAt(view.canvas_y(row)));
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        session.handle_input(Input::Press);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // ── Apply held movement keys ──────────────────────────────────────────
        let up = is_held(&key_seen, &KeyCode::Up, frame_start)
            || is_held(&key_seen, &KeyCode::Char('w'), frame_start)
            || is_held(&key_seen, &KeyCode::Char('W'), frame_start);
        let down = is_held(&key_seen, &KeyCode::Down, frame_start)
            || is_held(&key_seen, &KeyCode::Char('s'), frame_start)
            || is_held(&key_seen, &KeyCode::Char('S'), frame_start);
        let movement = match (up, down) {
            (true, false) => Input::MoveUp,
            (false, true) => Input::MoveDown,
            _ => Input::StopVertical,
        };
        session.handle_input(movement);

        let now = Instant::now();
        session.advance_clock(now - last_tick);
        last_tick = now;

        session.frame();
        display::render(out, session.state(), &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let levels = match &args.levels {
        Some(path) => load_levels(path)?,
        None => default_levels(),
    };
    let mut session = Session::with_seed(levels, args.seed)?;
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(args.fps));

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    log::info!("Balloon Archer starting ({} levels)", session.levels().len());
    let result = game_loop(&mut out, &mut session, &rx, frame_time);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("Exiting (high score {})", session.state().high_score);
    result
}
