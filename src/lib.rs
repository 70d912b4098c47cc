//! Balloon Archer: a bow on the left edge, balloons rising on the right,
//! and a fixed run of levels to clear before the clock or the quiver runs out.
//!
//! - `entities`: bow, arrows, balloons, levels and the session state
//! - `collision`: half-height box overlap
//! - `spawner`: balloon factory
//! - `compute`: the per-frame step, level state machine and input rules
//! - `scheduler`: virtual-clock timers (countdown, pop, bow draw, level pause)
//! - `session`: controller tying state, timers and input together
//! - `levels`: built-in level table and TOML loading

pub mod collision;
pub mod compute;
pub mod entities;
pub mod error;
pub mod levels;
pub mod scheduler;
pub mod session;
pub mod spawner;

pub use error::GameError;
pub use session::{Input, Session};
