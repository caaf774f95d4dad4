//! Game simulation
//!
//! All gameplay logic lives here and is pure and deterministic: given the
//! same seed and the same sequence of `TickInput`s, a session replays
//! identically on every platform. Rendering and input live elsewhere.

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_pipe_collision, ball_rect_collision};
pub use rect::Rect;
pub use state::{Ball, GameState, PipePair, SessionPhase};
pub use tick::{TickInput, tick};
