//! Flappy Ball - a bouncing-ball pipe-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Input edge detection
//! - `highscores`: Persistent best score
//! - `settings`: Player preferences

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
///
/// World units are logical pixels in a fixed 400x600 playfield, y pointing
/// down, origin at the top-left. Rates are per second; the sim integrates
/// them at a fixed 120 Hz timestep.
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Height of the scrolling ground strip at the bottom
    pub const GROUND_HEIGHT: f32 = 15.0;

    /// Ball defaults - x is fixed, the world scrolls past instead
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_X: f32 = PLAYFIELD_WIDTH / 4.0;

    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 2700.0;
    /// Velocity set (not added) on a jump press (px/s, upward)
    pub const JUMP_IMPULSE: f32 = 600.0;
    /// Fastest the ball may fall (px/s)
    pub const TERMINAL_VELOCITY: f32 = 900.0;
    /// Fraction of speed kept when bouncing off the ground
    pub const RESTITUTION: f32 = 0.85;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 80.0;
    pub const PIPE_GAP: f32 = 250.0;
    /// Leftward pipe/ground scroll rate (px/s)
    pub const SCROLL_SPEED: f32 = 180.0;
    /// Ticks between pipe spawns (1.5 s at 120 Hz)
    pub const SPAWN_INTERVAL_TICKS: u32 = 180;
    /// Keep-out distance from ceiling and ground when placing a gap
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Smallest gap the spawner may produce; must clear the ball's diameter
    pub const MIN_GAP_CLEARANCE: f32 = 3.0 * 2.0 * BALL_RADIUS;

    /// Top of the ground strip; the ball bounces here, pipes end here
    pub const GROUND_TOP: f32 = PLAYFIELD_HEIGHT - GROUND_HEIGHT;
}
