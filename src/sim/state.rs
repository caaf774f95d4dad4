//! Game state and core simulation types
//!
//! Everything needed to replay a session deterministically lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting on the title screen for the first jump
    Title,
    /// Active gameplay
    Playing,
    /// Run ended on a pipe collision
    GameOver,
}

/// The player's ball
///
/// x is fixed at `BALL_X`; the world scrolls left past it instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Vertical velocity, positive is downward (px/s)
    pub vel: f32,
    pub radius: f32,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(BALL_X, PLAYFIELD_HEIGHT / 2.0),
            vel: 0.0,
            radius: BALL_RADIUS,
        }
    }

    /// Left edge of the ball's horizontal extent
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    /// Right edge of the ball's horizontal extent
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    /// Idle float on the title/game-over screens (sine wave around center)
    pub fn hover(&mut self, time_secs: f32) {
        let amplitude = 10.0;
        let period = 0.8;
        let offset = (time_secs * std::f32::consts::TAU / period).sin();
        self.pos.y = PLAYFIELD_HEIGHT / 2.0 + amplitude * offset;
        self.vel = 0.0;
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// A pair of pipes with a vertical gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipePair {
    pub id: u32,
    /// Left edge along the scroll axis
    pub x: f32,
    /// Vertical center of the gap
    pub gap_center: f32,
    /// Vertical opening between the two pipes
    pub gap_height: f32,
    /// Set once the ball has passed this pair (prevents double scoring)
    pub scored: bool,
}

impl PipePair {
    pub fn new(id: u32, x: f32, gap_center: f32, gap_height: f32) -> Self {
        debug_assert!(gap_height >= MIN_GAP_CLEARANCE);
        Self {
            id,
            x,
            gap_center,
            gap_height,
            scored: false,
        }
    }

    /// Right edge along the scroll axis
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// Top of the gap opening
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height / 2.0
    }

    /// Bottom of the gap opening
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height / 2.0
    }

    /// Obstacle extent from the ceiling down to the gap
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, PIPE_WIDTH, self.gap_top())
    }

    /// Obstacle extent from the gap down to the ground
    pub fn bottom_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_bottom(), PIPE_WIDTH, GROUND_TOP - self.gap_bottom())
    }

    /// Whether the pair's horizontal extent overlaps the ball's
    pub fn overlaps_ball_x(&self, ball: &Ball) -> bool {
        ball.right() > self.x && ball.left() < self.right()
    }
}

/// Safe band for gap centers: keeps both pipes at least `SPAWN_MARGIN` tall
pub fn gap_center_band(gap_height: f32) -> (f32, f32) {
    let lo = SPAWN_MARGIN + gap_height / 2.0;
    let hi = GROUND_TOP - SPAWN_MARGIN - gap_height / 2.0;
    (lo, hi)
}

/// Complete session state (deterministic, serializable)
///
/// The high score deliberately lives outside this struct: it is process-wide
/// state owned by the outer loop and survives session resets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: SessionPhase,
    /// The player's ball
    pub ball: Ball,
    /// Active pipe pairs, oldest first
    pub pipes: Vec<PipePair>,
    /// Pipes passed this session
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks until the next pipe spawn
    pub spawn_countdown: u32,
    /// Pipes spawned so far (streams the per-spawn RNG)
    pub spawn_count: u64,
    /// Ground scroll offset for rendering (wraps at playfield width)
    pub scroll_offset: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new state sitting on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: SessionPhase::Title,
            ball: Ball::new(),
            pipes: Vec::new(),
            score: 0,
            time_ticks: 0,
            spawn_countdown: 0,
            spawn_count: 0,
            scroll_offset: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset for a fresh run and enter Playing
    ///
    /// Spawn countdown starts at zero so the first pair appears right away
    /// instead of after a full interval.
    pub fn reset_session(&mut self) {
        self.ball = Ball::new();
        self.pipes.clear();
        self.score = 0;
        self.spawn_countdown = 0;
        self.phase = SessionPhase::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_rects_derive_from_gap() {
        let pipe = PipePair::new(1, 100.0, 300.0, 250.0);
        let top = pipe.top_rect();
        let bottom = pipe.bottom_rect();

        assert_eq!(top.top(), 0.0);
        assert_eq!(top.bottom(), 175.0);
        assert_eq!(bottom.top(), 425.0);
        assert_eq!(bottom.bottom(), GROUND_TOP);
        assert_eq!(top.left(), 100.0);
        assert_eq!(top.right(), 100.0 + PIPE_WIDTH);
    }

    #[test]
    fn test_gap_exceeds_ball_diameter() {
        assert!(MIN_GAP_CLEARANCE > 2.0 * BALL_RADIUS);
        assert!(PIPE_GAP >= MIN_GAP_CLEARANCE);
    }

    #[test]
    fn test_gap_center_band_within_playfield() {
        let (lo, hi) = gap_center_band(PIPE_GAP);
        assert!(lo < hi);
        assert!(lo - PIPE_GAP / 2.0 >= 0.0);
        assert!(hi + PIPE_GAP / 2.0 <= GROUND_TOP);
    }

    #[test]
    fn test_overlaps_ball_x() {
        let ball = Ball::new();
        // Pipe centered on the ball
        let pipe = PipePair::new(1, BALL_X - PIPE_WIDTH / 2.0, 300.0, PIPE_GAP);
        assert!(pipe.overlaps_ball_x(&ball));
        // Pipe far to the right
        let pipe = PipePair::new(2, BALL_X + 200.0, 300.0, PIPE_GAP);
        assert!(!pipe.overlaps_ball_x(&ball));
        // Pipe already passed
        let pipe = PipePair::new(3, ball.left() - PIPE_WIDTH - 1.0, 300.0, PIPE_GAP);
        assert!(!pipe.overlaps_ball_x(&ball));
    }
}
