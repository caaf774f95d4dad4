//! Fixed-timestep simulation update
//!
//! `tick` advances the whole game by one step. It is a pure function of the
//! state, the input, and the timestep, so replaying the same inputs against
//! the same seed reproduces a session exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::ball_pipe_collision;
use super::state::{GameState, PipePair, SessionPhase, gap_center_band};
use crate::consts::*;

/// Player input for one simulation tick
///
/// `jump` is edge-triggered by the platform layer: true only on the tick the
/// press happened, never while a key is held.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub jump: bool,
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        SessionPhase::Title | SessionPhase::GameOver => {
            if input.jump {
                // Start (or restart) a run. The impulse lands on this tick;
                // physics picks it up on the next.
                state.reset_session();
                state.ball.vel = -JUMP_IMPULSE;
            } else {
                let time_secs = state.time_ticks as f32 * SIM_DT;
                state.ball.hover(time_secs);
                if state.phase == SessionPhase::Title {
                    advance_scroll(state, dt);
                }
            }
        }
        SessionPhase::Playing => {
            update_playing(state, input, dt);
        }
    }
    state.time_ticks += 1;
}

fn update_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    let ball = &mut state.ball;

    // Gravity, capped at terminal velocity
    ball.vel = (ball.vel + GRAVITY * dt).min(TERMINAL_VELOCITY);
    ball.pos.y += ball.vel * dt;

    // Ground bounce keeps the run alive, losing energy each contact
    if ball.pos.y + ball.radius > GROUND_TOP {
        ball.pos.y = GROUND_TOP - ball.radius;
        ball.vel = -ball.vel * RESTITUTION;
    }

    // Ceiling clamps without bouncing
    if ball.pos.y - ball.radius < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel = ball.vel.max(0.0);
    }

    // Jump overwrites velocity rather than adding to it, so mashing the
    // button cannot launch the ball off-screen
    if input.jump {
        ball.vel = -JUMP_IMPULSE;
    }

    // Scroll pipes left and drop the ones fully off-screen
    for pipe in &mut state.pipes {
        pipe.x -= SCROLL_SPEED * dt;
    }
    state.pipes.retain(|p| p.right() > 0.0);
    advance_scroll(state, dt);

    if state.spawn_countdown == 0 {
        spawn_pipe(state);
        state.spawn_countdown = SPAWN_INTERVAL_TICKS;
    } else {
        state.spawn_countdown -= 1;
    }

    // Collision ends the run on the same tick it is detected
    let ball = &state.ball;
    for pipe in &state.pipes {
        if !pipe.overlaps_ball_x(ball) {
            continue;
        }
        let result = ball_pipe_collision(ball.pos, ball.radius, pipe);
        if result.hit {
            log::info!("run over at score {} (pipe {})", state.score, pipe.id);
            state.phase = SessionPhase::GameOver;
            break;
        }
    }

    // Score each pair exactly once, when the ball's left edge clears it
    if state.phase == SessionPhase::Playing {
        let ball_left = state.ball.left();
        for pipe in &mut state.pipes {
            if !pipe.scored && ball_left > pipe.right() {
                pipe.scored = true;
                state.score += 1;
            }
        }
    }
}

fn advance_scroll(state: &mut GameState, dt: f32) {
    state.scroll_offset = (state.scroll_offset + SCROLL_SPEED * dt) % PLAYFIELD_WIDTH;
}

/// Spawn a pipe pair just past the right edge
///
/// Each spawn gets its own RNG derived from the run seed and the spawn index,
/// so determinism survives serialization without carrying RNG state around.
fn spawn_pipe(state: &mut GameState) {
    let stream = state
        .seed
        .wrapping_add(state.spawn_count.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    let mut rng = Pcg32::seed_from_u64(stream);

    let (lo, hi) = gap_center_band(PIPE_GAP);
    let gap_center = rng.random_range(lo..hi);

    let id = state.next_entity_id();
    state
        .pipes
        .push(PipePair::new(id, PLAYFIELD_WIDTH, gap_center, PIPE_GAP));
    state.spawn_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn jump_input() -> TickInput {
        TickInput { jump: true }
    }

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.reset_session();
        // Push the first spawn far out so tests control pipe placement
        state.spawn_countdown = 100_000;
        state
    }

    #[test]
    fn test_title_jump_starts_run() {
        let mut state = GameState::new(7);
        tick(&mut state, &jump_input(), SIM_DT);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.ball.vel, -JUMP_IMPULSE);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_title_idles_without_input() {
        let mut state = GameState::new(7);
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, SessionPhase::Title);
        assert!(state.pipes.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_first_pipe_spawns_immediately() {
        let mut state = GameState::new(7);
        tick(&mut state, &jump_input(), SIM_DT);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.pipes.len(), 1);
        assert!(state.pipes[0].x > BALL_X);
    }

    #[test]
    fn test_ground_bounce_loses_energy() {
        let mut state = playing_state(1);
        state.ball.pos.y = GROUND_TOP - BALL_RADIUS - 1.0;
        state.ball.vel = 600.0;
        tick(&mut state, &TickInput::default(), SIM_DT);

        let vel_at_contact = 600.0 + GRAVITY * SIM_DT;
        assert!((state.ball.vel - (-vel_at_contact * RESTITUTION)).abs() < 0.001);
        assert_eq!(state.ball.pos.y, GROUND_TOP - BALL_RADIUS);
        // Bouncing never ends the run
        assert_eq!(state.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_ceiling_clamps_without_bounce() {
        let mut state = playing_state(1);
        state.ball.pos.y = BALL_RADIUS + 0.5;
        state.ball.vel = -900.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.ball.pos.y, BALL_RADIUS);
        assert!(state.ball.vel >= 0.0);
        assert_eq!(state.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_terminal_velocity_cap() {
        let mut state = playing_state(1);
        state.ball.pos.y = 100.0;
        for _ in 0..200 {
            state.ball.pos.y = 100.0; // Keep it airborne
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert!(state.ball.vel <= TERMINAL_VELOCITY);
        }
    }

    #[test]
    fn test_jump_overwrites_velocity() {
        let mut state = playing_state(1);
        state.ball.pos.y = 300.0;
        state.ball.vel = 800.0;
        tick(&mut state, &jump_input(), SIM_DT);
        assert_eq!(state.ball.vel, -JUMP_IMPULSE);
    }

    #[test]
    fn test_pipe_scores_exactly_once() {
        let mut state = playing_state(1);
        state.ball.pos.y = 300.0;
        // Already fully behind the ball
        let x = state.ball.left() - PIPE_WIDTH - 10.0;
        state.pipes.push(PipePair::new(99, x, 300.0, PIPE_GAP));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].scored);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_pipe_collision_ends_run_same_tick() {
        let mut state = playing_state(1);
        // Ball well above the gap, inside the top pipe's column
        state.ball.pos.y = 100.0;
        state
            .pipes
            .push(PipePair::new(99, BALL_X - PIPE_WIDTH / 2.0, 450.0, PIPE_GAP));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, SessionPhase::GameOver);
    }

    #[test]
    fn test_game_over_jump_restarts_clean() {
        let mut state = playing_state(1);
        state.phase = SessionPhase::GameOver;
        state.score = 12;
        state.pipes.push(PipePair::new(99, 200.0, 300.0, PIPE_GAP));

        tick(&mut state, &jump_input(), SIM_DT);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.ball.vel, -JUMP_IMPULSE);
    }

    #[test]
    fn test_offscreen_pipes_despawn() {
        let mut state = playing_state(1);
        state.ball.pos.y = 300.0;
        state.pipes.push(PipePair::new(99, -PIPE_WIDTH + 0.5, 300.0, PIPE_GAP));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_spawned_gaps_stay_in_band() {
        let mut state = GameState::new(42);
        tick(&mut state, &jump_input(), SIM_DT);
        let (lo, hi) = gap_center_band(PIPE_GAP);
        // Long run with periodic jumps to keep the ball alive-ish; we only
        // care about spawner output here
        for i in 0..2400u32 {
            let input = TickInput { jump: i % 40 == 0 };
            tick(&mut state, &input, SIM_DT);
            for pipe in &state.pipes {
                assert!(pipe.gap_center >= lo && pipe.gap_center < hi);
                assert!(pipe.gap_top() >= SPAWN_MARGIN - 0.001);
                assert!(pipe.gap_bottom() <= GROUND_TOP - SPAWN_MARGIN + 0.001);
            }
        }
    }

    #[test]
    fn test_e2e_first_fall_and_bounce() {
        let mut state = GameState::new(3);
        tick(&mut state, &jump_input(), SIM_DT);
        assert_eq!(state.ball.vel, -JUMP_IMPULSE);

        // Idle through the arc: rise, fall monotonically, bounce. 150 ticks
        // is not long enough for the first pipe to reach the ball.
        let mut bounced = false;
        let mut last_y = state.ball.pos.y;
        let mut falling = false;
        for _ in 0..150 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            let y = state.ball.pos.y;
            if state.ball.vel < 0.0 && falling {
                bounced = true;
            }
            if !bounced {
                if falling {
                    assert!(y >= last_y, "fall must be monotone before the bounce");
                }
                if state.ball.vel > 0.0 {
                    falling = true;
                }
            }
            last_y = y;
        }
        assert!(bounced);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed: u64| {
            let mut state = GameState::new(seed);
            tick(&mut state, &jump_input(), SIM_DT);
            for i in 0..1200u32 {
                let input = TickInput { jump: i % 37 == 0 };
                tick(&mut state, &input, SIM_DT);
            }
            state
        };
        let a = run(5);
        let b = run(5);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.pipes.len(), b.pipes.len());
        for (pa, pb) in a.pipes.iter().zip(&b.pipes) {
            assert_eq!(pa.x, pb.x);
            assert_eq!(pa.gap_center, pb.gap_center);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let gaps = |seed: u64| {
            let mut state = GameState::new(seed);
            tick(&mut state, &jump_input(), SIM_DT);
            for i in 0..1200u32 {
                let input = TickInput { jump: i % 37 == 0 };
                tick(&mut state, &input, SIM_DT);
            }
            state.spawn_count
        };
        // Both runs spawn; gap placement is seed-dependent, checked below
        assert!(gaps(1) > 0 && gaps(2) > 0);

        let first_gap = |seed: u64| {
            let mut state = GameState::new(seed);
            tick(&mut state, &jump_input(), SIM_DT);
            tick(&mut state, &TickInput::default(), SIM_DT);
            state.pipes[0].gap_center
        };
        assert_ne!(first_gap(1), first_gap(2));
    }

    proptest! {
        #[test]
        fn prop_jump_velocity_independent_of_prior(vel in -900.0f32..900.0) {
            let mut state = playing_state(1);
            state.ball.pos.y = 300.0;
            state.ball.vel = vel;
            tick(&mut state, &jump_input(), SIM_DT);
            prop_assert_eq!(state.ball.vel, -JUMP_IMPULSE);
        }

        #[test]
        fn prop_ball_stays_in_bounds(seed in any::<u64>(), period in 10u32..80) {
            let mut state = GameState::new(seed);
            tick(&mut state, &jump_input(), SIM_DT);
            for i in 0..1200u32 {
                let input = TickInput { jump: i % period == 0 };
                tick(&mut state, &input, SIM_DT);
                let y = state.ball.pos.y;
                prop_assert!(y >= state.ball.radius - 0.001);
                prop_assert!(y <= GROUND_TOP - state.ball.radius + 0.001);
                if state.phase != SessionPhase::Playing {
                    break;
                }
            }
        }

        #[test]
        fn prop_score_monotone_within_run(seed in any::<u64>()) {
            let mut state = GameState::new(seed);
            tick(&mut state, &jump_input(), SIM_DT);
            let mut last = 0u32;
            for i in 0..2400u32 {
                let input = TickInput { jump: i % 45 == 0 };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.score >= last);
                last = state.score;
                if state.phase != SessionPhase::Playing {
                    break;
                }
            }
        }
    }
}
