//! The match simulator and its per-tick update
//!
//! One tick per rendered frame, driven by the host's timer. The update runs
//! six steps in strict sequence; every branch is a pure numeric guard, so a
//! tick never fails.

use super::input::{HeldControls, InputEvent, PaddleControl};
use super::state::{Ball, MatchState, Paddle, PlayerSide, Renderable, ScoreEvent};
use crate::consts::*;

/// Where score events go. The host injects this at construction; a channel
/// sender wrapped in a closure works as well as a plain callback.
pub type ScoreSink = Box<dyn FnMut(ScoreEvent)>;

/// Owns the ball and both paddles, advances physics each tick, and reports
/// score events through the injected sink.
pub struct MatchSimulator {
    state: MatchState,
    held: HeldControls,
    score_sink: ScoreSink,
}

impl MatchSimulator {
    /// Create a simulator and serve the first ball. Two simulators built with
    /// the same seed produce identical serve sequences.
    pub fn new(seed: u64, score_sink: impl FnMut(ScoreEvent) + 'static) -> Self {
        Self {
            state: MatchState::new(seed),
            held: HeldControls::new(),
            score_sink: Box::new(score_sink),
        }
    }

    /// Replace the ball at the center with a fresh random serve
    pub fn reset(&mut self) {
        self.state.serve();
    }

    /// Advance the match by `dt` seconds.
    ///
    /// Steps, in order, each independent:
    /// 1. ball position += velocity * dt
    /// 2. reflect vertical velocity off the top/bottom boundary
    /// 3. score + re-serve when the ball leaves the left or right edge
    /// 4. left paddle save: reflect horizontal velocity
    /// 5. right paddle save: reflect horizontal velocity
    /// 6. paddle movement from the held-controls snapshot
    ///
    /// Collisions invert a velocity sign only: no positional correction and
    /// no speed change, so the ball may briefly render off-screen or inside a
    /// paddle before reflecting. A negative or non-finite `dt` behaves as 0
    /// for this tick.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let held = self.held;

        let ball = &mut self.state.ball;
        ball.pos += ball.vel * dt;

        // Bounce on the top and bottom of the screen. Velocity flips, the
        // position is not clamped.
        if ball.pos.y < 0.0 || ball.pos.y > 1.0 {
            ball.vel.y = -ball.vel.y;
        }

        // Two independent ifs, not else-if: both edges are checked every
        // tick. After a re-serve the ball is back at center, so the paddle
        // bands below cannot also trigger.
        if self.state.ball.pos.x < 0.0 {
            self.score(ScoreEvent::RightScores);
            self.state.serve();
        }
        if self.state.ball.pos.x > 1.0 {
            self.score(ScoreEvent::LeftScores);
            self.state.serve();
        }

        // Paddle saves: within the band and within reach of the paddle center
        let state = &mut self.state;
        if state.ball.pos.x < LEFT_SAVE_X
            && (state.left_paddle.pos.y - state.ball.pos.y).abs() < PADDLE_REACH
        {
            state.ball.vel.x = -state.ball.vel.x;
        }
        if state.ball.pos.x > RIGHT_SAVE_X
            && (state.right_paddle.pos.y - state.ball.pos.y).abs() < PADDLE_REACH
        {
            state.ball.vel.x = -state.ball.vel.x;
        }

        // Paddle movement, four independent checks against the snapshot
        for control in PaddleControl::ALL {
            if !held.is_held(control) {
                continue;
            }
            let paddle = self.state.paddle_mut(control.side());
            if control.is_up() {
                paddle.move_up(dt);
            } else {
                paddle.move_down(dt);
            }
        }
    }

    fn score(&mut self, event: ScoreEvent) {
        log::info!("{} player scores", event.scorer());
        (self.score_sink)(event);
    }

    /// Apply a discrete input event; it takes effect from the next tick
    pub fn apply_input(&mut self, event: InputEvent) {
        self.held.apply(event);
    }

    /// The held-controls set, for event-driven hosts and polled hosts alike
    pub fn controls_mut(&mut self) -> &mut HeldControls {
        &mut self.held
    }

    pub fn ball(&self) -> &Ball {
        &self.state.ball
    }

    pub fn paddle(&self, side: PlayerSide) -> &Paddle {
        self.state.paddle(side)
    }

    /// Everything the host should draw, in draw order: ball, left paddle,
    /// right paddle
    pub fn renderables(&self) -> [&dyn Renderable; 3] {
        [
            &self.state.ball,
            &self.state.left_paddle,
            &self.state.right_paddle,
        ]
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }
}

impl std::fmt::Debug for MatchSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchSimulator")
            .field("state", &self.state)
            .field("held", &self.held)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn sim_with_events(seed: u64) -> (MatchSimulator, Rc<RefCell<Vec<ScoreEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink_events = Rc::clone(&events);
        let sim = MatchSimulator::new(seed, move |ev| sink_events.borrow_mut().push(ev));
        (sim, events)
    }

    #[test]
    fn test_ball_advances_by_velocity_times_dt() {
        let (mut sim, _) = sim_with_events(1);
        sim.state_mut().ball.pos = Vec2::new(0.5, 0.5);
        sim.state_mut().ball.vel = Vec2::new(0.1, -0.05);
        sim.tick(0.5);
        assert!((sim.ball().pos.x - 0.55).abs() < 1e-6);
        assert!((sim.ball().pos.y - 0.475).abs() < 1e-6);
    }

    #[test]
    fn test_top_boundary_bounce_flips_velocity_without_clamping() {
        let (mut sim, events) = sim_with_events(1);
        sim.state_mut().ball.pos = Vec2::new(0.5, 0.5);
        sim.state_mut().ball.vel = Vec2::new(0.0, -1.0);
        sim.tick(1.0);
        // Position overshoots to -0.5; only the velocity sign flips
        assert_eq!(sim.ball().pos, Vec2::new(0.5, -0.5));
        assert_eq!(sim.ball().vel, Vec2::new(0.0, 1.0));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_left_edge_scores_for_right_player_and_reserves() {
        let (mut sim, events) = sim_with_events(42);
        sim.state_mut().ball.pos = Vec2::new(-0.01, 0.5);
        sim.state_mut().ball.vel = Vec2::new(-0.1, 0.0);
        sim.tick(0.001);
        assert_eq!(&*events.borrow(), &[ScoreEvent::RightScores]);
        assert_eq!(sim.ball().pos, FIELD_CENTER);
        assert!((sim.ball().vel.length() - SERVE_SPEED).abs() < 1e-5);
    }

    #[test]
    fn test_right_edge_scores_for_left_player() {
        let (mut sim, events) = sim_with_events(42);
        sim.state_mut().ball.pos = Vec2::new(1.01, 0.5);
        sim.state_mut().ball.vel = Vec2::new(0.1, 0.0);
        sim.tick(0.001);
        assert_eq!(&*events.borrow(), &[ScoreEvent::LeftScores]);
        assert_eq!(sim.ball().pos, FIELD_CENTER);
    }

    #[test]
    fn test_left_paddle_save_flips_horizontal_velocity_only() {
        let (mut sim, events) = sim_with_events(7);
        sim.state_mut().ball.pos = Vec2::new(0.025, 0.52);
        sim.state_mut().ball.vel = Vec2::new(-1.0, 0.25);
        sim.state_mut().left_paddle.pos.y = 0.5;
        sim.tick(0.001);
        assert_eq!(sim.ball().vel.x, 1.0);
        assert_eq!(sim.ball().vel.y, 0.25);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_left_paddle_out_of_reach_misses() {
        let (mut sim, _) = sim_with_events(7);
        sim.state_mut().ball.pos = Vec2::new(0.025, 0.7);
        sim.state_mut().ball.vel = Vec2::new(-1.0, 0.0);
        sim.state_mut().left_paddle.pos.y = 0.5;
        sim.tick(0.001);
        assert_eq!(sim.ball().vel.x, -1.0);
    }

    #[test]
    fn test_right_paddle_save() {
        let (mut sim, _) = sim_with_events(7);
        sim.state_mut().ball.pos = Vec2::new(0.975, 0.48);
        sim.state_mut().ball.vel = Vec2::new(1.0, 0.0);
        sim.state_mut().right_paddle.pos.y = 0.5;
        sim.tick(0.001);
        assert_eq!(sim.ball().vel.x, -1.0);
    }

    #[test]
    fn test_held_up_clamps_at_band_top() {
        let (mut sim, _) = sim_with_events(3);
        sim.controls_mut().press(PaddleControl::LeftUp);
        sim.tick(1.0);
        // min(0.85, 0.5 + 0.4) = 0.85
        assert_eq!(sim.paddle(PlayerSide::Left).pos.y, PADDLE_MAX_Y);
        assert_eq!(sim.paddle(PlayerSide::Right).pos.y, PADDLE_START_Y);
    }

    #[test]
    fn test_paddles_move_independently() {
        let (mut sim, _) = sim_with_events(3);
        sim.apply_input(InputEvent::Pressed(PaddleControl::LeftDown));
        sim.apply_input(InputEvent::Pressed(PaddleControl::RightUp));
        sim.tick(0.1);
        let left = sim.paddle(PlayerSide::Left).pos.y;
        let right = sim.paddle(PlayerSide::Right).pos.y;
        assert!((left - 0.46).abs() < 1e-6);
        assert!((right - 0.54).abs() < 1e-6);
    }

    #[test]
    fn test_zero_dt_is_a_no_op() {
        let (mut sim, events) = sim_with_events(11);
        sim.controls_mut().press(PaddleControl::RightDown);
        let before = sim.state().clone();
        for _ in 0..10 {
            sim.tick(0.0);
        }
        assert_eq!(sim.state().ball, before.ball);
        assert_eq!(sim.state().left_paddle, before.left_paddle);
        assert_eq!(sim.state().right_paddle, before.right_paddle);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_hostile_dt_behaves_as_zero() {
        let (mut sim, _) = sim_with_events(11);
        let before = sim.state().ball;
        sim.tick(f32::NAN);
        sim.tick(f32::INFINITY);
        sim.tick(-1.0);
        assert_eq!(sim.ball().pos, before.pos);
        assert_eq!(sim.ball().vel, before.vel);
    }

    #[test]
    fn test_determinism_across_scoring_resets() {
        let (mut a, ev_a) = sim_with_events(99999);
        let (mut b, ev_b) = sim_with_events(99999);
        for sim in [&mut a, &mut b] {
            sim.controls_mut().press(PaddleControl::LeftUp);
            for _ in 0..2000 {
                sim.tick(SIM_DT);
            }
        }
        assert_eq!(a.ball().pos, b.ball().pos);
        assert_eq!(a.ball().vel, b.ball().vel);
        assert_eq!(&*ev_a.borrow(), &*ev_b.borrow());
    }

    #[test]
    fn test_renderables_draw_order() {
        let (sim, _) = sim_with_events(5);
        let objects = sim.renderables();
        assert_eq!(objects[0].size(), Vec2::splat(BALL_SIZE));
        assert_eq!(objects[1].position().x, LEFT_PADDLE_X);
        assert_eq!(objects[2].position().x, RIGHT_PADDLE_X);
    }

    proptest! {
        #[test]
        fn prop_paddles_stay_in_band(
            seed in any::<u64>(),
            steps in proptest::collection::vec((0u8..16, 0.0f32..0.2), 1..200),
        ) {
            let (mut sim, _) = sim_with_events(seed);
            for (mask, dt) in steps {
                sim.controls_mut().sync(|c| {
                    let bit = PaddleControl::ALL.iter().position(|&x| x == c).unwrap();
                    mask & (1 << bit) != 0
                });
                sim.tick(dt);
                for side in [PlayerSide::Left, PlayerSide::Right] {
                    let y = sim.paddle(side).pos.y;
                    prop_assert!((PADDLE_MIN_Y..=PADDLE_MAX_Y).contains(&y));
                }
            }
        }

        #[test]
        fn prop_serve_speed_is_one_third_for_every_seed(seed in any::<u64>()) {
            let (mut sim, _) = sim_with_events(seed);
            for _ in 0..5 {
                sim.reset();
                prop_assert!((sim.ball().vel.length() - SERVE_SPEED).abs() < 1e-5);
                prop_assert_eq!(sim.ball().pos, FIELD_CENTER);
            }
        }

        #[test]
        fn prop_state_stays_finite_under_hostile_dt(
            seed in any::<u64>(),
            dts in proptest::collection::vec(
                prop_oneof![
                    0.0f32..1.0,
                    Just(f32::NAN),
                    Just(f32::NEG_INFINITY),
                    -10.0f32..0.0,
                ],
                1..100,
            ),
        ) {
            let (mut sim, _) = sim_with_events(seed);
            for dt in dts {
                sim.tick(dt);
                prop_assert!(sim.ball().pos.is_finite());
                prop_assert!(sim.ball().vel.is_finite());
            }
        }
    }
}
