//! Match state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// The two competitors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSide {
    Left,
    Right,
}

impl std::fmt::Display for PlayerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerSide::Left => write!(f, "left"),
            PlayerSide::Right => write!(f, "right"),
        }
    }
}

/// A scoring event, reported through the sink injected at construction.
///
/// The simulator reports events only; running score tallies belong to the
/// host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    LeftScores,
    RightScores,
}

impl ScoreEvent {
    /// The side the point goes to
    pub fn scorer(&self) -> PlayerSide {
        match self {
            ScoreEvent::LeftScores => PlayerSide::Left,
            ScoreEvent::RightScores => PlayerSide::Right,
        }
    }
}

/// Anything the host's draw pass can render: a position and a fixed size,
/// both in normalized screen space.
pub trait Renderable {
    fn position(&self) -> Vec2;
    fn size(&self) -> Vec2;
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    size: Vec2,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            pos: FIELD_CENTER,
            vel: Vec2::ZERO,
            size: Vec2::splat(BALL_SIZE),
        }
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderable for Ball {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }
}

/// One player's paddle. Only the vertical component of the position ever
/// changes after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub pos: Vec2,
    size: Vec2,
}

impl Paddle {
    pub fn new(side: PlayerSide) -> Self {
        let x = match side {
            PlayerSide::Left => LEFT_PADDLE_X,
            PlayerSide::Right => RIGHT_PADDLE_X,
        };
        Self {
            pos: Vec2::new(x, PADDLE_START_Y),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }

    /// Move toward the 0.85 boundary, clamping rather than overshooting
    pub fn move_up(&mut self, dt: f32) {
        self.pos.y = (self.pos.y + PADDLE_SPEED * dt).min(PADDLE_MAX_Y);
    }

    /// Move toward the 0.15 boundary, clamping rather than overshooting
    pub fn move_down(&mut self, dt: f32) {
        self.pos.y = (self.pos.y - PADDLE_SPEED * dt).max(PADDLE_MIN_Y);
    }
}

impl Renderable for Paddle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }
}

/// Complete match state (deterministic)
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Match seed for reproducibility
    pub seed: u64,
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    rng: Pcg32,
}

impl MatchState {
    /// Create a new match with the given seed and serve the first ball
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            ball: Ball::new(),
            left_paddle: Paddle::new(PlayerSide::Left),
            right_paddle: Paddle::new(PlayerSide::Right),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.serve();
        state
    }

    pub fn paddle(&self, side: PlayerSide) -> &Paddle {
        match side {
            PlayerSide::Left => &self.left_paddle,
            PlayerSide::Right => &self.right_paddle,
        }
    }

    pub fn paddle_mut(&mut self, side: PlayerSide) -> &mut Paddle {
        match side {
            PlayerSide::Left => &mut self.left_paddle,
            PlayerSide::Right => &mut self.right_paddle,
        }
    }

    /// Replace the ball at the center of the screen with a new, random
    /// velocity. Paddles are untouched.
    ///
    /// The serve direction comes from two uniform draws in [-1, 1) with the
    /// vertical component halved BEFORE normalization; halving first biases
    /// serves toward the horizontal. The final speed is always `SERVE_SPEED`.
    pub fn serve(&mut self) {
        self.ball.pos = FIELD_CENTER;
        // A (0, 0) draw cannot be normalized; redraw (measure-zero case).
        let dir = loop {
            let mut v = Vec2::new(
                self.rng.random::<f32>() * 2.0 - 1.0,
                self.rng.random::<f32>() * 2.0 - 1.0,
            );
            v.y /= 2.0;
            if v != Vec2::ZERO {
                break v.normalize();
            }
        };
        self.ball.vel = dir * SERVE_SPEED;
    }
}
