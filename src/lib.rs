//! Duel Pong - a two-paddle ball game core
//!
//! Core modules:
//! - `sim`: Deterministic match simulation (ball physics, paddle input, scoring)
//! - `settings`: Key-binding configuration (JSON load/save)
//!
//! The crate is the simulation only. Rendering, windowing, and the frame timer
//! belong to the host: it calls [`sim::MatchSimulator::tick`] once per frame,
//! feeds input through [`sim::HeldControls`], and draws whatever
//! [`sim::MatchSimulator::renderables`] reports.

pub mod settings;
pub mod sim;

pub use settings::KeyBindings;
pub use sim::{
    Ball, HeldControls, InputEvent, MatchSimulator, Paddle, PaddleControl, PlayerSide, Renderable,
    ScoreEvent,
};

/// Game configuration constants
///
/// All lengths are in normalized screen space: both axes span [0, 1].
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep for hosts that step at a fixed rate (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Ball width/height
    pub const BALL_SIZE: f32 = 0.01;
    /// Paddle width
    pub const PADDLE_WIDTH: f32 = 0.01;
    /// Paddle height
    pub const PADDLE_HEIGHT: f32 = 0.1;
    /// Horizontal offset of the left paddle
    pub const LEFT_PADDLE_X: f32 = 0.02;
    /// Horizontal offset of the right paddle
    pub const RIGHT_PADDLE_X: f32 = 0.98;

    /// Ball speed after every serve (screen-units/second)
    pub const SERVE_SPEED: f32 = 1.0 / 3.0;
    /// Paddle movement speed (screen-units/second)
    pub const PADDLE_SPEED: f32 = 0.4;

    /// Paddle vertical travel band - the middle 70% of the screen, leaving
    /// dead space at both edges for strategic play
    pub const PADDLE_MIN_Y: f32 = 0.15;
    pub const PADDLE_MAX_Y: f32 = 0.85;

    /// Horizontal band inside which the left paddle can return the ball
    pub const LEFT_SAVE_X: f32 = 0.03;
    /// Horizontal band inside which the right paddle can return the ball
    pub const RIGHT_SAVE_X: f32 = 0.97;
    /// Maximum vertical distance between paddle center and ball for a save
    pub const PADDLE_REACH: f32 = 0.05;

    /// Where the ball is placed on every serve
    pub const FIELD_CENTER: Vec2 = Vec2::new(0.5, 0.5);
    /// Initial vertical position of both paddles (center of the travel band)
    pub const PADDLE_START_Y: f32 = 0.5;
}
