//! Deterministic match simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-driven only, no internal clocks
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod input;
pub mod state;
pub mod tick;

pub use input::{HeldControls, InputEvent, PaddleControl};
pub use state::{Ball, MatchState, Paddle, PlayerSide, Renderable, ScoreEvent};
pub use tick::MatchSimulator;
