//! Logical paddle controls and the held-controls set
//!
//! The four controls are decoupled from physical key identity; mapping
//! concrete keys to controls is the job of [`crate::settings::KeyBindings`].
//! Event-driven hosts feed [`HeldControls::press`]/[`HeldControls::release`]
//! (or queue [`InputEvent`]s), polled hosts rebuild the set once per frame
//! with [`HeldControls::sync`]. Either way the tick consumes one snapshot,
//! so input cannot change mid-update.

use super::state::PlayerSide;

/// The four logical paddle controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleControl {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl PaddleControl {
    pub const ALL: [PaddleControl; 4] = [
        PaddleControl::LeftUp,
        PaddleControl::LeftDown,
        PaddleControl::RightUp,
        PaddleControl::RightDown,
    ];

    /// Which paddle this control moves
    pub fn side(&self) -> PlayerSide {
        match self {
            PaddleControl::LeftUp | PaddleControl::LeftDown => PlayerSide::Left,
            PaddleControl::RightUp | PaddleControl::RightDown => PlayerSide::Right,
        }
    }

    /// True for the controls that move toward the 0.85 boundary
    pub fn is_up(&self) -> bool {
        matches!(self, PaddleControl::LeftUp | PaddleControl::RightUp)
    }
}

/// A discrete input event, for hosts that queue keyboard events to the tick
/// boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(PaddleControl),
    Released(PaddleControl),
}

/// The set of controls currently considered held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldControls {
    held: [bool; 4],
}

impl HeldControls {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(control: PaddleControl) -> usize {
        match control {
            PaddleControl::LeftUp => 0,
            PaddleControl::LeftDown => 1,
            PaddleControl::RightUp => 2,
            PaddleControl::RightDown => 3,
        }
    }

    pub fn is_held(&self, control: PaddleControl) -> bool {
        self.held[Self::index(control)]
    }

    pub fn press(&mut self, control: PaddleControl) {
        self.held[Self::index(control)] = true;
    }

    /// Releasing a control that is not held is a no-op
    pub fn release(&mut self, control: PaddleControl) {
        self.held[Self::index(control)] = false;
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(control) => self.press(control),
            InputEvent::Released(control) => self.release(control),
        }
    }

    /// Rebuild the whole set from a poll callback, for hosts that expose
    /// "is this key down right now" instead of events
    pub fn sync(&mut self, mut is_down: impl FnMut(PaddleControl) -> bool) {
        for control in PaddleControl::ALL {
            self.held[Self::index(control)] = is_down(control);
        }
    }

    pub fn clear(&mut self) {
        self.held = [false; 4];
    }
}
