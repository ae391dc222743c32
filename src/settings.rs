//! Key-binding configuration
//!
//! The simulator only knows the four logical controls; which physical keys
//! drive them is configuration, persisted as JSON next to wherever the host
//! keeps its files.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::PaddleControl;

/// Maps physical keys to the four logical paddle controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left_up: char,
    pub left_down: char,
    pub right_up: char,
    pub right_down: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        // q/a for the left player, p/l for the right
        Self {
            left_up: 'q',
            left_down: 'a',
            right_up: 'p',
            right_down: 'l',
        }
    }
}

impl KeyBindings {
    /// Resolve a key event to a logical control, if the key is bound
    pub fn control_for(&self, key: char) -> Option<PaddleControl> {
        if key == self.left_up {
            Some(PaddleControl::LeftUp)
        } else if key == self.left_down {
            Some(PaddleControl::LeftDown)
        } else if key == self.right_up {
            Some(PaddleControl::RightUp)
        } else if key == self.right_down {
            Some(PaddleControl::RightDown)
        } else {
            None
        }
    }

    /// The key bound to a control
    pub fn key_for(&self, control: PaddleControl) -> char {
        match control {
            PaddleControl::LeftUp => self.left_up,
            PaddleControl::LeftDown => self.left_down,
            PaddleControl::RightUp => self.right_up,
            PaddleControl::RightDown => self.right_down,
        }
    }

    /// Load bindings from a JSON file, falling back to defaults when the file
    /// is missing or malformed
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(bindings) => {
                    log::info!("Loaded key bindings from {}", path.display());
                    bindings
                }
                Err(err) => {
                    log::warn!(
                        "Ignoring malformed key bindings in {}: {err}",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save bindings as pretty JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::from)?;
        fs::write(path, json)
    }
}
