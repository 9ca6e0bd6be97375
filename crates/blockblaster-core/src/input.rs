//! Player input surface.
//!
//! The engine consumes one `ControlSet` per tick: the set of controls the
//! host currently observes as held. The core manages no key-event
//! subscriptions of its own.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// An abstract control the player can hold down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Bomb,
    Roll,
}

/// Snapshot of currently-held controls for one tick.
#[derive(Debug, Clone, Default)]
pub struct ControlSet {
    held: HashSet<Control>,
}

impl ControlSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, control: Control) {
        self.held.insert(control);
    }

    pub fn release(&mut self, control: Control) {
        self.held.remove(&control);
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    /// Horizontal movement intent: -1 left, +1 right, 0 neither or both.
    pub fn horizontal(&self) -> i32 {
        let mut dx = 0;
        if self.is_held(Control::Left) {
            dx -= 1;
        }
        if self.is_held(Control::Right) {
            dx += 1;
        }
        dx
    }

    /// Vertical movement intent: -1 up, +1 down, 0 neither or both.
    pub fn vertical(&self) -> i32 {
        let mut dy = 0;
        if self.is_held(Control::Up) {
            dy -= 1;
        }
        if self.is_held(Control::Down) {
            dy += 1;
        }
        dy
    }
}

impl FromIterator<Control> for ControlSet {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}
