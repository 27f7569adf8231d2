#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system translating keyboard transitions into world commands.

use std::collections::BTreeSet;

use tile_scroller_core::{Background, Command, PixelSize};

/// Keys the scroller reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Moves the actor up while held.
    Up,
    /// Moves the actor down while held.
    Down,
    /// Moves the actor left while held.
    Left,
    /// Moves the actor right while held.
    Right,
    /// Selects the white backdrop.
    Digit1,
    /// Selects the red backdrop.
    Digit2,
    /// Selects the green backdrop.
    Digit3,
    /// Selects the blue backdrop.
    Digit4,
}

impl Key {
    /// Backdrop selected by the key, if it is a digit key.
    #[must_use]
    pub const fn background(self) -> Option<Background> {
        match self {
            Self::Digit1 => Some(Background::White),
            Self::Digit2 => Some(Background::Red),
            Self::Digit3 => Some(Background::Green),
            Self::Digit4 => Some(Background::Blue),
            Self::Up | Self::Down | Self::Left | Self::Right => None,
        }
    }

    /// Unit direction of an arrow key, `(0, 0)` for anything else.
    #[must_use]
    pub const fn direction(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            _ => (0, 0),
        }
    }
}

/// Key transition reported by an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    /// The key went down. Auto-repeat presses may arrive while it is held.
    Pressed(Key),
    /// The key went up.
    Released(Key),
}

/// Set of keys currently held down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: BTreeSet<Key>,
}

impl InputState {
    /// Reports whether `key` is held.
    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Iterates the held keys in a stable order.
    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }

    fn press(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    fn release(&mut self, key: Key) -> bool {
        self.held.remove(&key)
    }
}

/// Input system that converts key transitions into velocity and backdrop commands.
///
/// Pressing an arrow key adds half the actor's extent along that axis to the
/// velocity; releasing it subtracts the same amount, so the velocity returns to
/// zero once every key is up.
#[derive(Clone, Debug)]
pub struct Controls {
    step_x: i32,
    step_y: i32,
    state: InputState,
}

impl Controls {
    /// Creates a controls system for an actor of the provided size.
    #[must_use]
    pub fn new(actor: PixelSize) -> Self {
        Self {
            step_x: actor.half_width(),
            step_y: actor.half_height(),
            state: InputState::default(),
        }
    }

    /// Keys currently held down.
    #[must_use]
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Consumes key transitions and emits the resulting commands.
    pub fn handle(&mut self, events: &[KeyEvent], out: &mut Vec<Command>) {
        for event in events {
            match *event {
                KeyEvent::Pressed(key) => {
                    if !self.state.press(key) {
                        continue;
                    }
                    if let Some(background) = key.background() {
                        out.push(Command::SetBackground { background });
                    } else {
                        self.push_delta(key, 1, out);
                    }
                }
                KeyEvent::Released(key) => {
                    if self.state.release(key) {
                        self.push_delta(key, -1, out);
                    }
                }
            }
        }
    }

    fn push_delta(&self, key: Key, sign: i32, out: &mut Vec<Command>) {
        let (x, y) = key.direction();
        if x == 0 && y == 0 {
            return;
        }
        out.push(Command::AdjustVelocity {
            dx: x * sign * self.step_x,
            dy: y * sign * self.step_y,
        });
    }
}
