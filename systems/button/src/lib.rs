#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure pointer system tracking how the cursor interacts with a screen button.

use tile_scroller_core::{PixelPoint, PixelRect};

/// Pointer buttons reported by adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button; the only one buttons react to.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

/// Pointer activity in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    /// The cursor moved to a new position.
    Moved(PixelPoint),
    /// A pointer button went down at the position.
    Pressed(PointerButton, PixelPoint),
    /// A pointer button went up at the position.
    Released(PointerButton, PixelPoint),
}

/// Visual state of a button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// The cursor is elsewhere.
    #[default]
    Out,
    /// The cursor hovers over the button.
    Over,
    /// The primary button was pressed over the button.
    Down,
    /// The primary button was released over the button.
    Up,
}

/// Reports a state change of a [`Button`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonChanged {
    /// State before the event.
    pub from: ButtonState,
    /// State after the event.
    pub to: ButtonState,
}

/// Rectangular screen button driven by pointer events.
#[derive(Clone, Debug)]
pub struct Button {
    bounds: PixelRect,
    state: ButtonState,
}

impl Button {
    /// Creates a button covering `bounds`, starting in [`ButtonState::Out`].
    #[must_use]
    pub const fn new(bounds: PixelRect) -> Self {
        Self {
            bounds,
            state: ButtonState::Out,
        }
    }

    /// Rectangle the button occupies on screen.
    #[must_use]
    pub const fn bounds(&self) -> PixelRect {
        self.bounds
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// Reports whether `point` lies strictly inside the button; edges do not count.
    #[must_use]
    pub fn contains(&self, point: PixelPoint) -> bool {
        let (x, y) = (i64::from(point.x()), i64::from(point.y()));
        x > self.bounds.left()
            && x < self.bounds.right()
            && y > self.bounds.top()
            && y < self.bounds.bottom()
    }

    /// Consumes pointer events, pushing one [`ButtonChanged`] per state change.
    ///
    /// Motion selects `Over` or `Out`. Primary presses and releases inside the
    /// button select `Down` and `Up`; outside the button they are ignored, as
    /// are the other pointer buttons.
    pub fn handle(&mut self, events: &[PointerEvent], out: &mut Vec<ButtonChanged>) {
        for event in events {
            let next = match *event {
                PointerEvent::Moved(point) => {
                    if self.contains(point) {
                        ButtonState::Over
                    } else {
                        ButtonState::Out
                    }
                }
                PointerEvent::Pressed(PointerButton::Left, point) if self.contains(point) => {
                    ButtonState::Down
                }
                PointerEvent::Released(PointerButton::Left, point) if self.contains(point) => {
                    ButtonState::Up
                }
                PointerEvent::Pressed(..) | PointerEvent::Released(..) => continue,
            };

            if next != self.state {
                out.push(ButtonChanged {
                    from: self.state,
                    to: next,
                });
                self.state = next;
            }
        }
    }
}
