#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure text-entry system collecting a short name typed on the keyboard.

/// Keyboard input relevant to text entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEvent {
    /// A key producing the character was pressed.
    Typed(char),
    /// The backspace key was pressed.
    Backspace,
}

/// Bounded single-line text buffer.
///
/// Only spaces, ASCII digits and ASCII letters are accepted. Characters typed
/// while the buffer is full are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEntry {
    text: String,
    capacity: usize,
}

impl Default for TextEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEntry {
    /// Characters held by a buffer created with [`TextEntry::new`].
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Creates an empty buffer of [`TextEntry::DEFAULT_CAPACITY`] characters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer holding at most `capacity` characters.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Text entered so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Maximum number of characters.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reports whether the buffer is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.text.len() >= self.capacity
    }

    /// Applies the events and reports whether the text changed.
    pub fn handle(&mut self, events: &[TextEvent]) -> bool {
        let before = self.text.clone();
        for event in events {
            match *event {
                TextEvent::Typed(character) if accepts(character) && !self.is_full() => {
                    self.text.push(character);
                }
                TextEvent::Typed(_) => {}
                TextEvent::Backspace => {
                    let _ = self.text.pop();
                }
            }
        }
        self.text != before
    }
}

fn accepts(character: char) -> bool {
    character == ' ' || character.is_ascii_alphanumeric()
}
