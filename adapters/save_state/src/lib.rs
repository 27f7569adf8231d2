#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Plain-text save slot recording where the actor stood and which level was active.
//!
//! The format is two lines: the actor's top-left corner as `"{x} {y}"`
//! followed by the level name, e.g. `"100 50\nRed Level"`.

mod atomic;

use std::{
    fs, io,
    num::ParseIntError,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tile_scroller_core::{Background, Command, LevelConfig, PixelPoint};
use tracing::{debug, info, warn};

/// Persisted actor position and backdrop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaveState {
    /// Top-left corner of the actor in level space.
    pub position: PixelPoint,
    /// Backdrop that was active when the state was captured.
    pub background: Background,
}

impl SaveState {
    /// Creates a save state from its parts.
    #[must_use]
    pub const fn new(position: PixelPoint, background: Background) -> Self {
        Self {
            position,
            background,
        }
    }

    /// Save state used when no slot exists: the configured start on a white backdrop.
    #[must_use]
    pub const fn initial(config: &LevelConfig) -> Self {
        Self::new(config.actor_start, Background::White)
    }

    /// Renders the save state in its on-disk text form.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{} {}\n{}",
            self.position.x(),
            self.position.y(),
            self.background.level_name()
        )
    }

    /// Parses the text form and checks the actor fits inside the level.
    pub fn decode(text: &str, config: &LevelConfig) -> Result<Self, SaveStateError> {
        let (coordinates, rest) = text.split_once('\n').ok_or(SaveStateError::Truncated)?;

        let mut fields = coordinates.split_whitespace();
        let x = parse_coordinate(fields.next(), "x")?;
        let y = parse_coordinate(fields.next(), "y")?;
        if let Some(extra) = fields.next() {
            return Err(SaveStateError::UnexpectedField(extra.to_owned()));
        }

        let name = rest.lines().next().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(SaveStateError::Truncated);
        }
        let background = Background::from_level_name(name)
            .ok_or_else(|| SaveStateError::UnknownLevel(name.to_owned()))?;

        let position = PixelPoint::new(x, y);
        if !config
            .level_bounds()
            .contains_rect(&config.actor_box_at(position))
        {
            return Err(SaveStateError::OutOfBounds { x, y });
        }

        Ok(Self::new(position, background))
    }

    /// Reads and validates the save file at `path`.
    pub fn load(path: impl AsRef<Path>, config: &LevelConfig) -> Result<Self, SaveStateError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SaveStateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let state = Self::decode(&text, config)?;
        info!(
            path = %path.display(),
            x = state.position.x(),
            y = state.position.y(),
            level = state.background.level_name(),
            "save_state_loaded"
        );
        Ok(state)
    }

    /// Loads the save file, falling back to [`SaveState::initial`] when it is
    /// missing or unusable.
    ///
    /// A missing file is the normal first-run case and is only traced at debug
    /// level; any other failure is logged as a warning.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>, config: &LevelConfig) -> Self {
        let path = path.as_ref();
        match Self::load(path, config) {
            Ok(state) => state,
            Err(SaveStateError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "save_state_missing");
                Self::initial(config)
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "save_state_fallback");
                Self::initial(config)
            }
        }
    }

    /// Writes the save state to `path`, replacing any previous slot atomically.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<(), SaveStateError> {
        let path = path.as_ref();
        atomic::write_text(path, &self.encode()).map_err(|source| SaveStateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "save_state_stored");
        Ok(())
    }

    /// Commands that move a world into this state.
    #[must_use]
    pub const fn restore_commands(&self) -> [Command; 2] {
        [
            Command::PlaceActor {
                position: self.position,
            },
            Command::SetBackground {
                background: self.background,
            },
        ]
    }
}

fn parse_coordinate(field: Option<&str>, axis: &'static str) -> Result<i32, SaveStateError> {
    let field = field.ok_or(SaveStateError::Truncated)?;
    field
        .parse()
        .map_err(|source| SaveStateError::InvalidCoordinate {
            axis,
            value: field.to_owned(),
            source,
        })
}

/// Errors produced while reading or writing a save slot.
#[derive(Debug, Error)]
pub enum SaveStateError {
    /// The text ended before both coordinates and the level name were read.
    #[error("save state is incomplete")]
    Truncated,
    /// A coordinate was not an integer.
    #[error("{axis} coordinate `{value}` is not an integer")]
    InvalidCoordinate {
        /// Axis name, `x` or `y`.
        axis: &'static str,
        /// Offending token.
        value: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The coordinate line held more than two fields.
    #[error("unexpected field `{0}` after coordinates")]
    UnexpectedField(String),
    /// The actor would not fit inside the level at the saved position.
    #[error("saved position ({x}, {y}) lies outside the level")]
    OutOfBounds {
        /// Saved x coordinate.
        x: i32,
        /// Saved y coordinate.
        y: i32,
    },
    /// The level name does not match any backdrop.
    #[error("unknown level `{0}`")]
    UnknownLevel(String),
    /// The save file could not be read or written.
    #[error("save file {} is not accessible", .path.display())]
    Io {
        /// Path of the save file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
