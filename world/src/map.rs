//! Tile grid storage and the whitespace-delimited map loader.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tile_scroller_core::{
    rects_overlap, ConfigError, LevelConfig, PixelPoint, PixelRect, PixelSize, SolidRange,
    TileKind,
};
use tracing::info;

/// Single immutable cell of the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    bounds: PixelRect,
    kind: TileKind,
}

impl Tile {
    /// Creates a tile anchored at `position`.
    #[must_use]
    pub const fn new(position: PixelPoint, size: PixelSize, kind: TileKind) -> Self {
        Self {
            bounds: PixelRect::from_origin_and_size(position, size),
            kind,
        }
    }

    /// Top-left corner of the tile in level space.
    #[must_use]
    pub const fn position(&self) -> PixelPoint {
        self.bounds.origin()
    }

    /// Rectangle covered by the tile.
    #[must_use]
    pub const fn bounds(&self) -> PixelRect {
        self.bounds
    }

    /// Sprite variant assigned to the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }
}

/// Fixed-length, row-major collection of tiles covering a level.
///
/// A grid only exists in a fully populated state: the loader either yields one
/// tile for every cell of the level or fails without producing anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    columns: u32,
    rows: u32,
    tile_size: PixelSize,
    solid_kinds: SolidRange,
    bounds: PixelRect,
}

impl TileGrid {
    /// Parses a map source containing one kind index per tile.
    ///
    /// Exactly [`LevelConfig::tile_count`] whitespace-separated integers are
    /// read; anything that follows them is ignored. Tiles are laid out left to
    /// right, wrapping to the next row once the running x offset reaches the
    /// level width.
    pub fn parse(source: &str, config: &LevelConfig) -> Result<Self, MapError> {
        config.validate()?;

        let expected = config.tile_count();
        let tile_width = i32::try_from(config.tile.width()).unwrap_or(i32::MAX);
        let tile_height = i32::try_from(config.tile.height()).unwrap_or(i32::MAX);
        let level_width = i64::from(config.level.width());

        let mut tokens = source.split_whitespace();
        let mut tiles = Vec::with_capacity(expected);
        let mut position = PixelPoint::ORIGIN;

        for index in 0..expected {
            let token = tokens.next().ok_or(MapError::Malformed {
                index,
                reason: MalformedReason::Truncated { expected },
            })?;
            let value: i64 = token.parse().map_err(|_| MapError::Malformed {
                index,
                reason: MalformedReason::NotAnInteger {
                    token: token.to_owned(),
                },
            })?;
            let kind = u8::try_from(value)
                .ok()
                .filter(|raw| *raw < config.sprite_variants)
                .map(TileKind::new)
                .ok_or(MapError::InvalidTileType {
                    index,
                    value,
                    variants: config.sprite_variants,
                })?;

            tiles.push(Tile::new(position, config.tile, kind));

            position = position.offset(tile_width, 0);
            if i64::from(position.x()) >= level_width {
                position = PixelPoint::new(0, position.y().saturating_add(tile_height));
            }
        }

        Ok(Self {
            tiles,
            columns: config.columns(),
            rows: config.rows(),
            tile_size: config.tile,
            solid_kinds: config.solid_kinds,
            bounds: config.level_bounds(),
        })
    }

    /// Reads and parses the map file at `path`.
    pub fn load(path: impl AsRef<Path>, config: &LevelConfig) -> Result<Self, MapError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let grid = Self::parse(&source, config)?;
        info!(
            path = %path.display(),
            tiles = grid.len(),
            columns = grid.columns,
            rows = grid.rows,
            "map_loaded"
        );
        Ok(grid)
    }

    /// Returns the tile stored at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is not below [`TileGrid::len`].
    #[must_use]
    pub fn tile_at(&self, index: usize) -> &Tile {
        &self.tiles[index]
    }

    /// Returns the tile stored at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Reports whether the tile blocks movement.
    #[must_use]
    pub fn is_solid(&self, tile: &Tile) -> bool {
        self.solid_kinds.contains(tile.kind())
    }

    /// Lazily yields the tiles whose bounds overlap the viewport.
    ///
    /// The iterator is cheap to clone, so callers may walk the same query more
    /// than once without recomputing the viewport.
    pub fn visible_tiles(
        &self,
        viewport: PixelRect,
    ) -> impl Iterator<Item = &Tile> + Clone + '_ {
        self.tiles
            .iter()
            .filter(move |tile| rects_overlap(viewport, tile.bounds()))
    }

    /// Iterates every tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> + Clone + '_ {
        self.tiles.iter()
    }

    /// All tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Reports whether the grid holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Extent of every tile.
    #[must_use]
    pub const fn tile_size(&self) -> PixelSize {
        self.tile_size
    }

    /// Kinds treated as solid by [`TileGrid::is_solid`].
    #[must_use]
    pub const fn solid_kinds(&self) -> SolidRange {
        self.solid_kinds
    }

    /// Rectangle covering the whole level.
    #[must_use]
    pub const fn bounds(&self) -> PixelRect {
        self.bounds
    }
}

/// Errors that can occur while loading a map.
#[derive(Debug, Error)]
pub enum MapError {
    /// The source ended early or contained a token that is not an integer.
    #[error("malformed map at tile {index}: {reason}")]
    Malformed {
        /// Zero-based tile index being read when the failure occurred.
        index: usize,
        /// What went wrong with the token.
        reason: MalformedReason,
    },
    /// A value fell outside the sheet's kind range.
    #[error("tile {index} has type {value}, expected 0..{variants}")]
    InvalidTileType {
        /// Zero-based tile index holding the value.
        index: usize,
        /// Value read from the source.
        value: i64,
        /// Number of kinds in the sheet.
        variants: u8,
    },
    /// The level configuration cannot describe a grid.
    #[error("invalid level configuration: {0}")]
    Config(#[from] ConfigError),
    /// The map file could not be read.
    #[error("could not read map file {}", .path.display())]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Details attached to [`MapError::Malformed`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// The source held fewer values than the level requires.
    #[error("source ended before all {expected} tiles were read")]
    Truncated {
        /// Number of values the level requires.
        expected: usize,
    },
    /// A token could not be parsed as an integer.
    #[error("`{token}` is not an integer")]
    NotAnInteger {
        /// Offending token.
        token: String,
    },
}
