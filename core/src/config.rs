//! Level layout configuration shared by the loader, world, and adapters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PixelPoint, PixelRect, PixelSize, TileKind};

const REFERENCE_LEVEL: PixelSize = PixelSize::new(1280, 960);
const REFERENCE_TILE: PixelSize = PixelSize::new(80, 80);
const REFERENCE_VIEWPORT: PixelSize = PixelSize::new(640, 480);
const REFERENCE_ACTOR: PixelSize = PixelSize::new(20, 20);
const REFERENCE_ACTOR_START: PixelPoint = PixelPoint::new(100, 100);

/// Contiguous, inclusive block of tile kinds that block movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolidRange {
    first: TileKind,
    last: TileKind,
}

impl SolidRange {
    /// Creates a range covering `first..=last`.
    #[must_use]
    pub const fn new(first: TileKind, last: TileKind) -> Self {
        Self { first, last }
    }

    /// Lowest solid kind.
    #[must_use]
    pub const fn first(&self) -> TileKind {
        self.first
    }

    /// Highest solid kind.
    #[must_use]
    pub const fn last(&self) -> TileKind {
        self.last
    }

    /// Reports whether the kind falls within the range.
    #[must_use]
    pub fn contains(&self, kind: TileKind) -> bool {
        (self.first..=self.last).contains(&kind)
    }
}

/// Describes the pixel layout of a level and the entities that inhabit it.
///
/// Every field has a default matching the reference level: a 1280x960 level
/// split into 80x80 tiles drawn from a 12-kind sheet whose kinds 3 through 11
/// are walls, viewed through a 640x480 window by a 20x20 actor that starts
/// at (100, 100), on the floor just inside the border wall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    /// Total level extent in pixels.
    pub level: PixelSize,
    /// Extent of a single tile in pixels.
    pub tile: PixelSize,
    /// Number of kinds in the tile sheet; map values must lie below it.
    pub sprite_variants: u8,
    /// Kinds that block the actor.
    pub solid_kinds: SolidRange,
    /// Extent of the camera viewport in pixels.
    pub viewport: PixelSize,
    /// Extent of the actor's bounding box in pixels.
    pub actor: PixelSize,
    /// Position the actor occupies when no save state is restored.
    pub actor_start: PixelPoint,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            level: REFERENCE_LEVEL,
            tile: REFERENCE_TILE,
            sprite_variants: TileKind::REFERENCE_VARIANTS,
            solid_kinds: SolidRange::new(TileKind::CENTER, TileKind::TOP_LEFT),
            viewport: REFERENCE_VIEWPORT,
            actor: REFERENCE_ACTOR,
            actor_start: REFERENCE_ACTOR_START,
        }
    }
}

impl LevelConfig {
    /// Largest number of tiles a level may hold.
    pub const MAX_TILE_COUNT: u64 = 1 << 20;

    /// Checks that the configuration describes a level the loader can fill.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, size) in [
            ("level", self.level),
            ("tile", self.tile),
            ("viewport", self.viewport),
            ("actor", self.actor),
        ] {
            if size.is_empty() {
                return Err(ConfigError::EmptySize { field });
            }
        }

        let max_extent = u32::try_from(i32::MAX).unwrap_or(u32::MAX);
        if self.level.width() > max_extent || self.level.height() > max_extent {
            return Err(ConfigError::LevelTooLarge { level: self.level });
        }

        if self.level.width() % self.tile.width() != 0
            || self.level.height() % self.tile.height() != 0
        {
            return Err(ConfigError::UnalignedLevel {
                level: self.level,
                tile: self.tile,
            });
        }

        let tiles = u64::from(self.columns()) * u64::from(self.rows());
        if tiles > Self::MAX_TILE_COUNT {
            return Err(ConfigError::TooManyTiles {
                tiles,
                max: Self::MAX_TILE_COUNT,
            });
        }

        if self.sprite_variants == 0 {
            return Err(ConfigError::NoSpriteVariants);
        }

        let solid = self.solid_kinds;
        if solid.first() > solid.last() || solid.last().get() >= self.sprite_variants {
            return Err(ConfigError::InvalidSolidRange {
                first: solid.first().get(),
                last: solid.last().get(),
                variants: self.sprite_variants,
            });
        }

        Ok(())
    }

    /// Number of tile columns spanning the level width.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.level.width().checked_div(self.tile.width()).unwrap_or(0)
    }

    /// Number of tile rows spanning the level height.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.level.height().checked_div(self.tile.height()).unwrap_or(0)
    }

    /// Number of values a map source must provide.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        let columns = usize::try_from(self.columns()).unwrap_or(0);
        let rows = usize::try_from(self.rows()).unwrap_or(0);
        columns.saturating_mul(rows)
    }

    /// Rectangle covering the whole level.
    #[must_use]
    pub const fn level_bounds(&self) -> PixelRect {
        PixelRect::from_origin_and_size(PixelPoint::ORIGIN, self.level)
    }

    /// Bounding box the actor occupies when anchored at `position`.
    #[must_use]
    pub const fn actor_box_at(&self, position: PixelPoint) -> PixelRect {
        PixelRect::from_origin_and_size(position, self.actor)
    }
}

/// Reasons a [`LevelConfig`] may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A size field had a zero dimension.
    #[error("`{field}` must have a non-zero width and height")]
    EmptySize {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The level cannot be divided evenly into tiles.
    #[error("level {level:?} is not a whole multiple of tile {tile:?}")]
    UnalignedLevel {
        /// Configured level size.
        level: PixelSize,
        /// Configured tile size.
        tile: PixelSize,
    },
    /// The level extends past the signed pixel coordinate range.
    #[error("level {level:?} exceeds the addressable pixel range")]
    LevelTooLarge {
        /// Configured level size.
        level: PixelSize,
    },
    /// The level holds more tiles than a grid may store.
    #[error("level holds {tiles} tiles, at most {max} are supported")]
    TooManyTiles {
        /// Tiles the configuration describes.
        tiles: u64,
        /// Upper bound on the tile count.
        max: u64,
    },
    /// The tile sheet declared no kinds.
    #[error("sprite_variants must be positive")]
    NoSpriteVariants,
    /// The solid range was empty or referenced kinds outside the sheet.
    #[error("solid kinds {first}..={last} do not fit within {variants} sprite variants")]
    InvalidSolidRange {
        /// Lowest solid kind requested.
        first: u8,
        /// Highest solid kind requested.
        last: u8,
        /// Number of kinds in the sheet.
        variants: u8,
    },
}
