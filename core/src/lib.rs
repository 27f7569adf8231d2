#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the tile scroller.
//!
//! This crate defines the pixel geometry, tile kinds, and the message surface
//! that connects adapters, the authoritative world, and pure systems. Systems
//! translate raw input into [`Command`] values, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what changed during the step.

mod config;
mod stopwatch;

pub use config::{ConfigError, LevelConfig, SolidRange};
pub use stopwatch::Stopwatch;

use serde::{Deserialize, Serialize};

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Adds the provided deltas to the actor's velocity.
    AdjustVelocity {
        /// Change applied to the horizontal velocity component.
        dx: i32,
        /// Change applied to the vertical velocity component.
        dy: i32,
    },
    /// Advances the simulation by a single step: the actor moves, then the camera follows.
    Step,
    /// Requests that the actor be teleported to the provided position.
    PlaceActor {
        /// Top-left corner the actor's bounding box should occupy.
        position: PixelPoint,
    },
    /// Requests that the level background switch to the provided variant.
    SetBackground {
        /// Background the level should display.
        background: Background,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the actor's velocity changed.
    VelocityChanged {
        /// Velocity in effect after the adjustment.
        velocity: Velocity,
    },
    /// Confirms that the actor's bounding box moved during a step.
    ActorMoved {
        /// Top-left corner before the step.
        from: PixelPoint,
        /// Top-left corner after the step.
        to: PixelPoint,
    },
    /// Reports that movement along one axis was rolled back.
    MovementBlocked {
        /// Axis whose displacement was reverted.
        axis: Axis,
        /// Displacement that was attempted and rejected.
        attempted: i32,
    },
    /// Announces that the camera viewport was repositioned.
    CameraMoved {
        /// Top-left corner of the viewport before recentering.
        from: PixelPoint,
        /// Top-left corner of the viewport after recentering.
        to: PixelPoint,
    },
    /// Marks the end of a simulation step.
    StepCompleted {
        /// One-based index of the step that finished.
        step: u64,
    },
    /// Confirms that the actor was teleported.
    ActorPlaced {
        /// Top-left corner the actor now occupies.
        position: PixelPoint,
    },
    /// Reports that a teleport request was rejected.
    PlacementRejected {
        /// Position provided in the request.
        position: PixelPoint,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that the level background changed.
    BackgroundChanged {
        /// Background now in effect.
        background: Background,
    },
}

/// Reasons an actor placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested bounding box extends beyond the level.
    OutOfBounds,
    /// The requested bounding box overlaps a solid tile.
    Obstructed,
}

/// Integer pixel coordinate in level space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    x: i32,
    y: i32,
}

impl PixelPoint {
    /// Coordinate at the level origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new pixel coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component, growing to the right.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component, growing downwards.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate shifted by the provided offsets, saturating at the integer range.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Width and height measured in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    width: u32,
    height: u32,
}

impl PixelSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Horizontal extent in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Vertical extent in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether either dimension is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Half of the width, rounded down.
    #[must_use]
    pub fn half_width(&self) -> i32 {
        saturating_i32(self.width / 2)
    }

    /// Half of the height, rounded down.
    #[must_use]
    pub fn half_height(&self) -> i32 {
        saturating_i32(self.height / 2)
    }
}

/// Half-open axis-aligned rectangle in level space.
///
/// A rectangle covers `[left, right) x [top, bottom)`, so two rectangles that
/// merely share an edge do not overlap. Edges are reported as `i64` to keep
/// `origin + size` exact for every representable input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    origin: PixelPoint,
    size: PixelSize,
}

impl PixelRect {
    /// Constructs a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: PixelPoint, size: PixelSize) -> Self {
        Self { origin, size }
    }

    /// Top-left corner of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> PixelPoint {
        self.origin
    }

    /// Dimensions of the rectangle.
    #[must_use]
    pub const fn size(&self) -> PixelSize {
        self.size
    }

    /// Inclusive left edge.
    #[must_use]
    pub fn left(&self) -> i64 {
        i64::from(self.origin.x)
    }

    /// Inclusive top edge.
    #[must_use]
    pub fn top(&self) -> i64 {
        i64::from(self.origin.y)
    }

    /// Exclusive right edge.
    #[must_use]
    pub fn right(&self) -> i64 {
        self.left() + i64::from(self.size.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn bottom(&self) -> i64 {
        self.top() + i64::from(self.size.height)
    }

    /// Returns a rectangle of the same size anchored at `origin`.
    #[must_use]
    pub const fn with_origin(self, origin: PixelPoint) -> Self {
        Self {
            origin,
            size: self.size,
        }
    }

    /// Returns the rectangle shifted by the provided offsets.
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        self.with_origin(self.origin.offset(dx, dy))
    }

    /// Reports whether `other` lies entirely inside this rectangle.
    #[must_use]
    pub fn contains_rect(&self, other: &PixelRect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Reports whether two rectangles overlap on both axes.
///
/// Touching edges (`a.right == b.left` and friends) do not count as overlap.
/// The predicate is symmetric.
#[must_use]
pub fn rects_overlap(a: PixelRect, b: PixelRect) -> bool {
    if a.bottom() <= b.top() {
        return false;
    }
    if a.top() >= b.bottom() {
        return false;
    }
    if a.right() <= b.left() {
        return false;
    }
    if a.left() >= b.right() {
        return false;
    }
    true
}

/// Axis along which movement is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right movement.
    Horizontal,
    /// Up/down movement.
    Vertical,
}

/// Per-step displacement in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Velocity {
    dx: i32,
    dy: i32,
}

impl Velocity {
    /// A velocity that never moves.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a velocity from explicit per-axis components.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Vertical component.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }

    /// Component along the requested axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.dx,
            Axis::Vertical => self.dy,
        }
    }

    /// Returns the velocity with the provided deltas added.
    #[must_use]
    pub const fn adjusted(self, dx: i32, dy: i32) -> Self {
        Self {
            dx: self.dx.saturating_add(dx),
            dy: self.dy.saturating_add(dy),
        }
    }
}

/// Sprite variant assigned to a tile, drawn from a closed set of kinds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TileKind(u8);

impl TileKind {
    /// Red floor.
    pub const RED: Self = Self(0);
    /// Green floor.
    pub const GREEN: Self = Self(1);
    /// Blue floor.
    pub const BLUE: Self = Self(2);
    /// Wall interior.
    pub const CENTER: Self = Self(3);
    /// Wall top edge.
    pub const TOP: Self = Self(4);
    /// Wall top-right corner.
    pub const TOP_RIGHT: Self = Self(5);
    /// Wall right edge.
    pub const RIGHT: Self = Self(6);
    /// Wall bottom-right corner.
    pub const BOTTOM_RIGHT: Self = Self(7);
    /// Wall bottom edge.
    pub const BOTTOM: Self = Self(8);
    /// Wall bottom-left corner.
    pub const BOTTOM_LEFT: Self = Self(9);
    /// Wall left edge.
    pub const LEFT: Self = Self(10);
    /// Wall top-left corner.
    pub const TOP_LEFT: Self = Self(11);

    /// Number of kinds in the reference tile sheet.
    pub const REFERENCE_VARIANTS: u8 = 12;

    /// Wraps a raw kind index.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the raw kind index.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Solid-colour backdrop associated with a named level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Background {
    /// White backdrop.
    #[default]
    White,
    /// Red backdrop.
    Red,
    /// Green backdrop.
    Green,
    /// Blue backdrop.
    Blue,
}

impl Background {
    /// Every background in selection order.
    pub const ALL: [Self; 4] = [Self::White, Self::Red, Self::Green, Self::Blue];

    /// Byte RGB components of the backdrop.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::White => (0xFF, 0xFF, 0xFF),
            Self::Red => (0xFF, 0x00, 0x00),
            Self::Green => (0x00, 0xFF, 0x00),
            Self::Blue => (0x00, 0x00, 0xFF),
        }
    }

    /// Level name persisted in save files.
    #[must_use]
    pub const fn level_name(self) -> &'static str {
        match self {
            Self::White => "White Level",
            Self::Red => "Red Level",
            Self::Green => "Green Level",
            Self::Blue => "Blue Level",
        }
    }

    /// Resolves a persisted level name back to its backdrop.
    #[must_use]
    pub fn from_level_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|background| background.level_name() == name)
    }
}

pub(crate) fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        rects_overlap, Axis, Background, PixelPoint, PixelRect, PixelSize, TileKind, Velocity,
    };

    fn rect(x: i32, y: i32, width: u32, height: u32) -> PixelRect {
        PixelRect::from_origin_and_size(PixelPoint::new(x, y), PixelSize::new(width, height))
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = rect(0, 0, 10, 10);
        let b = rect(10, 0, 10, 10);
        assert!(!rects_overlap(a, b));
        assert!(!rects_overlap(b, a));

        let below = rect(0, 10, 10, 10);
        assert!(!rects_overlap(a, below));
    }

    #[test]
    fn single_pixel_intrusion_overlaps() {
        let a = rect(0, 0, 10, 10);
        let b = rect(9, 9, 10, 10);
        assert!(rects_overlap(a, b));
    }

    #[test]
    fn overlap_is_symmetric() {
        let samples = [
            rect(0, 0, 10, 10),
            rect(5, 5, 3, 3),
            rect(-4, 2, 6, 20),
            rect(10, 0, 10, 10),
            rect(9, -9, 1, 10),
            rect(100, 100, 1, 1),
        ];
        for a in samples {
            for b in samples {
                assert_eq!(rects_overlap(a, b), rects_overlap(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn edges_do_not_overflow_at_integer_limits() {
        let far = rect(i32::MAX, i32::MAX, u32::MAX, u32::MAX);
        assert_eq!(far.right(), i64::from(i32::MAX) + i64::from(u32::MAX));
        assert!(!rects_overlap(far, rect(0, 0, 10, 10)));
    }

    #[test]
    fn contains_rect_accepts_flush_edges() {
        let level = rect(0, 0, 160, 160);
        assert!(level.contains_rect(&rect(140, 140, 20, 20)));
        assert!(!level.contains_rect(&rect(141, 0, 20, 20)));
        assert!(!level.contains_rect(&rect(-1, 0, 20, 20)));
    }

    #[test]
    fn velocity_adjustments_accumulate_per_axis() {
        let velocity = Velocity::ZERO.adjusted(10, 0).adjusted(0, -10).adjusted(-10, 0);
        assert_eq!(velocity.along(Axis::Horizontal), 0);
        assert_eq!(velocity.along(Axis::Vertical), -10);
    }

    #[test]
    fn background_level_names_resolve_back() {
        for background in Background::ALL {
            assert_eq!(
                Background::from_level_name(background.level_name()),
                Some(background)
            );
        }
        assert_eq!(Background::from_level_name("Purple Level"), None);
        assert_eq!(Background::Red.rgb(), (0xFF, 0x00, 0x00));
    }

    #[test]
    fn tile_kind_round_trips_through_bincode() {
        let bytes = bincode::serialize(&TileKind::TOP_LEFT).expect("serialize");
        let restored: TileKind = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, TileKind::TOP_LEFT);
    }
}
