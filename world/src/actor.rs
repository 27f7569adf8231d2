//! Player-controlled mover that resolves collisions one axis at a time.

use tile_scroller_core::{Axis, PixelPoint, PixelRect, PixelSize, Velocity};

use crate::{collision::rect_hits_grid, TileGrid};

/// Moving entity with a fixed-size bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Actor {
    bounds: PixelRect,
    velocity: Velocity,
}

impl Actor {
    /// Creates a stationary actor anchored at `position`.
    #[must_use]
    pub const fn new(position: PixelPoint, size: PixelSize) -> Self {
        Self {
            bounds: PixelRect::from_origin_and_size(position, size),
            velocity: Velocity::ZERO,
        }
    }

    /// Returns the actor with its velocity replaced.
    #[must_use]
    pub const fn with_velocity(self, velocity: Velocity) -> Self {
        Self {
            bounds: self.bounds,
            velocity,
        }
    }

    /// Top-left corner of the bounding box.
    #[must_use]
    pub const fn position(&self) -> PixelPoint {
        self.bounds.origin()
    }

    /// Bounding box in level space.
    #[must_use]
    pub const fn bounds(&self) -> PixelRect {
        self.bounds
    }

    /// Displacement applied on every step.
    #[must_use]
    pub const fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Adds the provided deltas to the velocity.
    pub fn adjust_velocity(&mut self, dx: i32, dy: i32) {
        self.velocity = self.velocity.adjusted(dx, dy);
    }

    pub(crate) fn set_position(&mut self, position: PixelPoint) {
        self.bounds = self.bounds.with_origin(position);
    }

    /// Applies one step of velocity, horizontal axis first.
    ///
    /// A displacement that would leave the level along its axis or overlap a
    /// solid tile is reverted in full; the velocity itself is kept. The vertical
    /// axis is resolved from the post-horizontal box so the actor slides along
    /// walls that only block one axis.
    pub fn move_within(&mut self, grid: &TileGrid) -> StepOutcome {
        let from = self.position();
        let blocked_horizontal = !self.try_axis(Axis::Horizontal, grid);
        let blocked_vertical = !self.try_axis(Axis::Vertical, grid);
        StepOutcome {
            from,
            to: self.position(),
            blocked_horizontal,
            blocked_vertical,
        }
    }

    fn try_axis(&mut self, axis: Axis, grid: &TileGrid) -> bool {
        let delta = self.velocity.along(axis);
        if delta == 0 {
            return true;
        }

        let candidate = match axis {
            Axis::Horizontal => self.bounds.translated(delta, 0),
            Axis::Vertical => self.bounds.translated(0, delta),
        };
        if leaves_level(axis, &candidate, &grid.bounds()) || rect_hits_grid(candidate, grid) {
            return false;
        }

        self.bounds = candidate;
        true
    }
}

fn leaves_level(axis: Axis, candidate: &PixelRect, level: &PixelRect) -> bool {
    match axis {
        Axis::Horizontal => candidate.left() < level.left() || candidate.right() > level.right(),
        Axis::Vertical => candidate.top() < level.top() || candidate.bottom() > level.bottom(),
    }
}

/// Result of a single [`Actor::move_within`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    from: PixelPoint,
    to: PixelPoint,
    blocked_horizontal: bool,
    blocked_vertical: bool,
}

impl StepOutcome {
    /// Position before the step.
    #[must_use]
    pub const fn from(&self) -> PixelPoint {
        self.from
    }

    /// Position after the step.
    #[must_use]
    pub const fn to(&self) -> PixelPoint {
        self.to
    }

    /// Reports whether the position changed.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.from != self.to
    }

    /// Reports whether movement along `axis` was rolled back.
    #[must_use]
    pub const fn is_blocked(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.blocked_horizontal,
            Axis::Vertical => self.blocked_vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_scroller_core::LevelConfig;

    fn open_field() -> TileGrid {
        let config = LevelConfig {
            level: PixelSize::new(160, 160),
            ..LevelConfig::default()
        };
        TileGrid::parse("0 0 0 0", &config).expect("grid parses")
    }

    #[test]
    fn stops_short_of_the_level_edge_without_clamping() {
        let grid = open_field();
        let mut actor = Actor::new(PixelPoint::new(130, 0), PixelSize::new(20, 20))
            .with_velocity(Velocity::new(20, 0));

        let outcome = actor.move_within(&grid);

        assert!(outcome.is_blocked(Axis::Horizontal));
        assert!(!outcome.moved());
        assert_eq!(actor.position(), PixelPoint::new(130, 0));
        assert_eq!(actor.velocity(), Velocity::new(20, 0));
    }

    #[test]
    fn flush_with_the_level_edge_is_allowed() {
        let grid = open_field();
        let mut actor = Actor::new(PixelPoint::new(130, 140), PixelSize::new(20, 20))
            .with_velocity(Velocity::new(10, 0));

        let outcome = actor.move_within(&grid);

        assert!(!outcome.is_blocked(Axis::Horizontal));
        assert_eq!(outcome.to(), PixelPoint::new(140, 140));
    }

    #[test]
    fn stationary_actor_is_never_blocked() {
        let grid = open_field();
        let mut actor = Actor::new(PixelPoint::ORIGIN, PixelSize::new(20, 20));
        let outcome = actor.move_within(&grid);
        assert!(!outcome.is_blocked(Axis::Horizontal));
        assert!(!outcome.is_blocked(Axis::Vertical));
        assert!(!outcome.moved());
    }
}
