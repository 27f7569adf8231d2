//! Viewport that follows a target while staying inside the level.

use tile_scroller_core::{PixelPoint, PixelRect, PixelSize};

/// Computes the viewport position that centers `target` within the level.
///
/// Each axis is clamped to `[0, level - viewport]`. When the level is smaller
/// than the viewport along an axis, that axis clamps to zero.
#[must_use]
pub fn recenter(
    target: PixelPoint,
    target_size: PixelSize,
    viewport_size: PixelSize,
    level_size: PixelSize,
) -> PixelPoint {
    PixelPoint::new(
        center_axis(
            target.x(),
            target_size.width(),
            viewport_size.width(),
            level_size.width(),
        ),
        center_axis(
            target.y(),
            target_size.height(),
            viewport_size.height(),
            level_size.height(),
        ),
    )
}

fn center_axis(target: i32, target_extent: u32, viewport_extent: u32, level_extent: u32) -> i32 {
    let centered =
        i64::from(target) + i64::from(target_extent / 2) - i64::from(viewport_extent / 2);
    let upper = (i64::from(level_extent) - i64::from(viewport_extent)).max(0);
    i32::try_from(centered.clamp(0, upper)).unwrap_or(i32::MAX)
}

/// Visible window into the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Camera {
    viewport: PixelRect,
}

impl Camera {
    /// Creates a camera of the provided size anchored at the level origin.
    #[must_use]
    pub const fn new(size: PixelSize) -> Self {
        Self {
            viewport: PixelRect::from_origin_and_size(PixelPoint::ORIGIN, size),
        }
    }

    /// Rectangle currently shown by the camera.
    #[must_use]
    pub const fn viewport(&self) -> PixelRect {
        self.viewport
    }

    /// Top-left corner of the viewport.
    #[must_use]
    pub const fn position(&self) -> PixelPoint {
        self.viewport.origin()
    }

    /// Recenters on `target`, returning `true` when the viewport moved.
    pub fn follow(&mut self, target: PixelRect, level_size: PixelSize) -> bool {
        let next = recenter(
            target.origin(),
            target.size(),
            self.viewport.size(),
            level_size,
        );
        let moved = next != self.viewport.origin();
        self.viewport = self.viewport.with_origin(next);
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: PixelSize = PixelSize::new(640, 480);
    const LEVEL: PixelSize = PixelSize::new(1280, 960);
    const ACTOR: PixelSize = PixelSize::new(20, 20);

    #[test]
    fn centers_on_target_midpoint() {
        let position = recenter(PixelPoint::new(600, 500), ACTOR, VIEWPORT, LEVEL);
        assert_eq!(position, PixelPoint::new(290, 270));
    }

    #[test]
    fn clamps_at_level_edges() {
        assert_eq!(
            recenter(PixelPoint::new(10, 10), ACTOR, VIEWPORT, LEVEL),
            PixelPoint::ORIGIN
        );
        assert_eq!(
            recenter(PixelPoint::new(1260, 940), ACTOR, VIEWPORT, LEVEL),
            PixelPoint::new(640, 480)
        );
    }

    #[test]
    fn level_smaller_than_viewport_pins_to_origin() {
        let small = PixelSize::new(160, 960);
        let position = recenter(PixelPoint::new(140, 700), ACTOR, VIEWPORT, small);
        assert_eq!(position.x(), 0);
        assert_eq!(position.y(), 470);
    }

    #[test]
    fn follow_reports_whether_the_viewport_moved() {
        let mut camera = Camera::new(VIEWPORT);
        let target = PixelRect::from_origin_and_size(PixelPoint::new(5, 5), ACTOR);
        assert!(!camera.follow(target, LEVEL));

        let target = target.with_origin(PixelPoint::new(700, 300));
        assert!(camera.follow(target, LEVEL));
        assert_eq!(camera.position(), PixelPoint::new(390, 70));
        assert_eq!(camera.viewport().size(), VIEWPORT);
    }
}
