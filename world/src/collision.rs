//! Axis-aligned collision queries against the tile grid.

pub use tile_scroller_core::rects_overlap;
use tile_scroller_core::PixelRect;

use crate::TileGrid;

/// Reports whether `rect` overlaps any solid tile in the grid.
///
/// Every tile is scanned on each call; levels are small and fixed in size so
/// no spatial index is maintained.
#[must_use]
pub fn rect_hits_grid(rect: PixelRect, grid: &TileGrid) -> bool {
    grid.iter()
        .any(|tile| grid.is_solid(tile) && rects_overlap(rect, tile.bounds()))
}
