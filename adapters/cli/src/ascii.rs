//! Text backend that prints each frame as a character grid.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use glam::IVec2;
use tile_scroller_core::{PixelSize, TileKind};
use tile_scroller_rendering::{RenderingBackend, Scene};

/// Draws frames as text, one character per `cell` of screen pixels.
///
/// Each character shows whatever covers the centre of its cell: the actor
/// as `@`, otherwise the glyph of the tile underneath.
#[derive(Debug)]
pub(crate) struct AsciiBackend<W> {
    out: W,
    cell: PixelSize,
}

impl<W: Write> AsciiBackend<W> {
    pub(crate) fn new(out: W, cell: PixelSize) -> Self {
        Self { out, cell }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for AsciiBackend<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        let cell = IVec2::new(
            i32::try_from(self.cell.width().max(1)).unwrap_or(i32::MAX),
            i32::try_from(self.cell.height().max(1)).unwrap_or(i32::MAX),
        );
        let screen = IVec2::new(
            i32::try_from(scene.viewport.size().width()).unwrap_or(i32::MAX),
            i32::try_from(scene.viewport.size().height()).unwrap_or(i32::MAX),
        );
        let columns = screen.x / cell.x;
        let rows = screen.y / cell.y;

        let mut frame = String::new();
        for row in 0..rows {
            for column in 0..columns {
                let probe = IVec2::new(column, row) * cell + cell / 2;
                frame.push(glyph_at(scene, probe));
            }
            frame.push('\n');
        }

        self.out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush())
            .context("failed to write ascii frame")
    }
}

fn glyph_at(scene: &Scene, probe: IVec2) -> char {
    if covers(scene.actor.screen, scene.actor.size, probe) {
        return '@';
    }
    scene
        .tiles
        .iter()
        .find(|tile| covers(tile.screen, tile.size, probe))
        .map_or(' ', |tile| tile_glyph(tile.kind))
}

fn covers(origin: IVec2, size: PixelSize, probe: IVec2) -> bool {
    let extent = IVec2::new(
        i32::try_from(size.width()).unwrap_or(i32::MAX),
        i32::try_from(size.height()).unwrap_or(i32::MAX),
    );
    let offset = probe - origin;
    offset.cmpge(IVec2::ZERO).all() && offset.cmplt(extent).all()
}

fn tile_glyph(kind: TileKind) -> char {
    match kind {
        TileKind::RED => 'r',
        TileKind::GREEN => 'g',
        TileKind::BLUE => 'b',
        TileKind::CENTER => '#',
        TileKind::TOP | TileKind::BOTTOM => '=',
        TileKind::LEFT | TileKind::RIGHT => '|',
        _ => '+',
    }
}
