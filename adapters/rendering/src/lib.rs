#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for tile scroller adapters.

use anyhow::Result as AnyResult;
use glam::IVec2;
use std::{error::Error, fmt};
use tile_scroller_core::{Background, PixelPoint, PixelRect, PixelSize, TileKind};
use tile_scroller_world::{query, World};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<Background> for Color {
    fn from(background: Background) -> Self {
        let (red, green, blue) = background.rgb();
        Self::from_rgb_u8(red, green, blue)
    }
}

/// Source rectangles of every tile kind inside the sprite sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSheet {
    clips: Vec<PixelRect>,
}

impl TileSheet {
    /// Creates a sheet from clips indexed by tile kind.
    #[must_use]
    pub fn new(clips: Vec<PixelRect>) -> Self {
        Self { clips }
    }

    /// Clip table of the reference sheet.
    ///
    /// The sheet is four columns of three tiles: the plain colours first, then
    /// the left, middle and right wall pieces, each column ordered top to bottom.
    #[must_use]
    pub fn reference(tile: PixelSize) -> Self {
        const LAYOUT: [(TileKind, i32, i32); 12] = [
            (TileKind::RED, 0, 0),
            (TileKind::GREEN, 0, 1),
            (TileKind::BLUE, 0, 2),
            (TileKind::CENTER, 2, 1),
            (TileKind::TOP, 2, 0),
            (TileKind::TOP_RIGHT, 3, 0),
            (TileKind::RIGHT, 3, 1),
            (TileKind::BOTTOM_RIGHT, 3, 2),
            (TileKind::BOTTOM, 2, 2),
            (TileKind::BOTTOM_LEFT, 1, 2),
            (TileKind::LEFT, 1, 1),
            (TileKind::TOP_LEFT, 1, 0),
        ];

        let width = i32::try_from(tile.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(tile.height()).unwrap_or(i32::MAX);
        let mut clips = vec![PixelRect::default(); LAYOUT.len()];
        for (kind, column, row) in LAYOUT {
            let origin =
                PixelPoint::new(column.saturating_mul(width), row.saturating_mul(height));
            clips[usize::from(kind.get())] = PixelRect::from_origin_and_size(origin, tile);
        }
        Self::new(clips)
    }

    /// Source rectangle for `kind`, if the sheet has one.
    #[must_use]
    pub fn clip(&self, kind: TileKind) -> Option<PixelRect> {
        self.clips.get(usize::from(kind.get())).copied()
    }

    /// Number of kinds the sheet provides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Reports whether the sheet has no clips.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Tile visible in the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneTile {
    /// Kind of the tile.
    pub kind: TileKind,
    /// Region of the sheet to copy.
    pub clip: PixelRect,
    /// Top-left corner on screen, relative to the viewport.
    pub screen: IVec2,
    /// Extent drawn on screen.
    pub size: PixelSize,
}

/// Actor as drawn in the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneActor {
    /// Top-left corner on screen, relative to the viewport.
    pub screen: IVec2,
    /// Extent drawn on screen.
    pub size: PixelSize,
}

/// Draw list for one frame: backdrop, then tiles, then the actor.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Level-space rectangle shown on screen.
    pub viewport: PixelRect,
    /// Colour used to clear the frame.
    pub background: Color,
    /// Visible tiles in row-major order.
    pub tiles: Vec<SceneTile>,
    /// The actor, drawn last.
    pub actor: SceneActor,
}

impl Scene {
    /// Captures the draw list for the world's current camera position.
    ///
    /// Only tiles overlapping the viewport are included.
    pub fn capture(world: &World, sheet: &TileSheet) -> Result<Self, RenderingError> {
        let viewport = query::viewport(world);
        let tiles = query::visible_tiles(world)
            .map(|tile| {
                let clip = sheet
                    .clip(tile.kind())
                    .ok_or(RenderingError::MissingClip { kind: tile.kind() })?;
                Ok(SceneTile {
                    kind: tile.kind(),
                    clip,
                    screen: to_screen(tile.position(), viewport),
                    size: tile.bounds().size(),
                })
            })
            .collect::<Result<Vec<_>, RenderingError>>()?;

        let actor = query::actor(world);
        Ok(Self {
            viewport,
            background: Color::from(query::background(world)),
            tiles,
            actor: SceneActor {
                screen: to_screen(actor.position(), viewport),
                size: actor.bounds().size(),
            },
        })
    }
}

fn to_screen(position: PixelPoint, viewport: PixelRect) -> IVec2 {
    let origin = viewport.origin();
    IVec2::new(position.x(), position.y()) - IVec2::new(origin.x(), origin.y())
}

/// Rendering backend capable of presenting tile scroller scenes.
pub trait RenderingBackend {
    /// Draws one captured frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Errors that can occur when building a scene.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The sheet has no clip for a kind present in the level.
    MissingClip {
        /// Kind without a clip.
        kind: TileKind,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingClip { kind } => {
                write!(f, "tile sheet has no clip for kind {}", kind.get())
            }
        }
    }
}

impl Error for RenderingError {}
