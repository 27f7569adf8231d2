#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for the tile scroller.

mod actor;
mod camera;
pub mod collision;
mod map;

use std::path::Path;

use thiserror::Error;
use tile_scroller_core::{
    Axis, Background, Command, Event, LevelConfig, PixelPoint, PlacementError,
};
use tracing::{debug, warn};

pub use actor::{Actor, StepOutcome};
pub use camera::{recenter, Camera};
pub use collision::{rect_hits_grid, rects_overlap};
pub use map::{MalformedReason, MapError, Tile, TileGrid};

/// Represents the authoritative level state: tiles, actor, camera, and backdrop.
#[derive(Debug)]
pub struct World {
    config: LevelConfig,
    grid: TileGrid,
    actor: Actor,
    camera: Camera,
    background: Background,
    step_index: u64,
}

impl World {
    /// Creates a world from a grid that was loaded with the same configuration.
    ///
    /// The actor starts at [`LevelConfig::actor_start`], which must lie inside
    /// the level and clear of solid tiles. The camera is centered on it
    /// immediately.
    pub fn new(config: LevelConfig, grid: TileGrid) -> Result<Self, WorldError> {
        let start = config.actor_start;
        if let Some(reason) = placement_error(&config, &grid, start) {
            return Err(WorldError::InvalidStart {
                position: start,
                reason,
            });
        }

        let actor = Actor::new(start, config.actor);
        let mut camera = Camera::new(config.viewport);
        let _ = camera.follow(actor.bounds(), grid.bounds().size());
        Ok(Self {
            config,
            grid,
            actor,
            camera,
            background: Background::default(),
            step_index: 0,
        })
    }

    /// Loads the map at `path` and builds a world around it.
    pub fn load(config: LevelConfig, path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let grid = TileGrid::load(path, &config)?;
        Self::new(config, grid)
    }

    fn follow_actor(&mut self, out_events: &mut Vec<Event>) {
        let from = self.camera.position();
        if self
            .camera
            .follow(self.actor.bounds(), self.grid.bounds().size())
        {
            out_events.push(Event::CameraMoved {
                from,
                to: self.camera.position(),
            });
        }
    }

}

fn placement_error(
    config: &LevelConfig,
    grid: &TileGrid,
    position: PixelPoint,
) -> Option<PlacementError> {
    let candidate = config.actor_box_at(position);
    if !grid.bounds().contains_rect(&candidate) {
        return Some(PlacementError::OutOfBounds);
    }
    if rect_hits_grid(candidate, grid) {
        return Some(PlacementError::Obstructed);
    }
    None
}

/// Errors that prevent a world from being built.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The map could not be loaded.
    #[error(transparent)]
    Map(#[from] MapError),
    /// The configured start position is outside the level or inside a wall.
    #[error("actor cannot start at ({}, {}): {reason:?}", .position.x(), .position.y())]
    InvalidStart {
        /// Configured start position.
        position: PixelPoint,
        /// Why the position was rejected.
        reason: PlacementError,
    },
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::AdjustVelocity { dx, dy } => {
            world.actor.adjust_velocity(dx, dy);
            out_events.push(Event::VelocityChanged {
                velocity: world.actor.velocity(),
            });
        }
        Command::Step => {
            world.step_index = world.step_index.saturating_add(1);

            let outcome = world.actor.move_within(&world.grid);
            let velocity = world.actor.velocity();
            for axis in [Axis::Horizontal, Axis::Vertical] {
                if outcome.is_blocked(axis) {
                    debug!(step = world.step_index, ?axis, "movement_blocked");
                    out_events.push(Event::MovementBlocked {
                        axis,
                        attempted: velocity.along(axis),
                    });
                }
            }
            if outcome.moved() {
                out_events.push(Event::ActorMoved {
                    from: outcome.from(),
                    to: outcome.to(),
                });
            }

            world.follow_actor(out_events);
            out_events.push(Event::StepCompleted {
                step: world.step_index,
            });
        }
        Command::PlaceActor { position } => {
            if let Some(reason) = placement_error(&world.config, &world.grid, position) {
                warn!(
                    x = position.x(),
                    y = position.y(),
                    ?reason,
                    "actor_placement_rejected"
                );
                out_events.push(Event::PlacementRejected { position, reason });
                return;
            }

            world.actor.set_position(position);
            out_events.push(Event::ActorPlaced { position });
            world.follow_actor(out_events);
        }
        Command::SetBackground { background } => {
            if world.background != background {
                world.background = background;
                out_events.push(Event::BackgroundChanged { background });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tile_scroller_core::{Background, LevelConfig, PixelRect};

    use super::{Actor, Camera, Tile, TileGrid, World};

    /// Provides read-only access to the level configuration.
    #[must_use]
    pub fn config(world: &World) -> &LevelConfig {
        &world.config
    }

    /// Provides read-only access to the tile grid.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.grid
    }

    /// Provides read-only access to the actor.
    #[must_use]
    pub fn actor(world: &World) -> &Actor {
        &world.actor
    }

    /// Provides read-only access to the camera.
    #[must_use]
    pub fn camera(world: &World) -> &Camera {
        &world.camera
    }

    /// Rectangle currently shown by the camera.
    #[must_use]
    pub fn viewport(world: &World) -> PixelRect {
        world.camera.viewport()
    }

    /// Backdrop currently in effect.
    #[must_use]
    pub fn background(world: &World) -> Background {
        world.background
    }

    /// Number of steps simulated so far.
    #[must_use]
    pub fn step_index(world: &World) -> u64 {
        world.step_index
    }

    /// Tiles overlapping the camera viewport, in row-major order.
    pub fn visible_tiles(world: &World) -> impl Iterator<Item = &Tile> + Clone + '_ {
        world.grid.visible_tiles(world.camera.viewport())
    }
}
