#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the tile scroller headlessly.
//!
//! The binary loads a level, restores the optional save slot, replays a key
//! script against the world, and can print the final frame as text.

mod ascii;
mod script;
mod settings;

use std::{
    fs, io,
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use tile_scroller_core::{Command, Event, LevelConfig, PixelSize, Stopwatch};
use tile_scroller_rendering::{RenderingBackend, Scene, TileSheet};
use tile_scroller_save_state::SaveState;
use tile_scroller_system_input::Controls;
use tile_scroller_world::{apply, query, World};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{ascii::AsciiBackend, script::Action, settings::Settings};

const DEFAULT_MAP: &str = "assets/level.map";

/// Arguments accepted by the `tile-scroller` binary.
#[derive(Debug, Parser)]
#[command(name = "tile-scroller", about = "Scroll a camera over a tiled level")]
struct CliArgs {
    /// TOML settings file describing the level layout.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Whitespace-separated map of tile kinds; overrides the settings file.
    #[arg(long)]
    map: Option<PathBuf>,
    /// Save slot restored on start and written on exit.
    #[arg(long)]
    save: Option<PathBuf>,
    /// Inline key script, e.g. `+right step:10 -right`.
    #[arg(long, conflicts_with = "script_file")]
    script: Option<String>,
    /// File holding a key script.
    #[arg(long)]
    script_file: Option<PathBuf>,
    /// Print the final frame as text.
    #[arg(long)]
    render: bool,
    /// Width and height in pixels of one character of the text frame.
    #[arg(long, default_value_t = 20)]
    cell: u32,
}

fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "run_failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run(args: &CliArgs) -> Result<()> {
    let mut stopwatch = Stopwatch::new();
    stopwatch.start(Instant::now());

    let settings = match &args.config {
        Some(path) => settings::load(path)?,
        None => Settings::default(),
    };
    let map = args
        .map
        .clone()
        .or(settings.map)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MAP));
    let save = args.save.clone().or(settings.save);
    let actions = match (&args.script, &args.script_file) {
        (Some(source), _) => script::parse(source)?,
        (None, Some(path)) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read script at {}", path.display()))?;
            script::parse(&source)?
        }
        (None, None) => Vec::new(),
    };

    let config = settings.level;
    let mut world = World::load(config.clone(), &map)
        .with_context(|| format!("failed to load level from {}", map.display()))?;
    let mut tally = Tally::default();

    if let Some(path) = &save {
        for command in SaveState::load_or_default(path, &config).restore_commands() {
            tally.apply(&mut world, command);
        }
    }

    let mut controls = Controls::new(config.actor);
    run_script(&mut world, &mut controls, &actions, &mut tally);

    let actor = query::actor(&world).position();
    let background = query::background(&world);
    if let Some(path) = &save {
        SaveState::new(actor, background).store(path)?;
    }

    if args.render {
        present_final_frame(&world, &config, args.cell)?;
    }

    info!(
        steps = query::step_index(&world),
        x = actor.x(),
        y = actor.y(),
        level = background.level_name(),
        blocked = tally.blocked,
        rejected = tally.rejected,
        elapsed = ?stopwatch.elapsed(Instant::now()),
        "run_complete"
    );
    Ok(())
}

/// Applies commands one at a time, keeping counts instead of the event log.
#[derive(Debug, Default)]
struct Tally {
    events: Vec<Event>,
    blocked: u64,
    rejected: u64,
}

impl Tally {
    fn apply(&mut self, world: &mut World, command: Command) {
        apply(world, command, &mut self.events);
        for event in self.events.drain(..) {
            match event {
                Event::MovementBlocked { .. } => self.blocked += 1,
                Event::PlacementRejected { .. } => self.rejected += 1,
                _ => {}
            }
        }
    }
}

fn run_script(world: &mut World, controls: &mut Controls, actions: &[Action], tally: &mut Tally) {
    let mut commands = Vec::new();
    for action in actions {
        match *action {
            Action::Key(key) => {
                controls.handle(&[key], &mut commands);
                for command in commands.drain(..) {
                    tally.apply(world, command);
                }
            }
            Action::Step(count) => {
                for _ in 0..count {
                    tally.apply(world, Command::Step);
                }
            }
        }
    }
}

fn present_final_frame(world: &World, config: &LevelConfig, cell: u32) -> Result<()> {
    let sheet = TileSheet::reference(config.tile);
    let scene = Scene::capture(world, &sheet)?;
    let mut backend = AsciiBackend::new(io::stdout().lock(), PixelSize::new(cell, cell));
    backend.present(&scene)
}
