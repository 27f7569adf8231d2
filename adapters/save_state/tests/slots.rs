use std::fs;

use tile_scroller_core::{Background, LevelConfig, PixelPoint};
use tile_scroller_save_state::{SaveState, SaveStateError};
use tile_scroller_world::{apply, query, TileGrid, World};

fn open_world(config: &LevelConfig) -> World {
    let source = vec!["0"; config.tile_count()].join(" ");
    let grid = TileGrid::parse(&source, config).expect("grid parses");
    World::new(config.clone(), grid).expect("start is on the floor")
}

#[test]
fn stored_state_restores_position_and_background() {
    let config = LevelConfig::default();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("save.txt");

    SaveState::new(PixelPoint::new(100, 50), Background::Red)
        .store(&path)
        .expect("state stores");
    assert_eq!(
        fs::read_to_string(&path).expect("file exists"),
        "100 50\nRed Level"
    );

    let restored = SaveState::load(&path, &config).expect("state loads");
    let mut world = open_world(&config);
    let mut events = Vec::new();
    for command in restored.restore_commands() {
        apply(&mut world, command, &mut events);
    }

    assert_eq!(query::actor(&world).position(), PixelPoint::new(100, 50));
    assert_eq!(query::background(&world), Background::Red);
}

#[test]
fn store_overwrites_the_previous_slot() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("save.txt");

    SaveState::new(PixelPoint::new(1, 2), Background::Blue)
        .store(&path)
        .expect("first store");
    SaveState::new(PixelPoint::new(3, 4), Background::Green)
        .store(&path)
        .expect("second store");

    assert_eq!(
        SaveState::load(&path, &LevelConfig::default()).expect("state loads"),
        SaveState::new(PixelPoint::new(3, 4), Background::Green)
    );
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .expect("dir lists")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(leftovers, vec!["save.txt"]);
}

#[test]
fn missing_slot_falls_back_to_the_start_position() {
    let config = LevelConfig {
        actor_start: PixelPoint::new(40, 40),
        ..LevelConfig::default()
    };
    let dir = tempfile::tempdir().expect("temp dir");

    let state = SaveState::load_or_default(dir.path().join("absent.txt"), &config);

    assert_eq!(state, SaveState::new(PixelPoint::new(40, 40), Background::White));
}

#[test]
fn corrupt_slot_falls_back_but_load_reports_why() {
    let config = LevelConfig::default();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("save.txt");
    fs::write(&path, "5000 5000\nRed Level").expect("seed file");

    assert!(matches!(
        SaveState::load(&path, &config),
        Err(SaveStateError::OutOfBounds { x: 5000, y: 5000 })
    ));
    assert_eq!(SaveState::load_or_default(&path, &config), SaveState::initial(&config));
}
