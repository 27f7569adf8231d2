use tile_scroller_core::{Background, Command, PixelSize};
use tile_scroller_system_input::{Controls, Key, KeyEvent};

fn controls() -> Controls {
    Controls::new(PixelSize::new(20, 20))
}

#[test]
fn arrow_press_and_release_emit_opposite_deltas() {
    let mut controls = controls();
    let mut commands = Vec::new();

    controls.handle(
        &[KeyEvent::Pressed(Key::Right), KeyEvent::Released(Key::Right)],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::AdjustVelocity { dx: 10, dy: 0 },
            Command::AdjustVelocity { dx: -10, dy: 0 },
        ],
        "release should undo the press",
    );
}

#[test]
fn each_arrow_uses_half_the_actor_extent() {
    let mut controls = Controls::new(PixelSize::new(30, 16));
    let mut commands = Vec::new();

    controls.handle(
        &[
            KeyEvent::Pressed(Key::Up),
            KeyEvent::Pressed(Key::Down),
            KeyEvent::Pressed(Key::Left),
            KeyEvent::Pressed(Key::Right),
        ],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::AdjustVelocity { dx: 0, dy: -8 },
            Command::AdjustVelocity { dx: 0, dy: 8 },
            Command::AdjustVelocity { dx: -15, dy: 0 },
            Command::AdjustVelocity { dx: 15, dy: 0 },
        ],
    );
}

#[test]
fn repeated_presses_do_not_accumulate_velocity() {
    let mut controls = controls();
    let mut commands = Vec::new();

    controls.handle(
        &[
            KeyEvent::Pressed(Key::Left),
            KeyEvent::Pressed(Key::Left),
            KeyEvent::Pressed(Key::Left),
        ],
        &mut commands,
    );

    assert_eq!(commands, vec![Command::AdjustVelocity { dx: -10, dy: 0 }]);
    assert!(controls.state().is_held(Key::Left));
}

#[test]
fn release_of_unheld_key_is_ignored() {
    let mut controls = controls();
    let mut commands = Vec::new();

    controls.handle(&[KeyEvent::Released(Key::Down)], &mut commands);

    assert!(
        commands.is_empty(),
        "releasing a key that was never pressed must not move the actor"
    );
}

#[test]
fn digits_select_backgrounds_once_per_press() {
    let mut controls = controls();
    let mut commands = Vec::new();

    controls.handle(
        &[
            KeyEvent::Pressed(Key::Digit2),
            KeyEvent::Pressed(Key::Digit2),
            KeyEvent::Released(Key::Digit2),
            KeyEvent::Pressed(Key::Digit4),
        ],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::SetBackground {
                background: Background::Red,
            },
            Command::SetBackground {
                background: Background::Blue,
            },
        ],
    );
}

#[test]
fn held_keys_are_reported_in_stable_order() {
    let mut controls = controls();
    let mut commands = Vec::new();

    controls.handle(
        &[
            KeyEvent::Pressed(Key::Right),
            KeyEvent::Pressed(Key::Up),
            KeyEvent::Released(Key::Right),
        ],
        &mut commands,
    );

    assert_eq!(controls.state().held().collect::<Vec<_>>(), vec![Key::Up]);
}
