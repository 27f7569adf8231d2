//! Scripted keyboard input for headless runs.
//!
//! A script is a whitespace-separated list of actions: `+KEY` presses a key,
//! `-KEY` releases it, and `step` or `step:N` advances the simulation. Keys
//! are `up`, `down`, `left`, `right` and the digits `1` to `4`.

use std::num::NonZeroU32;

use anyhow::{bail, Context, Result};
use tile_scroller_system_input::{Key, KeyEvent};

/// Single scripted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Feed a key transition to the controls.
    Key(KeyEvent),
    /// Advance the world this many steps.
    Step(u32),
}

/// Parses a script into actions, reporting the first invalid token.
pub(crate) fn parse(source: &str) -> Result<Vec<Action>> {
    source
        .split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            parse_action(token).with_context(|| format!("invalid script action #{index} `{token}`"))
        })
        .collect()
}

fn parse_action(token: &str) -> Result<Action> {
    if let Some(name) = token.strip_prefix('+') {
        return Ok(Action::Key(KeyEvent::Pressed(parse_key(name)?)));
    }
    if let Some(name) = token.strip_prefix('-') {
        return Ok(Action::Key(KeyEvent::Released(parse_key(name)?)));
    }

    let count = match token.split_once(':') {
        Some(("step", count)) => count
            .parse::<NonZeroU32>()
            .with_context(|| format!("step count `{count}` is not a positive integer"))?
            .get(),
        None if token == "step" => 1,
        _ => bail!("expected `+KEY`, `-KEY`, `step` or `step:N`"),
    };
    Ok(Action::Step(count))
}

fn parse_key(name: &str) -> Result<Key> {
    let key = match name.to_ascii_lowercase().as_str() {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "1" => Key::Digit1,
        "2" => Key::Digit2,
        "3" => Key::Digit3,
        "4" => Key::Digit4,
        _ => bail!("unknown key `{name}`"),
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_presses_releases_and_steps() {
        let actions = parse("+Right step:3 -right +2\nstep").expect("script parses");
        assert_eq!(
            actions,
            vec![
                Action::Key(KeyEvent::Pressed(Key::Right)),
                Action::Step(3),
                Action::Key(KeyEvent::Released(Key::Right)),
                Action::Key(KeyEvent::Pressed(Key::Digit2)),
                Action::Step(1),
            ]
        );
    }

    #[test]
    fn rejects_unknown_keys_and_bad_counts() {
        assert!(parse("+jump").is_err());
        assert!(parse("step:-1").is_err());
        assert!(parse("step:0").is_err());
        assert!(parse("walk").is_err());
    }

    #[test]
    fn error_names_the_offending_token() {
        let error = parse("step +left +fly").expect_err("fly is not a key");
        assert!(error.to_string().contains("#2 `+fly`"));
    }
}
