//! Optional TOML settings file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tile_scroller_core::LevelConfig;

const SUPPORTED_SETTINGS_VERSION: u32 = 1;

/// Settings resolved from the file, before command-line overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) level: LevelConfig,
    pub(crate) map: Option<PathBuf>,
    pub(crate) save: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    version: u32,
    #[serde(default)]
    map: Option<PathBuf>,
    #[serde(default)]
    save: Option<PathBuf>,
    #[serde(default)]
    level: LevelConfig,
}

/// Reads the settings file at `path`.
///
/// Relative `map` and `save` paths are resolved against the file's directory.
pub(crate) fn load(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings at {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    parse(&contents, base).with_context(|| format!("invalid settings in {}", path.display()))
}

fn parse(contents: &str, base: &Path) -> Result<Settings> {
    let file: SettingsFile =
        toml::from_str(contents).context("failed to parse settings toml contents")?;
    if file.version != SUPPORTED_SETTINGS_VERSION {
        bail!(
            "unsupported settings version {}; expected {}",
            file.version,
            SUPPORTED_SETTINGS_VERSION
        );
    }
    file.level.validate()?;

    Ok(Settings {
        level: file.level,
        map: file.map.map(|map| base.join(map)),
        save: file.save.map(|save| base.join(save)),
    })
}
