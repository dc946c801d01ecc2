//! Configuration file loading.
//!
//! Reads `config.toml` from the platform config directory. Every key is
//! optional and a missing file falls back to defaults, but malformed
//! values (bad TOML, invalid colors, empty palettes) are reported rather
//! than silently defaulted. Nothing is ever written back; runtime state
//! stays memory-resident.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use byeol_core::{Palette, PaletteTable, Rgb, SceneKind, StarsConfig};
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

/// Errors produced while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("palette `{palette}` has invalid color `{color}` (expected #RRGGBB)")]
    InvalidColor { palette: String, color: String },
    #[error("palette `{palette}` has no colors")]
    EmptyPalette { palette: String },
}

/// On-disk configuration, all keys optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Scene shown at startup.
    pub scene: SceneKind,
    /// Star field tuning.
    pub stars: StarsConfig,
    /// Extra palettes layered over the built-ins, as `#RRGGBB` lists.
    pub palettes: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Load from the platform config directory. A missing file is not an
    /// error; defaults apply.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and parse a specific file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Parse config text. Out-of-range tuning values are clamped to what
    /// the in-app controls can produce.
    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(text)?;
        config.stars = config.stars.clamped();
        Ok(config)
    }

    /// Build the palette table: the built-ins plus the user palettes.
    pub fn palette_table(&self) -> Result<PaletteTable, ConfigError> {
        let mut table = PaletteTable::builtin();
        for (name, colors) in &self.palettes {
            if colors.is_empty() {
                return Err(ConfigError::EmptyPalette {
                    palette: name.clone(),
                });
            }
            let parsed = colors
                .iter()
                .map(|color| {
                    Rgb::from_hex(color).ok_or_else(|| ConfigError::InvalidColor {
                        palette: name.clone(),
                        color: color.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            table.register(Palette::new(name.clone(), parsed));
        }
        Ok(table)
    }
}

/// Platform config file path (`…/byeol/config.toml`).
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "byeol").map(|dirs| dirs.config_dir().join("config.toml"))
}
