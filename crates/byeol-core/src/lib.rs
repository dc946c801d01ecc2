//! Core types for the byeol screensaver.
//!
//! Shared vocabulary between the star lifecycle manager, the scene
//! renderers and the configuration layer: colors, palettes, scene
//! identifiers and the star field tuning parameters.

mod color;
mod palette;
mod scene;
mod stars_config;

pub use color::Rgb;
pub use palette::{Palette, PaletteTable, UnknownPalette};
pub use scene::SceneKind;
pub use stars_config::{
    MAX_SPEED_SECS, MAX_STARS_PER_BURST, MIN_SPEED_SECS, MIN_STARS_PER_BURST, SPEED_STEP,
    StarsConfig,
};
