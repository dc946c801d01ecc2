//! Named color palettes for star coloring.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::color::Rgb;

/// Error returned when a palette name is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown palette `{0}`")]
pub struct UnknownPalette(pub String);

/// A named, ordered set of colors used to color newly created stars.
///
/// Colors are never empty for palettes reachable through a
/// [`PaletteTable`]: the built-ins are fixed and the config layer rejects
/// empty user palettes before registering them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub name: String,
    pub colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(name: impl Into<String>, colors: Vec<Rgb>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }
}

/// Registry of palettes, fixed after startup.
#[derive(Debug, Clone, Default)]
pub struct PaletteTable {
    palettes: BTreeMap<String, Palette>,
}

impl PaletteTable {
    /// Table containing only the built-in palettes.
    pub fn builtin() -> Self {
        let mut table = Self::default();
        table.register(Palette::new(
            "cosmic",
            vec![
                Rgb(0xFF, 0xFF, 0xFF), // white
                Rgb(0xFF, 0xD7, 0x00), // gold
                Rgb(0xAD, 0xD8, 0xE6), // light blue
                Rgb(0xFF, 0x63, 0x47), // tomato
            ],
        ));
        table.register(Palette::new(
            "sunset",
            vec![
                Rgb(0xFF, 0x45, 0x00), // orange red
                Rgb(0xFF, 0x8C, 0x00), // dark orange
                Rgb(0xFF, 0xD7, 0x00), // gold
                Rgb(0xDA, 0x70, 0xD6), // orchid
            ],
        ));
        table.register(Palette::new(
            "ocean",
            vec![
                Rgb(0x00, 0xBF, 0xFF), // deep sky blue
                Rgb(0x20, 0xB2, 0xAA), // light sea green
                Rgb(0xAF, 0xEE, 0xEE), // pale turquoise
                Rgb(0xF0, 0xFF, 0xFF), // azure
            ],
        ));
        table.register(Palette::new(
            "monochrome",
            vec![
                Rgb(0xFF, 0xFF, 0xFF), // white
                Rgb(0xF5, 0xF5, 0xF5), // white smoke
                Rgb(0xDC, 0xDC, 0xDC), // gainsboro
                Rgb(0xC0, 0xC0, 0xC0), // silver
            ],
        ));
        table
    }

    /// Register a palette, replacing any existing one with the same name.
    pub fn register(&mut self, palette: Palette) {
        self.palettes.insert(palette.name.clone(), palette);
    }

    /// Look up a palette by name.
    pub fn lookup(&self, name: &str) -> Result<&Palette, UnknownPalette> {
        self.palettes
            .get(name)
            .ok_or_else(|| UnknownPalette(name.to_string()))
    }

    /// Registered names in sorted order, for cycling in the UI.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let table = PaletteTable::builtin();
        let cosmic = table.lookup("cosmic").unwrap();
        assert_eq!(cosmic.colors.len(), 4);
        assert_eq!(cosmic.colors[1], Rgb(255, 215, 0));
        assert!(table.lookup("sunset").is_ok());
        assert!(table.lookup("ocean").is_ok());
        assert!(table.lookup("monochrome").is_ok());
    }

    #[test]
    fn test_unknown_palette() {
        let table = PaletteTable::builtin();
        assert_eq!(
            table.lookup("lava"),
            Err(UnknownPalette("lava".to_string()))
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut table = PaletteTable::builtin();
        table.register(Palette::new("cosmic", vec![Rgb(1, 2, 3)]));
        assert_eq!(table.lookup("cosmic").unwrap().colors, vec![Rgb(1, 2, 3)]);
    }

    #[test]
    fn test_names_sorted() {
        let table = PaletteTable::builtin();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["cosmic", "monochrome", "ocean", "sunset"]);
    }
}
