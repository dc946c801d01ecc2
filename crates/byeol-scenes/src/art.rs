//! Glyph and ASCII-art assets for the scenes.

/// Glyphs used for moving and milky-way stars.
pub const STAR_GLYPHS: &[char] = &['·', '.', '*', '+', '✦', '✧'];

/// The drifting astronaut, drawn over the black-hole backdrop.
pub const ASTRONAUT: [&str; 10] = [
    r"    .----.    ",
    r"   / ____ \   ",
    r"  | /    \ |  ",
    r"  | \____/ |  ",
    r" /|  ____  |\ ",
    r"/ | |  o | | \",
    r"\_| |____| |_/",
    r"  |  |  |  |  ",
    r"  |__|  |__|  ",
    r" (___)  (___) ",
];
