//! An astronaut adrift near a black hole.
//!
//! The backdrop is computed per cell (accretion rings around the hole,
//! sparse static stars elsewhere); the astronaut art is blitted on top
//! and bobs slowly with the clock.

use std::f32::consts::TAU;

use ratatui::{
    Frame,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::art::ASTRONAUT;

/// Fraction of the viewport where the hole sits.
const HOLE_X: f32 = 0.72;
const HOLE_Y: f32 = 0.42;

/// Where the astronaut drifts around, as viewport fractions.
const DRIFT_X: f32 = 0.24;
const DRIFT_Y: f32 = 0.28;

pub fn render(frame: &mut Frame, elapsed_ms: u64) {
    let area = frame.area();
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let mut cells: Vec<Span> = (0..width * height)
        .map(|i| {
            let (x, y) = ((i % width) as u16, (i / width) as u16);
            match hole_cell(x, y, area.width, area.height, elapsed_ms) {
                Some((ch, color)) => Span::styled(ch, Style::new().fg(color)),
                None => backdrop_cell(x, y),
            }
        })
        .collect();

    let (ox, oy) = astronaut_origin(area.width, area.height, elapsed_ms);
    for (row, line) in ASTRONAUT.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let x = ox + col as i32;
            let y = oy + row as i32;
            if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                continue;
            }
            let color = if ch == 'o' {
                Color::Rgb(150, 220, 255) // visor light
            } else {
                Color::Rgb(225, 225, 235)
            };
            cells[y as usize * width + x as usize] =
                Span::styled(ch.to_string(), Style::new().fg(color));
        }
    }

    let lines: Vec<Line> = cells
        .chunks(width)
        .map(|row| Line::from(row.to_vec()))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// The black hole: a dark core, a bright photon ring and a flattened
/// accretion glow fading outward.
fn hole_cell(
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    elapsed_ms: u64,
) -> Option<(&'static str, Color)> {
    let cx = width as f32 * HOLE_X;
    let cy = height as f32 * HOLE_Y;
    let dx = x as f32 - cx;
    let dy = (y as f32 - cy) * 2.0; // cell aspect
    let r = (dx * dx + dy * dy).sqrt();

    let core = ((width as f32 * 0.5).min(height as f32) * 0.30).max(2.0);
    if r < core {
        return Some(("█", Color::Rgb(8, 6, 12)));
    }
    if r < core * 1.18 {
        let pulse = ((elapsed_ms as f32 / 900.0).sin()) * 0.12 + 0.88;
        let v = (235.0 * pulse) as u8;
        return Some(("▓", Color::Rgb(v, (185.0 * pulse) as u8, 80)));
    }

    // flattened disk glow
    let re = (dx * dx + (dy * 1.9) * (dy * 1.9)).sqrt();
    let edge = core * 2.6;
    if re < edge {
        let glow = 1.0 - (re - core).max(0.0) / (edge - core);
        let swirl = ((dy.atan2(dx) * 2.0) + elapsed_ms as f32 / 1400.0).sin() * 0.2 + 0.8;
        let heat = glow * swirl;
        let ch = if heat > 0.6 {
            "▒"
        } else if heat > 0.35 {
            "░"
        } else if heat > 0.18 {
            "·"
        } else {
            return None;
        };
        let color = Color::Rgb(
            (120.0 + 135.0 * heat) as u8,
            (40.0 + 130.0 * heat) as u8,
            (30.0 + 40.0 * heat) as u8,
        );
        return Some((ch, color));
    }
    None
}

/// Slow figure-of-sorts bob around the drift anchor.
fn astronaut_origin(width: u16, height: u16, elapsed_ms: u64) -> (i32, i32) {
    let t = elapsed_ms as f32;
    let x = width as f32 * DRIFT_X + (t / 7300.0 * TAU).sin() * 3.0;
    let y = height as f32 * DRIFT_Y + (t / 5100.0 * TAU).sin() * 1.8;
    (x as i32, y as i32)
}

/// Sparse static stars behind everything.
fn backdrop_cell(x: u16, y: u16) -> Span<'static> {
    let seed = (x as usize)
        .wrapping_mul(31)
        .wrapping_add((y as usize).wrapping_mul(17));
    if seed % 100 < 2 {
        Span::styled(".", Style::new().fg(Color::Rgb(60, 60, 85)))
    } else {
        Span::raw(" ")
    }
}
