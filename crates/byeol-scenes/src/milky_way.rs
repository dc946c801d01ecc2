//! Parallax milky-way backdrop.
//!
//! Three layers shift against each other as the pointer (or the arrow
//! keys) moves: the star-dusted sky, the dense tilted band with its
//! colored accents, and the horizon silhouette in front.

use ratatui::{
    Frame,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Maximum cell shift of each layer at full parallax deflection. The
/// ratios make nearer layers move more.
const SKY_SHIFT: f32 = 2.0;
const BAND_SHIFT: f32 = 4.0;
const HORIZON_SHIFT: f32 = 6.0;

/// Rise of the band per column; roughly a 20 degree tilt.
const BAND_SLOPE: f32 = 0.36;

/// Accent colors scattered through the band core.
const BAND_ACCENTS: [Color; 3] = [
    Color::Rgb(160, 32, 240),  // purple
    Color::Rgb(255, 105, 180), // hot pink
    Color::Rgb(255, 192, 203), // pink
];

/// Nebula patches in the sky layer: fractional center, radius, tint.
const NEBULAE: [(f32, f32, f32, Color); 2] = [
    (0.22, 0.28, 0.16, Color::Rgb(110, 55, 130)),
    (0.72, 0.18, 0.12, Color::Rgb(45, 100, 120)),
];

pub fn render(frame: &mut Frame, parallax: (f32, f32), elapsed_ms: u64) {
    let area = frame.area();
    let lines: Vec<Line> = (0..area.height)
        .map(|y| {
            let spans: Vec<Span> = (0..area.width)
                .map(|x| render_cell(x, y, area.width, area.height, parallax, elapsed_ms))
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Render one cell, nearest layer first.
fn render_cell(
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    parallax: (f32, f32),
    elapsed_ms: u64,
) -> Span<'static> {
    if let Some(span) = horizon_cell(x, y, height, parallax) {
        return span;
    }
    if let Some(span) = band_cell(x, y, width, height, parallax, elapsed_ms) {
        return span;
    }
    if let Some(span) = nebula_cell(x, y, width, height, parallax) {
        return span;
    }
    sky_cell(x, y, parallax, elapsed_ms)
}

/// Ground silhouette along the bottom, with a faint glow at the rim.
fn horizon_cell(x: u16, y: u16, height: u16, parallax: (f32, f32)) -> Option<Span<'static>> {
    let xs = x as f32 - parallax.0 * 2.0 * HORIZON_SHIFT;
    let ridge = ((xs * 0.23).sin() + (xs * 0.07).sin()) * 1.1;
    let horizon = height as f32 * 0.85 + parallax.1 * 2.0 * HORIZON_SHIFT + ridge;
    if (y as f32) < horizon {
        return None;
    }
    let color = if (y as f32) < horizon + 1.0 {
        Color::Rgb(38, 32, 62)
    } else {
        Color::Rgb(13, 11, 24)
    };
    Some(Span::styled("█", Style::new().fg(color)))
}

/// The dense tilted band crossing the screen through the center.
fn band_cell(
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    parallax: (f32, f32),
    elapsed_ms: u64,
) -> Option<Span<'static>> {
    let dx = parallax.0 * 2.0 * BAND_SHIFT;
    let dy = parallax.1 * 2.0 * BAND_SHIFT;
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    // signed distance from the band axis, y compressed for cell aspect
    let d = ((y as f32 - dy - cy) - BAND_SLOPE * (x as f32 - dx - cx)) * 0.9;
    let half_width = height as f32 * 0.28;
    if d.abs() > half_width {
        return None;
    }

    let falloff = 1.0 - (d / half_width).powi(2);
    let seed = mix(x as i64 - dx.round() as i64, y as i64 - dy.round() as i64, 13);

    // colored super stars deep in the core
    if falloff > 0.75 && seed % 499 < 2 {
        let accent = BAND_ACCENTS[seed % BAND_ACCENTS.len()];
        return Some(Span::styled("✦", Style::new().fg(accent)));
    }

    if seed % 1000 < (falloff * 180.0) as usize {
        let shimmer = ((elapsed_ms as f32 / 4000.0 + seed as f32 * 0.013).sin()) * 0.15 + 0.85;
        let v = ((150.0 + 70.0 * falloff) * shimmer) as u8;
        let ch = if seed % 11 == 0 {
            "*"
        } else if seed % 3 == 0 {
            "·"
        } else {
            "░"
        };
        let color = Color::Rgb(v, v, v.saturating_add(20));
        return Some(Span::styled(ch, Style::new().fg(color)));
    }
    None
}

/// Soft nebula patches drifting with the sky layer.
fn nebula_cell(x: u16, y: u16, width: u16, height: u16, parallax: (f32, f32)) -> Option<Span<'static>> {
    let xs = (x as f32 - parallax.0 * 2.0 * SKY_SHIFT) / width.max(1) as f32;
    let ys = (y as f32 - parallax.1 * 2.0 * SKY_SHIFT) / height.max(1) as f32;
    for (fx, fy, radius, color) in NEBULAE {
        let dx = xs - fx;
        let dy = (ys - fy) * 2.0; // cell aspect
        let r2 = dx * dx + dy * dy;
        if r2 < radius * radius {
            let density = (1.0 - r2 / (radius * radius)) * 30.0;
            let seed = mix(x as i64, y as i64, 29);
            if seed % 100 < density as usize {
                return Some(Span::styled("░", Style::new().fg(color)));
            }
        }
    }
    None
}

/// Sparse backdrop stars, stable per cell with a slow shimmer.
fn sky_cell(x: u16, y: u16, parallax: (f32, f32), elapsed_ms: u64) -> Span<'static> {
    let dx = (parallax.0 * 2.0 * SKY_SHIFT).round() as i64;
    let dy = (parallax.1 * 2.0 * SKY_SHIFT).round() as i64;
    let seed = mix(x as i64 - dx, y as i64 - dy, 7);
    if seed % 1000 >= 22 {
        return Span::raw(" ");
    }

    let shimmer = ((elapsed_ms as f32 / 2600.0 + seed as f32 * 0.7).sin()) * 0.2 + 0.8;
    let (base, ch) = match seed % 3 {
        0 => (90.0, "·"),
        1 => (140.0, "."),
        _ => (200.0, "+"),
    };
    let v = (base * shimmer) as u8;
    Span::styled(ch, Style::new().fg(Color::Rgb(v, v, v.saturating_add(25))))
}

/// Deterministic per-cell hash, stable across frames.
fn mix(x: i64, y: i64, salt: usize) -> usize {
    (x as usize)
        .wrapping_mul(31)
        .wrapping_add((y as usize).wrapping_mul(17))
        .wrapping_add(salt.wrapping_mul(101))
}
