//! Moving-star scene: stars streaming outward from the screen center.

use byeol_core::Rgb;
use byeol_stars::{ActiveParticle, StarField};
use ratatui::{
    Frame,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::art::STAR_GLYPHS;

/// How often a star's twinkle re-rolls, in milliseconds.
const TWINKLE_FRAME_MS: u64 = 120;

/// Floor brightness so a star never twinkles fully dark mid-flight.
const MIN_BRIGHTNESS: f32 = 0.2;

pub fn render(frame: &mut Frame, field: &StarField, elapsed_ms: u64) {
    let area = frame.area();
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let mut cells: Vec<Option<(char, Color)>> = vec![None; width * height];
    for star in field.snapshot() {
        if let Some((x, y)) = project(star, elapsed_ms, area.width, area.height) {
            cells[y * width + x] = Some(twinkle(star, elapsed_ms));
        }
    }

    let lines: Vec<Line> = (0..height)
        .map(|y| {
            let spans: Vec<Span> = (0..width)
                .map(|x| match cells[y * width + x] {
                    Some((ch, color)) => Span::styled(ch.to_string(), Style::new().fg(color)),
                    None => backdrop_cell(x, y),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Map a star's trajectory to a cell: it starts at the center and reaches
/// `end_x`/`end_y` percent of the half-viewport at full progress. Returns
/// `None` once the star has left the visible area.
fn project(star: &ActiveParticle, now_ms: u64, width: u16, height: u16) -> Option<(usize, usize)> {
    let t = star.progress(now_ms);
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let x = cx + t * (star.particle.end_x / 100.0) * cx;
    let y = cy + t * (star.particle.end_y / 100.0) * cy;
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let (x, y) = (x as usize, y as usize);
    (x < width as usize && y < height as usize).then_some((x, y))
}

/// Pick a glyph and brightness for this frame.
///
/// Twinkle is cosmetic display state: it is re-derived from the star id
/// and the frame number on every draw and never stored on the star. The
/// brightness envelope fades the star in and out over its lifetime.
fn twinkle(star: &ActiveParticle, now_ms: u64) -> (char, Color) {
    let frame_num = (now_ms / TWINKLE_FRAME_MS) as usize;
    let seed = (star.particle.id as usize)
        .wrapping_mul(31)
        .wrapping_add(frame_num.wrapping_mul(17));

    let ch = STAR_GLYPHS[seed % STAR_GLYPHS.len()];
    let flicker = match seed % 3 {
        0 => 0.55,
        1 => 0.8,
        _ => 1.0,
    };
    let envelope = (std::f32::consts::PI * star.progress(now_ms)).sin();
    let Rgb(r, g, b) = star.particle.color.scaled((envelope * flicker).max(MIN_BRIGHTNESS));
    (ch, Color::Rgb(r, g, b))
}

/// Faint static backdrop behind the moving stars.
fn backdrop_cell(x: usize, y: usize) -> Span<'static> {
    let seed = x.wrapping_mul(31).wrapping_add(y.wrapping_mul(17));
    if seed % 100 < 2 {
        Span::styled(".", Style::new().fg(Color::Rgb(50, 50, 70)))
    } else {
        Span::raw(" ")
    }
}

#[cfg(test)]
mod tests {
    use byeol_stars::Particle;

    use super::*;

    fn star(end_x: f32, end_y: f32) -> ActiveParticle {
        ActiveParticle {
            particle: Particle {
                id: 0,
                end_x,
                end_y,
                color: Rgb(255, 255, 255),
            },
            born_ms: 0,
            lifetime_ms: 1000,
        }
    }

    #[test]
    fn test_project_starts_at_center() {
        assert_eq!(project(&star(80.0, -40.0), 0, 80, 24), Some((40, 12)));
    }

    #[test]
    fn test_project_reaches_edge_at_full_progress() {
        // +100% lands exactly on the right edge, which is off-screen
        assert_eq!(project(&star(100.0, 0.0), 1000, 80, 24), None);
        // -100% lands on the left edge cell
        assert_eq!(project(&star(-100.0, 0.0), 1000, 80, 24), Some((0, 12)));
        // halfway through a +100% trajectory is three quarters across
        assert_eq!(project(&star(100.0, 0.0), 500, 80, 24), Some((60, 12)));
    }

    #[test]
    fn test_twinkle_is_deterministic_per_frame() {
        let s = star(10.0, 10.0);
        assert_eq!(twinkle(&s, 500), twinkle(&s, 500));
    }
}
