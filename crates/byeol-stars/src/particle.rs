//! Star particle data.

use byeol_core::Rgb;

/// A single decorative star with a fixed trajectory and color.
///
/// All fields are set at creation and never mutated. `id` is assigned from
/// a counter owned by the creating [`StarField`](crate::StarField) and is
/// never reused within that field's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Monotonically assigned identifier.
    pub id: u64,
    /// Horizontal displacement target, in percent of half the viewport.
    pub end_x: f32,
    /// Vertical displacement target, in percent of half the viewport.
    pub end_y: f32,
    /// Color drawn from the active palette at creation.
    pub color: Rgb,
}

/// A live star paired with the timing needed to animate it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveParticle {
    pub particle: Particle,
    /// Clock reading at creation, in milliseconds.
    pub born_ms: u64,
    /// How long the star lives, fixed at creation.
    pub lifetime_ms: u64,
}

impl ActiveParticle {
    /// Animation progress in [0, 1] at the given clock reading.
    pub fn progress(&self, now_ms: u64) -> f32 {
        if self.lifetime_ms == 0 {
            return 1.0;
        }
        (now_ms.saturating_sub(self.born_ms) as f32 / self.lifetime_ms as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamps_to_unit_range() {
        let star = ActiveParticle {
            particle: Particle {
                id: 0,
                end_x: 0.0,
                end_y: 0.0,
                color: Rgb(255, 255, 255),
            },
            born_ms: 1000,
            lifetime_ms: 2000,
        };
        assert_eq!(star.progress(500), 0.0); // before birth
        assert_eq!(star.progress(1000), 0.0);
        assert_eq!(star.progress(2000), 0.5);
        assert_eq!(star.progress(3000), 1.0);
        assert_eq!(star.progress(9000), 1.0); // past expiry
    }
}
