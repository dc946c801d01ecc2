//! Star field tuning parameters.

use serde::{Deserialize, Serialize};

/// Shortest star lifetime the speed control allows, in seconds.
pub const MIN_SPEED_SECS: f32 = 1.0;
/// Longest star lifetime the speed control allows, in seconds.
pub const MAX_SPEED_SECS: f32 = 10.0;
/// Step used by the speed control.
pub const SPEED_STEP: f32 = 0.5;
/// Bounds for the density control.
pub const MIN_STARS_PER_BURST: u16 = 1;
pub const MAX_STARS_PER_BURST: u16 = 20;

/// Burst interval endpoints in milliseconds.
const MIN_INTERVAL_MS: f32 = 50.0;
const MAX_INTERVAL_MS: f32 = 200.0;

/// User-tunable parameters for the star field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarsConfig {
    /// Seconds each star stays alive and animates for.
    pub speed_secs: f32,
    /// Stars created on each burst tick.
    pub stars_per_burst: u16,
    /// Name of the active palette.
    pub palette: String,
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            speed_secs: 5.0,
            stars_per_burst: 7,
            palette: "cosmic".to_string(),
        }
    }
}

impl StarsConfig {
    /// Interval between bursts, interpolated between the endpoints so that
    /// perceived density stays roughly constant across lifetimes: a 1 s
    /// lifetime gets a 200 ms interval, a 10 s lifetime gets 50 ms.
    pub fn burst_interval_ms(&self) -> u64 {
        let range = MAX_SPEED_SECS - MIN_SPEED_SECS;
        let fraction = ((self.speed_secs - MIN_SPEED_SECS) / range).clamp(0.0, 1.0);
        (MAX_INTERVAL_MS - fraction * (MAX_INTERVAL_MS - MIN_INTERVAL_MS)).round() as u64
    }

    /// How long each star lives, in milliseconds.
    pub fn lifetime_ms(&self) -> u64 {
        (self.speed_secs.max(0.0) * 1000.0).round() as u64
    }

    /// Clamp all values into their control ranges.
    pub fn clamped(mut self) -> Self {
        self.speed_secs = self.speed_secs.clamp(MIN_SPEED_SECS, MAX_SPEED_SECS);
        self.stars_per_burst = self
            .stars_per_burst
            .clamp(MIN_STARS_PER_BURST, MAX_STARS_PER_BURST);
        self
    }

    /// Lengthen the star lifetime by one control step.
    pub fn slower(&mut self) {
        self.speed_secs = (self.speed_secs + SPEED_STEP).min(MAX_SPEED_SECS);
    }

    /// Shorten the star lifetime by one control step.
    pub fn faster(&mut self) {
        self.speed_secs = (self.speed_secs - SPEED_STEP).max(MIN_SPEED_SECS);
    }

    /// One more star per burst.
    pub fn denser(&mut self) {
        self.stars_per_burst = (self.stars_per_burst + 1).min(MAX_STARS_PER_BURST);
    }

    /// One fewer star per burst.
    pub fn sparser(&mut self) {
        self.stars_per_burst = self.stars_per_burst.saturating_sub(1).max(MIN_STARS_PER_BURST);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_speed(speed_secs: f32) -> StarsConfig {
        StarsConfig {
            speed_secs,
            ..Default::default()
        }
    }

    #[test]
    fn test_interval_endpoints() {
        assert_eq!(with_speed(1.0).burst_interval_ms(), 200);
        assert_eq!(with_speed(10.0).burst_interval_ms(), 50);
    }

    #[test]
    fn test_interval_shrinks_as_lifetime_grows() {
        let mut last = with_speed(MIN_SPEED_SECS).burst_interval_ms();
        let mut speed = MIN_SPEED_SECS + SPEED_STEP;
        while speed <= MAX_SPEED_SECS {
            let interval = with_speed(speed).burst_interval_ms();
            assert!(interval <= last, "interval grew at speed {speed}");
            last = interval;
            speed += SPEED_STEP;
        }
    }

    #[test]
    fn test_lifetime() {
        assert_eq!(with_speed(1.0).lifetime_ms(), 1000);
        assert_eq!(with_speed(2.5).lifetime_ms(), 2500);
        assert_eq!(with_speed(10.0).lifetime_ms(), 10_000);
    }

    #[test]
    fn test_clamped() {
        let config = StarsConfig {
            speed_secs: 42.0,
            stars_per_burst: 0,
            palette: "cosmic".to_string(),
        }
        .clamped();
        assert_eq!(config.speed_secs, MAX_SPEED_SECS);
        assert_eq!(config.stars_per_burst, MIN_STARS_PER_BURST);
    }

    #[test]
    fn test_steppers_clamp_at_bounds() {
        let mut config = with_speed(MAX_SPEED_SECS);
        config.slower();
        assert_eq!(config.speed_secs, MAX_SPEED_SECS);
        config.faster();
        assert_eq!(config.speed_secs, MAX_SPEED_SECS - SPEED_STEP);

        config.stars_per_burst = MAX_STARS_PER_BURST;
        config.denser();
        assert_eq!(config.stars_per_burst, MAX_STARS_PER_BURST);
        config.stars_per_burst = MIN_STARS_PER_BURST;
        config.sparser();
        assert_eq!(config.stars_per_burst, MIN_STARS_PER_BURST);
    }
}
