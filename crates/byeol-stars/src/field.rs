//! The star field: burst scheduling and expiry.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use byeol_core::{Palette, PaletteTable, StarsConfig, UnknownPalette};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::particle::{ActiveParticle, Particle};

/// End offsets are drawn uniformly from this range, in percent of half the
/// viewport.
const END_OFFSET_RANGE: std::ops::RangeInclusive<f32> = -100.0..=100.0;

/// Errors surfaced by the star field state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The requested palette is not registered.
    #[error(transparent)]
    UnknownPalette(#[from] UnknownPalette),
    /// `start` was called while bursts were already being produced.
    #[error("star field is already running")]
    AlreadyRunning,
    /// `stop` or `reconfigure` was called on an idle field.
    #[error("star field is not running")]
    NotRunning,
}

/// A scheduled one-shot removal of a single star. Ordered by due time,
/// then id, so coinciding expiries fire in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Expiry {
    due_ms: u64,
    id: u64,
}

/// Active burst production state.
#[derive(Debug, Clone)]
struct Run {
    config: StarsConfig,
    palette: Palette,
    next_burst_ms: u64,
}

/// Owns the set of live stars, creates bursts on a timer and retires each
/// star one lifetime after its creation.
///
/// The field is idle until [`start`](Self::start) and is driven by
/// [`advance`](Self::advance) from the application's frame clock; all
/// scheduling state lives here and nothing runs between clock readings.
/// Each field owns its own id counter and RNG, so independent instances
/// never share state.
#[derive(Debug)]
pub struct StarField {
    palettes: PaletteTable,
    stars: Vec<ActiveParticle>,
    expiries: BinaryHeap<Reverse<Expiry>>,
    run: Option<Run>,
    next_id: u64,
    now_ms: u64,
    rng: StdRng,
}

impl StarField {
    /// Create an idle field drawing colors from `palettes`.
    pub fn new(palettes: PaletteTable) -> Self {
        Self::with_rng(palettes, StdRng::from_entropy())
    }

    /// Create an idle field with a fixed RNG seed, for deterministic runs.
    pub fn with_seed(palettes: PaletteTable, seed: u64) -> Self {
        Self::with_rng(palettes, StdRng::seed_from_u64(seed))
    }

    fn with_rng(palettes: PaletteTable, rng: StdRng) -> Self {
        Self {
            palettes,
            stars: Vec::new(),
            expiries: BinaryHeap::new(),
            run: None,
            next_id: 0,
            now_ms: 0,
            rng,
        }
    }

    /// Whether bursts are currently being produced.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Begin periodic burst production.
    ///
    /// The first burst fires one interval after the current clock reading.
    pub fn start(&mut self, config: StarsConfig) -> Result<(), FieldError> {
        if self.run.is_some() {
            return Err(FieldError::AlreadyRunning);
        }
        self.run = Some(self.make_run(config)?);
        Ok(())
    }

    /// Swap in new burst parameters without touching live stars.
    ///
    /// Stars already live keep their originally scheduled expiries; only
    /// bursts after this call see the new cadence, size and palette. On
    /// error the previous parameters stay in effect.
    pub fn reconfigure(&mut self, config: StarsConfig) -> Result<(), FieldError> {
        if self.run.is_none() {
            return Err(FieldError::NotRunning);
        }
        self.run = Some(self.make_run(config)?);
        Ok(())
    }

    /// Halt burst production.
    ///
    /// Live stars drain: their scheduled expiries still fire on later clock
    /// advances, so the set empties on its own instead of being cleared.
    pub fn stop(&mut self) -> Result<(), FieldError> {
        if self.run.take().is_none() {
            return Err(FieldError::NotRunning);
        }
        Ok(())
    }

    /// The live set in insertion order. Read-only.
    pub fn snapshot(&self) -> &[ActiveParticle] {
        &self.stars
    }

    /// Advance the clock to `now_ms`, firing every due burst and expiry in
    /// timestamp order; coinciding events resolve expiry-first. Clock
    /// readings that go backwards are ignored.
    pub fn advance(&mut self, now_ms: u64) {
        if now_ms < self.now_ms {
            return;
        }
        loop {
            let next_expiry = self.expiries.peek().map(|r| r.0.due_ms);
            let next_burst = self.run.as_ref().map(|r| r.next_burst_ms);
            match (next_expiry, next_burst) {
                (Some(due), burst) if due <= now_ms && burst.is_none_or(|b| due <= b) => {
                    self.expire_one();
                }
                (_, Some(due)) if due <= now_ms => self.burst(),
                _ => break,
            }
        }
        self.now_ms = now_ms;
    }

    fn make_run(&mut self, config: StarsConfig) -> Result<Run, FieldError> {
        let palette = self.palettes.lookup(&config.palette)?.clone();
        let next_burst_ms = self.now_ms + config.burst_interval_ms();
        Ok(Run {
            config,
            palette,
            next_burst_ms,
        })
    }

    /// Fire the earliest pending expiry, removing exactly the star whose
    /// timer it is. Matching by id means a star created later can never be
    /// removed in place of the one that actually expired.
    fn expire_one(&mut self) {
        if let Some(Reverse(expiry)) = self.expiries.pop() {
            self.stars.retain(|s| s.particle.id != expiry.id);
        }
    }

    /// Produce one burst of stars at the scheduled burst time and schedule
    /// each star's one-shot expiry.
    fn burst(&mut self) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let born_ms = run.next_burst_ms;
        run.next_burst_ms = born_ms + run.config.burst_interval_ms();
        let lifetime_ms = run.config.lifetime_ms();

        for _ in 0..run.config.stars_per_burst {
            let id = self.next_id;
            self.next_id += 1;
            let color = run.palette.colors[self.rng.gen_range(0..run.palette.colors.len())];
            let particle = Particle {
                id,
                end_x: self.rng.gen_range(END_OFFSET_RANGE),
                end_y: self.rng.gen_range(END_OFFSET_RANGE),
                color,
            };
            self.stars.push(ActiveParticle {
                particle,
                born_ms,
                lifetime_ms,
            });
            self.expiries.push(Reverse(Expiry {
                due_ms: born_ms + lifetime_ms,
                id,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use byeol_core::Rgb;

    use super::*;

    fn config(speed_secs: f32, stars_per_burst: u16, palette: &str) -> StarsConfig {
        StarsConfig {
            speed_secs,
            stars_per_burst,
            palette: palette.to_string(),
        }
    }

    fn red_table() -> PaletteTable {
        let mut table = PaletteTable::builtin();
        table.register(Palette::new("red", vec![Rgb(255, 0, 0)]));
        table
    }

    fn live_ids(field: &StarField) -> Vec<u64> {
        field.snapshot().iter().map(|s| s.particle.id).collect()
    }

    #[test]
    fn test_start_twice_fails() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 1);
        field.start(config(5.0, 7, "cosmic")).unwrap();
        assert_eq!(
            field.start(config(5.0, 7, "cosmic")),
            Err(FieldError::AlreadyRunning)
        );
    }

    #[test]
    fn test_stop_and_reconfigure_require_running() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 1);
        assert_eq!(field.stop(), Err(FieldError::NotRunning));
        assert_eq!(
            field.reconfigure(config(5.0, 7, "cosmic")),
            Err(FieldError::NotRunning)
        );
    }

    #[test]
    fn test_restart_after_stop() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 1);
        field.start(config(5.0, 7, "cosmic")).unwrap();
        field.stop().unwrap();
        assert!(field.start(config(5.0, 7, "cosmic")).is_ok());
        assert!(field.is_running());
    }

    #[test]
    fn test_unknown_palette_is_surfaced() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 1);
        assert_eq!(
            field.start(config(5.0, 7, "lava")),
            Err(FieldError::UnknownPalette(UnknownPalette(
                "lava".to_string()
            )))
        );
        // a failed start leaves the field idle
        assert!(!field.is_running());

        field.start(config(5.0, 7, "cosmic")).unwrap();
        assert!(matches!(
            field.reconfigure(config(5.0, 7, "lava")),
            Err(FieldError::UnknownPalette(_))
        ));
        // a failed reconfigure keeps the old parameters running
        assert!(field.is_running());
        let interval = config(5.0, 7, "cosmic").burst_interval_ms();
        field.advance(interval);
        assert_eq!(field.snapshot().len(), 7);
    }

    #[test]
    fn test_burst_count_after_k_intervals() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 2);
        let cfg = config(5.0, 3, "cosmic");
        let interval = cfg.burst_interval_ms();
        field.start(cfg).unwrap();
        // 4 intervals elapse; the 5 s lifetime means nothing expires yet
        field.advance(4 * interval);
        assert_eq!(field.snapshot().len(), 4 * 3);
    }

    #[test]
    fn test_ids_unique_and_insertion_ordered() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 3);
        let cfg = config(5.0, 5, "cosmic");
        let interval = cfg.burst_interval_ms();
        field.start(cfg).unwrap();
        field.advance(3 * interval);

        let ids = live_ids(&field);
        assert_eq!(ids.len(), 15);
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        // ascending ids == insertion order, and none repeat
        assert_eq!(ids, deduped);
    }

    #[test]
    fn test_ids_not_reused_across_restart() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 4);
        let cfg = config(1.0, 2, "cosmic");
        let interval = cfg.burst_interval_ms();
        field.start(cfg.clone()).unwrap();
        field.advance(interval);
        let first = live_ids(&field);
        assert_eq!(first.len(), 2);

        field.stop().unwrap();
        field.advance(interval + cfg.lifetime_ms());
        assert!(field.snapshot().is_empty());

        field.start(cfg.clone()).unwrap();
        field.advance(interval + cfg.lifetime_ms() + interval);
        let second = live_ids(&field);
        assert_eq!(second.len(), 2);
        assert!(first.iter().all(|id| !second.contains(id)));
    }

    #[test]
    fn test_expiry_removes_only_the_due_star() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 5);
        // 200 ms interval, 1 s lifetime
        field.start(config(1.0, 1, "cosmic")).unwrap();
        field.advance(1000);
        assert_eq!(field.snapshot().len(), 5);
        let first_id = field.snapshot()[0].particle.id;

        field.stop().unwrap();
        field.advance(1200); // the first star's lifetime has fully elapsed
        let remaining = live_ids(&field);
        assert!(!remaining.contains(&first_id));
        assert_eq!(remaining.len(), 4); // no bystanders removed
    }

    #[test]
    fn test_stop_drains_instead_of_clearing() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 6);
        field.start(config(1.0, 1, "cosmic")).unwrap();
        field.advance(1000);
        field.stop().unwrap();

        // stopping leaves the live set intact...
        assert_eq!(field.snapshot().len(), 5);
        // ...and the scheduled expiries empty it over time
        field.advance(1400);
        assert_eq!(field.snapshot().len(), 3);
        field.advance(2000);
        assert!(field.snapshot().is_empty());
    }

    #[test]
    fn test_single_red_star_lifecycle() {
        let mut field = StarField::with_seed(red_table(), 7);
        field.start(config(1.0, 1, "red")).unwrap();

        field.advance(200); // first burst tick
        assert_eq!(field.snapshot().len(), 1);
        assert_eq!(field.snapshot()[0].particle.color, Rgb(255, 0, 0));
        let id = field.snapshot()[0].particle.id;

        field.stop().unwrap();
        field.advance(1200); // one full lifetime past creation
        assert!(field.snapshot().iter().all(|s| s.particle.id != id));
        assert!(field.snapshot().is_empty());
    }

    #[test]
    fn test_reconfigure_keeps_scheduled_expiries() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 8);
        // 50 ms interval, 10 s lifetime
        field.start(config(10.0, 1, "cosmic")).unwrap();
        field.advance(100);
        let old_ids = live_ids(&field);
        assert_eq!(old_ids.len(), 2);

        // 200 ms interval, 1 s lifetime from here on
        field.reconfigure(config(1.0, 1, "cosmic")).unwrap();
        field.advance(1500);

        // stars live at the reconfigure keep their original 10 s expiries
        for id in &old_ids {
            assert!(field.snapshot().iter().any(|s| s.particle.id == *id));
        }
        // while stars from the new cadence already expire after 1 s: bursts
        // at 300 and 500 are gone by 1500, bursts at 700..=1500 remain
        assert_eq!(field.snapshot().len(), old_ids.len() + 5);

        field.advance(10_100);
        // the old stars expired at their original times
        for id in &old_ids {
            assert!(field.snapshot().iter().all(|s| s.particle.id != *id));
        }
    }

    #[test]
    fn test_reconfigure_changes_burst_cadence() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 9);
        field.start(config(10.0, 1, "cosmic")).unwrap();
        field.advance(100);
        assert_eq!(field.snapshot().len(), 2);

        field.reconfigure(config(10.0, 4, "cosmic")).unwrap();
        field.advance(150); // one new-cadence burst at 150
        assert_eq!(field.snapshot().len(), 2 + 4);
    }

    #[test]
    fn test_reconfigure_switches_palette_for_new_stars_only() {
        let mut field = StarField::with_seed(red_table(), 10);
        field.start(config(10.0, 2, "red")).unwrap();
        field.advance(50);
        assert!(
            field
                .snapshot()
                .iter()
                .all(|s| s.particle.color == Rgb(255, 0, 0))
        );

        field.reconfigure(config(10.0, 2, "monochrome")).unwrap();
        field.advance(100);
        let mono = PaletteTable::builtin()
            .lookup("monochrome")
            .unwrap()
            .clone();
        let new_stars = &field.snapshot()[2..];
        assert_eq!(new_stars.len(), 2);
        assert!(new_stars.iter().all(|s| mono.colors.contains(&s.particle.color)));
        // the stars created before the switch keep their color
        assert_eq!(field.snapshot()[0].particle.color, Rgb(255, 0, 0));
    }

    #[test]
    fn test_offsets_and_colors_within_bounds() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 11);
        field.start(config(1.0, 20, "ocean")).unwrap();
        field.advance(800);
        assert_eq!(field.snapshot().len(), 80);

        let ocean = PaletteTable::builtin().lookup("ocean").unwrap().clone();
        for star in field.snapshot() {
            assert!((-100.0..=100.0).contains(&star.particle.end_x));
            assert!((-100.0..=100.0).contains(&star.particle.end_y));
            assert!(ocean.colors.contains(&star.particle.color));
        }
    }

    #[test]
    fn test_expiry_fires_before_coinciding_burst() {
        // 1 s lifetime, 200 ms interval: the star born at 200 expires at
        // 1200, the same instant a burst fires.
        let mut field = StarField::with_seed(red_table(), 12);
        field.start(config(1.0, 1, "red")).unwrap();
        field.advance(200);
        let first = field.snapshot()[0].particle.id;

        field.advance(1200);
        // six bursts have fired, the first star is gone again
        assert_eq!(field.snapshot().len(), 5);
        assert!(field.snapshot().iter().all(|s| s.particle.id != first));
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 13);
        field.start(config(1.0, 1, "cosmic")).unwrap();
        field.advance(400);
        assert_eq!(field.snapshot().len(), 2);

        field.advance(100); // ignored
        assert_eq!(field.snapshot().len(), 2);
        field.advance(600); // no double-fired bursts after the bad reading
        assert_eq!(field.snapshot().len(), 3);
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut field = StarField::with_seed(PaletteTable::builtin(), 14);
        field.start(config(5.0, 7, "cosmic")).unwrap();
        field.advance(500);
        let before: Vec<u64> = live_ids(&field);
        let _ = field.snapshot();
        let _ = field.snapshot();
        assert_eq!(live_ids(&field), before);
    }
}
