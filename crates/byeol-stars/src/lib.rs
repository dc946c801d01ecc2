//! Star lifecycle management.
//!
//! This crate owns the set of live decorative stars: bursts of new stars
//! are produced on a timer derived from the configured animation speed,
//! and every star is retired again one lifetime after its creation. The
//! render layer only ever reads a snapshot of the live set.

mod field;
mod particle;

pub use field::{FieldError, StarField};
pub use particle::{ActiveParticle, Particle};
