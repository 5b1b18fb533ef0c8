//! Effects.
//!
//! [`pitch_shifter`] is the per-sample engine; [`underwater`] drives it once
//! per host block, adds the pitch LFO and mixes dry and wet signals.

pub mod pitch_shifter;
pub mod underwater;
