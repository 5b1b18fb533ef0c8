//! Pitch modulation source.
//!
//! The "underwater" wobble is a sine LFO on the pitch. Its phase is derived
//! from a sample counter rather than from a wall clock, so a given input
//! always renders to the same output regardless of how the host schedules
//! the audio callback.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::resources::sine;

/// Default modulation depth in semitones.
pub const DEFAULT_DEPTH: f32 = 4.0;

/// Default modulation rate in Hz, one radian per 20 ms.
pub const DEFAULT_RATE_HZ: f32 = 50.0 / core::f32::consts::TAU;

#[derive(Debug, Clone)]
pub struct ModulationClock {
    sample_count: u64,
    increment: f64,
    depth: f32,
}

impl ModulationClock {
    pub fn new(sample_rate_hz: f32, rate_hz: f32, depth: f32) -> Self {
        Self {
            sample_count: 0,
            increment: rate_hz as f64 / sample_rate_hz as f64,
            depth,
        }
    }

    /// Restarts the oscillator at phase zero.
    pub fn reset(&mut self) {
        self.sample_count = 0;
    }

    /// Frames elapsed since construction or the last [`reset`](Self::reset).
    #[inline]
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Normalized phase `offset` frames ahead of the current position.
    #[inline]
    pub fn phase_at(&self, offset: usize) -> f32 {
        let cycles = (self.sample_count + offset as u64) as f64 * self.increment;
        cycles.fract() as f32
    }

    /// Pitch offset in semitones, within `-depth..=depth`, `offset` frames
    /// ahead of the current position. Does not advance the clock.
    #[inline]
    pub fn semitones_at(&self, offset: usize) -> f32 {
        sine(self.phase_at(offset)) * self.depth
    }

    /// Moves the clock forward by a whole block.
    #[inline]
    pub fn advance(&mut self, frames: usize) {
        self.sample_count = self.sample_count.wrapping_add(frames as u64);
    }
}
