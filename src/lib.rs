#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod fx;
pub mod modulation;
pub mod parameters;
pub mod resources;
pub mod utils;

pub use config::{BusLayout, Config, PitchMode};
pub use error::{Error, Result};
pub use fx::pitch_shifter::PitchShifter;
pub use fx::underwater::UnderwaterProcessor;
pub use parameters::{ParameterSnapshot, Parameters};

/// Sample rate context for DSP calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRate {
    /// Sample rate in Hz
    pub sample_rate_hz: f32,
}

impl SampleRate {
    /// Create a new sample rate context.
    ///
    /// Returns [`Error::InvalidSampleRate`] for non-finite or non-positive rates.
    pub fn new(sample_rate_hz: f32) -> Result<Self> {
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(Error::InvalidSampleRate(sample_rate_hz));
        }

        Ok(Self { sample_rate_hz })
    }

    /// Number of whole samples covering `ms` milliseconds, rounded to nearest.
    #[inline]
    pub fn samples_for_ms(&self, ms: f32) -> usize {
        (ms * 0.001 * self.sample_rate_hz + 0.5) as usize
    }
}
