//! Effect configuration.
//!
//! These settings are fixed for the lifetime of a prepared processor. Values a
//! user changes while audio runs live in [`Parameters`](crate::Parameters).

use crate::error::{Error, Result};
use crate::modulation::{DEFAULT_DEPTH, DEFAULT_RATE_HZ};

/// Shortest supported crossfade window.
pub const MIN_WINDOW_MS: f32 = 10.0;

/// Longest supported crossfade window.
pub const MAX_WINDOW_MS: f32 = 100.0;

/// How the user pitch parameter and the internal LFO combine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PitchMode {
    /// The LFO wobbles around the user pitch.
    #[default]
    Additive,

    /// The LFO replaces the user pitch, which is then ignored.
    Override,
}

impl PitchMode {
    #[inline]
    pub fn combine(self, user_semitones: f32, lfo_semitones: f32) -> f32 {
        match self {
            PitchMode::Additive => user_semitones + lfo_semitones,
            PitchMode::Override => lfo_semitones,
        }
    }
}

/// Channel counts on the main input and output buses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusLayout {
    pub inputs: usize,
    pub outputs: usize,
}

impl BusLayout {
    pub const MONO: Self = Self {
        inputs: 1,
        outputs: 1,
    };

    pub const STEREO: Self = Self {
        inputs: 2,
        outputs: 2,
    };

    /// Mono or stereo, with the same channel count in and out.
    pub fn is_supported(&self) -> bool {
        matches!(self.outputs, 1 | 2) && self.inputs == self.outputs
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.outputs
    }
}

impl Default for BusLayout {
    fn default() -> Self {
        Self::STEREO
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Crossfade window in milliseconds, between `10.0` and `100.0`. Default is `40.0`.
    ///
    /// Sets the latency (half a window) and the length of the per-channel
    /// history buffer.
    pub window_ms: f32,

    /// LFO depth in semitones. Default is `4.0`.
    pub modulation_depth: f32,

    /// LFO rate in Hz. Default is about `7.96`.
    pub modulation_rate_hz: f32,

    /// Combination of user pitch and LFO. Default is [`PitchMode::Additive`].
    pub pitch_mode: PitchMode,

    /// Bus layout. Default is stereo.
    pub layout: BusLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_ms: 40.0,
            modulation_depth: DEFAULT_DEPTH,
            modulation_rate_hz: DEFAULT_RATE_HZ,
            pitch_mode: PitchMode::default(),
            layout: BusLayout::default(),
        }
    }
}

impl Config {
    pub fn with_window_ms(mut self, window_ms: f32) -> Self {
        self.window_ms = window_ms;
        self
    }

    pub fn with_modulation(mut self, depth: f32, rate_hz: f32) -> Self {
        self.modulation_depth = depth;
        self.modulation_rate_hz = rate_hz;
        self
    }

    /// Disables the LFO, leaving only the user pitch.
    pub fn without_modulation(self) -> Self {
        self.with_modulation(0.0, 0.0)
    }

    pub fn with_pitch_mode(mut self, pitch_mode: PitchMode) -> Self {
        self.pitch_mode = pitch_mode;
        self
    }

    pub fn with_layout(mut self, layout: BusLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_WINDOW_MS..=MAX_WINDOW_MS).contains(&self.window_ms) {
            return Err(Error::InvalidWindow(self.window_ms));
        }

        let depth = self.modulation_depth;
        let rate_hz = self.modulation_rate_hz;
        if !depth.is_finite() || !rate_hz.is_finite() || depth < 0.0 || rate_hz < 0.0 {
            return Err(Error::InvalidModulation { depth, rate_hz });
        }

        if !self.layout.is_supported() {
            return Err(Error::UnsupportedLayout {
                inputs: self.layout.inputs,
                outputs: self.layout.outputs,
            });
        }

        Ok(())
    }
}
