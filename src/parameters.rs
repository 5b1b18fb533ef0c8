//! User parameters shared between the host and the audio thread.
//!
//! The host writes from its control thread, the processor reads once per
//! block. Values are `f32` bit patterns in relaxed atomics: no locks, no
//! blocking, no allocation on either side.

use core::sync::atomic::{AtomicU32, Ordering};

#[allow(unused_imports)]
use num_traits::float::Float;

/// Static description of a host-visible parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    /// Stable identifier used for host automation and saved state.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    /// Quantization step, `0.0` for continuous parameters.
    pub step: f32,
}

impl ParameterSpec {
    /// Clamps `value` into range and snaps it to the step grid.
    ///
    /// NaN passes through untouched; what to do with it is up to the caller.
    pub fn constrain(&self, value: f32) -> f32 {
        let value = value.clamp(self.min, self.max);

        if self.step > 0.0 {
            let steps = ((value - self.min) / self.step).round();
            (self.min + steps * self.step).clamp(self.min, self.max)
        } else {
            value
        }
    }
}

/// Pitch offset in semitones.
pub const PITCH: ParameterSpec = ParameterSpec {
    id: "PITCH",
    name: "Pitch",
    min: -12.0,
    max: 12.0,
    default: 0.0,
    step: 0.0,
};

/// Output gain, linear.
pub const GAIN: ParameterSpec = ParameterSpec {
    id: "GAIN",
    name: "Gain",
    min: 0.0,
    max: 1.0,
    default: 1.0,
    step: 0.01,
};

/// Plain copy of the parameter values, used for saving and restoring state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterSnapshot {
    /// Pitch in semitones. Default is `0.0`.
    pub pitch: f32,
    /// Gain in the range from `0.0` to `1.0`. Default is `1.0`.
    pub gain: f32,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self {
            pitch: PITCH.default,
            gain: GAIN.default,
        }
    }
}

#[derive(Debug)]
pub struct Parameters {
    pitch: AtomicU32,
    gain: AtomicU32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new()
    }
}

impl Parameters {
    pub fn new() -> Self {
        Self::from_snapshot(ParameterSnapshot::default())
    }

    pub fn from_snapshot(snapshot: ParameterSnapshot) -> Self {
        let parameters = Self {
            pitch: AtomicU32::new(PITCH.default.to_bits()),
            gain: AtomicU32::new(GAIN.default.to_bits()),
        };
        parameters.restore(snapshot);

        parameters
    }

    /// Sets the pitch, clamped to the parameter range.
    ///
    /// NaN is ignored and the previous pitch is kept.
    #[inline]
    pub fn set_pitch(&self, semitones: f32) {
        if semitones.is_nan() {
            return;
        }

        self.pitch
            .store(PITCH.constrain(semitones).to_bits(), Ordering::Relaxed);
    }

    /// Sets the gain, clamped to `0.0..=1.0` in steps of `0.01`.
    ///
    /// NaN is ignored and the previous gain is kept.
    #[inline]
    pub fn set_gain(&self, gain: f32) {
        if gain.is_nan() {
            return;
        }

        self.gain
            .store(GAIN.constrain(gain).to_bits(), Ordering::Relaxed);
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        f32::from_bits(self.pitch.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn gain(&self) -> f32 {
        f32::from_bits(self.gain.load(Ordering::Relaxed))
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            pitch: self.pitch(),
            gain: self.gain(),
        }
    }

    pub fn restore(&self, snapshot: ParameterSnapshot) {
        self.set_pitch(snapshot.pitch);
        self.set_gain(snapshot.gain);
    }
}
