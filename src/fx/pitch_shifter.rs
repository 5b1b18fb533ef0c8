//! Delay-line pitch shifter.
//!
//! Each channel writes its input into a circular history buffer and reads it
//! back through a tap whose speed is the pitch ratio: a ratio of `2.0` reads
//! two buffered samples per input sample and sounds an octave up. Because the
//! tap moves at a different speed than the write pointer, the distance between
//! the two drifts by `1 - ratio` samples per sample. When it has drifted across
//! a whole window it wraps around.
//!
//! To keep that wrap inaudible the shifter runs two taps half a window apart
//! and crossfades them with complementary raised-cosine gains. Whichever tap
//! is about to wrap is silent at that moment, so the output stays continuous
//! for any ratio and any ratio change.
//!
//! # Buffer size and pitch range
//!
//! The history buffer holds `window_size() + 3` samples per channel, with the
//! window derived from a length in milliseconds and the sample rate (40 ms by
//! default, 1764 samples at 44.1 kHz). The window is independent of the ratio:
//! larger shifts only make the taps wrap more often, `|1 - ratio| * sample_rate
//! / window_size` times per second. Ratios are kept within `0.25..=4.0` (two
//! octaves either way, see [`units`](crate::utils::units)), which bounds that
//! wrap rate at three times the window rate.
//!
//! At unison the main tap sits in the middle of the window at full gain, so
//! the output is the input delayed by [`latency()`](PitchShifter::latency)
//! samples, with no interpolation error.

use alloc::boxed::Box;
use alloc::vec::Vec;

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::resources::hann;
use crate::utils::delay_line::DelayLine;
use crate::utils::units::{clamp_ratio, clamp_semitones, semitones_to_ratio};
use crate::utils::{crossfade, sanitize, wrap_phase};
use crate::SampleRate;

/// Smallest window, in samples, regardless of sample rate.
const MIN_WINDOW_SIZE: usize = 4;

/// Per-channel history and tap position.
#[derive(Debug, Clone)]
struct ChannelState {
    line: DelayLine,
    // Position of the main tap within the window, `0.0..1.0`.
    phase: f32,
}

impl ChannelState {
    fn new(window_size: usize) -> Self {
        Self {
            line: DelayLine::new(window_size + 1),
            phase: 0.5,
        }
    }

    fn reset(&mut self) {
        self.line.reset();
        self.phase = 0.5;
    }
}

#[derive(Debug, Clone)]
pub struct PitchShifter {
    channels: Box<[ChannelState]>,
    window_size: usize,

    semitones: f32,
    ratio: f32,
    phase_increment: f32,
}

impl PitchShifter {
    /// Allocates history for `num_channels` channels.
    ///
    /// The window is rounded to an even number of samples so the unison delay
    /// falls on a whole sample.
    pub fn new(sample_rate: &SampleRate, window_ms: f32, num_channels: usize) -> Self {
        let window_size = (sample_rate.samples_for_ms(window_ms).max(MIN_WINDOW_SIZE) + 1) & !1;
        let channels: Vec<ChannelState> = (0..num_channels)
            .map(|_| ChannelState::new(window_size))
            .collect();

        Self {
            channels: channels.into_boxed_slice(),
            window_size,
            semitones: 0.0,
            ratio: 1.0,
            phase_increment: 0.0,
        }
    }

    /// Clears all history and re-centres the taps. Pitch is left as is.
    pub fn reset(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.reset();
        }
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Crossfade window in samples.
    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Delay between input and output at unison, in samples.
    #[inline]
    pub fn latency(&self) -> usize {
        self.window_size / 2
    }

    /// Current pitch offset in semitones, after clamping.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.semitones
    }

    /// Current read speed.
    #[inline]
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Sets the pitch offset for all channels, effective from the next sample.
    ///
    /// Offsets are clamped to ±24 semitones, NaN means unison.
    #[inline]
    pub fn set_pitch(&mut self, semitones: f32) {
        let semitones = clamp_semitones(semitones);

        if semitones != self.semitones {
            self.semitones = semitones;
            self.apply_ratio(semitones_to_ratio(semitones));
        }
    }

    /// Sets the read speed directly.
    ///
    /// Zero, negative and NaN ratios fall back to
    /// [`MIN_RATIO`](crate::utils::units::MIN_RATIO).
    #[inline]
    pub fn set_ratio(&mut self, ratio: f32) {
        let ratio = clamp_ratio(ratio);
        self.semitones = 12.0 * ratio.log2();
        self.apply_ratio(ratio);
    }

    #[inline]
    fn apply_ratio(&mut self, ratio: f32) {
        self.ratio = ratio;
        self.phase_increment = (1.0 - ratio) / self.window_size as f32;
    }

    /// Feeds one input sample into `channel` and returns one shifted sample.
    ///
    /// Non-finite input is stored as silence.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is not below [`num_channels()`](Self::num_channels).
    #[inline]
    pub fn process_sample(&mut self, x: f32, channel: usize) -> f32 {
        let window = self.window_size as f32;
        let state = &mut self.channels[channel];

        state.line.write(sanitize(x));

        let phase_a = state.phase;
        let phase_b = if phase_a >= 0.5 {
            phase_a - 0.5
        } else {
            phase_a + 0.5
        };

        let a = state.line.read_with_delay_frac(1.0 + phase_a * window);
        let b = state.line.read_with_delay_frac(1.0 + phase_b * window);

        state.phase = wrap_phase(phase_a + self.phase_increment);

        crossfade(a, b, hann(phase_b))
    }

    /// Replaces a block of `channel` samples with their shifted version.
    #[inline]
    pub fn process(&mut self, channel: usize, in_out: &mut [f32]) {
        for sample in in_out.iter_mut() {
            *sample = self.process_sample(*sample, channel);
        }
    }
}
