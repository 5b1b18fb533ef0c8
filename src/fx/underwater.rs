//! Underwater effect: LFO-modulated pitch shift blended with the dry signal.
//!
//! The processor is the piece a plugin wrapper talks to. The wrapper calls
//! [`prepare`](UnderwaterProcessor::prepare) when playback starts, then
//! [`process_block`](UnderwaterProcessor::process_block) from the audio
//! thread once per block, and updates [`Parameters`] from any other thread.
//!
//! Per sample and channel the processor
//! 1. reads the LFO at the sample's frame position,
//! 2. combines it with the user pitch, ramped across the block, according to
//!    [`PitchMode`],
//! 3. retunes the pitch shifter and feeds it the input sample,
//! 4. writes `(0.25 * dry + 0.75 * wet) * gain` back in place.
//!
//! [`PitchMode`]: crate::PitchMode

use alloc::sync::Arc;

use super::pitch_shifter::PitchShifter;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::modulation::ModulationClock;
use crate::parameters::Parameters;
use crate::resources;
use crate::utils::parameter_interpolator::ParameterInterpolator;
use crate::utils::sanitize;
use crate::SampleRate;

/// Display name reported to hosts.
pub const NAME: &str = "Underwater";

/// Weight of the unprocessed input in the output.
pub const DRY_LEVEL: f32 = 0.25;

/// Weight of the pitch-shifted signal in the output.
pub const WET_LEVEL: f32 = 0.75;

/// State that only exists between `prepare` and `release`.
#[derive(Debug)]
struct Prepared {
    shifter: PitchShifter,
    clock: ModulationClock,
    sample_rate: SampleRate,
    max_block_size: usize,
    // User pitch and gain reached at the end of the previous block.
    pitch: f32,
    gain: f32,
}

#[derive(Debug)]
pub struct UnderwaterProcessor {
    config: Config,
    parameters: Arc<Parameters>,
    prepared: Option<Prepared>,
}

impl UnderwaterProcessor {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_parameters(config, Arc::new(Parameters::new()))
    }

    /// Creates a processor reading from a parameter store the host already owns.
    pub fn with_parameters(config: Config, parameters: Arc<Parameters>) -> Result<Self> {
        if let Err(err) = config.validate() {
            log::warn!("Rejecting configuration: {err}");
            return Err(err);
        }

        Ok(Self {
            config,
            parameters,
            prepared: None,
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle for the host's control thread.
    pub fn parameters(&self) -> Arc<Parameters> {
        Arc::clone(&self.parameters)
    }

    #[inline]
    pub fn set_pitch_parameter(&self, semitones: f32) {
        self.parameters.set_pitch(semitones);
    }

    #[inline]
    pub fn set_gain_parameter(&self, gain: f32) {
        self.parameters.set_gain(gain);
    }

    /// Allocates the history buffers for `sample_rate` and restarts the LFO.
    ///
    /// May be called again to change the sample rate; all history is dropped.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) -> Result<()> {
        let sample_rate = SampleRate::new(sample_rate)?;

        if max_block_size == 0 {
            return Err(Error::InvalidBlockSize(max_block_size));
        }

        resources::init();

        let shifter = PitchShifter::new(
            &sample_rate,
            self.config.window_ms,
            self.config.layout.channels(),
        );
        let clock = ModulationClock::new(
            sample_rate.sample_rate_hz,
            self.config.modulation_rate_hz,
            self.config.modulation_depth,
        );

        log::debug!(
            "Prepared {NAME} at {} Hz: {} channels, window {} samples, latency {} samples, max block {}",
            sample_rate.sample_rate_hz,
            shifter.num_channels(),
            shifter.window_size(),
            shifter.latency(),
            max_block_size,
        );

        self.prepared = Some(Prepared {
            shifter,
            clock,
            sample_rate,
            max_block_size,
            pitch: self.parameters.pitch(),
            gain: self.parameters.gain(),
        });

        Ok(())
    }

    /// Clears history and restarts the LFO without reallocating.
    pub fn reset(&mut self) {
        if let Some(prepared) = self.prepared.as_mut() {
            prepared.shifter.reset();
            prepared.clock.reset();
            prepared.pitch = self.parameters.pitch();
            prepared.gain = self.parameters.gain();
            log::debug!("Reset {NAME}");
        }
    }

    /// Frees the history buffers. [`prepare`](Self::prepare) must be called
    /// again before processing.
    pub fn release(&mut self) {
        if self.prepared.take().is_some() {
            log::debug!("Released {NAME}");
        }
    }

    #[inline]
    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }

    /// Sample rate of the last successful [`prepare`](Self::prepare).
    pub fn sample_rate(&self) -> Option<f32> {
        self.prepared
            .as_ref()
            .map(|prepared| prepared.sample_rate.sample_rate_hz)
    }

    /// Processing delay in samples, zero while unprepared.
    pub fn latency_samples(&self) -> usize {
        self.prepared
            .as_ref()
            .map_or(0, |prepared| prepared.shifter.latency())
    }

    /// The effect stops ringing as soon as its input stops.
    pub fn tail_seconds(&self) -> f64 {
        0.0
    }

    /// Pitch offset in semitones the engine used for the most recent sample,
    /// LFO included. `None` while unprepared.
    pub fn current_pitch(&self) -> Option<f32> {
        self.prepared
            .as_ref()
            .map(|prepared| prepared.shifter.pitch())
    }

    /// Frames processed since the last `prepare` or `reset`.
    pub fn elapsed_frames(&self) -> u64 {
        self.prepared
            .as_ref()
            .map_or(0, |prepared| prepared.clock.sample_count())
    }

    /// Processes one block in place. `buffer` holds one slice per channel,
    /// all of the same length.
    ///
    /// The block is checked against the prepared shape before any sample is
    /// touched; on error the buffer is left as it was.
    pub fn process_block(&mut self, buffer: &mut [&mut [f32]]) -> Result<()> {
        let prepared = self.prepared.as_mut().ok_or(Error::NotPrepared)?;

        let num_channels = buffer.len();
        if num_channels > prepared.shifter.num_channels() {
            return Err(Error::TooManyChannels {
                requested: num_channels,
                prepared: prepared.shifter.num_channels(),
            });
        }

        let num_samples = buffer.first().map_or(0, |samples| samples.len());
        if num_samples > prepared.max_block_size {
            return Err(Error::BlockTooLarge {
                requested: num_samples,
                prepared: prepared.max_block_size,
            });
        }

        if let Some((channel, samples)) = buffer
            .iter()
            .enumerate()
            .find(|(_, samples)| samples.len() != num_samples)
        {
            return Err(Error::ChannelLengthMismatch {
                channel,
                len: samples.len(),
                expected: num_samples,
            });
        }

        let target_pitch = self.parameters.pitch();
        let target_gain = self.parameters.gain();
        let pitch_mode = self.config.pitch_mode;

        for (channel, samples) in buffer.iter_mut().enumerate() {
            let mut pitch = ParameterInterpolator::new(prepared.pitch, target_pitch, num_samples);
            let mut gain = ParameterInterpolator::new(prepared.gain, target_gain, num_samples);

            for (frame, sample) in samples.iter_mut().enumerate() {
                let lfo = prepared.clock.semitones_at(frame);
                prepared
                    .shifter
                    .set_pitch(pitch_mode.combine(pitch.next(), lfo));

                let x = sanitize(*sample);
                let y = prepared.shifter.process_sample(x, channel);
                *sample = (DRY_LEVEL * x + WET_LEVEL * y) * gain.next();
            }
        }

        prepared.clock.advance(num_samples);
        if num_samples > 0 {
            prepared.pitch = target_pitch;
            prepared.gain = target_gain;
        }

        Ok(())
    }
}
