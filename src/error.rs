//! Errors raised at the host boundary.
//!
//! The audio path itself has no error states: bad samples and bad pitch values
//! are sanitised in place. What remains are lifecycle and shape violations that
//! the host must not commit.

/// Boundary errors. All variants are `Copy` so that returning one from the
/// audio callback never allocates.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    #[error("invalid maximum block size: {0}")]
    InvalidBlockSize(usize),

    #[error("window length of {0} ms is out of range")]
    InvalidWindow(f32),

    #[error("invalid modulation: depth {depth} semitones at {rate_hz} Hz")]
    InvalidModulation { depth: f32, rate_hz: f32 },

    #[error("unsupported bus layout: {inputs} inputs, {outputs} outputs")]
    UnsupportedLayout { inputs: usize, outputs: usize },

    #[error("block has {requested} channels, processor was prepared for {prepared}")]
    TooManyChannels { requested: usize, prepared: usize },

    #[error("block of {requested} samples exceeds prepared maximum of {prepared}")]
    BlockTooLarge { requested: usize, prepared: usize },

    #[error("channel {channel} holds {len} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        len: usize,
        expected: usize,
    },

    #[error("processor has not been prepared")]
    NotPrepared,
}

pub type Result<T> = core::result::Result<T, Error>;
