//! Pitch unit conversions.

#[allow(unused_imports)]
use num_traits::float::Float;

/// Largest pitch offset the engine will apply, in either direction.
pub const MAX_SEMITONES: f32 = 24.0;

/// Slowest read speed, two octaves down.
pub const MIN_RATIO: f32 = 0.25;

/// Fastest read speed, two octaves up.
pub const MAX_RATIO: f32 = 4.0;

/// Converts a semitone offset to a playback speed ratio, `2^(semitones / 12)`.
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    2.0_f32.powf(semitones / 12.0)
}

/// Brings an arbitrary pitch request into the range the engine supports.
///
/// NaN maps to unison, infinities saturate at [`MAX_SEMITONES`].
#[inline]
pub fn clamp_semitones(semitones: f32) -> f32 {
    if semitones.is_nan() {
        0.0
    } else {
        semitones.clamp(-MAX_SEMITONES, MAX_SEMITONES)
    }
}

/// Brings an arbitrary speed ratio into `MIN_RATIO..=MAX_RATIO`.
///
/// Zero, negative and non-finite ratios would stall or reverse the read
/// pointer and collapse to [`MIN_RATIO`]. Positive infinity saturates at
/// [`MAX_RATIO`].
#[inline]
pub fn clamp_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() || ratio <= 0.0 {
        MIN_RATIO
    } else {
        ratio.clamp(MIN_RATIO, MAX_RATIO)
    }
}
