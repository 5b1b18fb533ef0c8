//! Lookup tables.
//!
//! Tables are computed on first use and shared for the lifetime of the
//! program. Call [`init`] from a non-real-time context to make sure the first
//! audio block does not pay for the table construction.

#[allow(unused_imports)]
use num_traits::float::Float;
use spin::Once;

use crate::utils::interpolate_wrap;

pub const LUT_SINE_BITS: usize = 10;
pub const LUT_SINE_SIZE: usize = 1 << LUT_SINE_BITS;

/// One full sine period plus a guard point repeating the first entry.
static LUT_SINE: Once<[f32; LUT_SINE_SIZE + 1]> = Once::new();

pub fn init() {
    sine_table();
}

#[inline]
pub fn sine_table() -> &'static [f32; LUT_SINE_SIZE + 1] {
    LUT_SINE.call_once(|| {
        core::array::from_fn(|i| {
            let phase = i as f64 / LUT_SINE_SIZE as f64;
            (phase * core::f64::consts::TAU).sin() as f32
        })
    })
}

/// `sin(2 * pi * phase)`, safe for any finite phase, will wrap.
#[inline]
pub fn sine(phase: f32) -> f32 {
    interpolate_wrap(sine_table(), phase, LUT_SINE_SIZE)
}

/// Raised-cosine grain window, `sin^2(pi * phase)`.
///
/// Zero at phase `0.0` and `1.0`, one at `0.5`. Windows half a period apart
/// sum to exactly one.
#[inline]
pub fn hann(phase: f32) -> f32 {
    let s = sine(phase * 0.5);
    s * s
}
