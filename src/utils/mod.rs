//! Utility functions.
//!
//! Small numeric helpers shared by the engine, the modulation source and the
//! block driver. Everything here is allocation free and safe to call per sample.

pub mod delay_line;
pub mod parameter_interpolator;
pub mod units;

#[allow(unused_imports)]
use num_traits::float::Float;

/// Looks up `table` at a normalized, wrapping `phase` with linear interpolation.
///
/// `table` must hold `size + 1` entries, the last one repeating the first.
#[inline]
pub fn interpolate_wrap(table: &[f32], phase: f32, size: usize) -> f32 {
    let index = wrap_phase(phase) * size as f32;
    let index_integral = (index as usize).min(size - 1);
    let index_fractional = index - (index_integral as f32);
    let a = table[index_integral];
    let b = table[index_integral + 1];

    a + (b - a) * index_fractional
}

/// Folds a phase into `0.0..1.0`.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase - phase.floor();

    // Tiny negative inputs round up to exactly 1.0.
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

#[inline]
pub fn crossfade(a: f32, b: f32, fade: f32) -> f32 {
    a + (b - a) * fade
}

/// Replaces NaN and infinities with silence.
#[inline]
pub fn sanitize(x: f32) -> f32 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}
