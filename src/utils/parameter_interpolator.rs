//! Linear interpolation of parameters in rendering loops.

// Based on MIT-licensed code (c) 2015 by Olivier Gillet (ol.gillet@gmail.com)

/// Steps from a block's starting value towards its target, one increment per
/// sample, landing on the target at the last sample of the block.
///
/// The interpolator holds its own copy of the value so several loops (one per
/// channel) can replay the same ramp from a shared starting point.
#[derive(Debug, Default, Copy, Clone)]
pub struct ParameterInterpolator {
    value: f32,
    increment: f32,
}

impl ParameterInterpolator {
    pub fn new(value: f32, new_value: f32, size: usize) -> Self {
        Self {
            value,
            increment: (new_value - value) / (size.max(1) as f32),
        }
    }

    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f32 {
        self.value += self.increment;
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }
}
