//! Delay line.
//!
//! Circular buffer sized at run time. Writes move the write pointer backwards,
//! so a delay of `1` reads the most recently written sample and larger delays
//! reach further into the past.

// Based on MIT-licensed code (c) 2014 by Olivier Gillet (ol.gillet@gmail.com)

use alloc::boxed::Box;
use alloc::vec;

#[derive(Debug, Clone)]
pub struct DelayLine {
    write_ptr: usize,
    line: Box<[f32]>,
}

impl DelayLine {
    /// Creates a zeroed line able to serve fractional delays up to `max_delay`.
    pub fn new(max_delay: usize) -> Self {
        Self {
            write_ptr: 0,
            line: vec![0.0; max_delay + 2].into_boxed_slice(),
        }
    }

    pub fn reset(&mut self) {
        self.line.fill(0.0);
        self.write_ptr = 0;
    }

    /// Largest delay `read_with_delay_frac` accepts.
    #[inline]
    pub fn max_delay(&self) -> usize {
        self.line.len() - 2
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        let size = self.line.len();
        self.line[self.write_ptr] = sample;
        self.write_ptr = (self.write_ptr + size - 1) % size;
    }

    /// Reads between two stored samples with linear interpolation.
    ///
    /// `delay` is clamped to `1.0..=max_delay()`; NaN reads the latest sample.
    #[inline]
    pub fn read_with_delay_frac(&self, delay: f32) -> f32 {
        let size = self.line.len();
        let delay = delay.max(1.0).min(self.max_delay() as f32);
        let delay_integral = delay as usize;
        let delay_fractional = delay - (delay_integral as f32);
        let a = self.line[(self.write_ptr + delay_integral) % size];
        let b = self.line[(self.write_ptr + delay_integral + 1) % size];

        a + (b - a) * delay_fractional
    }
}
