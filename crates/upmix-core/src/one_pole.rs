//! One-pole lowpass used for the bass crossover.
//!
//! ```text
//! y[n] = x[n] + coeff * (y[n-1] - x[n])
//! ```
//!
//! The cutoff is expressed as a fraction of Nyquist, the unit the decoder
//! receives its crossover settings in, so `coeff = exp(-π * fraction)`.
//!
//! # Reference
//!
//! Julius O. Smith III, "Introduction to Digital Filters with Audio Applications",
//! Section: One-Pole Filter.

use libm::{expf, fabsf};

/// One-pole (6 dB/oct) lowpass filter.
///
/// # Invariants
///
/// - `coeff` is always in (0, 1] for stable operation
/// - `state` is flushed to zero when below 1e-20 (denormal protection)
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    coeff: f32,
}

impl OnePole {
    /// Creates a lowpass with its -3 dB point at `fraction` of Nyquist.
    pub fn new(fraction: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            coeff: 0.0,
        };
        filter.set_cutoff(fraction);
        filter
    }

    /// Sets the cutoff as a fraction of Nyquist, clamped to [0, 1].
    pub fn set_cutoff(&mut self, fraction: f32) {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.coeff = expf(-core::f32::consts::PI * fraction);
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let y = input + self.coeff * (self.state - input);
        self.state = if fabsf(y) < 1e-20 { 0.0 } else { y };
        self.state
    }

    /// Reset filter state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    /// Current coefficient.
    pub fn coeff(&self) -> f32 {
        self.coeff
    }
}
