//! Zero-latency passive matrix decoder.
//!
//! Splits each stereo frame into mid `(L+R)/2` and side `(L-R)/2` and renders
//! every speaker as a fixed mix of the two, derived from the speaker's
//! azimuth:
//!
//! ```text
//! pan   = sin(az)                      (-1 left .. 1 right, shaped by focus)
//! front = max(cos(az) + shift, 0)      rear = max(-(cos(az) + shift), 0)
//! mid   = (ci * (1-|pan|) + (1-ci) * |pan|) * (front + rear * depth / 2)
//! side  = -pan * (front * front_sep + rear * rear_sep * depth)
//! ```
//!
//! `az` is the nominal speaker azimuth scaled by `circular_wrap / 90`.
//! With bass redirection on, the mid signal is split by a one-pole crossover
//! at the midpoint of the low/high cutoffs; the low band feeds the LFE channel.
//!
//! This is a compact reference implementation of [`SurroundDecoder`], useful
//! for running the pipeline end to end. It has no look-ahead, so
//! [`buffered`](SurroundDecoder::buffered) is always zero.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::channel::ChannelSetup;
use crate::decoder::SurroundDecoder;
use crate::one_pole::OnePole;
use libm::{copysignf, cosf, fabsf, powf, sinf};

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

#[derive(Debug, Clone, Copy, Default)]
struct ChannelGain {
    mid: f32,
    side: f32,
    lfe: bool,
}

/// Passive mid/side matrix decoder.
///
/// # Example
///
/// ```rust
/// use upmix_core::{ChannelSetup, PassiveDecoder, SurroundDecoder};
///
/// let mut decoder = PassiveDecoder::create(ChannelSetup::FivePointOne, 4);
/// let out = decoder.decode(&[0.5; 8]);
/// assert_eq!(out.len(), 6 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct PassiveDecoder {
    setup: ChannelSetup,
    block_frames: usize,
    output: Vec<f32>,
    gains: Vec<ChannelGain>,
    bass: OnePole,
    circular_wrap: f32,
    shift: f32,
    depth: f32,
    focus: f32,
    center_image: f32,
    front_sep: f32,
    rear_sep: f32,
    redirect_bass: bool,
    low_cutoff: f32,
    high_cutoff: f32,
}

impl PassiveDecoder {
    fn recompute_gains(&mut self) {
        let wrap_scale = self.circular_wrap / 90.0;
        let exponent = powf(2.0, -self.focus);

        for (gain, id) in self.gains.iter_mut().zip(self.setup.channels()) {
            let Some(azimuth) = id.azimuth() else {
                *gain = ChannelGain {
                    lfe: true,
                    ..ChannelGain::default()
                };
                continue;
            };

            let az = (azimuth * wrap_scale).clamp(-180.0, 180.0) * DEG_TO_RAD;
            let raw_pan = sinf(az);
            let pan = copysignf(powf(fabsf(raw_pan), exponent), raw_pan);
            let frontness = (cosf(az) + self.shift).clamp(-1.0, 1.0);
            let front = frontness.max(0.0);
            let rear = (-frontness).max(0.0);

            let spread = fabsf(pan);
            let mid_share =
                self.center_image * (1.0 - spread) + (1.0 - self.center_image) * spread;

            *gain = ChannelGain {
                mid: mid_share * (front + rear * self.depth * 0.5),
                side: -pan * (front * self.front_sep + rear * self.rear_sep * self.depth),
                lfe: false,
            };
        }
    }

    fn update_crossover(&mut self) {
        self.bass.set_cutoff(0.5 * (self.low_cutoff + self.high_cutoff));
    }
}

impl SurroundDecoder for PassiveDecoder {
    fn create(setup: ChannelSetup, block_frames: usize) -> Self {
        let channels = setup.num_channels();
        let mut decoder = Self {
            setup,
            block_frames,
            output: vec![0.0; channels * block_frames],
            gains: vec![ChannelGain::default(); channels],
            bass: OnePole::new(0.0),
            circular_wrap: 90.0,
            shift: 0.0,
            depth: 1.0,
            focus: 0.0,
            center_image: 1.0,
            front_sep: 1.0,
            rear_sep: 1.0,
            redirect_bass: false,
            low_cutoff: 40.0 / 22050.0,
            high_cutoff: 90.0 / 22050.0,
        };
        decoder.recompute_gains();
        decoder.update_crossover();
        decoder
    }

    fn setup(&self) -> ChannelSetup {
        self.setup
    }

    fn block_frames(&self) -> usize {
        self.block_frames
    }

    fn set_circular_wrap(&mut self, degrees: f32) {
        self.circular_wrap = degrees;
        self.recompute_gains();
    }

    fn set_shift(&mut self, shift: f32) {
        self.shift = shift;
        self.recompute_gains();
    }

    fn set_depth(&mut self, depth: f32) {
        self.depth = depth;
        self.recompute_gains();
    }

    fn set_focus(&mut self, focus: f32) {
        self.focus = focus;
        self.recompute_gains();
    }

    fn set_center_image(&mut self, center_image: f32) {
        self.center_image = center_image;
        self.recompute_gains();
    }

    fn set_front_separation(&mut self, separation: f32) {
        self.front_sep = separation;
        self.recompute_gains();
    }

    fn set_rear_separation(&mut self, separation: f32) {
        self.rear_sep = separation;
        self.recompute_gains();
    }

    fn set_bass_redirection(&mut self, enabled: bool) {
        self.redirect_bass = enabled;
    }

    fn set_low_cutoff(&mut self, fraction: f32) {
        self.low_cutoff = fraction;
        self.update_crossover();
    }

    fn set_high_cutoff(&mut self, fraction: f32) {
        self.high_cutoff = fraction;
        self.update_crossover();
    }

    fn decode(&mut self, stereo: &[f32]) -> &[f32] {
        debug_assert_eq!(stereo.len(), 2 * self.block_frames, "stereo block size");
        let channels = self.gains.len();

        for (frame, out) in stereo
            .chunks_exact(2)
            .zip(self.output.chunks_exact_mut(channels))
        {
            let mid = 0.5 * (frame[0] + frame[1]);
            let side = 0.5 * (frame[0] - frame[1]);
            let (low, mid) = if self.redirect_bass {
                let low = self.bass.process(mid);
                (low, mid - low)
            } else {
                (0.0, mid)
            };

            for (sample, gain) in out.iter_mut().zip(&self.gains) {
                *sample = if gain.lfe {
                    low
                } else {
                    gain.mid * mid + gain.side * side
                };
            }
        }

        &self.output
    }

    fn buffered(&self) -> usize {
        0
    }

    fn flush(&mut self) {
        self.bass.reset();
        self.output.fill(0.0);
    }
}
