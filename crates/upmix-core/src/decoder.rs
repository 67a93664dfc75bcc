//! Contract for block-based stereo-to-surround decoders.
//!
//! The pipeline treats the decoder as an opaque transform: it feeds one
//! fixed-size interleaved stereo block and receives one multichannel block of
//! the same frame count. Decoders may hold look-ahead internally; that delay
//! is reported by [`SurroundDecoder::buffered`] and drained by feeding
//! silence.
//!
//! # Block layout
//!
//! - Input: `2 * block_frames()` samples, `L R L R ...`
//! - Output: `num_channels * block_frames()` samples, frame-interleaved in
//!   decoder channel order: sample `(frame, c)` lives at
//!   `frame * num_channels + c`, where channel `c` is
//!   `setup().channel_at(c)`.

use crate::channel::ChannelSetup;

/// A block-based surround decoder.
///
/// Frequency arguments to [`set_low_cutoff`](Self::set_low_cutoff) and
/// [`set_high_cutoff`](Self::set_high_cutoff) are fractions of the Nyquist
/// frequency, not Hz. Callers recompute them whenever the sample rate changes.
pub trait SurroundDecoder {
    /// Builds a decoder rendering `setup` in blocks of `block_frames` frames.
    fn create(setup: ChannelSetup, block_frames: usize) -> Self
    where
        Self: Sized;

    /// Layout this decoder renders.
    fn setup(&self) -> ChannelSetup;

    /// Frames per block.
    fn block_frames(&self) -> usize;

    /// Angular width of the sound stage, in degrees.
    fn set_circular_wrap(&mut self, degrees: f32);

    /// Rotation of the sound stage, -1 to 1.
    fn set_shift(&mut self, shift: f32);

    /// Depth multiplier of the rear stage.
    fn set_depth(&mut self, depth: f32);

    /// Localization sharpness, -1 (diffuse) to 1 (focused).
    fn set_focus(&mut self, focus: f32);

    /// Share of the center image routed to center speakers, 0 to 1.
    fn set_center_image(&mut self, center_image: f32);

    /// Front stereo separation multiplier.
    fn set_front_separation(&mut self, separation: f32);

    /// Rear stereo separation multiplier.
    fn set_rear_separation(&mut self, separation: f32);

    /// Routes bass below the crossover to the LFE channel.
    fn set_bass_redirection(&mut self, enabled: bool);

    /// Lower crossover edge as a fraction of Nyquist.
    fn set_low_cutoff(&mut self, fraction: f32);

    /// Upper crossover edge as a fraction of Nyquist.
    fn set_high_cutoff(&mut self, fraction: f32);

    /// Decodes one interleaved stereo block.
    ///
    /// `stereo.len()` must equal `2 * block_frames()`.
    fn decode(&mut self, stereo: &[f32]) -> &[f32];

    /// Frames of delay currently held inside the decoder.
    fn buffered(&self) -> usize;

    /// Drops internal state so the next block starts from silence.
    fn flush(&mut self);
}
