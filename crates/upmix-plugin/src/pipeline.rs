//! The stereo-to-surround stream orchestrator.
//!
//! ```text
//! host ──on_chunk──▶ Rechunker ──block──▶ SurroundDecoder ──▶ remap ──▶ ChunkSink
//!                    (2·N samples)        (N frames)          (chanmap → host slots)
//! ```
//!
//! Stereo chunks of any size are accumulated until a full decoder block is
//! available. Each block is decoded and its channels are moved from decoder
//! order to the host's slot order before being handed to the sink as one
//! output chunk. Everything runs inline on the caller's thread.

use upmix_config::SurroundParams;
use upmix_core::{
    PassiveDecoder, Rechunker, SpeakerMask, SurroundDecoder, channel_index_from_flag,
};

use crate::chunk::{AudioChunk, ChunkSink};

/// Decoder block length in frames.
pub const DEFAULT_BLOCK_FRAMES: usize = 32768;

/// Sample rate assumed until the first stereo chunk arrives.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Lifecycle of a pipeline instance.
///
/// `Idle → Streaming` on the first accepted chunk; `flush` and
/// `on_endofplayback` pass through `Flushing` and return to `Idle` before
/// they return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No audio accepted since creation or the last flush.
    Idle,
    /// Accepting stereo chunks.
    Streaming,
    /// Draining. Transient: entered and left within a single
    /// `flush`/`on_endofplayback` call, so callers never see it.
    Flushing,
}

/// What the host should do with a chunk it offered to [`SurroundPipeline::on_chunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkDisposition {
    /// The samples were taken; output will arrive through the sink.
    Consumed,
    /// Not stereo: forward the chunk unchanged.
    PassThrough,
}

/// Decoder plus everything a block needs, kept apart from the rechunker so
/// both can be borrowed at once.
struct DecodeStage<D> {
    decoder: D,
    params: SurroundParams,
    channel_mask: SpeakerMask,
    /// Host slot for each decoder channel.
    slots: Vec<usize>,
    sample_rate: u32,
}

impl<D: SurroundDecoder> DecodeStage<D> {
    fn new(params: SurroundParams, block_frames: usize) -> Self {
        let decoder = D::create(params.channel_setup(), block_frames);
        let mut stage = Self {
            decoder,
            params,
            channel_mask: SpeakerMask::EMPTY,
            slots: Vec::new(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        };
        stage.configure();
        stage
    }

    /// Pushes every parameter into the decoder and rebuilds the slot table.
    fn configure(&mut self) {
        let p = &self.params;
        self.decoder.set_circular_wrap(p.circular_wrap());
        self.decoder.set_shift(p.shift());
        self.decoder.set_depth(p.depth());
        self.decoder.set_focus(p.focus());
        self.decoder.set_center_image(p.center_image());
        self.decoder.set_front_separation(p.front_sep());
        self.decoder.set_rear_separation(p.rear_sep());
        self.decoder.set_bass_redirection(p.use_lfe());

        self.channel_mask = p.channel_bitmask();
        self.slots = p
            .chanmap()
            .iter()
            .filter_map(|&flag| channel_index_from_flag(self.channel_mask, flag))
            .collect();
        debug_assert_eq!(self.slots.len(), p.chanmap().len());

        self.update_cutoffs();
    }

    /// Crossover edges as fractions of the current Nyquist frequency.
    fn update_cutoffs(&mut self) {
        if self.sample_rate == 0 {
            return;
        }
        let nyquist = self.sample_rate as f32 / 2.0;
        self.decoder.set_low_cutoff(self.params.bass_lo() / nyquist);
        self.decoder.set_high_cutoff(self.params.bass_hi() / nyquist);
    }

    fn process_chunk<S: ChunkSink + ?Sized>(&mut self, stereo: &[f32], sink: &mut S) {
        self.update_cutoffs();

        let frames = self.decoder.block_frames();
        let num = self.slots.len();
        let host_channels = self.channel_mask.count();
        let mut out = vec![0.0f32; frames * host_channels];

        let decoded = self.decoder.decode(stereo);
        for (src, dst) in decoded
            .chunks_exact(num)
            .zip(out.chunks_exact_mut(host_channels))
        {
            for (&sample, &slot) in src.iter().zip(&self.slots) {
                dst[slot] = sample;
            }
        }

        sink.insert_chunk(AudioChunk::new(out, self.channel_mask, self.sample_rate));
    }
}

/// Stereo-to-surround pipeline for one host stream.
///
/// Owns its parameter set exclusively. Editors work on a copy and hand the
/// result back through [`set_params`](Self::set_params).
///
/// # Example
///
/// ```rust
/// use upmix_config::SurroundParams;
/// use upmix_plugin::{AudioChunk, ChunkDisposition, SurroundPipeline};
///
/// let mut pipeline = SurroundPipeline::with_block_frames(SurroundParams::default(), 256);
/// let mut out: Vec<AudioChunk> = Vec::new();
///
/// let input = AudioChunk::stereo(vec![0.1; 2 * 300], 48000);
/// assert_eq!(pipeline.on_chunk(&input, &mut out), ChunkDisposition::Consumed);
/// assert_eq!(out.len(), 1);
/// assert_eq!(out[0].channels(), 6);
/// assert_eq!(out[0].frames(), 256);
///
/// pipeline.on_endofplayback(&mut out);
/// assert_eq!(out.len(), 2);
/// ```
pub struct SurroundPipeline<D: SurroundDecoder = PassiveDecoder> {
    rechunker: Rechunker<f32>,
    stage: DecodeStage<D>,
    state: PipelineState,
}

impl SurroundPipeline<PassiveDecoder> {
    /// Pipeline with the default block length.
    pub fn new(params: SurroundParams) -> Self {
        Self::with_decoder(params, DEFAULT_BLOCK_FRAMES)
    }

    /// Pipeline configured from a host preset blob.
    ///
    /// A blob that fails to decode yields the default parameters.
    pub fn from_preset(preset: &[u8]) -> Self {
        Self::new(SurroundParams::from_bytes(preset))
    }

    /// Pipeline with a custom block length in frames.
    ///
    /// # Panics
    ///
    /// Panics if `block_frames` is zero.
    pub fn with_block_frames(params: SurroundParams, block_frames: usize) -> Self {
        Self::with_decoder(params, block_frames)
    }
}

impl<D: SurroundDecoder> SurroundPipeline<D> {
    /// Pipeline driving decoder type `D` in blocks of `block_frames`.
    ///
    /// # Panics
    ///
    /// Panics if `block_frames` is zero.
    pub fn with_decoder(params: SurroundParams, block_frames: usize) -> Self {
        tracing::debug!(
            "SurroundPipeline: {} in blocks of {block_frames} frames",
            params.channel_setup()
        );
        Self {
            rechunker: Rechunker::new(2 * block_frames),
            stage: DecodeStage::new(params, block_frames),
            state: PipelineState::Idle,
        }
    }

    /// Offers one host chunk.
    ///
    /// Stereo chunks are consumed: their rate becomes current and their
    /// samples are buffered, emitting one output chunk to `sink` per block
    /// completed. Anything else passes through.
    pub fn on_chunk<S: ChunkSink + ?Sized>(
        &mut self,
        chunk: &AudioChunk,
        sink: &mut S,
    ) -> ChunkDisposition {
        if chunk.channel_mask() != SpeakerMask::STEREO {
            return ChunkDisposition::PassThrough;
        }

        if self.state == PipelineState::Idle {
            tracing::debug!("SurroundPipeline: Idle -> Streaming");
            self.state = PipelineState::Streaming;
        }
        self.stage.sample_rate = chunk.sample_rate();

        let stage = &mut self.stage;
        self.rechunker
            .append(chunk.data(), |block| stage.process_chunk(block, sink));
        ChunkDisposition::Consumed
    }

    /// Seconds of audio held inside the pipeline.
    ///
    /// Counts the frames waiting in the rechunker plus the decoder's own
    /// delay; zero while the sample rate is unknown.
    pub fn get_latency(&self) -> f64 {
        if self.stage.sample_rate == 0 {
            return 0.0;
        }
        let frames = self.rechunker.buffered() / 2 + self.stage.decoder.buffered();
        frames as f64 / f64::from(self.stage.sample_rate)
    }

    /// Drops buffered input and decoder state without emitting anything.
    pub fn flush(&mut self) {
        self.state = PipelineState::Flushing;
        self.rechunker.flush();
        self.stage.decoder.flush();
        self.state = PipelineState::Idle;
        tracing::debug!("SurroundPipeline: flushed");
    }

    /// Drains the decoder by running one block of silence through it.
    ///
    /// Emits exactly one output chunk. Input still waiting in the rechunker
    /// is left where it is.
    pub fn on_endofplayback<S: ChunkSink + ?Sized>(&mut self, sink: &mut S) {
        self.state = PipelineState::Flushing;
        let silence = vec![0.0f32; self.rechunker.block_len()];
        self.stage.process_chunk(&silence, sink);
        self.state = PipelineState::Idle;
        tracing::debug!(
            "SurroundPipeline: end of playback, {} samples left buffered",
            self.rechunker.buffered()
        );
    }

    /// Track boundaries need no special handling.
    pub fn on_endoftrack<S: ChunkSink + ?Sized>(&mut self, _sink: &mut S) {}

    /// Whether the host must mark track changes in the stream. Always `false`.
    pub fn need_track_change_mark(&self) -> bool {
        false
    }

    /// Replaces the parameters.
    ///
    /// A layout change rebuilds the decoder, discarding its internal state;
    /// buffered input is kept.
    pub fn set_params(&mut self, params: SurroundParams) {
        if params.channel_setup() != self.stage.params.channel_setup() {
            tracing::debug!(
                "SurroundPipeline: layout {} -> {}",
                self.stage.params.channel_setup(),
                params.channel_setup()
            );
            self.stage.decoder = D::create(params.channel_setup(), self.block_frames());
        }
        self.stage.params = params;
        self.stage.configure();
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Active parameters.
    pub fn params(&self) -> &SurroundParams {
        &self.stage.params
    }

    /// Host layout of output chunks.
    pub fn channel_mask(&self) -> SpeakerMask {
        self.stage.channel_mask
    }

    /// Rate of the most recent stereo chunk.
    pub fn sample_rate(&self) -> u32 {
        self.stage.sample_rate
    }

    /// Decoder block length in frames.
    pub fn block_frames(&self) -> usize {
        self.rechunker.block_len() / 2
    }

    /// Input samples waiting for a full block.
    pub fn buffered_samples(&self) -> usize {
        self.rechunker.buffered()
    }

    /// The decoder instance.
    pub fn decoder(&self) -> &D {
        &self.stage.decoder
    }
}

/// Host-facing entry points of a DSP instance.
///
/// Object-safe so a [`PluginRegistry`](crate::PluginRegistry) can hand out
/// boxed instances without naming the decoder type.
pub trait Dsp {
    /// See [`SurroundPipeline::on_chunk`].
    fn on_chunk(&mut self, chunk: &AudioChunk, sink: &mut dyn ChunkSink) -> ChunkDisposition;

    /// See [`SurroundPipeline::on_endofplayback`].
    fn on_endofplayback(&mut self, sink: &mut dyn ChunkSink);

    /// See [`SurroundPipeline::on_endoftrack`].
    fn on_endoftrack(&mut self, sink: &mut dyn ChunkSink);

    /// See [`SurroundPipeline::flush`].
    fn flush(&mut self);

    /// See [`SurroundPipeline::get_latency`].
    fn get_latency(&self) -> f64;

    /// See [`SurroundPipeline::need_track_change_mark`].
    fn need_track_change_mark(&self) -> bool;

    /// Replaces the parameters from a preset blob, falling back to defaults.
    fn set_preset(&mut self, preset: &[u8]);
}

impl<D: SurroundDecoder> Dsp for SurroundPipeline<D> {
    fn on_chunk(&mut self, chunk: &AudioChunk, sink: &mut dyn ChunkSink) -> ChunkDisposition {
        SurroundPipeline::on_chunk(self, chunk, sink)
    }

    fn on_endofplayback(&mut self, sink: &mut dyn ChunkSink) {
        SurroundPipeline::on_endofplayback(self, sink);
    }

    fn on_endoftrack(&mut self, sink: &mut dyn ChunkSink) {
        SurroundPipeline::on_endoftrack(self, sink);
    }

    fn flush(&mut self) {
        SurroundPipeline::flush(self);
    }

    fn get_latency(&self) -> f64 {
        SurroundPipeline::get_latency(self)
    }

    fn need_track_change_mark(&self) -> bool {
        SurroundPipeline::need_track_change_mark(self)
    }

    fn set_preset(&mut self, preset: &[u8]) {
        self.set_params(SurroundParams::from_bytes(preset));
    }
}
