//! Host-facing stereo-to-surround upmix pipeline.
//!
//! This crate connects the decoder in `upmix-core` and the parameter set in
//! `upmix-config` to a chunked streaming host.
//!
//! # Architecture
//!
//! | Host concept | Type |
//! |---|---|
//! | audio chunk | [`AudioChunk`] |
//! | output chunk list | [`ChunkSink`] |
//! | DSP instance | [`SurroundPipeline`], or [`Dsp`] behind a `Box` |
//! | preset blob | `SurroundParams::to_bytes` / `from_bytes` |
//! | configuration dialog | [`PresetEditor`] |
//! | service factory | [`PluginRegistry`] |
//!
//! # Example
//!
//! ```rust
//! use upmix_plugin::{AudioChunk, Dsp, PluginRegistry, UPMIX_SURROUND, default_preset};
//!
//! let registry = PluginRegistry::new();
//! let mut dsp = registry.create(UPMIX_SURROUND.guid, &default_preset()).unwrap();
//!
//! let mut output: Vec<AudioChunk> = Vec::new();
//! dsp.on_chunk(&AudioChunk::stereo(vec![0.0; 2 * 1024], 44100), &mut output);
//! dsp.on_endofplayback(&mut output);
//! assert_eq!(output.len(), 1);
//! ```

mod chunk;
mod editor;
mod pipeline;
mod registry;

pub use chunk::{AudioChunk, ChunkSink};
pub use editor::{PresetEditCallback, PresetEditor};
pub use pipeline::{
    ChunkDisposition, DEFAULT_BLOCK_FRAMES, DEFAULT_SAMPLE_RATE, Dsp, PipelineState,
    SurroundPipeline,
};
pub use registry::{
    PipelineFactory, PluginDescriptor, PluginRegistry, UPMIX_SURROUND, default_preset,
};
