//! File-based upmix command.
//!
//! Plays the input file through a [`SurroundPipeline`] the way a streaming
//! host would: fixed-size chunks in, decoded blocks out, one end-of-playback
//! call at the end.

use std::path::PathBuf;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use upmix_config::SurroundParams;
use upmix_core::{ChannelSetup, SurroundDecoder};
use upmix_plugin::{
    AudioChunk, ChunkDisposition, DEFAULT_BLOCK_FRAMES, PipelineState, SurroundPipeline,
};

use super::presets::find_preset;
use crate::wav::{WavSpec, read_wav, write_wav};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Speaker layout (e.g. "5.1", "7.1", "7.1-panorama"); overrides the preset
    #[arg(short, long)]
    layout: Option<String>,

    /// Preset name or TOML file
    #[arg(short, long)]
    preset: Option<String>,

    /// Decoder block size in frames
    #[arg(long, default_value_t = DEFAULT_BLOCK_FRAMES)]
    block_frames: usize,

    /// Host chunk size in frames
    #[arg(long, default_value = "4096")]
    chunk_frames: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        anyhow::bail!("Unsupported bit depth {} (expected 16, 24 or 32)", args.bit_depth);
    }
    if args.block_frames == 0 || args.chunk_frames == 0 {
        anyhow::bail!("Block and chunk sizes must be at least one frame");
    }

    let params = resolve_params(args.preset.as_deref(), args.layout.as_deref())?;

    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav(&args.input)?;
    let input_mask = spec.channel_mask();
    let channels = input_mask.count();
    let input_frames = samples.len() / channels;
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        input_frames,
        spec.channels,
        spec.sample_rate,
        input_frames as f64 / f64::from(spec.sample_rate)
    );

    let mut pipeline = SurroundPipeline::with_block_frames(params, args.block_frames);
    println!(
        "Decoding to {} in blocks of {} frames...",
        pipeline.params().channel_setup().label(),
        pipeline.block_frames()
    );

    let pb = ProgressBar::new(input_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut output: Vec<AudioChunk> = Vec::new();
    let mut passed_through = false;
    for piece in samples.chunks(args.chunk_frames * channels) {
        let chunk = AudioChunk::new(piece.to_vec(), input_mask, spec.sample_rate);
        let frames = chunk.frames() as u64;
        if pipeline.on_chunk(&chunk, &mut output) == ChunkDisposition::PassThrough {
            passed_through = true;
            output.push(chunk);
        }
        pb.inc(frames);
    }

    let mut keep_frames = input_frames;
    if pipeline.state() == PipelineState::Streaming {
        // Complete the last block so no input is left in the rechunker.
        let pending = pipeline.buffered_samples();
        if pending > 0 {
            let pad = 2 * pipeline.block_frames() - pending;
            pipeline.on_chunk(
                &AudioChunk::stereo(vec![0.0; pad], spec.sample_rate),
                &mut output,
            );
        }
        keep_frames += pipeline.decoder().buffered();
        tracing::debug!("latency before drain: {:.4}s", pipeline.get_latency());
        pipeline.on_endofplayback(&mut output);
    }
    pb.finish_with_message("done");

    let output_mask = if passed_through {
        println!("Input is not stereo; copying it through unchanged.");
        input_mask
    } else {
        pipeline.channel_mask()
    };

    let mut data: Vec<f32> = output.into_iter().flat_map(AudioChunk::into_data).collect();
    data.truncate(keep_frames * output_mask.count());

    let out_spec = WavSpec {
        channels: u16::try_from(output_mask.count())?,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &data, out_spec)?;
    println!(
        "  {} frames, {} channels",
        data.len() / output_mask.count(),
        out_spec.channels
    );
    println!("Done!");

    Ok(())
}

/// Parameters from an optional preset, with an optional layout override.
fn resolve_params(preset: Option<&str>, layout: Option<&str>) -> anyhow::Result<SurroundParams> {
    let mut params = match preset {
        Some(name) => {
            let preset = find_preset(name)?;
            println!("Loading preset: {}", preset.name);
            preset.to_params()?
        }
        None => SurroundParams::default(),
    };

    if let Some(name) = layout {
        let setup = ChannelSetup::from_name(name).ok_or_else(|| {
            anyhow::anyhow!("Unknown layout '{name}'. Run `upmix layouts` to list them.")
        })?;
        params.set_channel_setup(setup);
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_overrides_default() {
        let params = resolve_params(None, Some("7.1")).unwrap();
        assert_eq!(params.channel_setup(), ChannelSetup::SevenPointOne);
    }

    #[test]
    fn factory_preset_is_resolved() {
        let params = resolve_params(Some("cinema"), None).unwrap();
        assert_eq!(params.channel_setup(), ChannelSetup::SevenPointOne);
    }

    #[test]
    fn unknown_layout_is_an_error() {
        let err = resolve_params(None, Some("22.2")).unwrap_err();
        assert!(err.to_string().contains("Unknown layout"));
    }
}
