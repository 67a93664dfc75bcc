//! Criterion benchmarks for upmix-core streaming primitives
//!
//! Run with: cargo bench -p upmix-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use upmix_core::{ChannelSetup, PassiveDecoder, Rechunker, SurroundDecoder};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_FRAMES: &[usize] = &[256, 1024, 4096];
const HOST_CHUNKS: &[usize] = &[64, 441, 1024, 4800];

fn stereo_signal(frames: usize) -> Vec<f32> {
    (0..frames)
        .flat_map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            let l = (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5;
            let r = (2.0 * std::f32::consts::PI * 660.0 * t).sin() * 0.5;
            [l, r]
        })
        .collect()
}

fn bench_rechunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rechunker");
    let input = stereo_signal(48000);

    for &chunk in HOST_CHUNKS {
        group.bench_with_input(BenchmarkId::new("append", chunk), &chunk, |b, &chunk| {
            let mut rechunker = Rechunker::new(2 * 1024);
            b.iter(|| {
                for piece in input.chunks(2 * chunk) {
                    rechunker.append(black_box(piece), |block| {
                        black_box(block[0]);
                    });
                }
            });
        });
    }

    group.finish();
}

fn bench_passive_decoder(c: &mut Criterion) {
    let mut group = c.benchmark_group("PassiveDecoder");

    for &frames in BLOCK_FRAMES {
        let input = stereo_signal(frames);
        for setup in [ChannelSetup::FivePointOne, ChannelSetup::SixteenPointOne] {
            group.bench_with_input(
                BenchmarkId::new(setup.name(), frames),
                &frames,
                |b, &frames| {
                    let mut decoder = PassiveDecoder::create(setup, frames);
                    decoder.set_bass_redirection(true);
                    b.iter(|| {
                        black_box(decoder.decode(black_box(&input))[0]);
                    });
                },
            );
        }
    }

    // Gain recomputation cost when a control moves
    group.bench_function("set_circular_wrap", |b| {
        let mut decoder = PassiveDecoder::create(ChannelSetup::SixteenPointOne, 1024);
        b.iter(|| decoder.set_circular_wrap(black_box(120.0)));
    });

    group.finish();
}

criterion_group!(benches, bench_rechunker, bench_passive_decoder);

criterion_main!(benches);
