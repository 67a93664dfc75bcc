//! WAV file reading and writing, keeping channels interleaved.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};
use upmix_core::SpeakerMask;

/// Format of a WAV file as far as the upmixer cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32; 32 is written as float).
    pub bits_per_sample: u16,
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

impl WavSpec {
    /// Host layout of a file with this many channels.
    ///
    /// WAV files without an explicit mask fill speaker slots in order, so
    /// `n` channels occupy the `n` lowest slots.
    pub fn channel_mask(&self) -> SpeakerMask {
        match self.channels {
            0 => SpeakerMask::EMPTY,
            1 => SpeakerMask::MONO,
            n => {
                let bits = 1u32.checked_shl(u32::from(n)).map_or(u32::MAX, |b| b - 1);
                SpeakerMask::from_bits(bits)
            }
        }
    }
}

/// Largest integer magnitude at `bits` per sample, as a float.
fn full_scale(bits: u16) -> f32 {
    (1u32 << (bits - 1)) as f32
}

/// Reads a WAV file as interleaved f32 samples in `[-1, 1)`.
pub fn read_wav<P: AsRef<Path>>(path: P) -> hound::Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let format = reader.spec().sample_format;
    let spec = WavSpec::from(reader.spec());

    let samples = if format == SampleFormat::Float {
        reader.into_samples::<f32>().collect::<hound::Result<Vec<_>>>()?
    } else {
        let scale = full_scale(spec.bits_per_sample).recip();
        reader
            .into_samples::<i32>()
            .map(|s| s.map(|v| v as f32 * scale))
            .collect::<hound::Result<Vec<_>>>()?
    };

    Ok((samples, spec))
}

/// Writes interleaved samples. Integer depths saturate at full scale.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> hound::Result<()> {
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        samples.iter().try_for_each(|&s| writer.write_sample(s))?;
    } else {
        let scale = full_scale(spec.bits_per_sample);
        for &s in samples {
            writer.write_sample((s * scale).clamp(-scale, scale - 1.0) as i32)?;
        }
    }

    writer.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn float_roundtrip_keeps_interleaving() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("six.wav");
        let spec = WavSpec {
            channels: 6,
            sample_rate: 48000,
            bits_per_sample: 32,
        };
        let samples: Vec<f32> = (0..60).map(|i| i as f32 / 100.0).collect();

        write_wav(&path, &samples, spec).unwrap();
        let (read, read_spec) = read_wav(&path).unwrap();

        assert_eq!(read_spec, spec);
        assert_eq!(read, samples);
    }

    #[test]
    fn pcm16_is_scaled_and_clamped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pcm.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
        };

        write_wav(&path, &[0.5, -0.5, 2.0, -2.0], spec).unwrap();
        let (read, _) = read_wav(&path).unwrap();

        assert_eq!(read[0], 0.5);
        assert_eq!(read[1], -0.5);
        assert!(read[2] < 1.0 && read[2] > 0.999);
        assert_eq!(read[3], -1.0);
    }

    #[test]
    fn masks_fill_lowest_slots() {
        let spec = |channels| WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: 16,
        };
        assert_eq!(spec(1).channel_mask(), SpeakerMask::MONO);
        assert_eq!(spec(2).channel_mask(), SpeakerMask::STEREO);
        assert_eq!(spec(6).channel_mask().bits(), 0x3f);
    }
}
