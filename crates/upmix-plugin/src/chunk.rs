//! Host audio chunks and the sink output chunks are delivered to.

use upmix_core::{SpeakerFlag, SpeakerMask};

/// A run of interleaved frames tagged with its channel layout and rate.
///
/// Samples are interleaved in ascending [`SpeakerFlag`] bit order, one slot
/// per bit set in [`channel_mask`](Self::channel_mask).
#[derive(Debug, Clone, PartialEq)]
pub struct AudioChunk {
    data: Vec<f32>,
    channel_mask: SpeakerMask,
    sample_rate: u32,
}

impl AudioChunk {
    /// Wraps interleaved samples.
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` is not a whole number of frames for
    /// `channel_mask`.
    pub fn new(data: Vec<f32>, channel_mask: SpeakerMask, sample_rate: u32) -> Self {
        let channels = channel_mask.count();
        assert!(
            channels > 0 && data.len() % channels == 0,
            "{} samples is not a whole number of {}-channel frames",
            data.len(),
            channels
        );
        Self {
            data,
            channel_mask,
            sample_rate,
        }
    }

    /// Wraps interleaved `L R L R ...` samples.
    pub fn stereo(data: Vec<f32>, sample_rate: u32) -> Self {
        Self::new(data, SpeakerMask::STEREO, sample_rate)
    }

    /// A chunk of `frames` silent frames.
    pub fn silence(frames: usize, channel_mask: SpeakerMask, sample_rate: u32) -> Self {
        Self::new(
            vec![0.0; frames * channel_mask.count()],
            channel_mask,
            sample_rate,
        )
    }

    /// Interleaved samples.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable interleaved samples.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the chunk, returning its samples.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Channel layout.
    pub fn channel_mask(&self) -> SpeakerMask {
        self.channel_mask
    }

    /// Samples per frame.
    pub fn channels(&self) -> usize {
        self.channel_mask.count()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames.
    pub fn frames(&self) -> usize {
        self.data.len() / self.channels()
    }

    /// Returns `true` if the chunk holds no frames.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates the samples of one channel, or `None` if the layout lacks it.
    pub fn channel(&self, flag: SpeakerFlag) -> Option<impl Iterator<Item = f32> + '_> {
        let slot = self.channel_mask.index_of(flag)?;
        Some(self.data.iter().skip(slot).step_by(self.channels()).copied())
    }
}

/// Receives output chunks as the pipeline produces them.
pub trait ChunkSink {
    /// Takes ownership of one output chunk.
    fn insert_chunk(&mut self, chunk: AudioChunk);
}

impl ChunkSink for Vec<AudioChunk> {
    fn insert_chunk(&mut self, chunk: AudioChunk) {
        self.push(chunk);
    }
}

impl<S: ChunkSink + ?Sized> ChunkSink for &mut S {
    fn insert_chunk(&mut self, chunk: AudioChunk) {
        (**self).insert_chunk(chunk);
    }
}
