//! Fixed-size block reassembly for variable-length sample streams.
//!
//! Hosts deliver audio in whatever chunk sizes suit them; block transforms
//! such as the surround decoder need exactly `N` samples per call.
//! [`Rechunker`] sits between the two: it accumulates incoming samples and
//! hands out complete blocks, in input order, to a consumer closure.
//!
//! ```text
//!  append(300)  append(900)        append(100)
//!  ──────────▶  ───────────────▶   ──────────▶
//!  [300/512]    emit 512, [176]    [276/512]
//! ```
//!
//! # Example
//!
//! ```rust
//! use upmix_core::Rechunker;
//!
//! let mut rechunker = Rechunker::<f32>::new(4);
//! let mut blocks = Vec::new();
//!
//! rechunker.append(&[1.0, 2.0, 3.0], |b| blocks.push(b.to_vec()));
//! assert!(blocks.is_empty());
//! assert_eq!(rechunker.buffered(), 3);
//!
//! rechunker.append(&[4.0, 5.0, 6.0, 7.0, 8.0, 9.0], |b| blocks.push(b.to_vec()));
//! assert_eq!(blocks, vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]]);
//! assert_eq!(rechunker.buffered(), 1);
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Accumulates a sample stream and emits fixed-size blocks.
///
/// The block length is given in samples. For interleaved stereo this is
/// twice the frame count of the downstream transform.
///
/// # Invariants
///
/// - `buffered() < block_len()` between calls
/// - the consumer never sees a partial block
/// - blocks are emitted in the order their samples arrived
#[derive(Debug, Clone)]
pub struct Rechunker<T> {
    buffer: Vec<T>,
    block_len: usize,
}

impl<T: Copy> Rechunker<T> {
    /// Creates a rechunker emitting blocks of `block_len` samples.
    ///
    /// # Panics
    ///
    /// Panics if `block_len` is zero.
    pub fn new(block_len: usize) -> Self {
        assert!(block_len > 0, "block length must be non-zero");
        Self {
            buffer: Vec::with_capacity(block_len),
            block_len,
        }
    }

    /// Block length in samples.
    #[inline]
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Number of samples retained but not yet delivered.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if no samples are retained.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Appends `samples` and invokes `on_block` once per completed block.
    ///
    /// A single call may complete zero, one or many blocks. Whole blocks that
    /// lie entirely inside `samples` are passed through without copying.
    /// The unconsumed remainder is retained for the next call.
    pub fn append<F>(&mut self, samples: &[T], mut on_block: F)
    where
        F: FnMut(&[T]),
    {
        if samples.is_empty() {
            return;
        }

        let mut input = samples;

        // Top up a pending partial block first.
        if !self.buffer.is_empty() {
            let take = (self.block_len - self.buffer.len()).min(input.len());
            self.buffer.extend_from_slice(&input[..take]);
            input = &input[take..];

            if self.buffer.len() == self.block_len {
                on_block(&self.buffer);
                self.buffer.clear();
            }
        }

        // Non-empty input here implies the buffer was drained above.
        let mut blocks = input.chunks_exact(self.block_len);
        for block in &mut blocks {
            on_block(block);
        }
        self.buffer.extend_from_slice(blocks.remainder());

        #[cfg(feature = "tracing")]
        tracing::trace!(
            appended = samples.len(),
            buffered = self.buffer.len(),
            "rechunker append"
        );
    }

    /// Discards any retained partial block without emitting it.
    pub fn flush(&mut self) {
        self.buffer.clear();
    }
}
