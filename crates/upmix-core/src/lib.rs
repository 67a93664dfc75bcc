//! Upmix Core - building blocks for stereo-to-surround upmixing
//!
//! This crate holds the pieces of the upmix pipeline that do not depend on a
//! host, a file format or an allocator-heavy runtime.
//!
//! # Layouts
//!
//! - [`ChannelSetup`] - the sixteen selectable surround layouts
//! - [`ChannelId`] - logical speaker positions in decoder order
//!
//! # Host Channels
//!
//! - [`SpeakerFlag`] / [`SpeakerMask`] - the host's one-bit-per-slot vocabulary
//! - [`host_flag`] - fixed alias table from decoder positions to host slots
//! - [`channel_index_from_flag`] - slot of a flag inside an interleaved frame
//!
//! # Streaming
//!
//! - [`Rechunker`] - reassembles arbitrary chunks into fixed-size blocks
//! - [`SurroundDecoder`] - block decoder contract
//! - [`PassiveDecoder`] - zero-latency matrix decoder implementing the contract
//!
//! # Parameters
//!
//! - [`ParamDescriptor`], [`ParameterInfo`] - introspectable parameter metadata
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build without the standard library:
//!
//! ```toml
//! [dependencies]
//! upmix-core = { version = "0.9", default-features = false }
//! ```
//!
//! Enable the `tracing` feature to get `trace`/`debug` events from the
//! rechunker.
//!
//! # Example
//!
//! ```rust
//! use upmix_core::{ChannelSetup, PassiveDecoder, Rechunker, SurroundDecoder};
//!
//! let setup = ChannelSetup::FivePointOne;
//! let mut decoder = PassiveDecoder::create(setup, 256);
//! let mut rechunker = Rechunker::new(2 * 256);
//! let mut blocks = 0;
//!
//! rechunker.append(&[0.0f32; 1200], |stereo| {
//!     let surround = decoder.decode(stereo);
//!     assert_eq!(surround.len(), setup.num_channels() * 256);
//!     blocks += 1;
//! });
//! assert_eq!(blocks, 2);
//! assert_eq!(rechunker.buffered(), 176);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod channel;
pub mod decoder;
pub mod one_pole;
pub mod param_info;
pub mod passive;
pub mod rechunker;
pub mod speaker;

pub use channel::{ChannelId, ChannelSetup};
pub use decoder::SurroundDecoder;
pub use one_pole::OnePole;
pub use param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};
pub use passive::PassiveDecoder;
pub use rechunker::Rechunker;
pub use speaker::{SpeakerFlag, SpeakerMask, channel_index_from_flag, host_flag, is_aliased};
