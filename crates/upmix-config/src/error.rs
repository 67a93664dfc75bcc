//! Error types for parameter persistence.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors decoding a binary preset blob.
///
/// Callers that must not fail use
/// [`SurroundParams::from_bytes`](crate::SurroundParams::from_bytes), which
/// logs the error and substitutes defaults.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The blob does not start with the preset magic.
    #[error("not an upmix preset (bad magic)")]
    BadMagic,

    /// The blob was written by an incompatible format version.
    #[error("unsupported preset version {found} (this build reads version {supported})")]
    UnsupportedVersion {
        /// Version found in the blob.
        found: u16,
        /// Newest version this build decodes.
        supported: u16,
    },

    /// The blob ended before all fields were read.
    #[error("preset truncated: {0}")]
    Truncated(#[from] std::io::Error),

    /// The channel setup code is not one of the known layouts.
    #[error("unknown channel setup code {0}")]
    UnknownChannelSetup(u8),

    /// A boolean field held something other than 0 or 1.
    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),

    /// A numeric field was NaN or infinite.
    #[error("field '{0}' is not finite")]
    NonFinite(&'static str),

    /// The stored channel map is longer than any layout.
    #[error("stored channel map has {0} entries")]
    ChannelMapTooLong(usize),

    /// Bytes remain after the last field.
    #[error("{0} trailing bytes after preset")]
    TrailingBytes(usize),
}

/// Filesystem action that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    /// Reading a preset file.
    Read,
    /// Writing a preset file or exported blob.
    Write,
    /// Creating the user presets directory.
    CreateDir,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::CreateDir => "create directory",
        })
    }
}

/// Errors from loading, saving and locating presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file or directory operation failed.
    #[error("cannot {op} '{}': {source}", path.display())]
    Io {
        /// What was being attempted.
        op: FileOp,
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Preset TOML is malformed.
    #[error("invalid preset TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Preset could not be rendered as TOML.
    #[error("cannot encode preset TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Binary preset could not be decoded.
    #[error("invalid preset blob: {0}")]
    Preset(#[from] PresetError),

    /// Layout name or code not recognized.
    #[error("unknown channel setup: {0}")]
    UnknownChannelSetup(String),

    /// No factory preset, user preset or file by this name.
    #[error("preset not found: {0}")]
    PresetNotFound(String),
}

impl ConfigError {
    fn io(op: FileOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Reading `path` failed.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(FileOp::Read, path, source)
    }

    /// Writing `path` failed.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(FileOp::Write, path, source)
    }

    /// Creating the directory at `path` failed.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(FileOp::CreateDir, path, source)
    }
}
