//! Parameter set and preset management for the upmix surround decoder.
//!
//! # Features
//!
//! - **Parameter Set**: [`SurroundParams`] with clamped setters and a derived
//!   channel map that always matches the selected layout
//! - **Preset Blobs**: versioned little-endian binary encoding for hosts,
//!   with an explicit fall-back-to-defaults constructor
//! - **Preset Files**: human-editable TOML presets
//! - **Controls**: mapping between editor slider positions and parameters
//! - **Factory Presets**: built-in starting points
//!
//! # Example
//!
//! ```rust
//! use upmix_config::{SurroundParams, SurroundPreset, get_factory_preset};
//!
//! let preset = get_factory_preset("wide").unwrap();
//! let params = preset.to_params().unwrap();
//!
//! let blob = params.to_bytes();
//! assert_eq!(SurroundParams::from_bytes(&blob), params);
//!
//! // Corrupt blobs never fail: they decode to defaults.
//! assert_eq!(SurroundParams::from_bytes(b"junk"), SurroundParams::default());
//! ```

mod codec;
mod controls;
mod error;
mod params;
mod preset;

/// Platform-specific paths for presets.
pub mod paths;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use codec::{PRESET_MAGIC, PRESET_VERSION};
pub use controls::{ControlValues, DisplayStrings, SLIDER_MAX};
pub use error::{ConfigError, FileOp, PresetError};
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use params::{PARAM_COUNT, PARAM_DESCRIPTORS, SurroundParams};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_user_presets, preset_name_from_path,
    user_presets_dir,
};
pub use preset::{PresetValues, SurroundPreset};
