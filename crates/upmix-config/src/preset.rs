//! TOML preset files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use upmix_core::ChannelSetup;

use crate::error::ConfigError;
use crate::params::SurroundParams;

/// A named, human-editable parameter set.
///
/// # TOML Format
///
/// ```toml
/// name = "Wide"
/// description = "Full-circle stage for ambient material"
///
/// [params]
/// channels = "7.1"
/// circular_wrap = 180.0
/// depth = 1.5
/// use_lfe = true
/// ```
///
/// Omitted fields take their defaults. Values outside a parameter's range
/// are clamped when the preset is turned into [`SurroundParams`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurroundPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values.
    #[serde(default)]
    pub params: PresetValues,
}

/// Plain serde mirror of [`SurroundParams`], with the layout stored by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresetValues {
    /// Layout name as accepted by [`ChannelSetup::from_name`].
    pub channels: String,
    /// Center image, 0..1.
    pub center_image: f32,
    /// Stage rotation, -1..1.
    pub shift: f32,
    /// Rear depth, 0..4.
    pub depth: f32,
    /// Stage width in degrees.
    pub circular_wrap: f32,
    /// Focus, -1..1.
    pub focus: f32,
    /// Front separation, 0..2.
    pub front_sep: f32,
    /// Rear separation, 0..2.
    pub rear_sep: f32,
    /// Lower crossover edge in Hz.
    pub bass_lo: f32,
    /// Upper crossover edge in Hz.
    pub bass_hi: f32,
    /// Redirect bass to the LFE channel.
    pub use_lfe: bool,
}

impl Default for PresetValues {
    fn default() -> Self {
        Self::from(&SurroundParams::default())
    }
}

impl From<&SurroundParams> for PresetValues {
    fn from(p: &SurroundParams) -> Self {
        Self {
            channels: p.channel_setup().name().to_string(),
            center_image: p.center_image(),
            shift: p.shift(),
            depth: p.depth(),
            circular_wrap: p.circular_wrap(),
            focus: p.focus(),
            front_sep: p.front_sep(),
            rear_sep: p.rear_sep(),
            bass_lo: p.bass_lo(),
            bass_hi: p.bass_hi(),
            use_lfe: p.use_lfe(),
        }
    }
}

impl PresetValues {
    /// Builds a validated parameter set.
    ///
    /// Fails only if the layout name is unknown; numeric values are clamped.
    pub fn to_params(&self) -> Result<SurroundParams, ConfigError> {
        let setup = ChannelSetup::from_name(&self.channels)
            .ok_or_else(|| ConfigError::UnknownChannelSetup(self.channels.clone()))?;

        let mut p = SurroundParams::default();
        p.set_channel_setup(setup);
        p.set_center_image(self.center_image);
        p.set_shift(self.shift);
        p.set_depth(self.depth);
        p.set_circular_wrap(self.circular_wrap);
        p.set_focus(self.focus);
        p.set_front_sep(self.front_sep);
        p.set_rear_sep(self.rear_sep);
        p.set_bass_lo(self.bass_lo);
        p.set_bass_hi(self.bass_hi);
        p.set_use_lfe(self.use_lfe);
        Ok(p)
    }
}

impl SurroundPreset {
    /// Create a preset holding the default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: PresetValues::default(),
        }
    }

    /// Create a preset from an existing parameter set.
    pub fn from_params(name: impl Into<String>, params: &SurroundParams) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: PresetValues::from(params),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validated parameter set described by this preset.
    pub fn to_params(&self) -> Result<SurroundParams, ConfigError> {
        self.params.to_params()
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "saved preset");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for SurroundPreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileOp;
    use tempfile::TempDir;

    #[test]
    fn minimal_toml_uses_defaults() {
        let preset = SurroundPreset::from_toml("name = \"Minimal\"").unwrap();
        assert_eq!(preset.name, "Minimal");
        assert!(preset.description.is_none());
        assert_eq!(preset.to_params().unwrap(), SurroundParams::default());
    }

    #[test]
    fn partial_params_table() {
        let toml = r#"
name = "Wide"
description = "Full circle"

[params]
channels = "7.1 Panorama"
circular_wrap = 180.0
use_lfe = true
"#;
        let preset = SurroundPreset::from_toml(toml).unwrap();
        let params = preset.to_params().unwrap();
        assert_eq!(params.channel_setup(), ChannelSetup::SevenPointOnePanorama);
        assert_eq!(params.circular_wrap(), 180.0);
        assert!(params.use_lfe());
        assert_eq!(params.depth(), 1.0);
    }

    #[test]
    fn unknown_layout_is_an_error() {
        let toml = "name = \"Bad\"\n[params]\nchannels = \"4.0\"\n";
        let preset = SurroundPreset::from_toml(toml).unwrap();
        assert!(matches!(
            preset.to_params(),
            Err(ConfigError::UnknownChannelSetup(ref s)) if s == "4.0"
        ));
    }

    #[test]
    fn out_of_range_values_clamp() {
        let toml = "name = \"Loud\"\n[params]\ndepth = 10.0\nbass_lo = -3.0\n";
        let params = SurroundPreset::from_toml(toml).unwrap().to_params().unwrap();
        assert_eq!(params.depth(), 4.0);
        assert_eq!(params.bass_lo(), 0.0);
    }

    #[test]
    fn to_toml_contains_fields() {
        let toml = SurroundPreset::new("Test")
            .with_description("Test description")
            .to_toml()
            .unwrap();
        assert!(toml.contains("name = \"Test\""));
        assert!(toml.contains("description = \"Test description\""));
        assert!(toml.contains("channels = \"5.1\""));
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cinema.toml");

        let mut params = SurroundParams::default();
        params.set_channel_setup(ChannelSetup::SevenPointOne);
        params.set_focus(0.25);
        let preset = SurroundPreset::from_params("Cinema", &params);
        preset.save(&path).unwrap();

        let loaded = SurroundPreset::load(&path).unwrap();
        assert_eq!(loaded, preset);
        assert_eq!(loaded.to_params().unwrap(), params);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = SurroundPreset::load("/nonexistent/upmix/preset.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { op: FileOp::Read, .. }));
        assert!(err.to_string().contains("/nonexistent/upmix/preset.toml"));
    }
}
