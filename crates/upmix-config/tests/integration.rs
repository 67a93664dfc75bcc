//! Integration tests for upmix-config.
//!
//! These tests exercise the path from preset files through parameter sets
//! to host blobs and editor controls.

use tempfile::TempDir;
use upmix_config::{
    ConfigError, ControlValues, DisplayStrings, SurroundParams, SurroundPreset, factory_presets,
    get_factory_preset,
};
use upmix_core::{ChannelSetup, ParameterInfo, SpeakerFlag};

/// A TOML preset saved to disk reloads into an identical host blob.
#[test]
fn toml_file_to_blob() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("room.toml");

    let mut params = SurroundParams::default();
    params.set_channel_setup(ChannelSetup::NinePointOneWrap);
    params.set_shift(0.3);
    params.set_use_lfe(true);
    SurroundPreset::from_params("Room", &params)
        .with_description("Living room")
        .save(&path)
        .unwrap();

    let loaded = SurroundPreset::load(&path).unwrap().to_params().unwrap();
    assert_eq!(loaded.to_bytes(), params.to_bytes());
}

/// Every factory preset survives the blob format.
#[test]
fn factory_presets_roundtrip_through_blobs() {
    for preset in factory_presets() {
        let params = preset.to_params().unwrap();
        let restored = SurroundParams::try_from_bytes(&params.to_bytes()).unwrap();
        assert_eq!(restored, params, "{}", preset.name);
    }
}

/// The cinema preset renders 7.1 with the LFE in the host's fourth slot.
#[test]
fn cinema_layout() {
    let params = get_factory_preset("cinema").unwrap().to_params().unwrap();
    assert_eq!(params.channel_setup(), ChannelSetup::SevenPointOne);

    let mask = params.channel_bitmask();
    assert_eq!(mask.count(), 8);
    assert_eq!(mask.index_of(SpeakerFlag::LFE), Some(3));
    assert!(mask.contains(SpeakerFlag::SIDE_LEFT));
    assert!(mask.contains(SpeakerFlag::SIDE_RIGHT));
}

/// Editing through the controls changes only what the controls cover.
#[test]
fn controls_edit_a_working_copy() {
    let original = get_factory_preset("wide").unwrap().to_params().unwrap();
    let mut working = original.clone();

    let mut controls = ControlValues::from_params(&working);
    controls.layout = ChannelSetup::SixteenPointOne.code() as usize;
    controls.focus = 100;
    controls.apply(&mut working);

    assert_eq!(original.channel_setup(), ChannelSetup::SevenPointOne);
    assert_eq!(working.channel_setup(), ChannelSetup::SixteenPointOne);
    assert_eq!(working.chanmap().len(), 17);
    assert_eq!(working.focus(), 1.0);
    assert_eq!(working.center_image(), original.center_image());
    assert_eq!(DisplayStrings::of(&working).focus, "(+1.00)");
}

/// Parameters can be addressed by their preset-file keys.
#[test]
fn string_ids_match_toml_keys() {
    let params = SurroundParams::default();
    let toml = SurroundPreset::from_params("Keys", &params).to_toml().unwrap();
    for i in 0..params.param_count() {
        let key = params.param_info(i).unwrap().string_id;
        assert!(toml.contains(&format!("{key} =")), "missing key {key}");
    }
}

/// A malformed TOML file is a parse error, not a silent default.
#[test]
fn malformed_toml_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "name = [unclosed").unwrap();
    assert!(matches!(
        SurroundPreset::load(&path),
        Err(ConfigError::TomlParse(_))
    ));
}
