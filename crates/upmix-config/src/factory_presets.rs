//! Factory presets bundled with the library.
//!
//! These are embedded at compile time and always available without
//! external files.

use crate::SurroundPreset;

/// Internal identifiers of the factory presets.
pub static FACTORY_PRESET_NAMES: &[&str] = &["default", "wide", "focused", "cinema"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("wide", WIDE_PRESET),
    ("focused", FOCUSED_PRESET),
    ("cinema", CINEMA_PRESET),
];

const DEFAULT_PRESET: &str = r#"
name = "Default"
description = "5.1 with a quarter-circle stage"

[params]
channels = "5.1"
"#;

const WIDE_PRESET: &str = r#"
name = "Wide"
description = "Half-circle stage with deep rears, for ambient and live recordings"

[params]
channels = "7.1"
circular_wrap = 180.0
depth = 1.5
center_image = 0.5
rear_sep = 1.4
"#;

const FOCUSED_PRESET: &str = r#"
name = "Focused"
description = "Tight localization with a strong center for speech and mono-heavy mixes"

[params]
channels = "5.1"
circular_wrap = 60.0
focus = 0.6
center_image = 1.0
front_sep = 0.8
"#;

const CINEMA_PRESET: &str = r#"
name = "Cinema"
description = "7.1 with bass redirected to the LFE channel"

[params]
channels = "7.1"
circular_wrap = 120.0
shift = -0.1
use_lfe = true
bass_lo = 40.5
bass_hi = 90.0
"#;

/// Get all factory presets.
pub fn factory_presets() -> Vec<SurroundPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| SurroundPreset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name (case-insensitive).
///
/// ```rust
/// use upmix_config::get_factory_preset;
///
/// let preset = get_factory_preset("Cinema").unwrap();
/// assert!(preset.to_params().unwrap().use_lfe());
/// ```
pub fn get_factory_preset(name: &str) -> Option<SurroundPreset> {
    for (id, toml) in FACTORY_PRESETS_TOML {
        if id.eq_ignore_ascii_case(name) {
            return SurroundPreset::from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Returns true if `name` matches a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
