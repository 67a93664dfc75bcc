//! Preset management commands.
//!
//! Provides commands to list, show, export and save surround presets.

#![allow(clippy::print_literal)]

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use upmix_config::{
    ConfigError, ControlValues, DisplayStrings, SurroundParams, SurroundPreset,
    ensure_user_presets_dir, factory_presets, get_factory_preset, list_user_presets,
    preset_name_from_path, user_presets_dir,
};
use upmix_core::{ChannelSetup, ParameterInfo};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List,

    /// Show the values of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Write a preset as a host preset blob
    Export {
        /// Preset name or path
        name: String,

        /// Output file for the binary blob
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Save a preset to the user presets directory
    Save {
        /// Name for the new preset
        name: String,

        /// Preset to start from
        #[arg(long, default_value = "default")]
        from: String,

        /// Speaker layout override
        #[arg(short, long)]
        layout: Option<String>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if the preset already exists
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list_presets(),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Export { name, out } => export_preset(&name, &out),
        PresetsCommand::Save {
            name,
            from,
            layout,
            description,
            force,
        } => save_preset(&name, &from, layout.as_deref(), description, force),
    }
}

fn list_presets() -> anyhow::Result<()> {
    println!("Factory Presets:");
    println!("================");
    for preset in factory_presets() {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {:12} {:8} - {}", preset.name, preset.params.channels, desc);
    }
    println!();

    println!("User Presets:");
    println!("=============");
    let user_presets = list_user_presets();
    if user_presets.is_empty() {
        println!("  (none)");
        println!();
        println!("  Create a preset with: upmix presets save <name> --from cinema");
    } else {
        for path in user_presets {
            let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
            match SurroundPreset::load(&path) {
                Ok(preset) => {
                    let desc = preset.description.as_deref().unwrap_or("");
                    println!("  {:12} {:8} - {}", name, preset.params.channels, desc);
                }
                Err(e) => {
                    tracing::warn!("failed to load {}: {e}", path.display());
                    println!("  {name:12} (error loading)");
                }
            }
        }
    }
    println!();
    println!("User preset directory: {}", user_presets_dir().display());

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = find_preset(name)?;
    let params = preset.to_params()?;
    let labels = DisplayStrings::of(&params);
    let controls = ControlValues::from_params(&params);

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
        println!();
    }

    let setup = params.channel_setup();
    println!("Layout:        {} ({} channels)", setup.label(), setup.num_channels());
    println!("Circular wrap: {:8} slider {}", labels.wrap, controls.wrap);
    println!("Shift:         {:8} slider {}", labels.shift, controls.shift);
    println!("Depth:         {:8} slider {}", labels.depth, controls.depth);
    println!("Focus:         {:8} slider {}", labels.focus, controls.focus);
    println!("Center image:  ({:.2})", params.center_image());
    println!("Front sep:     {:8} slider {}", labels.front_sep, controls.front_sep);
    println!("Rear sep:      {:8} slider {}", labels.rear_sep, controls.rear_sep);
    println!("Bass low:      {:8} slider {}", labels.bass_lo, controls.bass_lo);
    println!("Bass high:     {:8} slider {}", labels.bass_hi, controls.bass_hi);
    println!(
        "Redirect bass: {}",
        if params.use_lfe() { "yes" } else { "no" }
    );
    println!();
    print_raw_values(&params);
    println!();
    println!("Blob: {} bytes", params.to_bytes().len());

    Ok(())
}

fn print_raw_values(params: &SurroundParams) {
    println!("  {:3}  {:14}  {:>12}  {}", "Id", "Key", "Value", "Range");
    for i in 0..params.param_count() {
        let Some(desc) = params.param_info(i) else {
            continue;
        };
        let value = params.get_param(i);
        let shown = if desc.stepped {
            format!("{value:.0}")
        } else {
            format!("{value:.2}{}", desc.unit.suffix())
        };
        println!(
            "  {:3}  {:14}  {:>12}  {}..{}",
            desc.id.0, desc.string_id, shown, desc.min, desc.max
        );
    }
}

fn export_preset(name: &str, out: &Path) -> anyhow::Result<()> {
    let preset = find_preset(name)?;
    let blob = preset.to_params()?.to_bytes();
    std::fs::write(out, &blob).map_err(|e| ConfigError::write_file(out, e))?;
    println!(
        "Exported '{}' ({} bytes) to {}",
        preset.name,
        blob.len(),
        out.display()
    );
    Ok(())
}

fn save_preset(
    name: &str,
    from: &str,
    layout: Option<&str>,
    description: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    ensure_user_presets_dir()?;
    let preset_path = user_presets_dir().join(format!("{name}.toml"));

    if preset_path.exists() && !force {
        anyhow::bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }

    let source = find_preset(from)?;
    let mut params = source.to_params()?;
    if let Some(layout) = layout {
        let setup = ChannelSetup::from_name(layout)
            .ok_or_else(|| ConfigError::UnknownChannelSetup(layout.to_string()))?;
        params.set_channel_setup(setup);
    }

    let mut preset = SurroundPreset::from_params(name, &params);
    if let Some(desc) = description.or(source.description) {
        preset = preset.with_description(desc);
    }
    preset.save(&preset_path)?;

    println!("Saved preset '{name}' to {}", preset_path.display());
    Ok(())
}

/// Find a preset by path, factory name or user preset name, in that order.
pub fn find_preset(name: &str) -> anyhow::Result<SurroundPreset> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Ok(SurroundPreset::load(&path)?);
    }

    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = upmix_config::find_preset(name) {
        return Ok(SurroundPreset::load(&path)?);
    }

    Err(ConfigError::PresetNotFound(name.to_string()).into())
}
