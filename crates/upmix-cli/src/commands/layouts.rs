//! Speaker layout listing.
//!
//! `--wiring` prints, for each layout, the output slot every decoder channel
//! is written to. Positions the host has no speaker name for share a slot
//! name with a different position and are marked as aliased.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use upmix_config::SurroundParams;
use upmix_core::{ChannelId, ChannelSetup, SpeakerFlag, is_aliased};

#[derive(Args)]
pub struct LayoutsArgs {
    /// Show a single layout
    #[arg(value_name = "LAYOUT")]
    layout: Option<String>,

    /// Show the output slot of every decoder channel
    #[arg(long)]
    wiring: bool,
}

pub fn run(args: LayoutsArgs) -> anyhow::Result<()> {
    let setups: Vec<ChannelSetup> = match &args.layout {
        Some(name) => {
            let setup = ChannelSetup::from_name(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown layout: {name}"))?;
            vec![setup]
        }
        None => ChannelSetup::ALL.to_vec(),
    };

    println!("Available Layouts:");
    println!();
    println!("  {:4}  {:22}  {:16}  {}", "Code", "Name", "Id", "Channels");
    println!("  {:4}  {:22}  {:16}  {}", "----", "----", "--", "--------");
    for setup in &setups {
        println!(
            "  {:4}  {:22}  {:16}  {}",
            setup.code(),
            setup.label(),
            setup.name(),
            setup.num_channels()
        );
    }

    if args.wiring {
        for setup in &setups {
            print_wiring(*setup);
        }
    }

    Ok(())
}

fn print_wiring(setup: ChannelSetup) {
    let mut params = SurroundParams::default();
    params.set_channel_setup(setup);
    let mask = params.channel_bitmask();

    println!();
    println!("{} (mask {:#07x})", setup.label(), mask.bits());
    println!("  {:4}  {:18}  {:22}  {}", "Slot", "Output", "Decoder channel", "Note");
    for (slot, flag) in mask.wiring() {
        let Some(id) = decoder_channel(&params, flag) else {
            continue;
        };
        let note = if is_aliased(id) { "(aliased)" } else { "" };
        println!("  {:4}  {:18}  {:22}  {}", slot, flag.name(), id.name(), note);
    }
}

/// Decoder channel the pipeline writes into the slot for `flag`.
fn decoder_channel(params: &SurroundParams, flag: SpeakerFlag) -> Option<ChannelId> {
    let index = params.chanmap().iter().position(|&f| f == flag)?;
    params.channel_setup().channels().get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use upmix_core::channel_index_from_flag;

    #[test]
    fn wiring_follows_the_parameter_chanmap() {
        for setup in ChannelSetup::ALL {
            let mut params = SurroundParams::default();
            params.set_channel_setup(setup);
            let mask = params.channel_bitmask();

            let wired: Vec<_> = mask.wiring().collect();
            assert_eq!(wired.len(), setup.num_channels(), "{setup}");
            for (slot, flag) in wired {
                assert_eq!(channel_index_from_flag(mask, flag), Some(slot), "{setup}");
                let id = decoder_channel(&params, flag).unwrap();
                assert!(setup.channels().contains(&id), "{setup}");
            }
        }
    }
}
