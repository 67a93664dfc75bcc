//! Mapping between raw editor controls and the parameter set.
//!
//! An editor exposes eight sliders with integer positions `0..=100`, a
//! redirect-bass checkbox and a layout list. [`ControlValues`] is that raw
//! state; [`ControlValues::apply`] turns it into validated parameters and
//! [`DisplayStrings`] renders the labels shown next to each slider.
//!
//! | Control | Position → value |
//! |---|---|
//! | wrap | `p * 360 / 100` degrees |
//! | shift, focus | `p / 50 - 1` |
//! | depth | `p / 25` |
//! | front/rear separation | `p / 50` |
//! | bass low/high | `p * 1.5` Hz |
//!
//! The reverse mapping truncates, so a round trip through the controls can
//! move a value down to the nearest slider step.

use upmix_core::ChannelSetup;

use crate::params::SurroundParams;

/// Highest slider position.
pub const SLIDER_MAX: i32 = 100;

/// Raw positions of the editor controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlValues {
    /// Circular wrap slider.
    pub wrap: i32,
    /// Shift slider.
    pub shift: i32,
    /// Depth slider.
    pub depth: i32,
    /// Focus slider.
    pub focus: i32,
    /// Front separation slider.
    pub front_sep: i32,
    /// Rear separation slider.
    pub rear_sep: i32,
    /// Bass low cutoff slider.
    pub bass_lo: i32,
    /// Bass high cutoff slider.
    pub bass_hi: i32,
    /// Redirect-bass checkbox.
    pub redirect_bass: bool,
    /// Index into [`ChannelSetup::ALL`].
    pub layout: usize,
}

impl ControlValues {
    /// Control positions that represent `params`.
    pub fn from_params(params: &SurroundParams) -> Self {
        Self {
            wrap: (params.circular_wrap() * 100.0 / 360.0) as i32,
            shift: (params.shift() * 50.0 + 50.0) as i32,
            depth: (params.depth() * 25.0) as i32,
            focus: (params.focus() * 50.0 + 50.0) as i32,
            front_sep: (params.front_sep() * 50.0) as i32,
            rear_sep: (params.rear_sep() * 50.0) as i32,
            bass_lo: (params.bass_lo() / 1.5) as i32,
            bass_hi: (params.bass_hi() / 1.5) as i32,
            redirect_bass: params.use_lfe(),
            layout: usize::from(params.channel_setup().code()),
        }
    }

    /// Writes the controlled fields into `params`.
    ///
    /// Slider positions are clamped to `0..=100`. An unknown layout index
    /// selects stereo. Fields without a control (center image) are left
    /// untouched.
    pub fn apply(&self, params: &mut SurroundParams) {
        let pos = |p: i32| p.clamp(0, SLIDER_MAX) as f32;

        params.set_circular_wrap(pos(self.wrap) * 360.0 / 100.0);
        params.set_shift(pos(self.shift) / 50.0 - 1.0);
        params.set_depth(pos(self.depth) / 25.0);
        params.set_focus(pos(self.focus) / 50.0 - 1.0);
        params.set_front_sep(pos(self.front_sep) / 50.0);
        params.set_rear_sep(pos(self.rear_sep) / 50.0);
        params.set_bass_lo(pos(self.bass_lo) * 1.5);
        params.set_bass_hi(pos(self.bass_hi) * 1.5);
        params.set_use_lfe(self.redirect_bass);
        params.set_channel_setup(self.setup());
    }

    /// Layout selected by the list index.
    pub fn setup(&self) -> ChannelSetup {
        u8::try_from(self.layout)
            .ok()
            .and_then(ChannelSetup::from_code)
            .unwrap_or(ChannelSetup::Stereo)
    }
}

impl Default for ControlValues {
    fn default() -> Self {
        Self::from_params(&SurroundParams::default())
    }
}

/// Value labels an editor shows beside each slider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStrings {
    /// Wrap in whole degrees, e.g. `(90)`.
    pub wrap: String,
    /// Signed shift, e.g. `(+0.00)`.
    pub shift: String,
    /// Depth multiplier, e.g. `(1.00x)`.
    pub depth: String,
    /// Signed focus, e.g. `(-0.50)`.
    pub focus: String,
    /// Front separation multiplier.
    pub front_sep: String,
    /// Rear separation multiplier.
    pub rear_sep: String,
    /// Low cutoff in whole Hz, e.g. `(40Hz)`.
    pub bass_lo: String,
    /// High cutoff in whole Hz.
    pub bass_hi: String,
}

impl DisplayStrings {
    /// Renders the labels for `params`.
    pub fn of(params: &SurroundParams) -> Self {
        Self {
            wrap: format!("({:.0})", params.circular_wrap()),
            shift: format!("({:+.2})", params.shift()),
            depth: format!("({:.2}x)", params.depth()),
            focus: format!("({:+.2})", params.focus()),
            front_sep: format!("({:.2}x)", params.front_sep()),
            rear_sep: format!("({:.2}x)", params.rear_sep()),
            bass_lo: format!("({:.0}Hz)", params.bass_lo()),
            bass_hi: format!("({:.0}Hz)", params.bass_hi()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_of_defaults() {
        let c = ControlValues::default();
        assert_eq!(c.wrap, 25);
        assert_eq!(c.shift, 50);
        assert_eq!(c.depth, 25);
        assert_eq!(c.focus, 50);
        assert_eq!(c.front_sep, 50);
        assert_eq!(c.rear_sep, 50);
        assert_eq!(c.bass_lo, 26);
        assert_eq!(c.bass_hi, 60);
        assert!(!c.redirect_bass);
        assert_eq!(c.layout, 3);
    }

    #[test]
    fn apply_maps_positions() {
        let controls = ControlValues {
            wrap: 50,
            shift: 0,
            depth: 100,
            focus: 75,
            front_sep: 100,
            rear_sep: 25,
            bass_lo: 20,
            bass_hi: 80,
            redirect_bass: true,
            layout: 7,
        };
        let mut p = SurroundParams::default();
        controls.apply(&mut p);

        assert_eq!(p.circular_wrap(), 180.0);
        assert_eq!(p.shift(), -1.0);
        assert_eq!(p.depth(), 4.0);
        assert_eq!(p.focus(), 0.5);
        assert_eq!(p.front_sep(), 2.0);
        assert_eq!(p.rear_sep(), 0.5);
        assert_eq!(p.bass_lo(), 30.0);
        assert_eq!(p.bass_hi(), 120.0);
        assert!(p.use_lfe());
        assert_eq!(p.channel_setup(), ChannelSetup::SevenPointOne);
        assert_eq!(p.center_image(), 0.7);
    }

    #[test]
    fn out_of_range_positions_clamp() {
        let controls = ControlValues {
            wrap: 500,
            depth: -20,
            ..ControlValues::default()
        };
        let mut p = SurroundParams::default();
        controls.apply(&mut p);
        assert_eq!(p.circular_wrap(), 360.0);
        assert_eq!(p.depth(), 0.0);
    }

    #[test]
    fn unknown_layout_selects_stereo() {
        let controls = ControlValues {
            layout: 99,
            ..ControlValues::default()
        };
        let mut p = SurroundParams::default();
        controls.apply(&mut p);
        assert_eq!(p.channel_setup(), ChannelSetup::Stereo);
        assert_eq!(p.chanmap().len(), 2);
    }

    #[test]
    fn roundtrip_is_stable_after_first_pass() {
        let mut p = SurroundParams::default();
        ControlValues::default().apply(&mut p);
        let once = p.clone();
        ControlValues::from_params(&p).apply(&mut p);
        assert_eq!(p, once);
    }

    #[test]
    fn display_strings_of_defaults() {
        let d = DisplayStrings::of(&SurroundParams::default());
        assert_eq!(d.wrap, "(90)");
        assert_eq!(d.shift, "(+0.00)");
        assert_eq!(d.depth, "(1.00x)");
        assert_eq!(d.focus, "(+0.00)");
        assert_eq!(d.front_sep, "(1.00x)");
        assert_eq!(d.rear_sep, "(1.00x)");
        assert_eq!(d.bass_lo, "(40Hz)");
        assert_eq!(d.bass_hi, "(90Hz)");
    }

    #[test]
    fn display_strings_sign_negative_values() {
        let mut p = SurroundParams::default();
        p.set_focus(-0.5);
        assert_eq!(DisplayStrings::of(&p).focus, "(-0.50)");
    }
}
