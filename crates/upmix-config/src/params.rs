//! The surround parameter set.

use upmix_core::{
    ChannelSetup, ParamDescriptor, ParamId, ParameterInfo, SpeakerFlag, SpeakerMask, host_flag,
};

use crate::codec;
use crate::error::PresetError;

const CENTER_IMAGE: usize = 0;
const SHIFT: usize = 1;
const DEPTH: usize = 2;
const CIRCULAR_WRAP: usize = 3;
const FOCUS: usize = 4;
const FRONT_SEP: usize = 5;
const REAR_SEP: usize = 6;
const CHANNELS: usize = 7;
const BASS_LO: usize = 8;
const BASS_HI: usize = 9;
const USE_LFE: usize = 10;

/// Number of parameters exposed through [`ParameterInfo`].
pub const PARAM_COUNT: usize = 11;

/// Descriptors for every parameter, indexed as in [`ParameterInfo`].
///
/// The order is the order fields are persisted in.
pub static PARAM_DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::amount("Center Image", "Center", 0.0, 1.0, 0.7)
        .with_id(ParamId(1), "center_image"),
    ParamDescriptor::amount("Shift", "Shift", -1.0, 1.0, 0.0).with_id(ParamId(2), "shift"),
    ParamDescriptor::multiplier("Depth", "Depth", 0.0, 4.0, 1.0).with_id(ParamId(3), "depth"),
    ParamDescriptor::degrees("Circular Wrap", "Wrap", 0.0, 360.0, 90.0)
        .with_id(ParamId(4), "circular_wrap"),
    ParamDescriptor::amount("Focus", "Focus", -1.0, 1.0, 0.0).with_id(ParamId(5), "focus"),
    ParamDescriptor::multiplier("Front Separation", "FrontSep", 0.0, 2.0, 1.0)
        .with_id(ParamId(6), "front_sep"),
    ParamDescriptor::multiplier("Rear Separation", "RearSep", 0.0, 2.0, 1.0)
        .with_id(ParamId(7), "rear_sep"),
    ParamDescriptor::choice(
        "Channels",
        "Channels",
        ChannelSetup::ALL.len(),
        ChannelSetup::FivePointOne.code() as usize,
    )
    .with_id(ParamId(8), "channels"),
    ParamDescriptor::frequency_hz("Bass Low Cutoff", "BassLo", 0.0, 150.0, 40.0)
        .with_id(ParamId(9), "bass_lo"),
    ParamDescriptor::frequency_hz("Bass High Cutoff", "BassHi", 0.0, 150.0, 90.0)
        .with_id(ParamId(10), "bass_hi"),
    ParamDescriptor::toggle("Redirect Bass", "LFE", false).with_id(ParamId(11), "use_lfe"),
];

/// User-tunable upmix settings plus the derived channel map.
///
/// Values are always inside their descriptor ranges: every setter clamps.
/// The channel map is private and regenerated whenever the layout changes,
/// so `chanmap().len() == channel_setup().num_channels()` holds for every
/// reachable value.
///
/// # Example
///
/// ```rust
/// use upmix_config::SurroundParams;
/// use upmix_core::ChannelSetup;
///
/// let mut params = SurroundParams::default();
/// params.set_channel_setup(ChannelSetup::SevenPointOne);
/// params.set_circular_wrap(120.0);
///
/// let restored = SurroundParams::from_bytes(&params.to_bytes());
/// assert_eq!(restored, params);
/// assert_eq!(restored.channel_bitmask().count(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SurroundParams {
    center_image: f32,
    shift: f32,
    depth: f32,
    circular_wrap: f32,
    focus: f32,
    front_sep: f32,
    rear_sep: f32,
    bass_lo: f32,
    bass_hi: f32,
    use_lfe: bool,
    channels_fs: ChannelSetup,
    chanmap: Vec<SpeakerFlag>,
}

impl Default for SurroundParams {
    fn default() -> Self {
        let mut params = Self {
            center_image: PARAM_DESCRIPTORS[CENTER_IMAGE].default,
            shift: PARAM_DESCRIPTORS[SHIFT].default,
            depth: PARAM_DESCRIPTORS[DEPTH].default,
            circular_wrap: PARAM_DESCRIPTORS[CIRCULAR_WRAP].default,
            focus: PARAM_DESCRIPTORS[FOCUS].default,
            front_sep: PARAM_DESCRIPTORS[FRONT_SEP].default,
            rear_sep: PARAM_DESCRIPTORS[REAR_SEP].default,
            bass_lo: PARAM_DESCRIPTORS[BASS_LO].default,
            bass_hi: PARAM_DESCRIPTORS[BASS_HI].default,
            use_lfe: false,
            channels_fs: ChannelSetup::default(),
            chanmap: Vec::new(),
        };
        params.rebuild_chanmap();
        params
    }
}

impl SurroundParams {
    /// Decodes a preset blob, falling back to defaults on any error.
    ///
    /// The failure is logged at `warn` level; the returned value is either
    /// fully decoded or exactly [`SurroundParams::default`].
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match Self::try_from_bytes(bytes) {
            Ok(params) => params,
            Err(err) => {
                tracing::warn!(error = %err, "invalid surround preset; using defaults");
                Self::default()
            }
        }
    }

    /// Decodes a preset blob.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, PresetError> {
        codec::decode(bytes)
    }

    /// Encodes this parameter set as a versioned preset blob.
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode(self)
    }

    /// Selects a layout and regenerates the channel map.
    pub fn set_channel_setup(&mut self, setup: ChannelSetup) {
        self.channels_fs = setup;
        self.rebuild_chanmap();
    }

    fn rebuild_chanmap(&mut self) {
        self.chanmap.clear();
        self.chanmap
            .extend(self.channels_fs.channels().iter().map(|&id| host_flag(id)));
    }

    /// Active layout.
    pub fn channel_setup(&self) -> ChannelSetup {
        self.channels_fs
    }

    /// Host slot for each decoder channel, in decoder order.
    pub fn chanmap(&self) -> &[SpeakerFlag] {
        &self.chanmap
    }

    /// Union of all slots in the channel map.
    pub fn channel_bitmask(&self) -> SpeakerMask {
        self.chanmap.iter().copied().collect()
    }

    /// Share of the center image sent to center speakers.
    pub fn center_image(&self) -> f32 {
        self.center_image
    }

    /// Stage rotation.
    pub fn shift(&self) -> f32 {
        self.shift
    }

    /// Rear depth multiplier.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Stage width in degrees.
    pub fn circular_wrap(&self) -> f32 {
        self.circular_wrap
    }

    /// Localization sharpness.
    pub fn focus(&self) -> f32 {
        self.focus
    }

    /// Front separation multiplier.
    pub fn front_sep(&self) -> f32 {
        self.front_sep
    }

    /// Rear separation multiplier.
    pub fn rear_sep(&self) -> f32 {
        self.rear_sep
    }

    /// Lower crossover edge in Hz.
    pub fn bass_lo(&self) -> f32 {
        self.bass_lo
    }

    /// Upper crossover edge in Hz.
    pub fn bass_hi(&self) -> f32 {
        self.bass_hi
    }

    /// Whether bass is redirected to the LFE channel.
    pub fn use_lfe(&self) -> bool {
        self.use_lfe
    }

    /// Sets the center image, clamped to 0..1.
    pub fn set_center_image(&mut self, value: f32) {
        self.center_image = PARAM_DESCRIPTORS[CENTER_IMAGE].clamp(value);
    }

    /// Sets the stage rotation, clamped to -1..1.
    pub fn set_shift(&mut self, value: f32) {
        self.shift = PARAM_DESCRIPTORS[SHIFT].clamp(value);
    }

    /// Sets the depth multiplier, clamped to 0..4.
    pub fn set_depth(&mut self, value: f32) {
        self.depth = PARAM_DESCRIPTORS[DEPTH].clamp(value);
    }

    /// Sets the stage width, clamped to 0..360 degrees.
    pub fn set_circular_wrap(&mut self, value: f32) {
        self.circular_wrap = PARAM_DESCRIPTORS[CIRCULAR_WRAP].clamp(value);
    }

    /// Sets the focus, clamped to -1..1.
    pub fn set_focus(&mut self, value: f32) {
        self.focus = PARAM_DESCRIPTORS[FOCUS].clamp(value);
    }

    /// Sets the front separation, clamped to 0..2.
    pub fn set_front_sep(&mut self, value: f32) {
        self.front_sep = PARAM_DESCRIPTORS[FRONT_SEP].clamp(value);
    }

    /// Sets the rear separation, clamped to 0..2.
    pub fn set_rear_sep(&mut self, value: f32) {
        self.rear_sep = PARAM_DESCRIPTORS[REAR_SEP].clamp(value);
    }

    /// Sets the lower crossover edge, clamped to 0..150 Hz.
    pub fn set_bass_lo(&mut self, hz: f32) {
        self.bass_lo = PARAM_DESCRIPTORS[BASS_LO].clamp(hz);
    }

    /// Sets the upper crossover edge, clamped to 0..150 Hz.
    pub fn set_bass_hi(&mut self, hz: f32) {
        self.bass_hi = PARAM_DESCRIPTORS[BASS_HI].clamp(hz);
    }

    /// Enables or disables bass redirection.
    pub fn set_use_lfe(&mut self, enabled: bool) {
        self.use_lfe = enabled;
    }
}

impl ParameterInfo for SurroundParams {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        PARAM_DESCRIPTORS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            CENTER_IMAGE => self.center_image,
            SHIFT => self.shift,
            DEPTH => self.depth,
            CIRCULAR_WRAP => self.circular_wrap,
            FOCUS => self.focus,
            FRONT_SEP => self.front_sep,
            REAR_SEP => self.rear_sep,
            CHANNELS => f32::from(self.channels_fs.code()),
            BASS_LO => self.bass_lo,
            BASS_HI => self.bass_hi,
            USE_LFE => {
                if self.use_lfe {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            CENTER_IMAGE => self.set_center_image(value),
            SHIFT => self.set_shift(value),
            DEPTH => self.set_depth(value),
            CIRCULAR_WRAP => self.set_circular_wrap(value),
            FOCUS => self.set_focus(value),
            FRONT_SEP => self.set_front_sep(value),
            REAR_SEP => self.set_rear_sep(value),
            CHANNELS => {
                let code = PARAM_DESCRIPTORS[CHANNELS].clamp(value).round() as u8;
                if let Some(setup) = ChannelSetup::from_code(code) {
                    self.set_channel_setup(setup);
                }
            }
            BASS_LO => self.set_bass_lo(value),
            BASS_HI => self.set_bass_hi(value),
            USE_LFE => self.set_use_lfe(value >= 0.5),
            _ => {}
        }
    }
}
