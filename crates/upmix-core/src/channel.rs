//! Logical speaker positions and the named surround layouts built from them.
//!
//! A [`ChannelSetup`] owns an ordered list of [`ChannelId`]s. The order is the
//! decoder's native channel order: decoded blocks carry channel `i` of the
//! setup at index `i` of every frame. Count and order are a pure function of
//! the setup value, so two decoders built for the same setup always agree.
//!
//! # Example
//!
//! ```rust
//! use upmix_core::{ChannelId, ChannelSetup};
//!
//! let setup = ChannelSetup::FivePointOne;
//! assert_eq!(setup.num_channels(), 6);
//! assert_eq!(setup.channel_at(0), Some(ChannelId::FrontLeft));
//! assert_eq!(setup.channel_at(5), Some(ChannelId::Lfe));
//! assert_eq!(setup.channel_at(6), None);
//! ```

use core::fmt;

/// Logical speaker position in the decoder's vocabulary.
///
/// Azimuths are in degrees, clockwise from straight ahead (negative = left).
/// The LFE channel has no position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelId {
    /// Front left.
    FrontLeft,
    /// Front center-left (between front left and center).
    FrontCenterLeft,
    /// Front center.
    FrontCenter,
    /// Front center-right (between center and front right).
    FrontCenterRight,
    /// Front right.
    FrontRight,
    /// Side front left.
    SideFrontLeft,
    /// Side front right.
    SideFrontRight,
    /// Side center left (classic side surround).
    SideCenterLeft,
    /// Side center right (classic side surround).
    SideCenterRight,
    /// Side back left.
    SideBackLeft,
    /// Side back right.
    SideBackRight,
    /// Back left.
    BackLeft,
    /// Back center-left.
    BackCenterLeft,
    /// Back center.
    BackCenter,
    /// Back center-right.
    BackCenterRight,
    /// Back right.
    BackRight,
    /// Low-frequency effects.
    Lfe,
}

impl ChannelId {
    /// Every channel id, in declaration order.
    pub const ALL: [ChannelId; 17] = [
        ChannelId::FrontLeft,
        ChannelId::FrontCenterLeft,
        ChannelId::FrontCenter,
        ChannelId::FrontCenterRight,
        ChannelId::FrontRight,
        ChannelId::SideFrontLeft,
        ChannelId::SideFrontRight,
        ChannelId::SideCenterLeft,
        ChannelId::SideCenterRight,
        ChannelId::SideBackLeft,
        ChannelId::SideBackRight,
        ChannelId::BackLeft,
        ChannelId::BackCenterLeft,
        ChannelId::BackCenter,
        ChannelId::BackCenterRight,
        ChannelId::BackRight,
        ChannelId::Lfe,
    ];

    /// Human-readable name, e.g. `"side front left"`.
    pub const fn name(self) -> &'static str {
        match self {
            ChannelId::FrontLeft => "front left",
            ChannelId::FrontCenterLeft => "front center left",
            ChannelId::FrontCenter => "front center",
            ChannelId::FrontCenterRight => "front center right",
            ChannelId::FrontRight => "front right",
            ChannelId::SideFrontLeft => "side front left",
            ChannelId::SideFrontRight => "side front right",
            ChannelId::SideCenterLeft => "side center left",
            ChannelId::SideCenterRight => "side center right",
            ChannelId::SideBackLeft => "side back left",
            ChannelId::SideBackRight => "side back right",
            ChannelId::BackLeft => "back left",
            ChannelId::BackCenterLeft => "back center left",
            ChannelId::BackCenter => "back center",
            ChannelId::BackCenterRight => "back center right",
            ChannelId::BackRight => "back right",
            ChannelId::Lfe => "LFE",
        }
    }

    /// Speaker azimuth in degrees, or `None` for the LFE channel.
    pub const fn azimuth(self) -> Option<f32> {
        let deg = match self {
            ChannelId::FrontLeft => -30.0,
            ChannelId::FrontCenterLeft => -15.0,
            ChannelId::FrontCenter => 0.0,
            ChannelId::FrontCenterRight => 15.0,
            ChannelId::FrontRight => 30.0,
            ChannelId::SideFrontLeft => -60.0,
            ChannelId::SideFrontRight => 60.0,
            ChannelId::SideCenterLeft => -90.0,
            ChannelId::SideCenterRight => 90.0,
            ChannelId::SideBackLeft => -115.0,
            ChannelId::SideBackRight => 115.0,
            ChannelId::BackLeft => -140.0,
            ChannelId::BackCenterLeft => -160.0,
            ChannelId::BackCenter => 180.0,
            ChannelId::BackCenterRight => 160.0,
            ChannelId::BackRight => 140.0,
            ChannelId::Lfe => return None,
        };
        Some(deg)
    }

    /// Returns `true` for the low-frequency effects channel.
    pub const fn is_lfe(self) -> bool {
        matches!(self, ChannelId::Lfe)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use ChannelId::{
    BackCenter as BC, BackCenterLeft as BCL, BackCenterRight as BCR, BackLeft as BL,
    BackRight as BR, FrontCenter as FC, FrontCenterLeft as FCL, FrontCenterRight as FCR,
    FrontLeft as FL, FrontRight as FR, Lfe as LFE, SideBackLeft as SBL, SideBackRight as SBR,
    SideCenterLeft as SCL, SideCenterRight as SCR, SideFrontLeft as SFL, SideFrontRight as SFR,
};

const STEREO: &[ChannelId] = &[FL, FR];
const THREE_STEREO: &[ChannelId] = &[FL, FC, FR];
const FOUR_POINT_ONE: &[ChannelId] = &[FL, FC, FR, BC, LFE];
const FIVE_POINT_ONE: &[ChannelId] = &[FL, FC, FR, BL, BR, LFE];
const FIVE_STEREO: &[ChannelId] = &[FL, FCL, FC, FCR, FR];
const LEGACY: &[ChannelId] = &[FL, FR, BL, BR];
const SIX_POINT_ONE: &[ChannelId] = &[FL, FC, FR, SCL, SCR, BC, LFE];
const SEVEN_POINT_ONE: &[ChannelId] = &[FL, FC, FR, SCL, SCR, BL, BR, LFE];
const SEVEN_POINT_ONE_PANORAMA: &[ChannelId] = &[FL, FC, FR, SFL, SFR, BL, BR, LFE];
const SEVEN_POINT_ONE_TRICENTER: &[ChannelId] = &[FL, FCL, FC, FCR, FR, BL, BR, LFE];
const EIGHT_POINT_ONE: &[ChannelId] = &[FL, FC, FR, SCL, SCR, BL, BC, BR, LFE];
const NINE_POINT_ONE_WRAP: &[ChannelId] = &[FL, FCL, FC, FCR, FR, SCL, SCR, BL, BR, LFE];
const NINE_POINT_ONE_DENSE_PANORAMA: &[ChannelId] =
    &[FL, FCL, FC, FCR, FR, SFL, SFR, BL, BR, LFE];
const ELEVEN_POINT_ONE_DENSE_WRAP: &[ChannelId] =
    &[FL, FCL, FC, FCR, FR, SFL, SFR, SBL, SBR, BL, BR, LFE];
const THIRTEEN_POINT_ONE_TOTAL_WRAP: &[ChannelId] =
    &[FL, FCL, FC, FCR, FR, SFL, SFR, SCL, SCR, SBL, SBR, BL, BR, LFE];
const SIXTEEN_POINT_ONE: &[ChannelId] = &[
    FL, FCL, FC, FCR, FR, SFL, SFR, SCL, SCR, SBL, SBR, BL, BCL, BC, BCR, BR, LFE,
];

/// Named surround layout the decoder renders into.
///
/// The discriminant doubles as the stable persisted code (see [`code`](Self::code))
/// and matches the order in which layouts are offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ChannelSetup {
    /// 2.0: front left/right.
    Stereo = 0,
    /// 3.0: left, center, right.
    ThreeStereo = 1,
    /// 4.1: LCR plus back center and LFE.
    FourPointOne = 2,
    /// 5.1: LCR, back pair and LFE.
    #[default]
    FivePointOne = 3,
    /// 5.0 front wall: five front speakers.
    FiveStereo = 4,
    /// 4.0 quadraphonic.
    Legacy = 5,
    /// 6.1: LCR, side pair, back center, LFE.
    SixPointOne = 6,
    /// 7.1: LCR, side pair, back pair, LFE.
    SevenPointOne = 7,
    /// 7.1 with side-front speakers instead of side-center.
    SevenPointOnePanorama = 8,
    /// 7.1 with five front speakers.
    SevenPointOneTricenter = 9,
    /// 8.1: 7.1 plus back center.
    EightPointOne = 10,
    /// 9.1: five fronts, side pair, back pair.
    NinePointOneWrap = 11,
    /// 9.1: five fronts, side-front pair, back pair.
    NinePointOneDensePanorama = 12,
    /// 11.1: five fronts, side-front and side-back pairs, back pair.
    ElevenPointOneDenseWrap = 13,
    /// 13.1: five fronts, all side pairs, back pair.
    ThirteenPointOneTotalWrap = 14,
    /// 16.1: every speaker position.
    SixteenPointOne = 15,
}

impl ChannelSetup {
    /// Every setup, in presentation order (index == [`code`](Self::code)).
    pub const ALL: [ChannelSetup; 16] = [
        ChannelSetup::Stereo,
        ChannelSetup::ThreeStereo,
        ChannelSetup::FourPointOne,
        ChannelSetup::FivePointOne,
        ChannelSetup::FiveStereo,
        ChannelSetup::Legacy,
        ChannelSetup::SixPointOne,
        ChannelSetup::SevenPointOne,
        ChannelSetup::SevenPointOnePanorama,
        ChannelSetup::SevenPointOneTricenter,
        ChannelSetup::EightPointOne,
        ChannelSetup::NinePointOneWrap,
        ChannelSetup::NinePointOneDensePanorama,
        ChannelSetup::ElevenPointOneDenseWrap,
        ChannelSetup::ThirteenPointOneTotalWrap,
        ChannelSetup::SixteenPointOne,
    ];

    /// Stable numeric code used in persisted presets.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`code`](Self::code).
    pub const fn from_code(code: u8) -> Option<Self> {
        if (code as usize) < Self::ALL.len() {
            Some(Self::ALL[code as usize])
        } else {
            None
        }
    }

    /// Short machine-friendly name, e.g. `"7.1-panorama"`.
    pub const fn name(self) -> &'static str {
        match self {
            ChannelSetup::Stereo => "stereo",
            ChannelSetup::ThreeStereo => "3-stereo",
            ChannelSetup::FourPointOne => "4.1",
            ChannelSetup::FivePointOne => "5.1",
            ChannelSetup::FiveStereo => "5-stereo",
            ChannelSetup::Legacy => "legacy",
            ChannelSetup::SixPointOne => "6.1",
            ChannelSetup::SevenPointOne => "7.1",
            ChannelSetup::SevenPointOnePanorama => "7.1-panorama",
            ChannelSetup::SevenPointOneTricenter => "7.1-tricenter",
            ChannelSetup::EightPointOne => "8.1",
            ChannelSetup::NinePointOneWrap => "9.1-wrap",
            ChannelSetup::NinePointOneDensePanorama => "9.1-densepanorama",
            ChannelSetup::ElevenPointOneDenseWrap => "11.1-densewrap",
            ChannelSetup::ThirteenPointOneTotalWrap => "13.1-totalwrap",
            ChannelSetup::SixteenPointOne => "16.1",
        }
    }

    /// Display label for menus, e.g. `"7.1 Panorama"`.
    pub const fn label(self) -> &'static str {
        match self {
            ChannelSetup::Stereo => "Stereo",
            ChannelSetup::ThreeStereo => "3 Stereo",
            ChannelSetup::FourPointOne => "4.1 Surround",
            ChannelSetup::FivePointOne => "5.1 Surround",
            ChannelSetup::FiveStereo => "5 Stereo",
            ChannelSetup::Legacy => "Legacy Quad",
            ChannelSetup::SixPointOne => "6.1 Surround",
            ChannelSetup::SevenPointOne => "7.1 Surround",
            ChannelSetup::SevenPointOnePanorama => "7.1 Panorama",
            ChannelSetup::SevenPointOneTricenter => "7.1 Tricenter",
            ChannelSetup::EightPointOne => "8.1 Surround",
            ChannelSetup::NinePointOneWrap => "9.1 Wrap",
            ChannelSetup::NinePointOneDensePanorama => "9.1 Dense Panorama",
            ChannelSetup::ElevenPointOneDenseWrap => "11.1 Dense Wrap",
            ChannelSetup::ThirteenPointOneTotalWrap => "13.1 Total Wrap",
            ChannelSetup::SixteenPointOne => "16.1 Surround",
        }
    }

    /// Parses a setup from its [`name`](Self::name) or [`label`](Self::label),
    /// ignoring ASCII case. Spaces and hyphens are interchangeable.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL.iter().copied().find(|setup| {
            loose_eq(setup.name(), wanted) || loose_eq(setup.label(), wanted)
        })
    }

    /// The setup's channels in decoder order.
    pub const fn channels(self) -> &'static [ChannelId] {
        match self {
            ChannelSetup::Stereo => STEREO,
            ChannelSetup::ThreeStereo => THREE_STEREO,
            ChannelSetup::FourPointOne => FOUR_POINT_ONE,
            ChannelSetup::FivePointOne => FIVE_POINT_ONE,
            ChannelSetup::FiveStereo => FIVE_STEREO,
            ChannelSetup::Legacy => LEGACY,
            ChannelSetup::SixPointOne => SIX_POINT_ONE,
            ChannelSetup::SevenPointOne => SEVEN_POINT_ONE,
            ChannelSetup::SevenPointOnePanorama => SEVEN_POINT_ONE_PANORAMA,
            ChannelSetup::SevenPointOneTricenter => SEVEN_POINT_ONE_TRICENTER,
            ChannelSetup::EightPointOne => EIGHT_POINT_ONE,
            ChannelSetup::NinePointOneWrap => NINE_POINT_ONE_WRAP,
            ChannelSetup::NinePointOneDensePanorama => NINE_POINT_ONE_DENSE_PANORAMA,
            ChannelSetup::ElevenPointOneDenseWrap => ELEVEN_POINT_ONE_DENSE_WRAP,
            ChannelSetup::ThirteenPointOneTotalWrap => THIRTEEN_POINT_ONE_TOTAL_WRAP,
            ChannelSetup::SixteenPointOne => SIXTEEN_POINT_ONE,
        }
    }

    /// Number of decoder channels for this setup.
    pub const fn num_channels(self) -> usize {
        self.channels().len()
    }

    /// The logical channel at decoder index `index`, or `None` past the end.
    pub const fn channel_at(self, index: usize) -> Option<ChannelId> {
        let channels = self.channels();
        if index < channels.len() {
            Some(channels[index])
        } else {
            None
        }
    }
}

impl fmt::Display for ChannelSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn loose_eq(candidate: &str, wanted: &str) -> bool {
    candidate.len() == wanted.len()
        && candidate.bytes().zip(wanted.bytes()).all(|(a, b)| {
            let norm = |c: u8| if c == b' ' { b'-' } else { c.to_ascii_lowercase() };
            norm(a) == norm(b)
        })
}
