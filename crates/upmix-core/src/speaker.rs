//! Host channel vocabulary: one bit per physical output slot.
//!
//! Hosts describe a multichannel buffer with a bitmask of [`SpeakerFlag`]s.
//! Channels are stored interleaved in ascending bit order, so the slot of a
//! speaker inside a frame is the number of mask bits below its flag
//! ([`channel_index_from_flag`]).
//!
//! The decoder's logical positions ([`ChannelId`]) are translated to host
//! flags by [`host_flag`]. The host vocabulary has no side-front, side-back or
//! back-center-left/right speakers, so those positions are aliased onto the
//! top-front/top-back slots:
//!
//! | Decoder position | Host slot |
//! |---|---|
//! | side front left/right | top front left/right |
//! | side center left/right | side left/right |
//! | side back left/right | top back left/right |
//! | back center left | top front center |
//! | back center right | top back center |
//!
//! Users with such layouts must wire those speakers to the aliased outputs.
//! The table is fixed; it is not configurable at runtime.

use crate::channel::ChannelId;
use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// A single host output slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeakerFlag(u32);

impl SpeakerFlag {
    /// Front left.
    pub const FRONT_LEFT: Self = Self(1 << 0);
    /// Front right.
    pub const FRONT_RIGHT: Self = Self(1 << 1);
    /// Front center.
    pub const FRONT_CENTER: Self = Self(1 << 2);
    /// Low-frequency effects.
    pub const LFE: Self = Self(1 << 3);
    /// Back left.
    pub const BACK_LEFT: Self = Self(1 << 4);
    /// Back right.
    pub const BACK_RIGHT: Self = Self(1 << 5);
    /// Front left of center.
    pub const FRONT_CENTER_LEFT: Self = Self(1 << 6);
    /// Front right of center.
    pub const FRONT_CENTER_RIGHT: Self = Self(1 << 7);
    /// Back center.
    pub const BACK_CENTER: Self = Self(1 << 8);
    /// Side left.
    pub const SIDE_LEFT: Self = Self(1 << 9);
    /// Side right.
    pub const SIDE_RIGHT: Self = Self(1 << 10);
    /// Top center.
    pub const TOP_CENTER: Self = Self(1 << 11);
    /// Top front left.
    pub const TOP_FRONT_LEFT: Self = Self(1 << 12);
    /// Top front center.
    pub const TOP_FRONT_CENTER: Self = Self(1 << 13);
    /// Top front right.
    pub const TOP_FRONT_RIGHT: Self = Self(1 << 14);
    /// Top back left.
    pub const TOP_BACK_LEFT: Self = Self(1 << 15);
    /// Top back center.
    pub const TOP_BACK_CENTER: Self = Self(1 << 16);
    /// Top back right.
    pub const TOP_BACK_RIGHT: Self = Self(1 << 17);

    /// Every known flag in ascending bit order.
    pub const ALL: [SpeakerFlag; 18] = [
        Self::FRONT_LEFT,
        Self::FRONT_RIGHT,
        Self::FRONT_CENTER,
        Self::LFE,
        Self::BACK_LEFT,
        Self::BACK_RIGHT,
        Self::FRONT_CENTER_LEFT,
        Self::FRONT_CENTER_RIGHT,
        Self::BACK_CENTER,
        Self::SIDE_LEFT,
        Self::SIDE_RIGHT,
        Self::TOP_CENTER,
        Self::TOP_FRONT_LEFT,
        Self::TOP_FRONT_CENTER,
        Self::TOP_FRONT_RIGHT,
        Self::TOP_BACK_LEFT,
        Self::TOP_BACK_CENTER,
        Self::TOP_BACK_RIGHT,
    ];

    /// Raw bit value.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns the flag for `bits` if it is exactly one known bit.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        if bits.count_ones() == 1 && bits < (1u32 << 18) {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Host name of the slot, e.g. `"top front left"`.
    pub const fn name(self) -> &'static str {
        match self.0.trailing_zeros() {
            0 => "front left",
            1 => "front right",
            2 => "front center",
            3 => "LFE",
            4 => "back left",
            5 => "back right",
            6 => "front center left",
            7 => "front center right",
            8 => "back center",
            9 => "side left",
            10 => "side right",
            11 => "top center",
            12 => "top front left",
            13 => "top front center",
            14 => "top front right",
            15 => "top back left",
            16 => "top back center",
            17 => "top back right",
            _ => "unknown",
        }
    }
}

impl fmt::Display for SpeakerFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a decoder position onto the host slot it is rendered to.
///
/// See the module docs for the aliased positions.
pub const fn host_flag(id: ChannelId) -> SpeakerFlag {
    match id {
        ChannelId::FrontLeft => SpeakerFlag::FRONT_LEFT,
        ChannelId::FrontCenterLeft => SpeakerFlag::FRONT_CENTER_LEFT,
        ChannelId::FrontCenter => SpeakerFlag::FRONT_CENTER,
        ChannelId::FrontCenterRight => SpeakerFlag::FRONT_CENTER_RIGHT,
        ChannelId::FrontRight => SpeakerFlag::FRONT_RIGHT,
        ChannelId::SideFrontLeft => SpeakerFlag::TOP_FRONT_LEFT,
        ChannelId::SideFrontRight => SpeakerFlag::TOP_FRONT_RIGHT,
        ChannelId::SideCenterLeft => SpeakerFlag::SIDE_LEFT,
        ChannelId::SideCenterRight => SpeakerFlag::SIDE_RIGHT,
        ChannelId::SideBackLeft => SpeakerFlag::TOP_BACK_LEFT,
        ChannelId::SideBackRight => SpeakerFlag::TOP_BACK_RIGHT,
        ChannelId::BackLeft => SpeakerFlag::BACK_LEFT,
        ChannelId::BackCenterLeft => SpeakerFlag::TOP_FRONT_CENTER,
        ChannelId::BackCenter => SpeakerFlag::BACK_CENTER,
        ChannelId::BackCenterRight => SpeakerFlag::TOP_BACK_CENTER,
        ChannelId::BackRight => SpeakerFlag::BACK_RIGHT,
        ChannelId::Lfe => SpeakerFlag::LFE,
    }
}

/// Returns `true` when [`host_flag`] renders `id` to a slot of a different name.
pub const fn is_aliased(id: ChannelId) -> bool {
    matches!(
        id,
        ChannelId::SideFrontLeft
            | ChannelId::SideFrontRight
            | ChannelId::SideBackLeft
            | ChannelId::SideBackRight
            | ChannelId::BackCenterLeft
            | ChannelId::BackCenterRight
    )
}

/// Host channel configuration: the union of the slots present in a buffer.
///
/// # Example
///
/// ```rust
/// use upmix_core::{SpeakerFlag, SpeakerMask, channel_index_from_flag};
///
/// let mask = SpeakerMask::STEREO | SpeakerFlag::FRONT_CENTER | SpeakerFlag::LFE;
/// assert_eq!(mask.count(), 4);
/// assert_eq!(channel_index_from_flag(mask, SpeakerFlag::LFE), Some(3));
/// assert_eq!(channel_index_from_flag(mask, SpeakerFlag::BACK_LEFT), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpeakerMask(u32);

impl SpeakerMask {
    /// No channels.
    pub const EMPTY: Self = Self(0);
    /// Front left + front right.
    pub const STEREO: Self = Self(SpeakerFlag::FRONT_LEFT.0 | SpeakerFlag::FRONT_RIGHT.0);
    /// Front center only.
    pub const MONO: Self = Self(SpeakerFlag::FRONT_CENTER.0);

    /// Wraps raw mask bits.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw mask bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Number of channels (set bits).
    #[inline]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if no channel is present.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `flag` is part of this mask.
    #[inline]
    pub const fn contains(self, flag: SpeakerFlag) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// Returns the mask with `flag` added.
    #[inline]
    pub const fn with(self, flag: SpeakerFlag) -> Self {
        Self(self.0 | flag.0)
    }

    /// Interleaved slot of `flag`, or `None` if the mask lacks it.
    #[inline]
    pub const fn index_of(self, flag: SpeakerFlag) -> Option<usize> {
        if flag.0 == 0 || !self.contains(flag) {
            return None;
        }
        Some((self.0 & (flag.0 - 1)).count_ones() as usize)
    }

    /// Iterates the present flags in slot order.
    pub fn iter(self) -> impl Iterator<Item = SpeakerFlag> {
        (0..32u32)
            .map(|bit| 1u32 << bit)
            .filter(move |bit| self.0 & bit != 0)
            .map(SpeakerFlag)
    }

    /// Iterates `(slot, flag)` pairs, the wiring a user connects outputs by.
    pub fn wiring(self) -> impl Iterator<Item = (usize, SpeakerFlag)> {
        self.iter().enumerate()
    }
}

impl BitOr<SpeakerFlag> for SpeakerMask {
    type Output = SpeakerMask;

    fn bitor(self, rhs: SpeakerFlag) -> SpeakerMask {
        self.with(rhs)
    }
}

impl BitOr for SpeakerMask {
    type Output = SpeakerMask;

    fn bitor(self, rhs: SpeakerMask) -> SpeakerMask {
        SpeakerMask(self.0 | rhs.0)
    }
}

impl BitOrAssign<SpeakerFlag> for SpeakerMask {
    fn bitor_assign(&mut self, rhs: SpeakerFlag) {
        self.0 |= rhs.0;
    }
}

impl From<SpeakerFlag> for SpeakerMask {
    fn from(flag: SpeakerFlag) -> Self {
        Self(flag.0)
    }
}

impl FromIterator<SpeakerFlag> for SpeakerMask {
    fn from_iter<I: IntoIterator<Item = SpeakerFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, SpeakerMask::with)
    }
}

/// Slot index of `flag` within buffers laid out by `mask`.
///
/// Returns `None` when `mask` does not contain `flag`.
#[inline]
pub const fn channel_index_from_flag(mask: SpeakerMask, flag: SpeakerFlag) -> Option<usize> {
    mask.index_of(flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelSetup;

    #[test]
    fn alias_table_is_injective() {
        for (i, a) in ChannelId::ALL.iter().enumerate() {
            for b in &ChannelId::ALL[i + 1..] {
                assert_ne!(host_flag(*a), host_flag(*b), "{a} and {b} share a slot");
            }
        }
    }

    #[test]
    fn aliased_positions() {
        assert_eq!(host_flag(ChannelId::SideFrontLeft), SpeakerFlag::TOP_FRONT_LEFT);
        assert_eq!(host_flag(ChannelId::SideCenterRight), SpeakerFlag::SIDE_RIGHT);
        assert_eq!(host_flag(ChannelId::SideBackRight), SpeakerFlag::TOP_BACK_RIGHT);
        assert_eq!(
            host_flag(ChannelId::BackCenterLeft),
            SpeakerFlag::TOP_FRONT_CENTER
        );
        assert_eq!(
            host_flag(ChannelId::BackCenterRight),
            SpeakerFlag::TOP_BACK_CENTER
        );
        assert_eq!(host_flag(ChannelId::BackCenter), SpeakerFlag::BACK_CENTER);
        assert_eq!(host_flag(ChannelId::Lfe), SpeakerFlag::LFE);
        assert!(is_aliased(ChannelId::BackCenterLeft));
        assert!(!is_aliased(ChannelId::SideCenterLeft));
    }

    #[test]
    fn index_counts_lower_bits() {
        let mask: SpeakerMask = [
            SpeakerFlag::FRONT_LEFT,
            SpeakerFlag::FRONT_RIGHT,
            SpeakerFlag::FRONT_CENTER,
            SpeakerFlag::LFE,
            SpeakerFlag::BACK_LEFT,
            SpeakerFlag::BACK_RIGHT,
        ]
        .into_iter()
        .collect();
        assert_eq!(mask.count(), 6);
        assert_eq!(mask.index_of(SpeakerFlag::FRONT_LEFT), Some(0));
        assert_eq!(mask.index_of(SpeakerFlag::FRONT_CENTER), Some(2));
        assert_eq!(mask.index_of(SpeakerFlag::BACK_RIGHT), Some(5));
        assert_eq!(mask.index_of(SpeakerFlag::SIDE_LEFT), None);
    }

    #[test]
    fn from_bits_requires_single_known_bit() {
        assert_eq!(SpeakerFlag::from_bits(1 << 3), Some(SpeakerFlag::LFE));
        assert_eq!(SpeakerFlag::from_bits(0), None);
        assert_eq!(SpeakerFlag::from_bits(0b11), None);
        assert_eq!(SpeakerFlag::from_bits(1 << 18), None);
    }

    #[test]
    fn every_setup_maps_to_distinct_slots() {
        for setup in ChannelSetup::ALL {
            let mask: SpeakerMask = setup.channels().iter().map(|&c| host_flag(c)).collect();
            assert_eq!(mask.count(), setup.num_channels(), "{setup}");
        }
    }

    #[test]
    fn wiring_enumerates_slots_in_bit_order() {
        let mask = SpeakerMask::STEREO | SpeakerFlag::LFE;
        let mut wiring = mask.wiring();
        assert_eq!(wiring.next(), Some((0, SpeakerFlag::FRONT_LEFT)));
        assert_eq!(wiring.next(), Some((1, SpeakerFlag::FRONT_RIGHT)));
        assert_eq!(wiring.next(), Some((2, SpeakerFlag::LFE)));
        assert_eq!(wiring.next(), None);
    }
}
