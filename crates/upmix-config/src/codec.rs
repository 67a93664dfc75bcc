//! Versioned binary encoding of [`SurroundParams`].
//!
//! # Layout (version 1, little-endian)
//!
//! | Offset | Field | Type |
//! |---|---|---|
//! | 0 | magic `"UPMX"` | `[u8; 4]` |
//! | 4 | version | `u16` |
//! | 6 | center_image, shift, depth, circular_wrap, focus, front_sep, rear_sep | `f32` × 7 |
//! | 34 | channel setup code | `u8` |
//! | 35 | channel map length `n` | `u16` |
//! | 37 | channel map flags | `u32` × n |
//! | 37+4n | bass_lo, bass_hi | `f32` × 2 |
//! | 45+4n | use_lfe | `u8` (0 or 1) |
//!
//! The channel map is stored for readers that want it without the layout
//! tables, but the decoder here ignores its contents and re-derives the map
//! from the setup code.
//!
//! Decoding builds every field into locals first and only constructs the
//! result once the whole blob has validated, so a failed decode never yields
//! a partially-filled parameter set.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};
use upmix_core::ChannelSetup;

use crate::error::PresetError;
use crate::params::SurroundParams;

/// Leading bytes of every preset blob.
pub const PRESET_MAGIC: [u8; 4] = *b"UPMX";

/// Format version written by [`encode`].
pub const PRESET_VERSION: u16 = 1;

/// Longest channel map accepted; larger counts mean a corrupt blob.
const MAX_CHANMAP_LEN: usize = 32;

/// Encodes `params` as a version-[`PRESET_VERSION`] blob.
pub fn encode(params: &SurroundParams) -> Vec<u8> {
    let mut out = Vec::with_capacity(46 + 4 * params.chanmap().len());
    let written = write_blob(params, &mut out);
    debug_assert!(written.is_ok(), "writes into a Vec cannot fail");
    out
}

/// Writes the version-[`PRESET_VERSION`] blob for `params` to `w`.
fn write_blob<W: Write>(params: &SurroundParams, w: &mut W) -> io::Result<()> {
    let chanmap = params.chanmap();

    w.write_all(&PRESET_MAGIC)?;
    w.write_u16::<LittleEndian>(PRESET_VERSION)?;
    for value in [
        params.center_image(),
        params.shift(),
        params.depth(),
        params.circular_wrap(),
        params.focus(),
        params.front_sep(),
        params.rear_sep(),
    ] {
        w.write_f32::<LittleEndian>(value)?;
    }
    w.write_u8(params.channel_setup().code())?;
    // Layouts top out at 17 channels.
    w.write_u16::<LittleEndian>(chanmap.len() as u16)?;
    for flag in chanmap {
        w.write_u32::<LittleEndian>(flag.bits())?;
    }
    w.write_f32::<LittleEndian>(params.bass_lo())?;
    w.write_f32::<LittleEndian>(params.bass_hi())?;
    w.write_u8(u8::from(params.use_lfe()))
}

/// Decodes a blob produced by [`encode`] (any supported version).
pub fn decode(bytes: &[u8]) -> Result<SurroundParams, PresetError> {
    let mut reader = bytes;

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != PRESET_MAGIC {
        return Err(PresetError::BadMagic);
    }

    let params = match reader.read_u16::<LittleEndian>()? {
        1 => decode_v1(&mut reader)?,
        found => {
            return Err(PresetError::UnsupportedVersion {
                found,
                supported: PRESET_VERSION,
            });
        }
    };

    if !reader.is_empty() {
        return Err(PresetError::TrailingBytes(reader.len()));
    }
    Ok(params)
}

fn decode_v1(reader: &mut &[u8]) -> Result<SurroundParams, PresetError> {
    let center_image = read_finite(reader, "center_image")?;
    let shift = read_finite(reader, "shift")?;
    let depth = read_finite(reader, "depth")?;
    let circular_wrap = read_finite(reader, "circular_wrap")?;
    let focus = read_finite(reader, "focus")?;
    let front_sep = read_finite(reader, "front_sep")?;
    let rear_sep = read_finite(reader, "rear_sep")?;

    let code = reader.read_u8()?;
    let setup = ChannelSetup::from_code(code).ok_or(PresetError::UnknownChannelSetup(code))?;

    let stored_len = usize::from(reader.read_u16::<LittleEndian>()?);
    if stored_len > MAX_CHANMAP_LEN {
        return Err(PresetError::ChannelMapTooLong(stored_len));
    }
    let mut stored_map = Vec::with_capacity(stored_len);
    for _ in 0..stored_len {
        stored_map.push(reader.read_u32::<LittleEndian>()?);
    }

    let bass_lo = read_finite(reader, "bass_lo")?;
    let bass_hi = read_finite(reader, "bass_hi")?;
    let use_lfe = match reader.read_u8()? {
        0 => false,
        1 => true,
        other => return Err(PresetError::InvalidBool(other)),
    };

    let mut params = SurroundParams::default();
    params.set_center_image(center_image);
    params.set_shift(shift);
    params.set_depth(depth);
    params.set_circular_wrap(circular_wrap);
    params.set_focus(focus);
    params.set_front_sep(front_sep);
    params.set_rear_sep(rear_sep);
    params.set_channel_setup(setup);
    params.set_bass_lo(bass_lo);
    params.set_bass_hi(bass_hi);
    params.set_use_lfe(use_lfe);

    let derived = params.chanmap().iter().map(|f| f.bits());
    if !derived.eq(stored_map.iter().copied()) {
        tracing::debug!(
            setup = %setup,
            stored = ?stored_map,
            "stored channel map differs from layout; using re-derived map"
        );
    }

    Ok(params)
}

fn read_finite(reader: &mut &[u8], field: &'static str) -> Result<f32, PresetError> {
    let value = reader.read_f32::<LittleEndian>()?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PresetError::NonFinite(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob() -> Vec<u8> {
        encode(&SurroundParams::default())
    }

    #[test]
    fn layout_of_default_blob() {
        let bytes = blob();
        assert_eq!(&bytes[..4], b"UPMX");
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 1);
        // 5.1: six chanmap entries
        assert_eq!(bytes.len(), 46 + 4 * 6);
        assert_eq!(bytes[34], ChannelSetup::FivePointOne.code());
        assert_eq!(u16::from_le_bytes([bytes[35], bytes[36]]), 6);
        assert_eq!(*bytes.last().unwrap(), 0);
    }

    #[test]
    fn fields_are_little_endian_in_field_order() {
        let mut params = SurroundParams::default();
        params.set_shift(-0.5);
        params.set_bass_hi(120.0);
        params.set_use_lfe(true);
        let bytes = encode(&params);

        let f32_at = |at: usize| f32::from_le_bytes(bytes[at..at + 4].try_into().unwrap());
        assert_eq!(f32_at(6), params.center_image());
        assert_eq!(f32_at(10), -0.5);
        assert_eq!(
            u32::from_le_bytes(bytes[37..41].try_into().unwrap()),
            params.chanmap()[0].bits()
        );
        let tail = 37 + 4 * params.chanmap().len();
        assert_eq!(f32_at(tail), params.bass_lo());
        assert_eq!(f32_at(tail + 4), 120.0);
        assert_eq!(bytes[tail + 8], 1);
    }

    #[test]
    fn roundtrip_default() {
        assert_eq!(decode(&blob()).unwrap(), SurroundParams::default());
    }

    #[test]
    fn empty_input_is_truncated() {
        assert!(matches!(decode(&[]), Err(PresetError::Truncated(_))));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = blob();
        bytes[0] = b'X';
        assert!(matches!(decode(&bytes), Err(PresetError::BadMagic)));
    }

    #[test]
    fn rejects_future_version() {
        let mut bytes = blob();
        bytes[4..6].copy_from_slice(&2u16.to_le_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(PresetError::UnsupportedVersion {
                found: 2,
                supported: 1
            })
        ));
    }

    #[test]
    fn rejects_truncation_at_every_length() {
        let bytes = blob();
        for len in 0..bytes.len() {
            assert!(
                matches!(decode(&bytes[..len]), Err(PresetError::Truncated(_))),
                "prefix of {len} bytes"
            );
        }
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = blob();
        bytes.extend_from_slice(&[0, 0, 0]);
        assert!(matches!(decode(&bytes), Err(PresetError::TrailingBytes(3))));
    }

    #[test]
    fn rejects_unknown_setup() {
        let mut bytes = blob();
        bytes[34] = 16;
        assert!(matches!(
            decode(&bytes),
            Err(PresetError::UnknownChannelSetup(16))
        ));
    }

    #[test]
    fn rejects_non_finite_fields() {
        let mut bytes = blob();
        // depth is the third float
        bytes[14..18].copy_from_slice(&f32::NAN.to_le_bytes());
        assert!(matches!(decode(&bytes), Err(PresetError::NonFinite("depth"))));
    }

    #[test]
    fn rejects_bad_bool() {
        let mut bytes = blob();
        let last = bytes.len() - 1;
        bytes[last] = 7;
        assert!(matches!(decode(&bytes), Err(PresetError::InvalidBool(7))));
    }

    #[test]
    fn rejects_oversized_chanmap() {
        let mut bytes = blob();
        bytes[35..37].copy_from_slice(&1000u16.to_le_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(PresetError::ChannelMapTooLong(1000))
        ));
    }

    #[test]
    fn stored_chanmap_is_ignored_in_favour_of_layout() {
        let mut bytes = blob();
        // Overwrite the first stored flag with garbage.
        bytes[37..41].copy_from_slice(&0xdead_beef_u32.to_le_bytes());
        let params = decode(&bytes).unwrap();
        assert_eq!(params, SurroundParams::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut bytes = blob();
        // circular_wrap is the fourth float
        bytes[18..22].copy_from_slice(&720.0f32.to_le_bytes());
        assert_eq!(decode(&bytes).unwrap().circular_wrap(), 360.0);
    }
}
