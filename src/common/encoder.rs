use super::bit_utils::BitStream;
use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, Version};

// Byte-mode bit-stream encoder
//------------------------------------------------------------------------------
//
// Mode indicator (4 bits, 0b0100) + character count indicator (8 or 16 bits,
// version-dependent) + the payload bytes + a terminator + byte-alignment
// padding + alternating pad codewords, per ISO/IEC 18004 §7.4.

const MODE_BYTE: u8 = 0b0100;
const TERMINATOR_LEN: usize = 4;
const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

fn required_bits(data_len: usize, ver: Version) -> usize {
    4 + ver.char_cnt_bits() + data_len * 8
}

/// Smallest version from 1 to 40 whose byte-mode capacity at `ecl` fits
/// `data`, or `QRError::InputTooLarge` if none does.
pub fn find_version(data: &[u8], ecl: ECLevel) -> QRResult<Version> {
    (1..=40)
        .map(Version::new)
        .find(|ver| required_bits(data.len(), *ver) <= ver.data_bit_capacity(ecl))
        .ok_or(QRError::InputTooLarge)
}

/// Encodes `data` at an explicit version, failing if it doesn't fit.
pub fn encode_with_version(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
    if required_bits(data.len(), ver) > ver.data_bit_capacity(ecl) {
        return Err(QRError::CapacityExceeded);
    }
    Ok(encode(data, ver, ecl))
}

/// Picks the smallest version that fits `data` and encodes it.
pub fn encode_auto(data: &[u8], ecl: ECLevel) -> QRResult<(BitStream, Version)> {
    let ver = find_version(data, ecl)?;
    Ok((encode(data, ver, ecl), ver))
}

fn encode(data: &[u8], ver: Version, ecl: ECLevel) -> BitStream {
    let capacity = ver.data_bit_capacity(ecl);
    let mut bs = BitStream::new(capacity);

    bs.push_bits(MODE_BYTE, 4);
    bs.push_bits(data.len() as u16, ver.char_cnt_bits());
    for &byte in data {
        bs.push_bits(byte, 8);
    }

    let remaining = capacity - bs.len();
    let terminator_len = remaining.min(TERMINATOR_LEN);
    bs.push_bits(0u8, terminator_len);

    // Pad to a byte boundary.
    let stray_bits = bs.len() & 7;
    if stray_bits != 0 {
        bs.push_bits(0u8, 8 - stray_bits);
    }

    for &pad in PAD_CODEWORDS.iter().cycle() {
        if bs.len() >= capacity {
            break;
        }
        bs.push_byte(pad);
    }

    bs
}
