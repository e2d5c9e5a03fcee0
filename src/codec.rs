//! Bit and field extraction from hex-digit record lines.
//!
//! U-Blox payloads are little-endian on the wire. Captures store each
//! record as one ASCII hex line, so a multi-byte field is reassembled by
//! reversing its byte pairs before the hex to integer conversion.

use crate::errors::Error;

/// Unsigned little-endian integer, `nbytes` wide, at hex-digit `offset`.
pub fn le_uint(line: &str, offset: usize, nbytes: usize) -> Result<u64, Error> {
    let wanted = offset + 2 * nbytes;

    if line.len() < wanted {
        return Err(Error::MalformedField {
            wanted,
            found: line.len(),
        });
    }

    // index bytes, not chars: a stray multi-byte character must come out
    // as invalid hex, never as a slicing panic
    let bytes = line.as_bytes();

    let mut value = 0u64;

    for k in (0..nbytes).rev() {
        let at = offset + 2 * k;

        let byte = std::str::from_utf8(&bytes[at..at + 2])
            .ok()
            .and_then(|digits| u64::from_str_radix(digits, 16).ok())
            .ok_or(Error::InvalidHex { offset: at })?;

        value = (value << 8) | byte;
    }

    Ok(value)
}

/// Two's-complement interpretation of the low `width` bits of `value`.
pub fn signed(value: u64, width: u32) -> i64 {
    let mask = (1u64 << width) - 1;
    let value = value & mask;

    if value & (1 << (width - 1)) != 0 {
        value as i64 - (1i64 << width)
    } else {
        value as i64
    }
}

/// MSB-first bit field of a 24-bit subframe word.
pub fn bits(word: u32, msb_offset: u32, width: u32) -> u32 {
    (word >> (24 - msb_offset - width)) & ((1 << width) - 1)
}

/// Raw integer scaled by 2^exp.
pub fn scaled(raw: i64, exp: i32) -> f64 {
    raw as f64 * 2.0f64.powi(exp)
}

/// Raw integer scaled by 2^exp, unsigned variant.
pub fn scaled_unsigned(raw: u64, exp: i32) -> f64 {
    raw as f64 * 2.0f64.powi(exp)
}

/// Semicircle field scaled by 2^exp, converted to radians.
pub fn semicircles(raw: i64, exp: i32) -> f64 {
    scaled(raw, exp) * std::f64::consts::PI
}

/// IEEE-754 single at hex-digit `offset`, little-endian byte order.
pub fn le_f32(line: &str, offset: usize) -> Result<f32, Error> {
    let bits = le_uint(line, offset, 4)? as u32;
    Ok(f32::from_bits(bits))
}

/// IEEE-754 double at hex-digit `offset`, little-endian byte order.
pub fn le_f64(line: &str, offset: usize) -> Result<f64, Error> {
    let bits = le_uint(line, offset, 8)?;
    Ok(f64::from_bits(bits))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn le_uint_swaps_bytes() {
        // 0x12345678 stored LSB first
        let line = "78563412";
        assert_eq!(le_uint(line, 0, 4).unwrap(), 0x12345678);
        assert_eq!(le_uint(line, 0, 2).unwrap(), 0x5678);
        assert_eq!(le_uint(line, 2, 1).unwrap(), 0x56);
    }

    #[test]
    fn le_uint_bounds() {
        assert_eq!(
            le_uint("b562", 2, 4),
            Err(Error::MalformedField {
                wanted: 10,
                found: 4
            }),
        );

        assert_eq!(le_uint("zz", 0, 1), Err(Error::InvalidHex { offset: 0 }));
    }

    #[test]
    fn non_ascii_content_is_invalid_hex() {
        // multi-byte characters satisfy the byte-length guard but must
        // decode as an error, not a char boundary panic
        let mut line = String::from("b5620b31680001");
        while line.len() < 86 {
            line.push('€');
        }

        assert!(matches!(
            le_uint(&line, 14, 4),
            Err(Error::InvalidHex { .. }),
        ));

        assert!(matches!(le_f64(&line, 20), Err(Error::InvalidHex { .. })));
        assert_eq!(le_uint("bééf", 0, 2), Err(Error::InvalidHex { offset: 2 }));
    }

    #[test]
    fn sign_extension_round_trip() {
        for width in [8u32, 14, 16, 22, 24, 32] {
            let min = -(1i64 << (width - 1));
            let max = (1i64 << (width - 1)) - 1;

            for value in [min, -1, 0, 1, max] {
                let raw = (value as u64) & ((1u64 << width) - 1);
                assert_eq!(signed(raw, width), value, "width {}", width);
            }
        }
    }

    #[test]
    fn bit_fields_are_msb_first() {
        // word = 0b1010_1010_1111_0000_0011_1100
        let word = 0xAAF03C;
        assert_eq!(bits(word, 0, 8), 0xAA);
        assert_eq!(bits(word, 8, 8), 0xF0);
        assert_eq!(bits(word, 16, 8), 0x3C);
        assert_eq!(bits(word, 0, 10), 0b1010101011);
        assert_eq!(bits(word, 22, 2), 0b00);
    }

    #[test]
    fn scale_inverts_exactly() {
        // powers of two scale without rounding error
        assert_eq!(scaled(-87, -5), -87.0 / 32.0);
        assert_eq!(scaled(1, -31) * 2.0f64.powi(31), 1.0);
        assert_eq!(scaled_unsigned(33120, 4), 529920.0);

        let raw = -22690i64;
        let radians = semicircles(raw, -43);
        let back = (radians / std::f64::consts::PI) * 2.0f64.powi(43);
        assert_eq!(back.round() as i64, raw);
    }

    #[test]
    fn wire_floats() {
        let mut line = String::new();

        for b in 0.0017f32.to_le_bytes() {
            line.push_str(&format!("{:02x}", b));
        }
        for b in (-3.2596e-9f64).to_le_bytes() {
            line.push_str(&format!("{:02x}", b));
        }

        assert_eq!(le_f32(&line, 0).unwrap(), 0.0017f32);
        assert_eq!(le_f64(&line, 8).unwrap(), -3.2596e-9f64);
    }
}
