//! Modified UTF-8, the string encoding of `CONSTANT_Utf8_info` (JVMS §4.4.7).
//!
//! It differs from standard UTF-8 in two ways: the null character is stored as the two-byte
//! sequence `0xC0 0x80` (so no raw zero byte ever appears), and supplementary characters are
//! stored as a surrogate pair, each half taking three bytes.

use crate::Result;

/// Encodes a string into modified UTF-8.
pub fn encode(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for unit in value.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

/// Number of bytes `value` occupies once encoded, without allocating.
pub fn encoded_len(value: &str) -> usize {
    value
        .encode_utf16()
        .map(|unit| match unit {
            0x0001..=0x007F => 1,
            0x0000 | 0x0080..=0x07FF => 2,
            _ => 3,
        })
        .sum()
}

/// Decodes modified UTF-8 bytes into UTF-16 code units.
///
/// Every code unit has exactly one accepted encoding, so re-encoding the result reproduces
/// `bytes`. The units are not required to pair up into valid UTF-16.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for raw zero bytes, truncated or invalid multi-byte
/// sequences, and overlong forms.
pub fn decode_units(bytes: &[u8]) -> Result<Vec<u16>> {
    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut pos = 0;

    let continuation = |pos: usize| -> Result<u16> {
        match bytes.get(pos) {
            Some(byte) if byte & 0xC0 == 0x80 => Ok(u16::from(byte & 0x3F)),
            _ => Err(malformed_error!(
                "Invalid modified UTF-8 continuation byte at {}",
                pos
            )),
        }
    };

    while pos < bytes.len() {
        let lead = bytes[pos];
        let unit = match lead {
            0x01..=0x7F => {
                pos += 1;
                u16::from(lead)
            }
            0xC0..=0xDF => {
                let unit = (u16::from(lead & 0x1F) << 6) | continuation(pos + 1)?;
                // 0xC0 0x80 is the only two-byte form below 0x80
                if unit != 0 && unit < 0x80 {
                    return Err(malformed_error!("Overlong modified UTF-8 sequence at {}", pos));
                }
                pos += 2;
                unit
            }
            0xE0..=0xEF => {
                let mid = continuation(pos + 1)?;
                let low = continuation(pos + 2)?;
                let unit = (u16::from(lead & 0x0F) << 12) | (mid << 6) | low;
                if unit < 0x800 {
                    return Err(malformed_error!("Overlong modified UTF-8 sequence at {}", pos));
                }
                pos += 3;
                unit
            }
            _ => {
                return Err(malformed_error!(
                    "Invalid modified UTF-8 byte 0x{:02x} at {}",
                    lead,
                    pos
                ))
            }
        };
        units.push(unit);
    }

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn decode(bytes: &[u8]) -> String {
        String::from_utf16(&decode_units(bytes).unwrap()).unwrap()
    }

    #[test]
    fn ascii_is_unchanged() {
        let encoded = encode("([Ljava/lang/String;)V");
        assert_eq!(encoded, b"([Ljava/lang/String;)V");
        assert_eq!(decode(&encoded), "([Ljava/lang/String;)V");
    }

    #[test]
    fn null_uses_two_bytes() {
        let encoded = encode("a\0b");
        assert_eq!(encoded, [b'a', 0xC0, 0x80, b'b']);
        assert_eq!(encoded_len("a\0b"), 4);
        assert_eq!(decode(&encoded), "a\0b");
    }

    #[test]
    fn supplementary_uses_surrogate_pair() {
        // U+1F600 -> D83D DE00
        let encoded = encode("\u{1F600}");
        assert_eq!(encoded, [0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80]);
        assert_eq!(encoded_len("\u{1F600}"), 6);
        assert_eq!(decode(&encoded), "\u{1F600}");
    }

    #[test]
    fn two_and_three_byte_forms() {
        let value = "é€";
        let encoded = encode(value);
        assert_eq!(encoded, [0xC3, 0xA9, 0xE2, 0x82, 0xAC]);
        assert_eq!(decode(&encoded), value);
    }

    #[test]
    fn rejects_raw_zero_and_truncation() {
        assert!(decode_units(&[b'a', 0x00]).is_err());
        assert!(decode_units(&[0xC3]).is_err());
        assert!(decode_units(&[0xE2, 0x82]).is_err());
        assert!(decode_units(&[0xF0, 0x9F, 0x98, 0x80]).is_err());
    }

    #[test]
    fn rejects_overlong_forms() {
        for bytes in [
            &[0xC1, 0x81][..],
            &[0xC0, 0x81],
            &[0xE0, 0x80, 0x80],
            &[0xE0, 0x81, 0xBF],
            &[b'a', 0xE0, 0x9F, 0xBF],
        ] {
            assert!(
                matches!(decode_units(bytes), Err(Error::Malformed { .. })),
                "{bytes:02x?}"
            );
        }

        // shortest forms at each boundary
        assert_eq!(decode_units(&[0xC0, 0x80]).unwrap(), [0x0000]);
        assert_eq!(decode_units(&[0xC2, 0x80]).unwrap(), [0x0080]);
        assert_eq!(decode_units(&[0xE0, 0xA0, 0x80]).unwrap(), [0x0800]);
    }

    #[test]
    fn unpaired_surrogate_is_kept_as_a_unit() {
        let bytes = [b'x', 0xED, 0xA0, 0x80];
        let units = decode_units(&bytes).unwrap();
        assert_eq!(units, [u16::from(b'x'), 0xD800]);
        assert!(String::from_utf16(&units).is_err());
    }
}
