//! Fixed-width payload decoding.
//!
//! The gadgets push raw little-endian values over GATT notifications:
//! IEEE-754 single-precision floats for humidity and temperature, a
//! uint16 for CO2 ppm, a uint8 for battery percent. The bit layout is
//! the binary contract with the physical sensor and must match exactly.
//!
//! These are pure functions; the only failure mode is a payload shorter
//! than the value's fixed width, reported as `None`.

/// Decode a little-endian IEEE-754 single-precision float.
pub fn read_f32_le(data: &[u8]) -> Option<f32> {
    if data.len() < 4 {
        return None;
    }
    Some(f32::from_le_bytes([data[0], data[1], data[2], data[3]]))
}

/// Decode a little-endian unsigned 16-bit integer.
pub fn read_u16_le(data: &[u8]) -> Option<u16> {
    if data.len() < 2 {
        return None;
    }
    Some(u16::from_le_bytes([data[0], data[1]]))
}

/// Decode an unsigned 8-bit integer.
pub fn read_u8(data: &[u8]) -> Option<u8> {
    data.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_roundtrips_ieee754_exactly() {
        for value in [45.5f32, -0.25, 0.0, 21.73, f32::MAX, f32::MIN_POSITIVE] {
            let bytes = value.to_le_bytes();
            assert_eq!(read_f32_le(&bytes), Some(value));
        }
    }

    #[test]
    fn f32_nan_payload_decodes_to_nan() {
        let bytes = f32::NAN.to_le_bytes();
        assert!(read_f32_le(&bytes).unwrap().is_nan());
    }

    #[test]
    fn f32_short_payload_rejected() {
        assert_eq!(read_f32_le(&[]), None);
        assert_eq!(read_f32_le(&[0x00]), None);
        assert_eq!(read_f32_le(&[0x00, 0x00, 0x36]), None);
    }

    #[test]
    fn f32_extra_bytes_ignored() {
        let mut bytes = [0u8; 6];
        bytes[..4].copy_from_slice(&45.5f32.to_le_bytes());
        assert_eq!(read_f32_le(&bytes), Some(45.5));
    }

    #[test]
    fn u16_little_endian_order() {
        assert_eq!(read_u16_le(&[0x20, 0x03]), Some(800));
        assert_eq!(read_u16_le(&[0xFF, 0xFF]), Some(u16::MAX));
        assert_eq!(read_u16_le(&[0x01]), None);
    }

    #[test]
    fn u8_single_byte() {
        assert_eq!(read_u8(&[93]), Some(93));
        assert_eq!(read_u8(&[100, 0xAA]), Some(100));
        assert_eq!(read_u8(&[]), None);
    }
}
