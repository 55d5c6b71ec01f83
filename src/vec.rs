//! Vec extension.

use std::collections::TryReserveError;

pub trait VecExt: Sized {
    fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError>;
    fn push_u8(&mut self, val: u8);
    fn push_u16(&mut self, val: u16);
    fn push_u32(&mut self, val: u32);
    fn push_i16(&mut self, val: i16);
    fn push_i32(&mut self, val: i32);
    fn push_i64(&mut self, val: i64);
    fn push_f32(&mut self, val: f32);
    fn push_f64(&mut self, val: f64);
    fn push_bytes(&mut self, bytes: &[u8]);
    fn push_length(&mut self, length: usize, width: usize);
    fn replace_placeholder(&mut self, pos: usize, header: &[u8]);
}

impl VecExt for Vec<u8> {
    #[inline]
    fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut vec = Vec::new();
        vec.try_reserve(capacity)?;
        Ok(vec)
    }

    #[inline]
    fn push_u8(&mut self, val: u8) {
        self.push(val);
    }

    #[inline]
    fn push_u16(&mut self, val: u16) {
        self.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    fn push_u32(&mut self, val: u32) {
        self.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    fn push_i16(&mut self, val: i16) {
        self.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    fn push_i32(&mut self, val: i32) {
        self.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    fn push_i64(&mut self, val: i64) {
        self.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    fn push_f32(&mut self, val: f32) {
        self.extend_from_slice(&val.to_bits().to_le_bytes());
    }

    #[inline]
    fn push_f64(&mut self, val: f64) {
        self.extend_from_slice(&val.to_bits().to_le_bytes());
    }

    #[inline]
    fn push_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes)
    }

    /// Pushes `length` as a 1, 2 or 4 byte little-endian field.
    #[inline]
    fn push_length(&mut self, length: usize, width: usize) {
        match width {
            1 => self.push_u8(length as u8),
            2 => self.push_u16(length as u16),
            _ => self.push_u32(length as u32),
        }
    }

    /// Replaces the one-byte placeholder at `pos` with `header`, shifting what follows.
    #[inline]
    fn replace_placeholder(&mut self, pos: usize, header: &[u8]) {
        debug_assert!(pos < self.len());
        self.splice(pos..pos + 1, header.iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_placeholder() {
        let mut bytes = vec![0xAA, 0x00, 0x01, 0x02];
        bytes.replace_placeholder(1, &[0xE2, 0x02]);
        assert_eq!(bytes, [0xAA, 0xE2, 0x02, 0x01, 0x02]);
    }

    #[test]
    fn test_push_length() {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.push_length(0x12, 1);
        bytes.push_length(0x1234, 2);
        bytes.push_length(0x12345678, 4);
        assert_eq!(bytes, [0x12, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
    }
}
