//! First value offsets of containers.

use crate::marker::MarkerKind;

static FIRST_VALUE_OFFSETS: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        if let Some(shape) = MarkerKind::classify(i as u8).container_shape() {
            table[i] = shape.header_size() as u8;
        }
        i += 1;
    }
    table
}

/// Returns the distance from a container's marker to its first child.
///
/// Non-container markers yield 0, which is never a valid child offset.
#[inline]
pub fn get_first_value_offset(marker: u8) -> usize {
    FIRST_VALUE_OFFSETS[marker as usize] as usize
}
