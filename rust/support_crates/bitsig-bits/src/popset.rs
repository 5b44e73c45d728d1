//! Extraction of set bit positions from a [`BitRow`].

use crate::bit_row::BitRow;

/// Returns the positions of the bits set in `row`, strictly ascending.
pub fn popset(row: &BitRow) -> Vec<u16> {
    let mut positions = Vec::with_capacity(row.count_ones() as usize);
    popset_into(row, &mut positions);
    positions
}

/// Appends the positions of the bits set in `row` to `out`, strictly ascending.
///
/// Each word is scanned with trailing-zero counts: emit the position of the lowest
/// set bit, then shift the word right past it.
pub fn popset_into(row: &BitRow, out: &mut Vec<u16>) {
    for (word_index, &word) in row.words().iter().enumerate() {
        let mut w = word;
        let mut pos = (word_index * 64) as u16;
        while w != 0 {
            let tz = w.trailing_zeros();
            pos += tz as u16;
            out.push(pos);
            pos += 1;
            // Two shifts: `tz + 1` is 64 when bit 63 is the last one left.
            w = (w >> tz) >> 1;
        }
    }
}
