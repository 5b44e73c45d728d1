//! A 512-bit row with `[u64; 8]` storage.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Number of bits in a row, and therefore the number of slots in a block.
pub const ROW_BITS: usize = 512;

/// Number of `u64` words backing a row.
pub const ROW_WORDS: usize = ROW_BITS / 64;

/// A fixed-size row of 512 bits.
///
/// Bits are stored in LSB order: bit 0 is the least significant bit of word 0,
/// bit 64 is the least significant bit of word 1, and so on. The row is aligned
/// to a cache line so that ANDing two rows touches exactly two lines.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C, align(64))]
pub struct BitRow([u64; ROW_WORDS]);

impl BitRow {
    /// A row with no bits set.
    pub const EMPTY: BitRow = BitRow([0; ROW_WORDS]);

    /// A row with all 512 bits set.
    pub const FULL: BitRow = BitRow([u64::MAX; ROW_WORDS]);

    /// Wraps raw LSB-ordered words.
    #[inline]
    pub const fn from_words(words: [u64; ROW_WORDS]) -> BitRow {
        BitRow(words)
    }

    /// Creates a row with the bits at `positions` set.
    ///
    /// # Panics
    ///
    /// Panics if any position is `>= ROW_BITS`.
    pub fn from_positions(positions: impl IntoIterator<Item = usize>) -> BitRow {
        let mut row = BitRow::EMPTY;
        for pos in positions {
            row.set(pos);
        }
        row
    }

    /// Returns the underlying words.
    #[inline]
    pub fn words(&self) -> &[u64; ROW_WORDS] {
        &self.0
    }

    /// Sets the bit at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= ROW_BITS`.
    #[inline]
    pub fn set(&mut self, pos: usize) {
        let (word, bit) = Self::bit_position(pos);
        self.0[word] |= 1u64 << bit;
    }

    /// Returns the value of the bit at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= ROW_BITS`.
    #[inline]
    pub fn get(&self, pos: usize) -> bool {
        let (word, bit) = Self::bit_position(pos);
        self.0[word] & (1u64 << bit) != 0
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Number of set bits.
    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.0.iter().map(|w| w.count_ones()).sum()
    }

    /// Returns an iterator over the positions of set bits, in ascending order.
    pub fn iter(&self) -> BitRowIter {
        BitRowIter {
            words: self.0,
            current_word: 0,
            next_word_index: 0,
            base_index: 0,
        }
    }

    #[inline]
    fn bit_position(pos: usize) -> (usize, usize) {
        (pos >> 6, pos & 63)
    }
}

impl std::fmt::Debug for BitRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitAndAssign<&BitRow> for BitRow {
    #[inline]
    fn bitand_assign(&mut self, rhs: &BitRow) {
        for (l, r) in self.0.iter_mut().zip(rhs.0.iter()) {
            *l &= *r;
        }
    }
}

impl BitAnd for BitRow {
    type Output = BitRow;

    #[inline]
    fn bitand(mut self, rhs: BitRow) -> BitRow {
        self &= &rhs;
        self
    }
}

impl BitOrAssign<&BitRow> for BitRow {
    #[inline]
    fn bitor_assign(&mut self, rhs: &BitRow) {
        for (l, r) in self.0.iter_mut().zip(rhs.0.iter()) {
            *l |= *r;
        }
    }
}

impl BitOr for BitRow {
    type Output = BitRow;

    #[inline]
    fn bitor(mut self, rhs: BitRow) -> BitRow {
        self |= &rhs;
        self
    }
}

impl<'a> IntoIterator for &'a BitRow {
    type Item = usize;
    type IntoIter = BitRowIter;

    fn into_iter(self) -> BitRowIter {
        self.iter()
    }
}

/// Iterator over the set positions of a [`BitRow`].
///
/// Holds a copy of the row, so it does not borrow the source.
#[derive(Clone)]
pub struct BitRowIter {
    words: [u64; ROW_WORDS],
    current_word: u64,
    next_word_index: usize,
    base_index: usize,
}

impl Iterator for BitRowIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.current_word == 0 {
            if self.next_word_index == ROW_WORDS {
                return None;
            }
            self.current_word = self.words[self.next_word_index];
            self.base_index = self.next_word_index * 64;
            self.next_word_index += 1;
        }
        let tz = self.current_word.trailing_zeros() as usize;
        // Clear the least significant set bit.
        self.current_word &= self.current_word - 1;
        Some(self.base_index + tz)
    }
}

/// Word-wise AND of the rows selected by `columns`.
///
/// Returns [`BitRow::EMPTY`] when `columns` is empty: no constraints means no
/// candidates. Duplicate columns are harmless. Stops reading rows as soon as the
/// accumulator has no bits left.
///
/// # Panics
///
/// Panics if a column is out of range for `rows`.
pub fn and_rows(rows: &[BitRow], columns: &[u32]) -> BitRow {
    let Some((&first, rest)) = columns.split_first() else {
        return BitRow::EMPTY;
    };
    let mut acc = rows[first as usize];
    for &column in rest {
        if acc.is_empty() {
            break;
        }
        acc &= &rows[column as usize];
    }
    acc
}
