//! Bit-sliced storage for a fixed group of 512 document slots.

use bitsig_bits::{BitRow, ROW_BITS, and_rows, popset};
use bitsig_common::{Result, error::Error};

/// Number of document slots in a block (one bit per slot in every row).
pub const IDS_PER_BLOCK: usize = ROW_BITS;

/// A transposed signature store for up to [`IDS_PER_BLOCK`] slots.
///
/// The block holds one [`BitRow`] per signature column. Bit `s` of row `c` is set
/// when the document in slot `s` has column `c` in its signature. Slots are
/// handed out in order and never released; the width is fixed at construction.
pub struct Block {
    rows: Box<[BitRow]>,
    valid: usize,
}

impl Block {
    /// Allocates a block with `width` zeroed rows.
    pub fn new(width: u32) -> Block {
        Block {
            rows: vec![BitRow::EMPTY; width as usize].into_boxed_slice(),
            valid: 0,
        }
    }

    /// Number of signature columns.
    #[inline]
    pub fn width(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Number of occupied slots.
    #[inline]
    pub fn num_documents(&self) -> usize {
        self.valid
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.valid == IDS_PER_BLOCK
    }

    /// Claims the next free slot.
    ///
    /// Fails with a capacity-exhausted error once all [`IDS_PER_BLOCK`] slots are
    /// taken; the owner is expected to start a new block.
    pub fn add_slot(&mut self) -> Result<u16> {
        if self.is_full() {
            return Err(Error::capacity_exhausted(IDS_PER_BLOCK));
        }
        let slot = self.valid as u16;
        self.valid += 1;
        Ok(slot)
    }

    /// Sets the bit of `slot` in row `column`.
    ///
    /// The caller guarantees `column < width()` and `slot < IDS_PER_BLOCK`.
    #[inline]
    pub fn set_bit(&mut self, slot: u16, column: u32) {
        debug_assert!((slot as usize) < IDS_PER_BLOCK);
        self.rows[column as usize].set(slot as usize);
    }

    /// Returns the bit of `slot` in row `column`, with the same preconditions as
    /// [`Block::set_bit`].
    #[inline]
    pub fn get_bit(&self, slot: u16, column: u32) -> bool {
        self.rows[column as usize].get(slot as usize)
    }

    /// Returns the row of `column`.
    pub fn row(&self, column: u32) -> Result<&BitRow> {
        self.rows
            .get(column as usize)
            .ok_or_else(|| Error::invalid_operation(format!("row {column} of {}", self.width())))
    }

    /// Returns the slots that have every one of `columns` set, in ascending order.
    ///
    /// An empty `columns` list matches nothing.
    pub fn query(&self, columns: &[u32]) -> Vec<u16> {
        if columns.is_empty() {
            return Vec::new();
        }
        popset(&self.query_row(columns))
    }

    /// Like [`Block::query`], but returns the raw AND of the selected rows.
    #[inline]
    pub fn query_row(&self, columns: &[u32]) -> BitRow {
        and_rows(&self.rows, columns)
    }

    /// Total number of set bits across all rows.
    pub fn count_ones(&self) -> u64 {
        self.rows.iter().map(|row| row.count_ones() as u64).sum()
    }

    /// Bytes held by the row storage.
    pub fn heap_size(&self) -> usize {
        std::mem::size_of_val(self.rows.as_ref())
    }
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block")
            .field("width", &self.width())
            .field("valid", &self.valid)
            .finish()
    }
}
