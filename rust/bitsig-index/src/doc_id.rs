use crate::block::IDS_PER_BLOCK;

/// Global document identifier: `block_index * IDS_PER_BLOCK + slot`.
///
/// Assigned once, in insertion order, and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId(u64);

impl DocId {
    #[inline]
    pub const fn new(block_index: u64, slot: u16) -> DocId {
        DocId(block_index * IDS_PER_BLOCK as u64 + slot as u64)
    }

    #[inline]
    pub const fn from_u64(value: u64) -> DocId {
        DocId(value)
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Index of the document block holding this document.
    #[inline]
    pub const fn block_index(self) -> u64 {
        self.0 / IDS_PER_BLOCK as u64
    }

    /// Slot within the owning block.
    #[inline]
    pub const fn slot(self) -> u16 {
        (self.0 % IDS_PER_BLOCK as u64) as u16
    }
}

impl From<DocId> for u64 {
    fn from(id: DocId) -> u64 {
        id.0
    }
}

impl From<u64> for DocId {
    fn from(value: u64) -> DocId {
        DocId(value)
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
