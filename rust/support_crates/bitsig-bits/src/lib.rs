//! Fixed-width bit rows used by the bit-sliced signature blocks.
//!
//! A [`BitRow`] holds one bit per document slot of a block (512 slots, stored as
//! eight `u64` words). Queries combine rows with word-wise AND ([`and_rows`]) and
//! turn the surviving bits back into slot numbers ([`popset`]).

pub mod bit_row;
pub mod popset;


pub use bit_row::{BitRow, BitRowIter, ROW_BITS, ROW_WORDS, and_rows};
pub use popset::{popset, popset_into};
