//! In-memory approximate-membership document index built from bit-sliced,
//! hierarchical Bloom-filter signatures.
//!
//! Every document gets a slot in a [`Block`] of 512 documents. A block stores one
//! [`BitRow`](bitsig_bits::BitRow) per signature column, so a conjunctive query is
//! answered by ANDing a handful of rows instead of scanning documents. A second,
//! coarser level of meta-blocks holds one slot per document block and lets the
//! query skip whole blocks that cannot contain a match.
//!
//! Query results are candidates: there are no false negatives, but hash
//! collisions can produce false positives, so callers must verify hits against
//! the original documents.

pub mod block;
pub mod config;
pub mod doc_id;
pub mod hashing;
pub mod index;
pub mod stats;

pub use block::{Block, IDS_PER_BLOCK};
pub use config::IndexConfig;
pub use doc_id::DocId;
pub use hashing::{TermHash, jenkins32, xorshift32};
pub use index::SignatureIndex;
pub use stats::IndexStats;
