//! Index construction parameters.

use bitsig_common::{Result, verify_arg};
use serde::{Deserialize, Serialize};

/// Default number of signature columns in a document block.
pub const DEFAULT_BLOCK_WIDTH: u32 = 1024;

/// Default number of signature columns in a meta-block. Wider than the document
/// level because a meta slot accumulates the signatures of up to 512 documents.
pub const DEFAULT_META_WIDTH: u32 = 4096;

/// Default number of hash positions per term.
pub const DEFAULT_HASH_COUNT: u32 = 4;

/// Configuration of a [`SignatureIndex`](crate::SignatureIndex).
///
/// Both widths must be non-zero powers of two so that column positions can be
/// reduced with a mask, and `hash_count` must be at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Signature columns per document block.
    pub block_width: u32,
    /// Signature columns per meta-block.
    pub meta_width: u32,
    /// Hash positions (`k`) derived for every term, at each level.
    pub hash_count: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            block_width: DEFAULT_BLOCK_WIDTH,
            meta_width: DEFAULT_META_WIDTH,
            hash_count: DEFAULT_HASH_COUNT,
        }
    }
}

impl IndexConfig {
    /// Creates a validated configuration.
    pub fn new(block_width: u32, meta_width: u32, hash_count: u32) -> Result<IndexConfig> {
        let config = IndexConfig {
            block_width,
            meta_width,
            hash_count,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        verify_arg!(block_width, self.block_width.is_power_of_two());
        verify_arg!(meta_width, self.meta_width.is_power_of_two());
        verify_arg!(hash_count, self.hash_count >= 1);
        Ok(())
    }

    #[inline]
    pub fn block_mask(&self) -> u32 {
        self.block_width - 1
    }

    #[inline]
    pub fn meta_mask(&self) -> u32 {
        self.meta_width - 1
    }
}
