/// Point-in-time size and density figures of a
/// [`SignatureIndex`](crate::SignatureIndex).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexStats {
    pub num_documents: u64,
    pub num_blocks: usize,
    pub num_meta_blocks: usize,
    pub hash_count: u32,
    /// Bytes held by the rows of all document blocks and meta-blocks.
    pub heap_size: usize,
    /// Fraction of signature bits set across occupied document slots.
    pub block_fill_ratio: f64,
    /// Fraction of signature bits set across occupied meta slots.
    pub meta_fill_ratio: f64,
}

impl IndexStats {
    /// Rough probability that a document lacking the queried terms still matches
    /// a query of `term_count` terms, assuming independent, uniformly spread bits.
    ///
    /// This is `fill^(k * term_count)` for the document level; colliding hash
    /// positions only make the real rate higher.
    pub fn estimated_false_positive_rate(&self, term_count: u32) -> f64 {
        if term_count == 0 {
            return 0.0;
        }
        let bits = self.hash_count.saturating_mul(term_count);
        self.block_fill_ratio.powi(bits.min(i32::MAX as u32) as i32)
    }
}
