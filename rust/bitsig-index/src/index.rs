//! The two-level signature index.

use bitsig_common::Result;
use log::{debug, trace};

use crate::{
    block::{Block, IDS_PER_BLOCK},
    config::IndexConfig,
    doc_id::DocId,
    hashing::TermHash,
    stats::IndexStats,
};

/// An append-only, in-memory signature index over documents made of 32-bit terms.
///
/// Documents live in document blocks of [`IDS_PER_BLOCK`] slots. Meta-block `m`
/// has one slot per document block `m * IDS_PER_BLOCK ..= m * IDS_PER_BLOCK + 511`,
/// and that slot carries the union of the signatures of the block's documents.
/// Both collections only grow.
///
/// The index has no internal synchronization. Wrap it in a lock (for example an
/// `RwLock`, so that queries can share read access while no document is being
/// added) when it is used from more than one thread.
pub struct SignatureIndex {
    blocks: Vec<Block>,
    meta: Vec<Block>,
    config: IndexConfig,
    block_mask: u32,
    meta_mask: u32,
}

impl SignatureIndex {
    /// Creates an empty index.
    ///
    /// Fails with an invalid-argument error when a width is not a non-zero power of
    /// two or the hash count is zero.
    pub fn new(config: IndexConfig) -> Result<SignatureIndex> {
        config.validate()?;

        // The first document block exists from the start, so its meta slot does too.
        let mut meta = Block::new(config.meta_width);
        meta.add_slot()?;

        debug!(
            "creating signature index: block_width={}, meta_width={}, hash_count={}",
            config.block_width, config.meta_width, config.hash_count
        );

        Ok(SignatureIndex {
            blocks: vec![Block::new(config.block_width)],
            meta: vec![meta],
            config,
            block_mask: config.block_mask(),
            meta_mask: config.meta_mask(),
        })
    }

    pub fn with_widths(
        block_width: u32,
        meta_width: u32,
        hash_count: u32,
    ) -> Result<SignatureIndex> {
        SignatureIndex::new(IndexConfig::new(block_width, meta_width, hash_count)?)
    }

    #[inline]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Number of documents added so far.
    pub fn num_documents(&self) -> u64 {
        let full_blocks = (self.blocks.len() - 1) as u64;
        let last = self.blocks.last().map_or(0, Block::num_documents) as u64;
        full_blocks * IDS_PER_BLOCK as u64 + last
    }

    /// Number of allocated document blocks (at least one).
    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Number of allocated meta-blocks, always `ceil(num_blocks / 512)`.
    #[inline]
    pub fn num_meta_blocks(&self) -> usize {
        self.meta.len()
    }

    /// Adds a document and returns its id.
    ///
    /// Every term sets `hash_count` bits in the document's slot and the same number
    /// of bits in the meta slot of its block. A document without terms takes a slot
    /// but can never be returned by a query.
    pub fn add_document(&mut self, terms: &[u32]) -> DocId {
        let (block_index, slot) = self.allocate_slot();
        self.add_terms(block_index, slot, terms);
        DocId::new(block_index as u64, slot)
    }

    /// Returns the candidate documents containing all of `terms`, in ascending id
    /// order.
    ///
    /// The hash columns of all terms are flattened into a single conjunction: a
    /// document matches when its signature has every bit of every term set. Every
    /// document that contains all the terms is returned. Documents that do not may
    /// be returned too when other terms happen to cover the same bits, so results
    /// must be verified against the documents themselves. An empty `terms` list
    /// matches nothing.
    pub fn query(&self, terms: &[u32]) -> Vec<DocId> {
        let mut docs = Vec::new();
        self.query_into(terms, &mut docs);
        docs
    }

    /// Same as [`SignatureIndex::query`], appending the results to `docs`.
    pub fn query_into(&self, terms: &[u32], docs: &mut Vec<DocId>) {
        if terms.is_empty() {
            return;
        }

        let (block_columns, meta_columns) = self.expand_terms(terms);
        let start = docs.len();
        let mut candidate_blocks = 0usize;

        for (meta_index, meta) in self.meta.iter().enumerate() {
            for meta_slot in meta.query(&meta_columns) {
                let block_index = meta_index * IDS_PER_BLOCK + meta_slot as usize;
                candidate_blocks += 1;
                docs.extend(
                    self.blocks[block_index]
                        .query(&block_columns)
                        .into_iter()
                        .map(|slot| DocId::new(block_index as u64, slot)),
                );
            }
        }

        trace!(
            "query: {} terms, {} of {} blocks passed the meta level, {} hits",
            terms.len(),
            candidate_blocks,
            self.blocks.len(),
            docs.len() - start
        );
    }

    /// Probes the signature of a single document.
    ///
    /// Uses the same flattened conjunction as [`SignatureIndex::query`] on the
    /// document level only, so it returns `true` for every document `query(terms)`
    /// would return, and may also accept documents the meta level would have
    /// filtered out. Returns `false` for ids that were never assigned and for empty
    /// `terms`.
    pub fn might_contain(&self, doc: DocId, terms: &[u32]) -> bool {
        if terms.is_empty() {
            return false;
        }
        let Some(block) = self.blocks.get(doc.block_index() as usize) else {
            return false;
        };
        let slot = doc.slot();
        if slot as usize >= block.num_documents() {
            return false;
        }
        terms.iter().all(|&term| {
            TermHash::new(term)
                .positions(self.block_mask, self.config.hash_count)
                .all(|column| block.get_bit(slot, column))
        })
    }

    pub fn stats(&self) -> IndexStats {
        let num_documents = self.num_documents();
        let block_bits: u64 = self.blocks.iter().map(Block::count_ones).sum();
        let meta_bits: u64 = self.meta.iter().map(Block::count_ones).sum();
        let heap_size = self
            .blocks
            .iter()
            .chain(self.meta.iter())
            .map(Block::heap_size)
            .sum();

        IndexStats {
            num_documents,
            num_blocks: self.blocks.len(),
            num_meta_blocks: self.meta.len(),
            hash_count: self.config.hash_count,
            heap_size,
            block_fill_ratio: fill_ratio(block_bits, num_documents, self.config.block_width),
            meta_fill_ratio: fill_ratio(
                meta_bits,
                self.blocks.len() as u64,
                self.config.meta_width,
            ),
        }
    }

    /// Claims a document slot, starting a new document block (and, every 512
    /// blocks, a new meta-block) when the current one is full.
    fn allocate_slot(&mut self) -> (usize, u16) {
        let last = self.blocks.len() - 1;
        match self.blocks[last].add_slot() {
            Ok(slot) => (last, slot),
            Err(err) => {
                debug_assert!(err.is_capacity_exhausted());
                let block_index = self.append_block();
                let slot = self.blocks[block_index]
                    .add_slot()
                    .expect("a new block has free slots");
                (block_index, slot)
            }
        }
    }

    fn append_block(&mut self) -> usize {
        self.blocks.push(Block::new(self.config.block_width));
        let block_index = self.blocks.len() - 1;

        let last_meta = self.meta.len() - 1;
        let meta_slot = match self.meta[last_meta].add_slot() {
            Ok(slot) => slot,
            Err(err) => {
                debug_assert!(err.is_capacity_exhausted());
                self.meta.push(Block::new(self.config.meta_width));
                debug!(
                    "allocated meta-block {} for document block {}",
                    self.meta.len() - 1,
                    block_index
                );
                self.meta[last_meta + 1]
                    .add_slot()
                    .expect("a new meta-block has free slots")
            }
        };
        debug_assert_eq!(
            (self.meta.len() - 1) * IDS_PER_BLOCK + meta_slot as usize,
            block_index
        );

        debug!(
            "allocated document block {} after {} documents",
            block_index,
            block_index * IDS_PER_BLOCK
        );
        block_index
    }

    fn add_terms(&mut self, block_index: usize, slot: u16, terms: &[u32]) {
        let meta_slot = (block_index % IDS_PER_BLOCK) as u16;
        let block = &mut self.blocks[block_index];
        let meta = &mut self.meta[block_index / IDS_PER_BLOCK];
        let hash_count = self.config.hash_count;

        for &term in terms {
            let hash = TermHash::new(term);
            for column in hash.positions(self.block_mask, hash_count) {
                block.set_bit(slot, column);
            }
            for column in hash.positions(self.meta_mask, hash_count) {
                meta.set_bit(meta_slot, column);
            }
        }
    }

    /// Expands `terms` into the flattened column lists of both levels.
    fn expand_terms(&self, terms: &[u32]) -> (Vec<u32>, Vec<u32>) {
        let hash_count = self.config.hash_count as usize;
        let mut block_columns = Vec::with_capacity(terms.len() * hash_count);
        let mut meta_columns = Vec::with_capacity(terms.len() * hash_count);
        for &term in terms {
            let hash = TermHash::new(term);
            block_columns.extend(hash.positions(self.block_mask, self.config.hash_count));
            meta_columns.extend(hash.positions(self.meta_mask, self.config.hash_count));
        }
        (block_columns, meta_columns)
    }
}

impl std::fmt::Debug for SignatureIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureIndex")
            .field("config", &self.config)
            .field("num_documents", &self.num_documents())
            .field("num_blocks", &self.blocks.len())
            .field("num_meta_blocks", &self.meta.len())
            .finish()
    }
}

fn fill_ratio(set_bits: u64, occupied_slots: u64, width: u32) -> f64 {
    let total = occupied_slots * width as u64;
    if total == 0 {
        0.0
    } else {
        set_bits as f64 / total as f64
    }
}
