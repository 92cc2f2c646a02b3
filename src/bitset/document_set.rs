use crate::bitset::two_level::{TwoLevelBitset, CAPACITY};

/// A set of document ids, unbounded in size.
///
/// `TwoLevelBitset` alone caps out at 4,096 ids. Real document
/// directories routinely exceed that, so `DocumentSet` partitions the id
/// space into consecutive 4,096-wide super-blocks, one `TwoLevelBitset`
/// each, and forwards every operation block-by-block. With a single
/// super-block populated this is exactly the `TwoLevelBitset` contract;
/// evaluator stack frames and posting-list materialization both use this
/// type so callers never observe the per-block cap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    super_blocks: Vec<TwoLevelBitset>,
}

impl DocumentSet {
    pub fn new() -> Self {
        DocumentSet { super_blocks: Vec::new() }
    }

    pub fn from_doc_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        let mut set = DocumentSet::new();
        for id in ids {
            set.set(id);
        }
        set
    }

    pub fn set(&mut self, doc_id: u32) {
        let super_idx = (doc_id / CAPACITY) as usize;
        let local = doc_id % CAPACITY;
        if super_idx >= self.super_blocks.len() {
            self.super_blocks.resize_with(super_idx + 1, TwoLevelBitset::new);
        }
        self.super_blocks[super_idx].set(local);
    }

    pub fn test(&self, doc_id: u32) -> bool {
        let super_idx = (doc_id / CAPACITY) as usize;
        let local = doc_id % CAPACITY;
        self.super_blocks.get(super_idx).map(|b| b.test(local)).unwrap_or(false)
    }

    pub fn union(&self, other: &DocumentSet) -> DocumentSet {
        let len = self.super_blocks.len().max(other.super_blocks.len());
        let mut super_blocks = Vec::with_capacity(len);
        for i in 0..len {
            let empty = TwoLevelBitset::new();
            let a = self.super_blocks.get(i).unwrap_or(&empty);
            let b = other.super_blocks.get(i).unwrap_or(&empty);
            super_blocks.push(a.union(b));
        }
        DocumentSet { super_blocks }
    }

    pub fn intersect(&self, other: &DocumentSet) -> DocumentSet {
        let len = self.super_blocks.len().min(other.super_blocks.len());
        let mut super_blocks = Vec::with_capacity(len);
        for i in 0..len {
            super_blocks.push(self.super_blocks[i].intersect(&other.super_blocks[i]));
        }
        DocumentSet { super_blocks }
    }

    pub fn enumerate(&self) -> Vec<u32> {
        let mut out = Vec::new();
        for (super_idx, block) in self.super_blocks.iter().enumerate() {
            let base = super_idx as u32 * CAPACITY;
            for pos in block.enumerate() {
                out.push(base + pos);
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.super_blocks.iter().all(|b| b.is_empty())
    }
}
