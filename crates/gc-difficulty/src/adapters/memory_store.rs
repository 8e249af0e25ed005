//! In-memory block store

use crate::domain::{BlockHash, StoredBlock};
use crate::error::LookupError;
use crate::ports::AncestorLookup;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory implementation of [`AncestorLookup`]
///
/// Keeps the highest inserted block as the chain tip.
pub struct InMemoryBlockStore {
    blocks: RwLock<HashMap<BlockHash, StoredBlock>>,
    tip: RwLock<Option<BlockHash>>,
}

impl InMemoryBlockStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            blocks: RwLock::new(HashMap::new()),
            tip: RwLock::new(None),
        }
    }

    /// Store a block, advancing the tip if it is higher
    pub fn insert(&self, block: StoredBlock) {
        let hash = block.hash;
        let height = block.height;
        let mut blocks = self.blocks.write();
        blocks.insert(hash, block);

        let mut tip = self.tip.write();
        let higher = match tip.as_ref().and_then(|h| blocks.get(h)) {
            Some(current) => height > current.height,
            None => true,
        };
        if higher {
            *tip = Some(hash);
        }
    }

    /// Store many blocks
    pub fn extend(&self, blocks: impl IntoIterator<Item = StoredBlock>) {
        for block in blocks {
            self.insert(block);
        }
    }

    /// Highest stored block
    pub fn tip(&self) -> Option<StoredBlock> {
        let tip = *self.tip.read();
        tip.and_then(|hash| self.blocks.read().get(&hash).cloned())
    }

    /// Number of stored blocks
    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.blocks.read().is_empty()
    }
}

impl Default for InMemoryBlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AncestorLookup for InMemoryBlockStore {
    fn get(&self, hash: &BlockHash) -> Result<Option<StoredBlock>, LookupError> {
        Ok(self.blocks.read().get(hash).cloned())
    }
}
