//! Shared fixtures for the scenarios and benches

use gc_difficulty::{
    AncestorLookup, BlockHash, BlockHeader, InMemoryBlockStore, LookupError, StoredBlock,
};
use parking_lot::Mutex;

/// Base timestamp for synthetic chains
pub const GENESIS_TIME: u64 = 1_395_342_829;

/// Deterministic hash for a synthetic block at `height`
pub fn synthetic_hash(height: u64) -> BlockHash {
    BlockHash::from_low_u64_be(height.wrapping_add(1))
}

/// Linked chain covering `start..=end`.
///
/// `delta(h)` is the time between block `h - 1` and block `h`. Returns the
/// populated store and the tip.
pub fn linked_chain(
    start: u64,
    end: u64,
    bits: u32,
    delta: impl Fn(u64) -> u64,
) -> (InMemoryBlockStore, StoredBlock) {
    let store = InMemoryBlockStore::new();
    let mut timestamp = GENESIS_TIME + start * 60;
    for height in start..=end {
        if height > start {
            timestamp += delta(height);
        }
        store.insert(StoredBlock {
            hash: synthetic_hash(height),
            height,
            bits,
            timestamp,
            prev_block_hash: synthetic_hash(height.wrapping_sub(1)),
        });
    }
    let tip = store.tip().unwrap_or_else(|| panic!("empty chain {start}..={end}"));
    (store, tip)
}

/// Candidate header on top of `previous`, `delay` seconds later
pub fn candidate(previous: &StoredBlock, bits: u32, delay: u64) -> BlockHeader {
    BlockHeader {
        version: 112,
        prev_block_hash: previous.hash,
        merkle_root: BlockHash::zero(),
        timestamp: (previous.timestamp + delay) as u32,
        bits,
        nonce: 0,
    }
}

/// Store whose backend always fails, counting the attempts
#[derive(Default)]
pub struct FailingStore {
    calls: Mutex<u64>,
}

impl FailingStore {
    /// Lookups attempted so far
    pub fn calls(&self) -> u64 {
        *self.calls.lock()
    }
}

impl AncestorLookup for FailingStore {
    fn get(&self, _hash: &BlockHash) -> Result<Option<StoredBlock>, LookupError> {
        *self.calls.lock() += 1;
        Err(LookupError("disk offline".into()))
    }
}
