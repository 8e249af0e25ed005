//! Block entities seen by the difficulty engine

use super::compact::{decode_compact, Target};
use crate::error::CompactError;
use gc_pow_hash::pow_hash;
use num_bigint::BigUint;
use primitive_types::H256;
use serde::{Deserialize, Serialize};

/// Block hash in internal (little-endian) byte order
pub type BlockHash = H256;

/// Serialized header length in bytes
pub const HEADER_SIZE: usize = 80;

/// Candidate block header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block version
    pub version: u32,
    /// Hash of the parent block
    pub prev_block_hash: BlockHash,
    /// Merkle root of the block's transactions
    pub merkle_root: H256,
    /// Block time (Unix seconds)
    pub timestamp: u32,
    /// Claimed compact target
    pub bits: u32,
    /// Proof-of-work nonce
    pub nonce: u32,
}

impl BlockHeader {
    /// Standard 80-byte header layout
    pub fn serialize(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(self.prev_block_hash.as_bytes());
        out[36..68].copy_from_slice(self.merkle_root.as_bytes());
        out[68..72].copy_from_slice(&self.timestamp.to_le_bytes());
        out[72..76].copy_from_slice(&self.bits.to_le_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        out
    }

    /// Block identity: the proof-of-work hash of the serialized header
    pub fn hash(&self) -> BlockHash {
        H256(pow_hash(&self.serialize()))
    }

    /// Decoded claimed target
    pub fn target(&self) -> Result<Target, CompactError> {
        decode_compact(self.bits)
    }
}

/// Stored ancestor block, as returned by the block store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlock {
    /// Hash of this block
    pub hash: BlockHash,
    /// Height in the chain (genesis = 0)
    pub height: u64,
    /// Compact target this block was mined against
    pub bits: u32,
    /// Block time (Unix seconds)
    pub timestamp: u64,
    /// Hash of the parent block
    pub prev_block_hash: BlockHash,
}

impl StoredBlock {
    /// Build a stored entry from a header at a known height.
    pub fn from_header(header: &BlockHeader, height: u64) -> Self {
        Self {
            hash: header.hash(),
            height,
            bits: header.bits,
            timestamp: u64::from(header.timestamp),
            prev_block_hash: header.prev_block_hash,
        }
    }
}

/// Whether `header`'s proof-of-work hash, read as a little-endian integer,
/// is at or below its claimed target.
pub fn check_proof_of_work(header: &BlockHeader) -> Result<bool, CompactError> {
    hash_meets_target(&header.hash(), header.bits)
}

/// Whether an already computed block hash satisfies the compact target `bits`.
pub fn hash_meets_target(hash: &BlockHash, bits: u32) -> Result<bool, CompactError> {
    let target = decode_compact(bits)?;
    Ok(BigUint::from_bytes_le(hash.as_bytes()) <= target)
}

/// Hex in the byte-reversed order block explorers display.
pub fn display_hex(hash: &H256) -> String {
    let mut bytes = hash.to_fixed_bytes();
    bytes.reverse();
    hex::encode(bytes)
}

/// Parse a display-order hex hash into internal byte order.
pub fn hash_from_display_hex(s: &str) -> Result<H256, hex::FromHexError> {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(s, &mut bytes)?;
    bytes.reverse();
    Ok(H256(bytes))
}
