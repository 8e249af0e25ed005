//! # Groestl-Chain Runtime
//!
//! Replays a header chain through the difficulty engine.
//!
//! ## Chain File
//!
//! ```json
//! {
//!   "start_height": 0,
//!   "headers": [
//!     {
//!       "version": 112,
//!       "prev_block_hash": "0000...0000",
//!       "merkle_root": "3ce9...28bb",
//!       "timestamp": 1395342829,
//!       "bits": 504365055,
//!       "nonce": 220035
//!     }
//!   ]
//! }
//! ```
//!
//! Hashes are in display (byte-reversed) order. The first header is the
//! trusted anchor at `start_height`; every following header must connect to
//! its predecessor, carry the required target and satisfy its own target.

use anyhow::{Context, Result};
use gc_difficulty::{
    display_hex, hash_from_display_hex, hash_meets_target, BlockHash, BlockHeader,
    DifficultyVerifier, InMemoryBlockStore, StoredBlock,
};
use gc_pow_hash::PowHasher;
use gc_telemetry::log_block_event;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Header as written in chain files
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRecord {
    /// Block version
    pub version: u32,
    /// Parent hash, display order
    pub prev_block_hash: String,
    /// Merkle root, display order
    pub merkle_root: String,
    /// Block time (Unix seconds)
    pub timestamp: u32,
    /// Compact target
    pub bits: u32,
    /// Nonce
    pub nonce: u32,
}

impl HeaderRecord {
    /// Parse into a consensus header
    pub fn to_header(&self) -> Result<BlockHeader> {
        Ok(BlockHeader {
            version: self.version,
            prev_block_hash: hash_from_display_hex(&self.prev_block_hash)
                .with_context(|| format!("bad prev_block_hash {}", self.prev_block_hash))?,
            merkle_root: hash_from_display_hex(&self.merkle_root)
                .with_context(|| format!("bad merkle_root {}", self.merkle_root))?,
            timestamp: self.timestamp,
            bits: self.bits,
            nonce: self.nonce,
        })
    }

    /// Record form of a consensus header
    pub fn from_header(header: &BlockHeader) -> Self {
        Self {
            version: header.version,
            prev_block_hash: display_hex(&header.prev_block_hash),
            merkle_root: display_hex(&header.merkle_root),
            timestamp: header.timestamp,
            bits: header.bits,
            nonce: header.nonce,
        }
    }
}

/// Header chain export
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChainFile {
    /// Height of the first header
    #[serde(default)]
    pub start_height: u64,
    /// Headers, oldest first
    pub headers: Vec<HeaderRecord>,
}

impl ChainFile {
    /// Load a chain file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read chain file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse chain file {}", path.display()))
    }
}

/// Why a header was rejected
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Parent hash is not the previous header's hash
    Disconnected,
    /// Difficulty check failed
    Difficulty(String),
    /// Hash above the claimed target
    InsufficientWork,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Disconnected => write!(f, "does not connect to previous header"),
            RejectReason::Difficulty(e) => write!(f, "{e}"),
            RejectReason::InsufficientWork => write!(f, "hash above claimed target"),
        }
    }
}

/// First rejected header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    /// Height of the rejected header
    pub height: u64,
    /// Display-order hash
    pub hash: String,
    /// Reason
    pub reason: RejectReason,
}

/// Outcome of a chain replay
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainReport {
    /// Headers accepted after the anchor
    pub verified: usize,
    /// First rejection, which ends the replay
    pub rejection: Option<Rejection>,
}

impl ChainReport {
    /// Whether every header was accepted
    pub fn is_valid(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Replay `headers` on top of the anchor, stopping at the first rejection.
///
/// Block hashes are computed up front in one batch on `hasher`.
pub fn verify_chain(
    verifier: &DifficultyVerifier,
    hasher: &dyn PowHasher,
    chain: &ChainFile,
    check_pow: bool,
) -> Result<ChainReport> {
    let headers = chain
        .headers
        .iter()
        .map(HeaderRecord::to_header)
        .collect::<Result<Vec<_>>>()?;

    let serialized: Vec<Vec<u8>> = headers.iter().map(|h| h.serialize().to_vec()).collect();
    let hashes: Vec<BlockHash> = hasher
        .hash_batch(&serialized)
        .into_iter()
        .map(BlockHash::from)
        .collect();

    let mut report = ChainReport::default();
    let Some((anchor, rest)) = headers.split_first() else {
        return Ok(report);
    };

    let store = InMemoryBlockStore::new();
    let mut previous = stored(anchor, hashes[0], chain.start_height);
    store.insert(previous.clone());
    log_block_event!(info, "Anchor loaded", previous.height, display_hex(&previous.hash));

    for (offset, header) in rest.iter().enumerate() {
        let hash = hashes[offset + 1];
        let height = previous.height + 1;

        let reason = if header.prev_block_hash != previous.hash {
            Some(RejectReason::Disconnected)
        } else if let Err(e) = verifier.check_difficulty(&previous, header, &store) {
            Some(RejectReason::Difficulty(e.to_string()))
        } else if check_pow && !hash_meets_target(&hash, header.bits)? {
            Some(RejectReason::InsufficientWork)
        } else {
            None
        };

        if let Some(reason) = reason {
            warn!(height, hash = %display_hex(&hash), %reason, "Header rejected");
            report.rejection = Some(Rejection {
                height,
                hash: display_hex(&hash),
                reason,
            });
            break;
        }

        previous = stored(header, hash, height);
        store.insert(previous.clone());
        report.verified += 1;
    }

    info!(
        verified = report.verified,
        valid = report.is_valid(),
        backend = %hasher.backend(),
        "Chain replay finished"
    );
    Ok(report)
}

fn stored(header: &BlockHeader, hash: BlockHash, height: u64) -> StoredBlock {
    StoredBlock {
        hash,
        height,
        bits: header.bits,
        timestamp: u64::from(header.timestamp),
        prev_block_hash: header.prev_block_hash,
    }
}
