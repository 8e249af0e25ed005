//! # Groestl Chain - Difficulty Retargeting & Verification
//!
//! **Bounded Context:** Proof-of-Work Consensus
//! **Architecture:** Domain + Hexagonal ports
//!
//! ## Purpose
//!
//! Decides which difficulty target a candidate block was required to carry
//! and checks the block's claimed compact target against it:
//!
//! - Bit-exact compact target encoding and decoding
//! - Dark Gravity Wave v1 below the fork threshold, v3 from it on
//! - Bitcoin-style interval retargeting for networks configured with it
//! - Testnet minimum-difficulty relaxation
//! - Block subsidy schedule
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Service                                            │
//! │  - DifficultyVerifier: algorithm selection, metrics │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports / Adapters                                   │
//! │  - AncestorLookup (outbound)                        │
//! │  - InMemoryBlockStore                               │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Inner - Pure Logic)                        │
//! │  - compact, dgw, interval, verification, subsidy    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Ceiling**: no required target exceeds the network maximum
//! 2. **Precision**: targets are compared at the claimed word's precision
//! 3. **Complete history**: a missing required ancestor rejects the check
//!
//! ## Usage Example
//!
//! ```rust
//! use gc_difficulty::{BlockHeader, DifficultyVerifier, InMemoryBlockStore, NetworkParams, StoredBlock};
//! use primitive_types::H256;
//!
//! let verifier = DifficultyVerifier::new(NetworkParams::mainnet()).unwrap();
//! let store = InMemoryBlockStore::new();
//! let previous = StoredBlock {
//!     hash: H256::repeat_byte(1),
//!     height: 3,
//!     bits: 0x1e0f_ffff,
//!     timestamp: 1_395_343_000,
//!     prev_block_hash: H256::repeat_byte(2),
//! };
//! let candidate = BlockHeader {
//!     version: 112,
//!     prev_block_hash: previous.hash,
//!     merkle_root: H256::zero(),
//!     timestamp: 1_395_343_060,
//!     bits: 0x1e0f_ffff,
//!     nonce: 0,
//! };
//!
//! // Too little history: the maximum target is required
//! assert!(verifier.check_difficulty(&previous, &candidate, &store).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::InMemoryBlockStore;
pub use config::{Network, NetworkParams, RetargetRule, WindowParams};
pub use domain::{
    block_inflation, check_proof_of_work, decode_compact, display_hex, encode_compact,
    hash_from_display_hex, hash_meets_target, is_difficulty_transition_point,
    is_reward_halving_point, BlockHash, BlockHeader, DgwVersion, Retarget, StoredBlock, Target,
};
pub use error::{CompactError, ConfigError, DifficultyError, LookupError, Result};
pub use ports::AncestorLookup;
pub use service::{check_difficulty, DifficultyVerifier};
