//! # GC-PoW-Hash: Groestl Proof-of-Work Hash
//!
//! The network's proof-of-work function is a cascading double hash:
//!
//! ```text
//! digest512   = Groestl512(input)
//! digest512_2 = Groestl512(digest512)
//! pow_hash    = digest512_2[..32]
//! ```
//!
//! It is used for block identity and for the "hash below target" check.
//! It is NOT interchangeable with a single Groestl-512 pass.
//!
//! ## Backends
//!
//! The best available backend is selected at **runtime**:
//!
//! 1. **Parallel** - Rayon batch hashing with per-thread hasher reuse
//! 2. **Portable** - Sequential, always available
//!
//! Both backends produce byte-identical output; the choice is purely a
//! throughput optimization.
//!
//! ## Usage
//!
//! ```rust
//! use gc_pow_hash::{auto_detect, pow_hash};
//!
//! let digest = pow_hash(b"header bytes");
//! let engine = auto_detect();
//! assert_eq!(engine.hash(b"header bytes"), digest);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backends;

use std::sync::Arc;
use thiserror::Error;

/// Length of the truncated proof-of-work digest in bytes.
pub const POW_HASH_LEN: usize = 32;

/// Length of a single Groestl-512 digest in bytes.
pub const GROESTL512_LEN: usize = 64;

/// Truncated double Groestl-512 digest.
pub type PowHash = [u8; POW_HASH_LEN];

/// Hash backend capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Sequential reference implementation
    Portable,
    /// Rayon batch hashing across CPU cores
    Parallel,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Portable => write!(f, "Portable"),
            Backend::Parallel => write!(f, "Parallel (Rayon)"),
        }
    }
}

/// Hash engine errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HashError {
    /// Requested backend was not compiled in
    #[error("Hash backend not available: {0}")]
    BackendUnavailable(Backend),
}

/// Proof-of-work hasher - implemented by all backends
pub trait PowHasher: Send + Sync {
    /// Get backend type
    fn backend(&self) -> Backend;

    /// Number of worker threads the backend spreads batches over
    fn workers(&self) -> usize;

    /// Hash a single input
    fn hash(&self, input: &[u8]) -> PowHash;

    /// Hash many inputs, preserving order
    fn hash_batch(&self, inputs: &[Vec<u8>]) -> Vec<PowHash> {
        inputs.iter().map(|input| self.hash(input)).collect()
    }
}

/// Compute the proof-of-work hash of `input` on the portable path.
pub fn pow_hash(input: &[u8]) -> PowHash {
    backends::portable::groestl_double(input)
}

/// Single Groestl-512 pass. Exposed for identity hashing and for tests that
/// must tell the single and double constructions apart.
pub fn groestl512(input: &[u8]) -> [u8; GROESTL512_LEN] {
    backends::portable::groestl_single(input)
}

/// Auto-detect and create the best available hash engine
pub fn auto_detect() -> Arc<dyn PowHasher> {
    #[cfg(feature = "parallel")]
    {
        let cores = num_cpus::get();
        if cores > 1 {
            tracing::info!(cores, "Using parallel PoW hashing (Rayon)");
            return Arc::new(backends::parallel::ParallelHasher::new());
        }
        tracing::debug!("Single core detected, parallel hashing not worthwhile");
    }

    tracing::info!("Using portable PoW hashing");
    Arc::new(backends::portable::PortableHasher::new())
}

/// Create a specific backend
pub fn create_backend(backend: Backend) -> Result<Arc<dyn PowHasher>, HashError> {
    match backend {
        Backend::Portable => Ok(Arc::new(backends::portable::PortableHasher::new())),
        Backend::Parallel => {
            #[cfg(feature = "parallel")]
            {
                Ok(Arc::new(backends::parallel::ParallelHasher::new()))
            }
            #[cfg(not(feature = "parallel"))]
            {
                Err(HashError::BackendUnavailable(Backend::Parallel))
            }
        }
    }
}
