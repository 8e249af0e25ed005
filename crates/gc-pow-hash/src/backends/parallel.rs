//! Parallel hash backend using Rayon
//!
//! Each worker thread keeps its own Groestl-512 state and resets it between
//! passes, so batch hashing does not rebuild hasher state per digest.

use crate::{Backend, PowHash, PowHasher, POW_HASH_LEN};
use groestl::{Digest, Groestl512};
use rayon::prelude::*;

/// CPU-parallel hash engine
pub struct ParallelHasher {
    workers: usize,
}

impl ParallelHasher {
    /// Create a parallel hasher on the global Rayon pool
    pub fn new() -> Self {
        Self {
            workers: rayon::current_num_threads().max(1),
        }
    }
}

impl Default for ParallelHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Double hash on a reusable hasher. Leaves the hasher reset.
fn double_with(hasher: &mut Groestl512, input: &[u8]) -> PowHash {
    Digest::update(hasher, input);
    let first = hasher.finalize_reset();
    Digest::update(hasher, first);
    let second = hasher.finalize_reset();

    let mut output = [0u8; POW_HASH_LEN];
    output.copy_from_slice(&second[..POW_HASH_LEN]);
    output
}

impl PowHasher for ParallelHasher {
    fn backend(&self) -> Backend {
        Backend::Parallel
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn hash(&self, input: &[u8]) -> PowHash {
        let mut hasher = Groestl512::new();
        double_with(&mut hasher, input)
    }

    fn hash_batch(&self, inputs: &[Vec<u8>]) -> Vec<PowHash> {
        inputs
            .par_iter()
            .map_init(Groestl512::new, |hasher, input| double_with(hasher, input))
            .collect()
    }
}
