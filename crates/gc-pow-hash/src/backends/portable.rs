//! Portable hash backend
//!
//! Reference implementation of the double Groestl-512 construction. Every
//! other backend must match it byte for byte.

use crate::{Backend, PowHash, PowHasher, GROESTL512_LEN, POW_HASH_LEN};
use groestl::{Digest, Groestl512};

/// Single Groestl-512 digest.
pub fn groestl_single(input: &[u8]) -> [u8; GROESTL512_LEN] {
    let digest = Groestl512::digest(input);
    let mut output = [0u8; GROESTL512_LEN];
    output.copy_from_slice(&digest);
    output
}

/// `Groestl512(Groestl512(input))` truncated to the first 32 bytes.
pub fn groestl_double(input: &[u8]) -> PowHash {
    let first = Groestl512::digest(input);
    let second = Groestl512::digest(first);

    let mut output = [0u8; POW_HASH_LEN];
    output.copy_from_slice(&second[..POW_HASH_LEN]);
    output
}

/// Sequential hash engine
#[derive(Debug, Default, Clone, Copy)]
pub struct PortableHasher;

impl PortableHasher {
    /// Create a portable hasher
    pub fn new() -> Self {
        Self
    }
}

impl PowHasher for PortableHasher {
    fn backend(&self) -> Backend {
        Backend::Portable
    }

    fn workers(&self) -> usize {
        1
    }

    fn hash(&self, input: &[u8]) -> PowHash {
        groestl_double(input)
    }
}
