//! Outbound ports (driven side - SPI)

use crate::domain::{BlockHash, StoredBlock};
use crate::error::LookupError;
use std::sync::Arc;

/// Port: read-only lookup of stored blocks by hash
///
/// `Ok(None)` means the block is not in the store. Implementations must be
/// free of side effects visible to the engine and safe for concurrent reads.
pub trait AncestorLookup: Send + Sync {
    /// Fetch a stored block by hash
    fn get(&self, hash: &BlockHash) -> Result<Option<StoredBlock>, LookupError>;
}

impl<T: AncestorLookup + ?Sized> AncestorLookup for &T {
    fn get(&self, hash: &BlockHash) -> Result<Option<StoredBlock>, LookupError> {
        (**self).get(hash)
    }
}

impl<T: AncestorLookup + ?Sized> AncestorLookup for Arc<T> {
    fn get(&self, hash: &BlockHash) -> Result<Option<StoredBlock>, LookupError> {
        (**self).get(hash)
    }
}
