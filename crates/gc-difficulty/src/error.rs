//! Error types for difficulty verification

use crate::domain::BlockHash;
use thiserror::Error;

/// Result type alias for difficulty operations
pub type Result<T> = std::result::Result<T, DifficultyError>;

/// Errors decoding a compact target word
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CompactError {
    /// Sign bit set on a non-zero mantissa
    #[error("compact target {0:#010x} is negative")]
    Negative(u32),

    /// Decoded value does not fit in 256 bits
    #[error("compact target {0:#010x} overflows 256 bits")]
    Overflow(u32),
}

/// Failure reported by an ancestor lookup backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("block store error: {0}")]
pub struct LookupError(pub String);

/// Errors that reject a candidate block's difficulty
///
/// Every variant is terminal for the candidate under evaluation.
#[derive(Debug, Error)]
pub enum DifficultyError {
    /// The ancestor walk could not reach a block it needed
    #[error("chain incomplete below height {height}: ancestor {missing} not found")]
    ChainIncomplete {
        /// Height of the last block reached before the gap
        height: u64,
        /// Display-order hash of the missing predecessor
        missing: String,
        /// Store failure, when the lookup itself errored
        #[source]
        source: Option<LookupError>,
    },

    /// Computed target differs from the claimed one after precision reduction
    #[error(
        "Network provided difficulty bits do not match what was calculated: {received} vs {calculated}"
    )]
    DifficultyMismatch {
        /// Claimed target (hex)
        received: String,
        /// Computed target (hex)
        calculated: String,
    },

    /// A non-transition block changed its compact target
    #[error("Unexpected change in difficulty at height {height}: {received:x} vs {previous:x}")]
    UnexpectedDifficultyChange {
        /// Height of the previous block
        height: u64,
        /// Candidate compact target
        received: u32,
        /// Previous block compact target
        previous: u32,
    },

    /// A compact target in the chain or candidate cannot be decoded
    #[error("invalid compact target {bits:#010x}")]
    InvalidCompact {
        /// Offending compact word
        bits: u32,
        /// Decode failure
        #[source]
        source: CompactError,
    },

    /// The interval walk did not land on a retarget boundary
    #[error("chain inconsistent: {reason}")]
    ChainInconsistent {
        /// Description of the inconsistency
        reason: String,
    },
}

impl DifficultyError {
    /// True when the failure comes from missing or broken chain data rather
    /// than from the candidate block itself.
    pub fn is_chain_fault(&self) -> bool {
        matches!(
            self,
            DifficultyError::ChainIncomplete { .. } | DifficultyError::ChainInconsistent { .. }
        )
    }

    /// Short label used for metrics and structured logs
    pub fn reason(&self) -> &'static str {
        match self {
            DifficultyError::ChainIncomplete { .. } => "chain_incomplete",
            DifficultyError::DifficultyMismatch { .. } => "difficulty_mismatch",
            DifficultyError::UnexpectedDifficultyChange { .. } => "unexpected_change",
            DifficultyError::InvalidCompact { .. } => "invalid_compact",
            DifficultyError::ChainInconsistent { .. } => "chain_inconsistent",
        }
    }

    pub(crate) fn incomplete(height: u64, missing: &BlockHash, source: Option<LookupError>) -> Self {
        DifficultyError::ChainIncomplete {
            height,
            missing: crate::domain::block::display_hex(missing),
            source,
        }
    }
}

impl From<CompactError> for DifficultyError {
    fn from(source: CompactError) -> Self {
        let bits = match source {
            CompactError::Negative(bits) | CompactError::Overflow(bits) => bits,
        };
        DifficultyError::InvalidCompact { bits, source }
    }
}

/// Errors loading network parameters
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown network name
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// Parameter file could not be read
    #[error("failed to read parameter file {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Parameter file is not valid JSON for [`crate::NetworkParams`]
    #[error("failed to parse parameters: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parameters are internally inconsistent
    #[error("invalid parameters: {0}")]
    Invalid(String),
}
