//! Difficulty verification service
//!
//! Entry point consumed by chain-acceptance logic once per candidate block.

use crate::config::{NetworkParams, RetargetRule};
use crate::domain::dgw::{self, select_version};
use crate::domain::interval::check_interval_retarget;
use crate::domain::verification::verify_target;
use crate::domain::{BlockHeader, StoredBlock, Target};
use crate::error::{ConfigError, Result};
use crate::metrics;
use crate::ports::AncestorLookup;
use std::time::Instant;
use tracing::{debug, warn};

/// Verifies the claimed target of candidate blocks for one network
///
/// Holds only immutable parameters, so one instance can serve any number of
/// threads.
#[derive(Clone, Debug)]
pub struct DifficultyVerifier {
    params: NetworkParams,
    max_target: Target,
}

impl DifficultyVerifier {
    /// Create a verifier, validating the parameters
    pub fn new(params: NetworkParams) -> std::result::Result<Self, ConfigError> {
        params.validate()?;
        let max_target = params
            .max_target()
            .map_err(|e| ConfigError::Invalid(format!("max_target_bits: {e}")))?;
        Ok(Self { params, max_target })
    }

    /// Network parameters in use
    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    /// Decoded easiest target
    pub fn max_target(&self) -> &Target {
        &self.max_target
    }

    /// Check that `candidate`, built on `previous`, claims the required target
    pub fn check_difficulty<L>(
        &self,
        previous: &StoredBlock,
        candidate: &BlockHeader,
        ancestors: &L,
    ) -> Result<()>
    where
        L: AncestorLookup + ?Sized,
    {
        let started = Instant::now();
        let outcome = evaluate(&self.params, &self.max_target, previous, candidate, ancestors);
        metrics::record_verification_latency(started.elapsed().as_secs_f64());

        match &outcome {
            Ok(()) => {
                metrics::record_block_verified();
                debug!(
                    height = previous.height + 1,
                    bits = %format!("{:08x}", candidate.bits),
                    "Difficulty verified"
                );
            }
            Err(e) => {
                metrics::record_block_rejected(e.reason());
                warn!(
                    height = previous.height + 1,
                    reason = e.reason(),
                    error = %e,
                    "Difficulty check failed"
                );
            }
        }
        outcome
    }
}

/// One-shot form of [`DifficultyVerifier::check_difficulty`]
pub fn check_difficulty<L>(
    params: &NetworkParams,
    previous: &StoredBlock,
    candidate: &BlockHeader,
    ancestors: &L,
) -> Result<()>
where
    L: AncestorLookup + ?Sized,
{
    let max_target = params.max_target()?;
    evaluate(params, &max_target, previous, candidate, ancestors)
}

fn evaluate<L>(
    params: &NetworkParams,
    max_target: &Target,
    previous: &StoredBlock,
    candidate: &BlockHeader,
    ancestors: &L,
) -> Result<()>
where
    L: AncestorLookup + ?Sized,
{
    if params.allow_min_difficulty_blocks {
        // A block arriving more than two spacings late may claim any target
        // up to the maximum.
        let late_after = previous
            .timestamp
            .saturating_add(params.target_spacing.saturating_mul(2));
        if u64::from(candidate.timestamp) > late_after {
            return verify_target(max_target, candidate.target()?, candidate.bits);
        }
        if previous.height < params.threshold_height.saturating_sub(1) {
            debug!(
                height = previous.height + 1,
                "Pre-fork testnet block, retarget not enforced"
            );
            return Ok(());
        }
    }

    match params.retarget {
        RetargetRule::Interval => {
            check_interval_retarget(params, previous, candidate.bits, ancestors)
        }
        RetargetRule::DarkGravityWave => {
            let version = select_version(params, previous.height);
            let retarget = dgw::retarget(version, params, previous, ancestors)?;
            debug!(
                height = previous.height + 1,
                %version,
                blocks = retarget.blocks,
                "Computed required target"
            );
            verify_target(max_target, retarget.target, candidate.bits)
        }
    }
}
