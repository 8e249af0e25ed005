//! Bitcoin-style interval retargeting
//!
//! The target changes only on the block after every `interval`-th block and
//! must stay fixed in between.

use super::block::StoredBlock;
use super::compact::{decode_compact, encode_compact, reduce_precision};
use super::verification::clamp_to_max;
use crate::config::NetworkParams;
use crate::error::{DifficultyError, Result};
use crate::ports::AncestorLookup;
use std::time::{Duration, Instant};

const SLOW_TRAVERSAL: Duration = Duration::from_millis(50);

/// Whether the block after `previous_height` starts a new retarget period
pub fn is_difficulty_transition_point(interval: u64, previous_height: u64) -> bool {
    (previous_height + 1) % interval == 0
}

/// Check `candidate_bits` for the block after `previous`
pub fn check_interval_retarget<L>(
    params: &NetworkParams,
    previous: &StoredBlock,
    candidate_bits: u32,
    ancestors: &L,
) -> Result<()>
where
    L: AncestorLookup + ?Sized,
{
    let interval = params.interval();

    if !is_difficulty_transition_point(interval, previous.height) {
        if candidate_bits != previous.bits {
            return Err(DifficultyError::UnexpectedDifficultyChange {
                height: previous.height,
                received: candidate_bits,
                previous: previous.bits,
            });
        }
        return Ok(());
    }

    let started = Instant::now();
    let mut first = previous.clone();
    for _ in 1..interval {
        first = match ancestors.get(&first.prev_block_hash) {
            Ok(Some(parent)) => parent,
            Ok(None) => {
                return Err(DifficultyError::incomplete(
                    first.height,
                    &first.prev_block_hash,
                    None,
                ))
            }
            Err(e) => {
                return Err(DifficultyError::incomplete(
                    first.height,
                    &first.prev_block_hash,
                    Some(e),
                ))
            }
        };
    }

    if first.height % interval != 0 {
        return Err(DifficultyError::ChainInconsistent {
            reason: format!(
                "walk from height {} ended at height {}, not a retarget boundary",
                previous.height, first.height
            ),
        });
    }

    let elapsed = started.elapsed();
    if elapsed > SLOW_TRAVERSAL {
        tracing::info!(
            elapsed_ms = elapsed.as_millis() as u64,
            "Difficulty transition traversal was slow"
        );
    }

    let target_timespan = params.target_timespan as i64;
    let mut timespan = previous.timestamp as i64 - first.timestamp as i64;
    if timespan < target_timespan / 4 {
        timespan = target_timespan / 4;
    }
    if timespan > target_timespan * 4 {
        timespan = target_timespan * 4;
    }

    let new_target = decode_compact(previous.bits)? * (timespan as u64) / params.target_timespan;
    let new_target = clamp_to_max(&params.max_target()?, new_target);
    let calculated = encode_compact(&reduce_precision(&new_target, candidate_bits));

    if calculated != candidate_bits {
        return Err(DifficultyError::DifficultyMismatch {
            received: format!("{candidate_bits:x}"),
            calculated: format!("{calculated:x}"),
        });
    }
    Ok(())
}
