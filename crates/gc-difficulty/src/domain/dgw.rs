//! Dark Gravity Wave retargeting
//!
//! Both variants walk backward from the previous block through the ancestor
//! lookup and compute the target the next block must carry:
//!
//! - **v1** mixes the first `past_blocks_min` targets into an online running
//!   mean and smooths the observed block time with a 70/30 blend of a short
//!   mean (first `past_blocks_min + 1` deltas) and a long mean (all deltas).
//!   Used below the fork threshold.
//! - **v3** takes a cumulative average over a fixed 24-block window and the
//!   raw sum of block time deltas. Used from the fork threshold on.
//!
//! Arithmetic reproduces the historical chain bit for bit, including the v1
//! float intermediates truncated toward zero.

use super::block::StoredBlock;
use super::compact::{decode_compact, Target};
use crate::config::{NetworkParams, WindowParams};
use crate::error::{DifficultyError, Result};
use crate::ports::AncestorLookup;
use num_bigint::BigUint;
use num_traits::Zero;
use tracing::debug;

/// Dark Gravity Wave variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DgwVersion {
    /// Pre-fork smoothing variant
    V1,
    /// Post-fork fixed-window variant
    V3,
}

impl std::fmt::Display for DgwVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DgwVersion::V1 => write!(f, "DGWv1"),
            DgwVersion::V3 => write!(f, "DGWv3"),
        }
    }
}

/// Pick the variant that governs the block after `previous_height`
pub fn select_version(params: &NetworkParams, previous_height: u64) -> DgwVersion {
    if previous_height >= params.threshold_height.saturating_sub(1) {
        DgwVersion::V3
    } else {
        DgwVersion::V1
    }
}

/// Outcome of a retarget computation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Retarget {
    /// Full-precision target before the ceiling clamp
    pub target: Target,
    /// Blocks visited by the walk (0 when history was too short)
    pub blocks: u64,
    /// Effective timespan after clamping
    pub actual_timespan: i64,
    /// Expected timespan for the visited blocks
    pub target_timespan: i64,
}

impl Retarget {
    fn ceiling(max_target: Target) -> Self {
        Self {
            target: max_target,
            blocks: 0,
            actual_timespan: 0,
            target_timespan: 0,
        }
    }
}

/// Compute the DGW target for the block after `previous`
pub fn retarget<L>(
    version: DgwVersion,
    params: &NetworkParams,
    previous: &StoredBlock,
    ancestors: &L,
) -> Result<Retarget>
where
    L: AncestorLookup + ?Sized,
{
    match version {
        DgwVersion::V1 => dark_gravity_wave_v1(params, previous, ancestors),
        DgwVersion::V3 => dark_gravity_wave_v3(params, previous, ancestors),
    }
}

/// Pre-fork variant: online mean of the first `past_blocks_min` targets and
/// smoothed block times over up to `past_blocks_max` blocks.
///
/// Negative block time deltas are clamped to zero before entering either
/// time mean.
pub fn dark_gravity_wave_v1<L>(
    params: &NetworkParams,
    previous: &StoredBlock,
    ancestors: &L,
) -> Result<Retarget>
where
    L: AncestorLookup + ?Sized,
{
    let window = params.dgw_v1;
    if insufficient_history(previous, &window) {
        return Ok(Retarget::ceiling(params.max_target()?));
    }

    let min = window.past_blocks_min;
    let mut average = Target::zero();
    let mut last_time: i64 = 0;
    // Short mean: first `min + 1` deltas
    let mut short_count: i64 = 0;
    let mut short_mean: i64 = 0;
    // Long stats: every delta
    let mut long_count: i64 = 0;
    let mut long_sum: i64 = 0;

    let blocks = walk_window(previous, &window, ancestors, |count, block| {
        if count <= min {
            let sample = decode_compact(block.bits)?;
            average = if count == 1 {
                sample
            } else {
                running_mean(&average, sample, count)
            };
        }

        let time = block.timestamp as i64;
        if last_time > 0 {
            // Out-of-order timestamps count as zero in both means
            let diff = (last_time - time).max(0);
            if short_count as u64 <= min {
                short_count += 1;
                short_mean = if short_count == 1 {
                    diff
                } else {
                    (diff - short_mean) / short_count + short_mean
                };
            }
            long_count += 1;
            long_sum += diff;
        }
        last_time = time;
        Ok(())
    })?;

    let mut result = Retarget {
        target: average,
        blocks,
        actual_timespan: 0,
        target_timespan: 0,
    };

    if short_count != 0 && long_count != 0 {
        let spacing = params.target_spacing as f64;
        let mut smart_average = short_mean as f64 * 0.7 + (long_sum / long_count) as f64 * 0.3;
        if smart_average < 1.0 {
            smart_average = 1.0;
        }
        let shift = spacing / smart_average;

        let f_target = blocks as f64 * spacing;
        let mut f_actual = f_target / shift;
        if f_actual < f_target / 3.0 {
            f_actual = f_target / 3.0;
        }
        if f_actual > f_target * 3.0 {
            f_actual = f_target * 3.0;
        }

        result.actual_timespan = f_actual as i64;
        result.target_timespan = f_target as i64;
        result.target = scale(result.target, result.actual_timespan, result.target_timespan);
    }

    debug!(
        height = previous.height,
        blocks,
        actual_timespan = result.actual_timespan,
        target_timespan = result.target_timespan,
        "DGWv1 retarget"
    );
    Ok(result)
}

/// Post-fork variant: cumulative average over a fixed window and the raw
/// block time sum, clamped in integer arithmetic.
pub fn dark_gravity_wave_v3<L>(
    params: &NetworkParams,
    previous: &StoredBlock,
    ancestors: &L,
) -> Result<Retarget>
where
    L: AncestorLookup + ?Sized,
{
    let window = params.dgw_v3;
    if insufficient_history(previous, &window) {
        return Ok(Retarget::ceiling(params.max_target()?));
    }

    let min = window.past_blocks_min;
    let mut average = Target::zero();
    let mut last_time: i64 = 0;
    let mut actual_timespan: i64 = 0;

    let blocks = walk_window(previous, &window, ancestors, |count, block| {
        if count <= min {
            let sample = decode_compact(block.bits)?;
            average = if count == 1 {
                sample
            } else {
                (&average * count + sample) / (count + 1)
            };
        }

        let time = block.timestamp as i64;
        if last_time > 0 {
            actual_timespan += last_time - time;
        }
        last_time = time;
        Ok(())
    })?;

    let target_timespan = blocks as i64 * params.target_spacing as i64;
    if actual_timespan < target_timespan / 3 {
        actual_timespan = target_timespan / 3;
    }
    if actual_timespan > target_timespan * 3 {
        actual_timespan = target_timespan * 3;
    }

    debug!(
        height = previous.height,
        blocks,
        actual_timespan,
        target_timespan,
        "DGWv3 retarget"
    );
    Ok(Retarget {
        target: scale(average, actual_timespan, target_timespan),
        blocks,
        actual_timespan,
        target_timespan,
    })
}

fn insufficient_history(previous: &StoredBlock, window: &WindowParams) -> bool {
    previous.height == 0 || previous.height < window.past_blocks_min
}

/// `avg + (sample - avg) / count`, truncating toward zero
fn running_mean(average: &Target, sample: Target, count: u64) -> Target {
    if sample >= *average {
        average + (sample - average) / count
    } else {
        average - (average - &sample) / count
    }
}

fn scale(target: Target, actual: i64, expected: i64) -> Target {
    target * BigUint::from(actual.max(0) as u64) / BigUint::from(expected.max(1) as u64)
}

/// Visit `previous` and its ancestors, newest first, stopping at the window
/// size or before genesis. Returns the number of blocks visited.
///
/// A missing ancestor fails the walk while fewer than `past_blocks_min`
/// blocks have been seen; after that the window ends at the oldest stored
/// block. Store errors always fail the walk.
fn walk_window<L, F>(
    previous: &StoredBlock,
    window: &WindowParams,
    ancestors: &L,
    mut visit: F,
) -> Result<u64>
where
    L: AncestorLookup + ?Sized,
    F: FnMut(u64, &StoredBlock) -> Result<()>,
{
    let mut cursor = previous.clone();
    let mut count: u64 = 0;

    loop {
        count += 1;
        visit(count, &cursor)?;

        if count >= window.past_blocks_max || cursor.height <= 1 {
            break;
        }

        match ancestors.get(&cursor.prev_block_hash) {
            Ok(Some(parent)) => cursor = parent,
            Ok(None) if count >= window.past_blocks_min => {
                debug!(
                    height = cursor.height,
                    visited = count,
                    "Ancestor window ends at oldest stored block"
                );
                break;
            }
            Ok(None) => {
                return Err(DifficultyError::incomplete(
                    cursor.height,
                    &cursor.prev_block_hash,
                    None,
                ))
            }
            Err(e) => {
                return Err(DifficultyError::incomplete(
                    cursor.height,
                    &cursor.prev_block_hash,
                    Some(e),
                ))
            }
        }
    }

    Ok(count)
}
