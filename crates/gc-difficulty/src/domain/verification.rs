//! Shared verification step: compare a computed target with a claimed one

use super::compact::{decode_compact, reduce_precision, Target};
use crate::error::{DifficultyError, Result};

/// Clamp `calculated` to `max_target`, reduce it to the claimed word's
/// precision and require equality with the decoded claim.
pub fn verify_target(max_target: &Target, calculated: Target, claimed_bits: u32) -> Result<()> {
    let calculated = clamp_to_max(max_target, calculated);
    let received = decode_compact(claimed_bits)?;
    let calculated = reduce_precision(&calculated, claimed_bits);

    if calculated != received {
        return Err(DifficultyError::DifficultyMismatch {
            received: format!("{received:x}"),
            calculated: format!("{calculated:x}"),
        });
    }
    Ok(())
}

/// Clamp to the network ceiling. Hitting it is expected, not an error.
pub fn clamp_to_max(max_target: &Target, calculated: Target) -> Target {
    if &calculated > max_target {
        crate::metrics::record_ceiling_clamp();
        tracing::info!(
            calculated = %format!("{calculated:x}"),
            "Difficulty hit proof of work limit"
        );
        return max_target.clone();
    }
    calculated
}
