//! Block subsidy schedule

/// Amount in base units
pub type Amount = u64;

/// Base units per coin
pub const COIN: Amount = 100_000_000;

/// Reward of the first post-premine block
pub const MAX_REWARD: Amount = 512 * COIN;

/// Block 1 premine
pub const PREMINE: Amount = 240_640 * COIN;

/// Reward floor
pub const MINIMUM_SUBSIDY: Amount = 5 * COIN;

/// Blocks between 6% reward reductions (about one week)
pub const SUBSIDY_DECREASE_INTERVAL: u64 = 10_080;

/// New coins created by the block at `height`
pub fn block_inflation(height: u64) -> Amount {
    match height {
        0 => COIN,
        1 => PREMINE,
        _ => {
            let mut subsidy = MAX_REWARD;
            for _ in 0..height / SUBSIDY_DECREASE_INTERVAL {
                subsidy = subsidy * 47 / 50;
                if subsidy < MINIMUM_SUBSIDY {
                    return MINIMUM_SUBSIDY;
                }
            }
            subsidy
        }
    }
}

/// Whether the block after `previous_height` gets a reduced reward
pub fn is_reward_halving_point(previous_height: u64) -> bool {
    (previous_height + 1) % SUBSIDY_DECREASE_INTERVAL == 0
}
