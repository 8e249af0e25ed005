//! Domain layer: pure consensus arithmetic
//!
//! Nothing here performs I/O. Ancestor blocks arrive through the
//! [`AncestorLookup`](crate::ports::AncestorLookup) port.

pub mod block;
pub mod compact;
pub mod dgw;
pub mod interval;
pub mod subsidy;
pub mod verification;

pub use block::{
    check_proof_of_work, display_hex, hash_from_display_hex, hash_meets_target, BlockHash,
    BlockHeader, StoredBlock, HEADER_SIZE,
};
pub use compact::{decode_compact, encode_compact, reduce_precision, Target};
pub use dgw::{
    dark_gravity_wave_v1, dark_gravity_wave_v3, retarget, select_version, DgwVersion, Retarget,
};
pub use interval::{check_interval_retarget, is_difficulty_transition_point};
pub use subsidy::{block_inflation, is_reward_halving_point, Amount, COIN};
pub use verification::{clamp_to_max, verify_target};
