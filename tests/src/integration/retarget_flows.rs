//! # Retarget Flows
//!
//! Drives [`DifficultyVerifier`] end to end over synthetic chains held in the
//! in-memory store:
//!
//! 1. **Steady state**: on-target block times keep the target
//! 2. **Fork threshold**: the variant switch happens at `threshold - 1`
//! 3. **Clamps**: slow and fast windows hit the 3x bounds
//! 4. **History gaps**: missing or failing stores reject the candidate
//! 5. **Interval rule** and **testnet relaxation**

#[cfg(test)]
mod tests {
    use crate::fixtures::{candidate, linked_chain, FailingStore};
    use gc_difficulty::domain::dgw;
    use gc_difficulty::{
        decode_compact, encode_compact, DgwVersion, DifficultyError, DifficultyVerifier,
        NetworkParams, RetargetRule,
    };
    use num_bigint::BigUint;

    const MAINNET_MAX_BITS: u32 = 0x1e0f_ffff;
    const MID_BITS: u32 = 0x1c00_ffff;

    fn mainnet() -> DifficultyVerifier {
        DifficultyVerifier::new(NetworkParams::mainnet()).unwrap()
    }

    fn scaled_bits(bits: u32, numerator: u64, denominator: u64) -> u32 {
        let target = decode_compact(bits).unwrap() * BigUint::from(numerator) / denominator;
        encode_compact(&target)
    }

    // =========================================================================
    // STEADY STATE
    // =========================================================================

    #[test]
    fn test_25_blocks_on_target_keep_difficulty() {
        let (store, tip) = linked_chain(80, 104, MAINNET_MAX_BITS, |_| 60);
        assert_eq!(store.len(), 25);
        assert_eq!(tip.height, 104);

        let header = candidate(&tip, MAINNET_MAX_BITS, 60);
        mainnet().check_difficulty(&tip, &header, &store).unwrap();
    }

    #[test]
    fn test_25_blocks_reject_harder_claim() {
        let (store, tip) = linked_chain(80, 104, MAINNET_MAX_BITS, |_| 60);
        let header = candidate(&tip, 0x1e0f_fff0, 60);

        let err = mainnet().check_difficulty(&tip, &header, &store).unwrap_err();
        assert!(matches!(err, DifficultyError::DifficultyMismatch { .. }));
        assert!(!err.is_chain_fault());
    }

    #[test]
    fn test_v3_on_target_window_eases_by_one_block() {
        // 24 blocks span 23 deltas against a 24-block expectation
        let (store, tip) = linked_chain(99_950, 100_100, MID_BITS, |_| 60);
        let expected = scaled_bits(MID_BITS, 23, 24);

        let verifier = mainnet();
        verifier
            .check_difficulty(&tip, &candidate(&tip, expected, 60), &store)
            .unwrap();
        assert!(verifier
            .check_difficulty(&tip, &candidate(&tip, MID_BITS, 60), &store)
            .is_err());
    }

    // =========================================================================
    // FORK THRESHOLD
    // =========================================================================

    #[test]
    fn test_threshold_boundary_selects_variant() {
        let params = NetworkParams::mainnet();
        assert_eq!(dgw::select_version(&params, 99_998), DgwVersion::V1);
        assert_eq!(dgw::select_version(&params, 99_999), DgwVersion::V3);
    }

    #[test]
    fn test_threshold_switch_changes_window() {
        let params = NetworkParams::mainnet();

        let (store, before) = linked_chain(99_800, 99_998, MID_BITS, |_| 60);
        let v1 = dgw::retarget(dgw::select_version(&params, before.height), &params, &before, &store)
            .unwrap();
        assert_eq!(v1.blocks, 120);

        let (store, at) = linked_chain(99_800, 99_999, MID_BITS, |_| 60);
        let v3 = dgw::retarget(dgw::select_version(&params, at.height), &params, &at, &store)
            .unwrap();
        assert_eq!(v3.blocks, 24);
        assert_eq!(v3.target_timespan, 24 * 60);
    }

    // =========================================================================
    // CLAMPS
    // =========================================================================

    #[test]
    fn test_v1_slow_blocks_clamp_to_three_times() {
        let (store, tip) = linked_chain(1_000, 1_200, MID_BITS, |_| 1_000);
        let expected = scaled_bits(MID_BITS, 3, 1);

        let header = candidate(&tip, expected, 60);
        mainnet().check_difficulty(&tip, &header, &store).unwrap();
    }

    #[test]
    fn test_v3_slow_blocks_clamp_to_three_times() {
        let (store, tip) = linked_chain(99_950, 100_100, MID_BITS, |_| 600);
        let expected = scaled_bits(MID_BITS, 3, 1);
        assert_eq!(expected, 0x1c02_fffd);

        let header = candidate(&tip, expected, 60);
        mainnet().check_difficulty(&tip, &header, &store).unwrap();
    }

    #[test]
    fn test_v3_fast_blocks_clamp_to_one_third() {
        let (store, tip) = linked_chain(99_950, 100_100, MID_BITS, |_| 1);
        let expected = scaled_bits(MID_BITS, 1, 3);

        let header = candidate(&tip, expected, 60);
        mainnet().check_difficulty(&tip, &header, &store).unwrap();
    }

    #[test]
    fn test_easiest_target_never_exceeded() {
        let (store, tip) = linked_chain(99_950, 100_100, MAINNET_MAX_BITS, |_| 600);
        let verifier = mainnet();

        // Slow blocks at the ceiling stay at the ceiling
        let header = candidate(&tip, MAINNET_MAX_BITS, 60);
        verifier.check_difficulty(&tip, &header, &store).unwrap();

        let header = candidate(&tip, scaled_bits(MAINNET_MAX_BITS, 3, 1), 60);
        assert!(verifier.check_difficulty(&tip, &header, &store).is_err());
    }

    // =========================================================================
    // HISTORY GAPS
    // =========================================================================

    #[test]
    fn test_short_history_requires_max_target() {
        let (store, tip) = linked_chain(0, 11, MID_BITS, |_| 60);
        let verifier = mainnet();

        verifier
            .check_difficulty(&tip, &candidate(&tip, MAINNET_MAX_BITS, 60), &store)
            .unwrap();
        assert!(verifier
            .check_difficulty(&tip, &candidate(&tip, MID_BITS, 60), &store)
            .is_err());
    }

    #[test]
    fn test_gap_inside_minimum_window_is_incomplete() {
        let (store, tip) = linked_chain(45, 50, MID_BITS, |_| 60);

        let err = mainnet()
            .check_difficulty(&tip, &candidate(&tip, MID_BITS, 60), &store)
            .unwrap_err();
        match err {
            DifficultyError::ChainIncomplete { height, .. } => assert_eq!(height, 45),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_failing_store_is_chain_fault() {
        let (_, tip) = linked_chain(99_950, 100_100, MID_BITS, |_| 60);
        let store = FailingStore::default();

        let err = mainnet()
            .check_difficulty(&tip, &candidate(&tip, MID_BITS, 60), &store)
            .unwrap_err();
        assert!(err.is_chain_fault());
        assert_eq!(err.reason(), "chain_incomplete");
        assert_eq!(store.calls(), 1);
    }

    // =========================================================================
    // INTERVAL RULE
    // =========================================================================

    fn interval_params() -> NetworkParams {
        NetworkParams {
            retarget: RetargetRule::Interval,
            target_timespan: 600,
            max_target_bits: MAINNET_MAX_BITS,
            ..NetworkParams::regtest()
        }
    }

    #[test]
    fn test_interval_holds_between_transitions() {
        let verifier = DifficultyVerifier::new(interval_params()).unwrap();
        let (store, tip) = linked_chain(0, 104, MID_BITS, |_| 60);

        verifier
            .check_difficulty(&tip, &candidate(&tip, MID_BITS, 60), &store)
            .unwrap();
        let err = verifier
            .check_difficulty(&tip, &candidate(&tip, 0x1c00_fffe, 60), &store)
            .unwrap_err();
        assert!(matches!(err, DifficultyError::UnexpectedDifficultyChange { .. }));
    }

    #[test]
    fn test_interval_transition_scales_by_timespan() {
        let verifier = DifficultyVerifier::new(interval_params()).unwrap();
        let (store, tip) = linked_chain(0, 109, MID_BITS, |_| 60);

        // Nine deltas of 60s against a 600s period
        let expected = scaled_bits(MID_BITS, 540, 600);
        verifier
            .check_difficulty(&tip, &candidate(&tip, expected, 60), &store)
            .unwrap();
        assert!(verifier
            .check_difficulty(&tip, &candidate(&tip, MID_BITS, 60), &store)
            .is_err());
    }

    #[test]
    fn test_interval_missing_period_start() {
        let verifier = DifficultyVerifier::new(interval_params()).unwrap();
        let (store, tip) = linked_chain(105, 109, MID_BITS, |_| 60);

        let err = verifier
            .check_difficulty(&tip, &candidate(&tip, MID_BITS, 60), &store)
            .unwrap_err();
        assert!(matches!(err, DifficultyError::ChainIncomplete { .. }));
    }

    // =========================================================================
    // TESTNET RELAXATION
    // =========================================================================

    #[test]
    fn test_testnet_late_block_accepts_easier_target() {
        let verifier = DifficultyVerifier::new(NetworkParams::testnet()).unwrap();
        let (store, tip) = linked_chain(99_950, 100_100, MID_BITS, |_| 60);

        let late = candidate(&tip, 0x1e00_ffff, 121);
        verifier.check_difficulty(&tip, &late, &store).unwrap();

        // Exactly two spacings late is still on time
        let on_time = candidate(&tip, 0x1e00_ffff, 120);
        assert!(verifier.check_difficulty(&tip, &on_time, &store).is_err());
    }
}
