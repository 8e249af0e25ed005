//! # PoW Hash Parity
//!
//! Portable and parallel backends must agree byte for byte, and block
//! hashes computed through the difficulty crate must match the hash crate.

#[cfg(test)]
mod tests {
    use gc_difficulty::{hash_from_display_hex, BlockHash, BlockHeader};
    use gc_pow_hash::{create_backend, groestl512, pow_hash, Backend, PowHash};
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};

    fn both(inputs: &[Vec<u8>]) -> (Vec<PowHash>, Vec<PowHash>) {
        let portable = create_backend(Backend::Portable).unwrap();
        let parallel = create_backend(Backend::Parallel).unwrap();
        (portable.hash_batch(inputs), parallel.hash_batch(inputs))
    }

    #[test]
    fn test_edge_inputs_agree() {
        let inputs = vec![Vec::new(), vec![0x42], vec![0xa5; 10 * 1024]];
        let (portable, parallel) = both(&inputs);
        assert_eq!(portable, parallel);
        assert_eq!(portable[0], pow_hash(&[]));
    }

    #[test]
    fn test_random_corpus_agrees() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x6772_6f65);
        let inputs: Vec<Vec<u8>> = (0..256)
            .map(|_| {
                let len = rng.gen_range(0..2048);
                (0..len).map(|_| rng.gen()).collect()
            })
            .collect();

        let (portable, parallel) = both(&inputs);
        assert_eq!(portable, parallel);
    }

    #[test]
    fn test_double_differs_from_single() {
        for input in [&b""[..], &b"groestl"[..], &[0u8; 80][..]] {
            assert_ne!(pow_hash(input)[..], groestl512(input)[..32]);
        }
    }

    #[test]
    fn test_header_hash_uses_pow_hash() {
        let header = BlockHeader {
            version: 112,
            prev_block_hash: BlockHash::zero(),
            merkle_root: hash_from_display_hex(
                "3ce968df58f9c8a752306c4b7264afab93149dbc578bd08a42c446caaa6628bb",
            )
            .unwrap(),
            timestamp: 1_395_342_829,
            bits: 0x1e0f_ffff,
            nonce: 220_035,
        };
        let parallel = create_backend(Backend::Parallel).unwrap();
        assert_eq!(header.hash().to_fixed_bytes(), parallel.hash(&header.serialize()));
    }

    proptest! {
        #[test]
        fn prop_backends_agree(inputs in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..512), 0..32)) {
            let (portable, parallel) = both(&inputs);
            prop_assert_eq!(portable, parallel);
        }

        #[test]
        fn prop_pow_hash_deterministic(input in prop::collection::vec(any::<u8>(), 0..256)) {
            prop_assert_eq!(pow_hash(&input), pow_hash(&input));
        }
    }
}
