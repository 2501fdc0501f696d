//! Fuzz target for signature and bitmap decoding.
//!
//! Arbitrary signature bytes and bitmaps against a fixed committee must
//! never panic, and a decoded mask must agree with the bitmap it came from.

#![no_main]

use harmony_header_verify::domain::bls::test_helpers::BlsKeypair;
use harmony_header_verify::domain::bitmap_len;
use harmony_header_verify::{decode_sig_bitmap, BlsPublicKey};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

const MAX_COMMITTEE: usize = 24;

fn committee_keys() -> &'static [BlsPublicKey] {
    static KEYS: OnceLock<Vec<BlsPublicKey>> = OnceLock::new();
    KEYS.get_or_init(|| {
        (0..MAX_COMMITTEE as u64)
            .map(|seed| BlsKeypair::from_seed(seed).public_key())
            .collect()
    })
}

#[derive(Debug, arbitrary::Arbitrary)]
struct DecodeFuzzInput {
    /// Committee size, reduced into 1..=MAX_COMMITTEE
    committee_size: u8,
    sig_bytes: Vec<u8>,
    bitmap: Vec<u8>,
}

fuzz_target!(|input: DecodeFuzzInput| {
    let size = 1 + input.committee_size as usize % MAX_COMMITTEE;
    let keys = committee_keys()[..size].to_vec();

    let result = decode_sig_bitmap(&input.sig_bytes, &input.bitmap, keys.clone());

    // Deterministic
    let again = decode_sig_bitmap(&input.sig_bytes, &input.bitmap, keys);
    assert_eq!(result.is_ok(), again.is_ok());

    if let Ok((sig, mask)) = result {
        assert_eq!(sig.to_bytes().as_slice(), input.sig_bytes.as_slice());
        assert_eq!(input.bitmap.len(), bitmap_len(size));
        assert_eq!(mask.to_bitmap(), input.bitmap);
        assert_eq!(mask.aggregate_public().is_some(), mask.count_enabled() > 0);
    }
});
