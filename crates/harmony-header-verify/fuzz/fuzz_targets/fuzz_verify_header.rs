//! Fuzz target for end-to-end header verification.
//!
//! A genuinely endorsed header is mutated by the fuzzer; verification must
//! never panic and must only accept the untouched header.

#![no_main]

use harmony_header_verify::test_utils::CommitteeFixture;
use harmony_header_verify::{
    DefaultHeaderVerificationService, HeaderVerificationApi, HeaderVerificationConfig, QuorumMode,
};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

struct Harness {
    fixture: CommitteeFixture,
    service: DefaultHeaderVerificationService,
}

fn harness() -> &'static Harness {
    static HARNESS: OnceLock<Harness> = OnceLock::new();
    HARNESS.get_or_init(|| Harness {
        fixture: CommitteeFixture::new(4, 7),
        service: DefaultHeaderVerificationService::from_config(&HeaderVerificationConfig::default()),
    })
}

#[derive(Debug, arbitrary::Arbitrary)]
struct HeaderFuzzInput {
    number: u64,
    view_id: u64,
    hash: [u8; 32],
    /// Byte offset into the signature to flip, if any
    sig_flip: Option<(u8, u8)>,
    bitmap: Option<Vec<u8>>,
}

fuzz_target!(|input: HeaderFuzzInput| {
    let harness = harness();
    let fixture = &harness.fixture;
    let header = fixture.header(input.number, input.hash, input.view_id);
    let mut signed = fixture.endorse(header, &[0, 1, 2, 3, 4], QuorumMode::Plain);

    let mut tampered = false;
    if let Some((offset, mask)) = input.sig_flip {
        if mask != 0 {
            let i = offset as usize % signed.sig.len();
            signed.sig[i] ^= mask;
            tampered = true;
        }
    }
    if let Some(bitmap) = input.bitmap {
        tampered |= bitmap != signed.bitmap;
        signed.bitmap = bitmap;
    }

    let result = harness.service.verify_header_sigs(&fixture.epoch, &signed);
    if !tampered {
        assert!(result.is_ok(), "{result:?}");
    }
});
