//! # Header Verification Flows
//!
//! A committee endorses headers; the default service accepts exactly the
//! headers carrying a quorum signature over their own commit payload.

#[cfg(test)]
mod tests {
    use super::super::init_test_tracing;
    use harmony_header_verify::domain::{BitmapError, SignatureDecodeError, VerificationGate};
    use harmony_header_verify::test_utils::CommitteeFixture;
    use harmony_header_verify::{
        DefaultHeaderVerificationService, Epoch, HeaderVerificationApi, HeaderVerificationConfig,
        HeaderVerificationError, HeaderWithSig, QuorumMode,
    };
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn plain_service() -> DefaultHeaderVerificationService {
        init_test_tracing();
        DefaultHeaderVerificationService::from_config(&HeaderVerificationConfig::default())
    }

    fn endorsed(fixture: &CommitteeFixture, number: u64, signers: &[usize]) -> HeaderWithSig {
        let hash = [number as u8; 32];
        fixture.endorse(fixture.header(number, hash, number + 1), signers, QuorumMode::Plain)
    }

    // =============================================================================
    // QUORUM
    // =============================================================================

    #[test]
    fn test_four_member_committee() {
        let service = plain_service();
        let fixture = CommitteeFixture::new(1, 4);

        let three = service.verify_header_sigs(&fixture.epoch, &endorsed(&fixture, 100, &[0, 1, 2]));
        let four = service.verify_header_sigs(&fixture.epoch, &endorsed(&fixture, 100, &[0, 1, 2, 3]));
        let two = service.verify_header_sigs(&fixture.epoch, &endorsed(&fixture, 100, &[0, 1]));

        assert_eq!(three.unwrap().signers, 3);
        assert_eq!(four.unwrap().signers, 4);
        assert_eq!(
            two,
            Err(HeaderVerificationError::QuorumNotMet {
                signers: 2,
                committee_size: 4,
                mode: QuorumMode::Plain
            })
        );
    }

    #[test]
    fn test_threshold_boundary_on_large_committee() {
        let service = plain_service();
        let fixture = CommitteeFixture::new(2, 100);

        let quorum: Vec<usize> = (0..67).collect();
        let short: Vec<usize> = (33..99).collect();

        assert!(service
            .verify_header_sigs(&fixture.epoch, &endorsed(&fixture, 7, &quorum))
            .is_ok());
        assert!(matches!(
            service.verify_header_sigs(&fixture.epoch, &endorsed(&fixture, 7, &short)),
            Err(HeaderVerificationError::QuorumNotMet { signers: 66, .. })
        ));
    }

    #[test]
    fn test_single_member_committee() {
        let service = plain_service();
        let fixture = CommitteeFixture::new(3, 1);

        let endorsement = service
            .verify_header_sigs(&fixture.epoch, &endorsed(&fixture, 1, &[0]))
            .unwrap();
        assert_eq!(endorsement.committee_size, 1);
    }

    // =============================================================================
    // TAMPERING
    // =============================================================================

    #[test]
    fn test_any_header_field_change_breaks_signature() {
        let service = plain_service();
        let fixture = CommitteeFixture::new(1, 4);
        let original = endorsed(&fixture, 500, &[0, 1, 3]);
        assert!(service.verify_header_sigs(&fixture.epoch, &original).is_ok());

        for byte in [0usize, 15, 31] {
            let mut tampered = original.clone();
            tampered.header.hash[byte] ^= 0x01;
            assert_eq!(
                service.verify_header_sigs(&fixture.epoch, &tampered),
                Err(HeaderVerificationError::SignatureInvalid { block_number: 500 }),
                "hash byte {byte}"
            );
        }

        let mut renumbered = original.clone();
        renumbered.header.number ^= 1 << 40;
        assert!(matches!(
            service.verify_header_sigs(&fixture.epoch, &renumbered),
            Err(HeaderVerificationError::SignatureInvalid { .. })
        ));
    }

    #[test]
    fn test_plain_epochs_ignore_view_id() {
        let service = plain_service();
        let fixture = CommitteeFixture::new(1, 4);
        let mut header = endorsed(&fixture, 500, &[0, 1, 2]);
        header.header.view_id = u64::MAX;

        assert!(service.verify_header_sigs(&fixture.epoch, &header).is_ok());
    }

    #[test]
    fn test_signature_of_other_block_rejected() {
        let service = plain_service();
        let fixture = CommitteeFixture::new(1, 4);
        let mut header = endorsed(&fixture, 10, &[0, 1, 2]);
        header.sig = endorsed(&fixture, 11, &[0, 1, 2]).sig;

        assert_eq!(
            service.verify_header_sigs(&fixture.epoch, &header).unwrap_err().gate(),
            VerificationGate::VerifySignature
        );
    }

    #[test]
    fn test_signature_from_other_committee_rejected() {
        let service = plain_service();
        let fixture = CommitteeFixture::new(1, 4);
        let impostors = CommitteeFixture::new(9, 4);
        let forged = impostors.endorse(fixture.header(10, [3; 32], 0), &[0, 1, 2, 3], QuorumMode::Plain);

        assert!(matches!(
            service.verify_header_sigs(&fixture.epoch, &forged),
            Err(HeaderVerificationError::SignatureInvalid { block_number: 10 })
        ));
    }

    #[test]
    fn test_malformed_inputs() {
        let service = plain_service();
        let fixture = CommitteeFixture::new(1, 9);
        let good = endorsed(&fixture, 10, &[0, 1, 2, 3, 4, 5, 6]);

        let mut empty_sig = good.clone();
        empty_sig.sig.clear();
        assert_eq!(
            service.verify_header_sigs(&fixture.epoch, &empty_sig),
            Err(HeaderVerificationError::MalformedSignature(
                SignatureDecodeError::InvalidLength {
                    expected: 96,
                    actual: 0
                }
            ))
        );

        let mut short_bitmap = good.clone();
        short_bitmap.bitmap.pop();
        assert_eq!(
            service.verify_header_sigs(&fixture.epoch, &short_bitmap),
            Err(HeaderVerificationError::MalformedBitmap(
                BitmapError::LengthMismatch {
                    expected: 2,
                    actual: 1
                }
            ))
        );

        // Bit 9 is past a nine member committee
        let mut stray_bit = good;
        stray_bit.bitmap[1] |= 0b0000_0010;
        assert_eq!(
            service.verify_header_sigs(&fixture.epoch, &stray_bit),
            Err(HeaderVerificationError::MalformedBitmap(
                BitmapError::BitOutOfRange {
                    index: 9,
                    committee_size: 9
                }
            ))
        );
    }

    #[test]
    fn test_signatures_under_other_dst_rejected() {
        let fixture = CommitteeFixture::new(1, 4);
        let header = endorsed(&fixture, 10, &[0, 1, 2]);
        let config = HeaderVerificationConfig {
            signature_dst: "HARMONY_RELAY_TEST_DST_".to_string(),
            ..HeaderVerificationConfig::default()
        };
        let service = DefaultHeaderVerificationService::from_config(&config);

        assert!(matches!(
            service.verify_header_sigs(&fixture.epoch, &header),
            Err(HeaderVerificationError::SignatureInvalid { .. })
        ));
    }

    // =============================================================================
    // CONCURRENCY AND BATCHES
    // =============================================================================

    #[test]
    fn test_concurrent_verification_shares_one_service() {
        let service = plain_service();
        let fixture = CommitteeFixture::new(1, 7);
        let good = endorsed(&fixture, 42, &[0, 1, 2, 3, 4]);
        let weak = endorsed(&fixture, 42, &[0, 1, 2, 3]);

        std::thread::scope(|scope| {
            for i in 0..8 {
                let (service, fixture, good, weak) = (&service, &fixture, &good, &weak);
                scope.spawn(move || {
                    for _ in 0..4 {
                        if i % 2 == 0 {
                            assert!(service.verify_header_sigs(&fixture.epoch, good).is_ok());
                        } else {
                            assert!(service.verify_header_sigs(&fixture.epoch, weak).is_err());
                        }
                    }
                });
            }
        });
    }

    #[test]
    fn test_batch_across_epochs_keeps_order() {
        let service = plain_service();
        let first = CommitteeFixture::new(1, 4);
        let second = CommitteeFixture::new(2, 5);
        let epoch_one = Arc::new(first.epoch.clone());
        let epoch_two = Arc::new(second.epoch.clone());

        let batch: Vec<(Arc<Epoch>, HeaderWithSig)> = (0..20u64)
            .map(|n| {
                if n % 2 == 0 {
                    (Arc::clone(&epoch_one), endorsed(&first, n, &[0, 1, 2]))
                } else {
                    (Arc::clone(&epoch_two), endorsed(&second, n, &[0, 1, 2]))
                }
            })
            .collect();

        let result = service.verify_batch(&batch);

        // Three of five is short of 5 * 2 / 3 + 1 = 4
        assert_eq!(result.valid_count, 10);
        assert_eq!(result.invalid_count, 10);
        for (n, outcome) in result.results.iter().enumerate() {
            match outcome {
                Ok(endorsement) => {
                    assert_eq!(n % 2, 0);
                    assert_eq!(endorsement.block_number, n as u64);
                    assert_eq!(endorsement.epoch_id, 1);
                }
                Err(err) => {
                    assert_eq!(n % 2, 1);
                    assert_eq!(err.gate(), VerificationGate::CheckQuorum);
                }
            }
        }
    }

    #[test]
    fn test_batch_matches_single_verification() {
        let service = plain_service();
        let fixture = CommitteeFixture::new(1, 4);
        let epoch = Arc::new(fixture.epoch.clone());
        let batch: Vec<_> = (0..12u64)
            .map(|n| {
                let mut header = endorsed(&fixture, n, &[0, 1, 2]);
                if n % 4 == 0 {
                    header.header.hash[0] ^= 0xff;
                }
                (Arc::clone(&epoch), header)
            })
            .collect();

        let batch_result = service.verify_batch(&batch);
        let single: Vec<_> = batch
            .iter()
            .map(|(epoch, header)| service.verify_header_sigs(epoch, header))
            .collect();

        assert_eq!(batch_result.results, single);
        assert_eq!(batch_result.invalid_count, 3);
    }
}
