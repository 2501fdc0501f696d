//! # Epoch Transition Flows
//!
//! Headers on both sides of the staking epoch, committee rotation, and
//! committees that cannot be resolved.

#[cfg(test)]
mod tests {
    use super::super::init_test_tracing;
    use harmony_header_verify::domain::VerificationGate;
    use harmony_header_verify::test_utils::CommitteeFixture;
    use harmony_header_verify::{
        Committee, CommitteeMember, DefaultHeaderVerificationService, Epoch, HeaderVerificationApi,
        HeaderVerificationConfig, HeaderVerificationError, QuorumMode,
    };
    use std::sync::Arc;

    const STAKING_EPOCH: u64 = 10;

    fn staking_service() -> DefaultHeaderVerificationService {
        init_test_tracing();
        DefaultHeaderVerificationService::from_config(
            &HeaderVerificationConfig::default().with_staking_epoch(STAKING_EPOCH),
        )
    }

    #[test]
    fn test_mode_switches_at_staking_epoch() {
        let service = staking_service();
        let before = CommitteeFixture::new(STAKING_EPOCH - 1, 4);
        let after = CommitteeFixture::new(STAKING_EPOCH, 4);

        let plain = before.endorse(before.header(1_000, [1; 32], 8), &[0, 1, 2], QuorumMode::Plain);
        let extended = after.endorse(after.header(1_001, [2; 32], 9), &[0, 1, 2], QuorumMode::Extended);

        assert_eq!(
            service.verify_header_sigs(&before.epoch, &plain).unwrap().mode,
            QuorumMode::Plain
        );
        assert_eq!(
            service.verify_header_sigs(&after.epoch, &extended).unwrap().mode,
            QuorumMode::Extended
        );
    }

    #[test]
    fn test_wrong_payload_layout_rejected_on_both_sides() {
        let service = staking_service();
        let before = CommitteeFixture::new(STAKING_EPOCH - 1, 4);
        let after = CommitteeFixture::new(STAKING_EPOCH + 5, 4);

        let extended_too_early =
            before.endorse(before.header(1, [1; 32], 8), &[0, 1, 2], QuorumMode::Extended);
        let plain_too_late = after.endorse(after.header(2, [2; 32], 9), &[0, 1, 2], QuorumMode::Plain);

        assert!(matches!(
            service.verify_header_sigs(&before.epoch, &extended_too_early),
            Err(HeaderVerificationError::SignatureInvalid { block_number: 1 })
        ));
        assert!(matches!(
            service.verify_header_sigs(&after.epoch, &plain_too_late),
            Err(HeaderVerificationError::SignatureInvalid { block_number: 2 })
        ));
    }

    #[test]
    fn test_extended_epoch_commits_to_view_id() {
        let service = staking_service();
        let fixture = CommitteeFixture::new(STAKING_EPOCH, 4);
        let mut header =
            fixture.endorse(fixture.header(77, [7; 32], 300), &[0, 1, 2, 3], QuorumMode::Extended);
        assert!(service.verify_header_sigs(&fixture.epoch, &header).is_ok());

        header.header.view_id = 301;
        assert_eq!(
            service.verify_header_sigs(&fixture.epoch, &header),
            Err(HeaderVerificationError::SignatureInvalid { block_number: 77 })
        );
    }

    #[test]
    fn test_extended_epoch_counts_voting_power() {
        let service = staking_service();
        let fixture = CommitteeFixture::with_voting_power(STAKING_EPOCH, &[400, 100, 100, 100, 100]);

        // 500 of 800 is short of two thirds, though four of five members signed
        let many_light =
            fixture.endorse(fixture.header(5, [5; 32], 1), &[1, 2, 3, 4], QuorumMode::Extended);
        let heavy_pair = fixture.endorse(fixture.header(5, [5; 32], 1), &[0, 1, 2], QuorumMode::Extended);

        assert!(matches!(
            service.verify_header_sigs(&fixture.epoch, &many_light),
            Err(HeaderVerificationError::QuorumNotMet {
                signers: 4,
                committee_size: 5,
                mode: QuorumMode::Extended
            })
        ));
        assert_eq!(
            service.verify_header_sigs(&fixture.epoch, &heavy_pair).unwrap().signers,
            3
        );
    }

    #[test]
    fn test_zero_power_committee_fails_setup_in_extended_epoch() {
        let service = staking_service();
        let fixture = CommitteeFixture::with_voting_power(STAKING_EPOCH, &[0, 0, 0]);
        let header = fixture.endorse(fixture.header(5, [5; 32], 1), &[0, 1, 2], QuorumMode::Extended);

        let err = service.verify_header_sigs(&fixture.epoch, &header).unwrap_err();
        assert_eq!(err.gate(), VerificationGate::BuildQuorum);
    }

    #[test]
    fn test_rotated_committee_rejects_previous_signers() {
        let service = staking_service();
        let old = CommitteeFixture::new(3, 4);
        let new = CommitteeFixture::new(4, 4);

        // Old committee signs a header claiming the new epoch
        let header = old.endorse(new.header(9, [9; 32], 0), &[0, 1, 2, 3], QuorumMode::Plain);

        assert!(matches!(
            service.verify_header_sigs(&new.epoch, &header),
            Err(HeaderVerificationError::SignatureInvalid { .. })
        ));
        assert!(matches!(
            service.verify_header_sigs(&old.epoch, &header),
            Err(HeaderVerificationError::CommitteeUnavailable { epoch_id: 3, .. })
        ));
    }

    #[test]
    fn test_undecodable_committee_key() {
        let service = staking_service();
        let fixture = CommitteeFixture::new(2, 4);
        let header = fixture.endorse(fixture.header(1, [1; 32], 0), &[0, 1, 2], QuorumMode::Plain);

        let mut members = fixture.epoch.committee.members().to_vec();
        members[2] = CommitteeMember::new([0x11; 48], 100);
        let broken = Epoch::new(2, Committee::new(0, members));

        assert_eq!(
            service.verify_header_sigs(&broken, &header),
            Err(HeaderVerificationError::CommitteeUnavailable {
                epoch_id: 2,
                reason: "invalid BLS public key at index 2".to_string()
            })
        );
    }

    #[test]
    fn test_shared_committee_across_epoch_handles() {
        let service = staking_service();
        let fixture = CommitteeFixture::new(6, 4);
        let committee = Arc::clone(&fixture.epoch.committee);
        let epoch = Epoch::with_shared_committee(6, committee);
        let header = fixture.endorse(fixture.header(3, [3; 32], 0), &[1, 2, 3], QuorumMode::Plain);

        assert!(service.verify_header_sigs(&epoch, &header).is_ok());
    }
}
