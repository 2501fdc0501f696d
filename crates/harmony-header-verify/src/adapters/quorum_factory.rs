//! Quorum Factory Adapter
//!
//! Implements `QuorumVerifierFactory` with the source chain's two rules:
//! uniform vote for plain epochs, stake weighted for extended epochs.

use crate::domain::{Committee, ParticipationMask, QuorumMode, QuorumRule, QuorumSetupReason};
use crate::ports::outbound::{QuorumVerifier, QuorumVerifierFactory};
use tracing::debug;

impl QuorumVerifier for QuorumRule {
    fn is_quorum_achieved(&self, mask: &ParticipationMask) -> bool {
        QuorumRule::is_quorum_achieved(self, mask)
    }
}

/// Builds a [`QuorumRule`] per call from the committee and mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommitteeQuorumFactory;

impl CommitteeQuorumFactory {
    pub fn new() -> Self {
        Self
    }
}

impl QuorumVerifierFactory for CommitteeQuorumFactory {
    type Verifier = QuorumRule;

    fn new_verifier(
        &self,
        committee: &Committee,
        epoch_id: u64,
        mode: QuorumMode,
    ) -> Result<QuorumRule, QuorumSetupReason> {
        let rule = QuorumRule::for_committee(committee, mode)?;

        debug!(
            "[header-verify] Quorum for epoch {} shard {}: {:?}, need weight {}",
            epoch_id,
            committee.shard_id,
            mode,
            rule.required_weight()
        );

        Ok(rule)
    }
}
