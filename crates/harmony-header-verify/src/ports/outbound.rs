//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the verifier calls into. Committee management, epoch
//! classification, quorum policy and the pairing check all live behind these
//! traits so the relay can swap in its own chain-state components.

use crate::domain::{
    AggregateSignature, BlsPublicKey, Committee, Epoch, ParticipationMask, QuorumMode,
    QuorumSetupReason, VerificationResult,
};

/// Ordered public keys of an epoch's committee.
///
/// Implementations must return keys in bitmap order.
pub trait CommitteeProvider: Send + Sync {
    /// # Errors
    /// * `CommitteeUnavailable` if the keys cannot be produced
    fn bls_public_keys(&self, epoch: &Epoch) -> VerificationResult<Vec<BlsPublicKey>>;
}

/// The source chain's epoch classification.
pub trait EpochClassifier: Send + Sync {
    /// Whether `epoch_id` signs commits in extended (staking) mode.
    fn is_extended_mode(&self, epoch_id: u64) -> bool;
}

/// Answers whether a participation mask carries enough weight.
pub trait QuorumVerifier {
    fn is_quorum_achieved(&self, mask: &ParticipationMask) -> bool;
}

/// Builds the quorum rule for one verification call.
pub trait QuorumVerifierFactory: Send + Sync {
    type Verifier: QuorumVerifier;

    /// # Errors
    /// Returns the reason no rule exists for this committee/epoch/mode.
    fn new_verifier(
        &self,
        committee: &Committee,
        epoch_id: u64,
        mode: QuorumMode,
    ) -> Result<Self::Verifier, QuorumSetupReason>;
}

/// Pairing check of an aggregate signature against a commit payload.
pub trait AggregateSignatureVerifier: Send + Sync {
    fn verify_hash(
        &self,
        signature: &AggregateSignature,
        aggregate_public: &BlsPublicKey,
        payload: &[u8],
    ) -> bool;
}
