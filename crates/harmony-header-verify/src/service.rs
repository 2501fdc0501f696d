//! # Header Verification Service
//!
//! Application service implementing `HeaderVerificationApi`.
//!
//! ## Gates
//!
//! Every header passes these gates in order; the first failure is final.
//!
//! ```text
//! resolve committee ─→ decode sig+bitmap ─→ classify epoch ─→ build quorum
//!                                                                 │
//!        accept ←─ verify aggregate sig ←─ build payload ←─ check quorum
//! ```
//!
//! The quorum check runs before the pairing check so an under-signed header
//! never costs a pairing and stays distinguishable from a forged one.

use crate::adapters::{
    BlstAggregateVerifier, CommitteeQuorumFactory, StakingEpochSchedule, StoredCommitteeKeys,
};
use crate::config::HeaderVerificationConfig;
use crate::domain::{
    decode_sig_bitmap, Epoch, HeaderEndorsement, HeaderVerificationError, HeaderWithSig,
    QuorumMode, VerificationResult,
};
use crate::ports::inbound::{BatchVerificationResult, HeaderVerificationApi};
use crate::ports::outbound::{
    AggregateSignatureVerifier, CommitteeProvider, EpochClassifier, QuorumVerifier,
    QuorumVerifierFactory,
};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default batch size at which verification moves onto the rayon pool.
pub const DEFAULT_PARALLEL_BATCH_THRESHOLD: usize = 8;

/// Service wired with the default adapters.
pub type DefaultHeaderVerificationService = HeaderVerificationService<
    StoredCommitteeKeys,
    StakingEpochSchedule,
    CommitteeQuorumFactory,
    BlstAggregateVerifier,
>;

/// Header Verification Service.
///
/// Holds only immutable collaborators, so one instance can serve any number
/// of concurrent verifications.
pub struct HeaderVerificationService<P, E, Q, V> {
    committees: P,
    epochs: E,
    quorum: Q,
    verifier: V,
    parallel_batch_threshold: usize,
}

impl DefaultHeaderVerificationService {
    /// Build the service from configuration with the default adapters.
    pub fn from_config(config: &HeaderVerificationConfig) -> Self {
        Self::new(
            StoredCommitteeKeys::new(),
            StakingEpochSchedule::from_config(config),
            CommitteeQuorumFactory::new(),
            BlstAggregateVerifier::from_config(config),
        )
        .with_parallel_batch_threshold(config.parallel_batch_threshold)
    }
}

impl<P, E, Q, V> HeaderVerificationService<P, E, Q, V>
where
    P: CommitteeProvider,
    E: EpochClassifier,
    Q: QuorumVerifierFactory,
    V: AggregateSignatureVerifier,
{
    pub fn new(committees: P, epochs: E, quorum: Q, verifier: V) -> Self {
        Self {
            committees,
            epochs,
            quorum,
            verifier,
            parallel_batch_threshold: DEFAULT_PARALLEL_BATCH_THRESHOLD,
        }
    }

    pub fn with_parallel_batch_threshold(mut self, threshold: usize) -> Self {
        self.parallel_batch_threshold = threshold;
        self
    }

    /// Signing mode of an epoch according to the classifier.
    pub fn quorum_mode(&self, epoch_id: u64) -> QuorumMode {
        QuorumMode::from_extended(self.epochs.is_extended_mode(epoch_id))
    }

    fn run_gates(
        &self,
        epoch: &Epoch,
        header: &HeaderWithSig,
    ) -> VerificationResult<HeaderEndorsement> {
        let block = &header.header;

        // 1. Committee keys for the epoch
        if block.epoch != epoch.epoch_id {
            return Err(HeaderVerificationError::CommitteeUnavailable {
                epoch_id: epoch.epoch_id,
                reason: format!("header belongs to epoch {}", block.epoch),
            });
        }
        if block.shard_id != epoch.committee.shard_id {
            return Err(HeaderVerificationError::CommitteeUnavailable {
                epoch_id: epoch.epoch_id,
                reason: format!(
                    "header from shard {}, committee of shard {}",
                    block.shard_id, epoch.committee.shard_id
                ),
            });
        }
        let public_keys = self.committees.bls_public_keys(epoch)?;

        // 2. Signature and bitmap
        let (aggregate_sig, mask) = decode_sig_bitmap(&header.sig, &header.bitmap, public_keys)?;

        // 3. Epoch mode
        let mode = self.quorum_mode(epoch.epoch_id);

        // 4. Quorum rule
        let quorum = self
            .quorum
            .new_verifier(&epoch.committee, epoch.epoch_id, mode)
            .map_err(|reason| HeaderVerificationError::QuorumSetupError {
                epoch_id: epoch.epoch_id,
                reason,
            })?;

        // 5. Quorum, before any pairing work
        if !quorum.is_quorum_achieved(&mask) {
            return Err(HeaderVerificationError::QuorumNotMet {
                signers: mask.count_enabled(),
                committee_size: mask.len(),
                mode,
            });
        }

        // 6. Payload
        let payload = mode.commit_payload(&block.hash, block.number, block.view_id);

        // 7. Aggregate signature
        let signature_invalid = HeaderVerificationError::SignatureInvalid {
            block_number: block.number,
        };
        let aggregate_public = mask.aggregate_public().ok_or_else(|| signature_invalid.clone())?;
        if !self
            .verifier
            .verify_hash(&aggregate_sig, aggregate_public, &payload)
        {
            return Err(signature_invalid);
        }

        Ok(HeaderEndorsement {
            block_number: block.number,
            block_hash: block.hash,
            epoch_id: epoch.epoch_id,
            mode,
            signers: mask.count_enabled(),
            committee_size: mask.len(),
        })
    }
}

impl<P, E, Q, V> HeaderVerificationApi for HeaderVerificationService<P, E, Q, V>
where
    P: CommitteeProvider,
    E: EpochClassifier,
    Q: QuorumVerifierFactory,
    V: AggregateSignatureVerifier,
{
    fn verify_header_sigs(
        &self,
        epoch: &Epoch,
        header: &HeaderWithSig,
    ) -> VerificationResult<HeaderEndorsement> {
        let result = self.run_gates(epoch, header);

        match &result {
            Ok(endorsement) => debug!(
                "[header-verify] Accepted block {} (0x{}) epoch {}: {}/{} signers, {:?}",
                endorsement.block_number,
                hex::encode(endorsement.block_hash),
                endorsement.epoch_id,
                endorsement.signers,
                endorsement.committee_size,
                endorsement.mode
            ),
            Err(err) => warn!(
                "[header-verify] Rejected block {} epoch {} at {:?}: {}",
                header.header.number,
                epoch.epoch_id,
                err.gate(),
                err
            ),
        }

        result
    }

    fn verify_batch(&self, items: &[(Arc<Epoch>, HeaderWithSig)]) -> BatchVerificationResult {
        let results: Vec<_> = if items.len() >= self.parallel_batch_threshold {
            items
                .par_iter()
                .map(|(epoch, header)| self.verify_header_sigs(epoch, header))
                .collect()
        } else {
            items
                .iter()
                .map(|(epoch, header)| self.verify_header_sigs(epoch, header))
                .collect()
        };

        let batch = BatchVerificationResult::from_results(results);
        debug!(
            "[header-verify] Batch of {}: {} accepted, {} rejected",
            items.len(),
            batch.valid_count,
            batch.invalid_count
        );
        batch
    }
}

// =============================================================================
// TESTS
// =============================================================================
