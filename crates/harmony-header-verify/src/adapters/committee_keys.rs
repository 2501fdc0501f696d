//! Committee Key Adapter
//!
//! Implements `CommitteeProvider` by decoding the serialized keys stored on
//! the epoch's committee.

use crate::domain::{BlsPublicKey, Epoch, HeaderVerificationError, VerificationResult};
use crate::ports::outbound::CommitteeProvider;
use tracing::warn;

/// Reads keys straight from the epoch's committee.
#[derive(Clone, Copy, Debug, Default)]
pub struct StoredCommitteeKeys;

impl StoredCommitteeKeys {
    pub fn new() -> Self {
        Self
    }
}

impl CommitteeProvider for StoredCommitteeKeys {
    fn bls_public_keys(&self, epoch: &Epoch) -> VerificationResult<Vec<BlsPublicKey>> {
        epoch
            .committee
            .members()
            .iter()
            .enumerate()
            .map(|(index, member)| {
                BlsPublicKey::from_bytes(&member.bls_public_key).map_err(|err| {
                    warn!(
                        "[header-verify] Committee key {} of epoch {} (shard {}) does not decode: {:?}",
                        index, epoch.epoch_id, epoch.committee.shard_id, err
                    );
                    HeaderVerificationError::CommitteeUnavailable {
                        epoch_id: epoch.epoch_id,
                        reason: format!("invalid BLS public key at index {index}"),
                    }
                })
            })
            .collect()
    }
}
