//! blst Aggregate Verifier
//!
//! Implements `AggregateSignatureVerifier` with a blst pairing check under a
//! fixed domain separation tag.

use crate::config::HeaderVerificationConfig;
use crate::domain::{AggregateSignature, BlsPublicKey, DEFAULT_DST};
use crate::ports::outbound::AggregateSignatureVerifier;

/// Pairing-based verifier bound to one DST.
#[derive(Clone, Debug)]
pub struct BlstAggregateVerifier {
    dst: Vec<u8>,
}

impl BlstAggregateVerifier {
    pub fn new(dst: impl Into<Vec<u8>>) -> Self {
        Self { dst: dst.into() }
    }

    pub fn from_config(config: &HeaderVerificationConfig) -> Self {
        Self::new(config.dst())
    }

    pub fn dst(&self) -> &[u8] {
        &self.dst
    }
}

impl Default for BlstAggregateVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_DST)
    }
}

impl AggregateSignatureVerifier for BlstAggregateVerifier {
    fn verify_hash(
        &self,
        signature: &AggregateSignature,
        aggregate_public: &BlsPublicKey,
        payload: &[u8],
    ) -> bool {
        signature.verify_hash(aggregate_public, payload, &self.dst)
    }
}
