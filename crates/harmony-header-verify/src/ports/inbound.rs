//! # Inbound Ports (Driving Ports / API)
//!
//! Entry points the relay's header-ingestion pipeline calls.

use crate::domain::{Epoch, HeaderEndorsement, HeaderWithSig, VerificationResult};
use std::sync::Arc;

/// Outcome of verifying a batch of headers.
#[derive(Clone, Debug)]
pub struct BatchVerificationResult {
    /// Individual results, in input order
    pub results: Vec<VerificationResult<HeaderEndorsement>>,
    /// Count of accepted headers
    pub valid_count: usize,
    /// Count of rejected headers
    pub invalid_count: usize,
}

impl BatchVerificationResult {
    /// Create a batch result from individual results.
    pub fn from_results(results: Vec<VerificationResult<HeaderEndorsement>>) -> Self {
        let valid_count = results.iter().filter(|r| r.is_ok()).count();
        let invalid_count = results.len() - valid_count;

        Self {
            results,
            valid_count,
            invalid_count,
        }
    }

    /// Whether every header was accepted
    pub fn all_valid(&self) -> bool {
        self.invalid_count == 0
    }
}

/// Header signature verification API.
///
/// Implementations must be thread-safe (`Send + Sync`); every call is
/// independent and may run concurrently.
pub trait HeaderVerificationApi: Send + Sync {
    /// Check that `header` carries a valid quorum endorsement from the
    /// committee of `epoch`.
    fn verify_header_sigs(
        &self,
        epoch: &Epoch,
        header: &HeaderWithSig,
    ) -> VerificationResult<HeaderEndorsement>;

    /// Verify many headers, each against its own epoch.
    fn verify_batch(&self, items: &[(Arc<Epoch>, HeaderWithSig)]) -> BatchVerificationResult;
}
