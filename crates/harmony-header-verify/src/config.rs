//! # Verifier Configuration
//!
//! Chain parameters the verifier cannot derive from headers.

use crate::domain::DEFAULT_DST;
use crate::service::DEFAULT_PARALLEL_BATCH_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Header verification configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderVerificationConfig {
    /// Domain separation tag committee members sign commits under.
    pub signature_dst: String,

    /// First epoch that signs in extended (staking) mode.
    /// `None` treats every epoch as plain.
    pub staking_epoch: Option<u64>,

    /// Batches at least this large are verified on the rayon pool.
    pub parallel_batch_threshold: usize,
}

impl Default for HeaderVerificationConfig {
    fn default() -> Self {
        Self {
            signature_dst: String::from_utf8_lossy(DEFAULT_DST).into_owned(),
            staking_epoch: None,
            parallel_batch_threshold: DEFAULT_PARALLEL_BATCH_THRESHOLD,
        }
    }
}

impl HeaderVerificationConfig {
    /// Create a config for testing: staking from epoch 10, always parallel.
    pub fn for_testing() -> Self {
        Self {
            staking_epoch: Some(10),
            parallel_batch_threshold: 1,
            ..Self::default()
        }
    }

    pub fn with_staking_epoch(mut self, epoch: u64) -> Self {
        self.staking_epoch = Some(epoch);
        self
    }

    pub fn dst(&self) -> &[u8] {
        self.signature_dst.as_bytes()
    }
}
