//! Staking Epoch Schedule
//!
//! Implements `EpochClassifier` from a configured staking epoch.

use crate::config::HeaderVerificationConfig;
use crate::ports::outbound::EpochClassifier;

/// Epochs at or after `staking_epoch` are extended; all others are plain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StakingEpochSchedule {
    staking_epoch: Option<u64>,
}

impl StakingEpochSchedule {
    pub fn new(staking_epoch: Option<u64>) -> Self {
        Self { staking_epoch }
    }

    pub fn from_config(config: &HeaderVerificationConfig) -> Self {
        Self::new(config.staking_epoch)
    }

    pub fn staking_epoch(&self) -> Option<u64> {
        self.staking_epoch
    }
}

impl EpochClassifier for StakingEpochSchedule {
    fn is_extended_mode(&self, epoch_id: u64) -> bool {
        self.staking_epoch.is_some_and(|start| epoch_id >= start)
    }
}
