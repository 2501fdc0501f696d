//! # Commit Payload
//!
//! Rebuilds the exact bytes a committee signed to commit a block.
//!
//! ```text
//! plain:    number (8, LE) || block hash (32)
//! extended: number (8, LE) || block hash (32) || view id (8, LE)
//! ```

use super::entities::Hash;
use serde::{Deserialize, Serialize};

/// Signed payload length in plain mode
pub const PLAIN_PAYLOAD_LEN: usize = 8 + 32;

/// Signed payload length in extended (staking) mode
pub const EXTENDED_PAYLOAD_LEN: usize = PLAIN_PAYLOAD_LEN + 8;

/// Signing mode of an epoch.
///
/// Resolved once per epoch. The mode decides both the payload layout and
/// which quorum rule applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuorumMode {
    /// Pre-staking epochs: count-based quorum, payload without view id
    Plain,
    /// Staking epochs: stake-weighted quorum, payload carries the view id
    Extended,
}

impl QuorumMode {
    pub fn from_extended(is_extended: bool) -> Self {
        if is_extended {
            Self::Extended
        } else {
            Self::Plain
        }
    }

    pub fn is_extended(self) -> bool {
        matches!(self, Self::Extended)
    }

    /// Commit payload for a block under this mode.
    pub fn commit_payload(self, block_hash: &Hash, block_number: u64, view_id: u64) -> Vec<u8> {
        construct_commit_payload(self.is_extended(), block_hash, block_number, view_id)
    }
}

/// Build the commit payload for consensus signatures.
///
/// `view_id` is only part of the payload in extended mode.
pub fn construct_commit_payload(
    is_extended: bool,
    block_hash: &Hash,
    block_number: u64,
    view_id: u64,
) -> Vec<u8> {
    let mut payload = Vec::with_capacity(EXTENDED_PAYLOAD_LEN);
    payload.extend_from_slice(&block_number.to_le_bytes());
    payload.extend_from_slice(block_hash);
    if is_extended {
        payload.extend_from_slice(&view_id.to_le_bytes());
    }
    payload
}
