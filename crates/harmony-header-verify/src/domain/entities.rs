//! # Domain Entities
//!
//! Epochs, committees and relayed headers as the relay receives them.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::sync::Arc;

use super::payload::QuorumMode;

/// 32-byte block hash as produced by the source chain's header codec.
pub type Hash = [u8; 32];

/// Compressed BLS public key (G1 point, 48 bytes).
pub const PUBLIC_KEY_SIZE: usize = 48;

/// Compressed BLS aggregate signature (G2 point, 96 bytes).
pub const SIGNATURE_SIZE: usize = 96;

/// Serialized public key exactly as stored in the committee.
pub type SerializedPublicKey = [u8; PUBLIC_KEY_SIZE];

// =============================================================================
// Committee
// =============================================================================

/// One slot of a shard committee.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMember {
    /// Compressed G1 key, validated lazily by the committee provider
    #[serde_as(as = "Bytes")]
    pub bls_public_key: SerializedPublicKey,
    /// Effective voting power used by stake-weighted quorums
    pub voting_power: u128,
}

impl CommitteeMember {
    pub fn new(bls_public_key: SerializedPublicKey, voting_power: u128) -> Self {
        Self {
            bls_public_key,
            voting_power,
        }
    }
}

/// Ordered committee of a shard for one epoch.
///
/// Member order is the bitmap order: bit `i` of a participation bitmap
/// refers to `members[i]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
    pub shard_id: u32,
    members: Vec<CommitteeMember>,
}

impl Committee {
    pub fn new(shard_id: u32, members: Vec<CommitteeMember>) -> Self {
        Self { shard_id, members }
    }

    /// Members in bitmap order.
    pub fn members(&self) -> &[CommitteeMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of all voting power, `None` on overflow.
    pub fn total_voting_power(&self) -> Option<u128> {
        self.members
            .iter()
            .try_fold(0u128, |acc, m| acc.checked_add(m.voting_power))
    }
}

// =============================================================================
// Epoch
// =============================================================================

/// Finalized epoch known to the relay.
///
/// The committee is shared so in-flight verifications keep it alive even if
/// the epoch store moves on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Epoch {
    pub epoch_id: u64,
    pub committee: Arc<Committee>,
}

impl Epoch {
    pub fn new(epoch_id: u64, committee: Committee) -> Self {
        Self {
            epoch_id,
            committee: Arc::new(committee),
        }
    }

    pub fn with_shared_committee(epoch_id: u64, committee: Arc<Committee>) -> Self {
        Self {
            epoch_id,
            committee,
        }
    }
}

// =============================================================================
// Headers
// =============================================================================

/// Header fields the commit payload is built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub number: u64,
    /// Header hash computed by the source chain
    pub hash: Hash,
    /// Consensus view the block was committed in
    pub view_id: u64,
    pub epoch: u64,
    pub shard_id: u32,
}

/// A relayed header with the committee's aggregate signature attached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderWithSig {
    pub header: BlockHeader,
    /// Raw aggregate signature bytes as relayed
    pub sig: Vec<u8>,
    /// Raw participation bitmap as relayed
    pub bitmap: Vec<u8>,
}

impl HeaderWithSig {
    pub fn new(header: BlockHeader, sig: Vec<u8>, bitmap: Vec<u8>) -> Self {
        Self {
            header,
            sig,
            bitmap,
        }
    }
}

/// Receipt for a header that passed every verification gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderEndorsement {
    pub block_number: u64,
    pub block_hash: Hash,
    pub epoch_id: u64,
    pub mode: QuorumMode,
    /// Number of committee members that co-signed
    pub signers: usize,
    pub committee_size: usize,
}
