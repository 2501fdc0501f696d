//! # Test Fixtures
//!
//! Committees of deterministic BLS keys that can endorse headers the way the
//! source chain's validators do.

use crate::domain::bls::test_helpers::{aggregate_signatures, BlsKeypair};
use crate::domain::{
    encode_bitmap, BlockHeader, Committee, CommitteeMember, Epoch, Hash, HeaderWithSig,
    QuorumMode, DEFAULT_DST,
};

/// A committee whose secret keys are known.
pub struct CommitteeFixture {
    pub keypairs: Vec<BlsKeypair>,
    pub epoch: Epoch,
    pub dst: Vec<u8>,
}

impl CommitteeFixture {
    /// `size` members with voting power 100 each.
    pub fn new(epoch_id: u64, size: usize) -> Self {
        Self::with_voting_power(epoch_id, &vec![100; size])
    }

    /// One member per entry of `voting_power`.
    pub fn with_voting_power(epoch_id: u64, voting_power: &[u128]) -> Self {
        let keypairs: Vec<BlsKeypair> = (0..voting_power.len() as u64)
            .map(|i| BlsKeypair::from_seed(epoch_id.wrapping_mul(1_000).wrapping_add(i)))
            .collect();
        let members = keypairs
            .iter()
            .zip(voting_power)
            .map(|(kp, power)| CommitteeMember::new(kp.public_key_bytes(), *power))
            .collect();

        Self {
            keypairs,
            epoch: Epoch::new(epoch_id, Committee::new(0, members)),
            dst: DEFAULT_DST.to_vec(),
        }
    }

    /// Header of this fixture's epoch and shard.
    pub fn header(&self, number: u64, hash: Hash, view_id: u64) -> BlockHeader {
        BlockHeader {
            number,
            hash,
            view_id,
            epoch: self.epoch.epoch_id,
            shard_id: self.epoch.committee.shard_id,
        }
    }

    /// Aggregate signature of `signers` over `header` plus the matching bitmap.
    pub fn endorse(&self, header: BlockHeader, signers: &[usize], mode: QuorumMode) -> HeaderWithSig {
        let payload = mode.commit_payload(&header.hash, header.number, header.view_id);
        self.endorse_payload(header, signers, &payload)
    }

    /// Like [`Self::endorse`] but over arbitrary payload bytes.
    pub fn endorse_payload(&self, header: BlockHeader, signers: &[usize], payload: &[u8]) -> HeaderWithSig {
        let signatures: Vec<_> = signers
            .iter()
            .map(|&i| self.keypairs[i].sign(payload, &self.dst))
            .collect();
        let sig = aggregate_signatures(&signatures).to_vec();
        let bitmap = encode_bitmap(self.keypairs.len(), signers.iter().copied())
            .expect("signer index within committee");

        HeaderWithSig::new(header, sig, bitmap)
    }
}
