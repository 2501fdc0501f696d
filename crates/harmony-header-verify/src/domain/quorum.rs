//! # Quorum Rules
//!
//! The two quorum rules of the source chain:
//! - **Uniform vote** (plain epochs): more than two thirds of members by count
//! - **Stake weighted** (extended epochs): more than two thirds of voting power
//!
//! A rule is built fresh for every verification and bound to one committee
//! shape; a mask of a different size never satisfies it.

use super::entities::Committee;
use super::errors::QuorumSetupReason;
use super::mask::ParticipationMask;
use super::payload::QuorumMode;

/// Minimum signer count for a two-thirds majority of `committee_size`.
///
/// Equals `floor(2n / 3) + 1`.
pub fn two_thirds_signers_count(committee_size: usize) -> usize {
    committee_size.saturating_mul(2) / 3 + 1
}

/// Smallest `s` with `3 * s > 2 * total`, computed without overflow.
pub fn two_thirds_voting_power(total: u128) -> u128 {
    let (q, r) = (total / 3, total % 3);
    2 * q + (2 * r) / 3 + 1
}

/// Quorum predicate for one epoch and committee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuorumRule {
    UniformVote {
        committee_size: usize,
        threshold: usize,
    },
    StakeWeighted {
        voting_power: Vec<u128>,
        total_power: u128,
        required_power: u128,
    },
}

impl QuorumRule {
    /// Rule for `committee` under `mode`.
    pub fn for_committee(committee: &Committee, mode: QuorumMode) -> Result<Self, QuorumSetupReason> {
        match mode {
            QuorumMode::Plain => Self::uniform(committee.len()),
            QuorumMode::Extended => {
                Self::stake_weighted(committee.members().iter().map(|m| m.voting_power).collect())
            }
        }
    }

    pub fn uniform(committee_size: usize) -> Result<Self, QuorumSetupReason> {
        if committee_size == 0 {
            return Err(QuorumSetupReason::EmptyCommittee);
        }
        Ok(Self::UniformVote {
            committee_size,
            threshold: two_thirds_signers_count(committee_size),
        })
    }

    pub fn stake_weighted(voting_power: Vec<u128>) -> Result<Self, QuorumSetupReason> {
        if voting_power.is_empty() {
            return Err(QuorumSetupReason::EmptyCommittee);
        }

        let total_power = voting_power
            .iter()
            .try_fold(0u128, |acc, p| acc.checked_add(*p))
            .ok_or(QuorumSetupReason::VotingPowerOverflow)?;
        if total_power == 0 {
            return Err(QuorumSetupReason::ZeroVotingPower);
        }

        Ok(Self::StakeWeighted {
            voting_power,
            total_power,
            required_power: two_thirds_voting_power(total_power),
        })
    }

    /// Committee size this rule was built for
    pub fn committee_size(&self) -> usize {
        match self {
            Self::UniformVote { committee_size, .. } => *committee_size,
            Self::StakeWeighted { voting_power, .. } => voting_power.len(),
        }
    }

    /// Voting power behind the mask's signers (signer count for uniform rules).
    pub fn signed_weight(&self, mask: &ParticipationMask) -> u128 {
        match self {
            Self::UniformVote { .. } => mask.count_enabled() as u128,
            Self::StakeWeighted { voting_power, .. } => mask
                .participants()
                .filter_map(|i| voting_power.get(i))
                .fold(0u128, |acc, p| acc.saturating_add(*p)),
        }
    }

    /// Weight the mask must reach (signer count for uniform rules).
    pub fn required_weight(&self) -> u128 {
        match self {
            Self::UniformVote { threshold, .. } => *threshold as u128,
            Self::StakeWeighted { required_power, .. } => *required_power,
        }
    }

    pub fn is_quorum_achieved(&self, mask: &ParticipationMask) -> bool {
        if mask.len() != self.committee_size() {
            return false;
        }
        self.signed_weight(mask) >= self.required_weight()
    }
}
