//! # Adapters Layer
//!
//! Default implementations of the outbound ports.

pub mod blst_verifier;
pub mod committee_keys;
pub mod epoch_schedule;
pub mod quorum_factory;

pub use blst_verifier::BlstAggregateVerifier;
pub use committee_keys::StoredCommitteeKeys;
pub use epoch_schedule::StakingEpochSchedule;
pub use quorum_factory::CommitteeQuorumFactory;
