//! # Domain Layer
//!
//! Pure verification logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod bls;
pub mod entities;
pub mod errors;
pub mod mask;
pub mod payload;
pub mod quorum;

pub use bls::{AggregateSignature, BlsPublicKey, DEFAULT_DST};
pub use entities::*;
pub use errors::*;
pub use mask::{bitmap_len, decode_sig_bitmap, encode_bitmap, ParticipationMask};
pub use payload::{construct_commit_payload, QuorumMode, EXTENDED_PAYLOAD_LEN, PLAIN_PAYLOAD_LEN};
pub use quorum::{two_thirds_signers_count, two_thirds_voting_power, QuorumRule};
