//! # Harmony Header Verification
//!
//! Decides whether a relayed Harmony block header was endorsed by a quorum of
//! its epoch committee, using the BLS aggregate signature and participation
//! bitmap carried with the header.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): BLS wrappers, participation mask, commit
//!   payload layout, quorum rules
//! - **Ports Layer** (`ports/`): `HeaderVerificationApi` inbound, committee,
//!   epoch, quorum and signature collaborators outbound
//! - **Adapters Layer** (`adapters/`): Default outbound implementations
//! - **Service Layer** (`service.rs`): Runs the verification gates in order
//!
//! ## Security Notes
//!
//! - **Quorum before pairing**: Under-signed headers are rejected without any
//!   pairing work
//! - **Strict encodings**: Signatures and bitmaps must have the exact length;
//!   bits beyond the committee size are rejected
//! - **Stateless**: Every call is independent and safe to run concurrently

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export public API
pub use config::HeaderVerificationConfig;
pub use domain::{
    construct_commit_payload, decode_sig_bitmap, AggregateSignature, BlockHeader, BlsPublicKey,
    Committee, CommitteeMember, Epoch, HeaderEndorsement, HeaderVerificationError, HeaderWithSig,
    ParticipationMask, QuorumMode, VerificationResult,
};
pub use ports::inbound::{BatchVerificationResult, HeaderVerificationApi};
pub use service::{DefaultHeaderVerificationService, HeaderVerificationService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
