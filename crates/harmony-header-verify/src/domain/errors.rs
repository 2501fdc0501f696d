//! # Verification Errors
//!
//! Every rejection a relayed header can receive, tagged with the gate that
//! produced it. Callers branch on [`HeaderVerificationError::category`]
//! instead of matching reason strings.

use super::payload::QuorumMode;
use thiserror::Error;

/// Result type for header verification operations.
pub type VerificationResult<T> = Result<T, HeaderVerificationError>;

/// Ordered gates of the verification pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerificationGate {
    ResolveCommittee,
    Decode,
    BuildQuorum,
    CheckQuorum,
    VerifySignature,
}

/// How the relay should treat a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad bytes from the relayer; reject and flag the source peer
    InputEncoding,
    /// Collaborator state is inconsistent; transient or operator fault
    Configuration,
    /// Under-endorsed header, nothing corrupt about it
    Rejection,
    /// Signature does not match; treat as malicious
    Cryptographic,
}

/// Errors that can occur while verifying a relayed header.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeaderVerificationError {
    /// Committee keys for the epoch could not be produced
    #[error("committee unavailable for epoch {epoch_id}: {reason}")]
    CommitteeUnavailable { epoch_id: u64, reason: String },

    /// Aggregate signature bytes do not decode to a usable G2 point
    #[error("unable to deserialize multi-signature from payload: {0}")]
    MalformedSignature(#[from] SignatureDecodeError),

    /// Mask could not be set up over the committee keys
    #[error("unable to setup mask from payload: {0}")]
    MaskSetupError(#[from] MaskSetupReason),

    /// Bitmap does not fit the committee
    #[error("malformed bitmap: {0}")]
    MalformedBitmap(#[from] BitmapError),

    /// No quorum rule exists for this epoch/committee combination
    #[error("quorum setup failed for epoch {epoch_id}: {reason}")]
    QuorumSetupError {
        epoch_id: u64,
        reason: QuorumSetupReason,
    },

    /// Too few signers for the epoch's quorum rule
    #[error("not enough signature collected: {signers} of {committee_size} signed ({mode:?} quorum)")]
    QuorumNotMet {
        signers: usize,
        committee_size: usize,
        mode: QuorumMode,
    },

    /// Pairing check failed for the reconstructed payload
    #[error("unable to verify aggregated signature for block {block_number}")]
    SignatureInvalid { block_number: u64 },
}

impl HeaderVerificationError {
    /// Gate of the pipeline that produced this error.
    pub fn gate(&self) -> VerificationGate {
        match self {
            Self::CommitteeUnavailable { .. } => VerificationGate::ResolveCommittee,
            Self::MalformedSignature(_) | Self::MaskSetupError(_) | Self::MalformedBitmap(_) => {
                VerificationGate::Decode
            }
            Self::QuorumSetupError { .. } => VerificationGate::BuildQuorum,
            Self::QuorumNotMet { .. } => VerificationGate::CheckQuorum,
            Self::SignatureInvalid { .. } => VerificationGate::VerifySignature,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedSignature(_) | Self::MaskSetupError(_) | Self::MalformedBitmap(_) => {
                ErrorCategory::InputEncoding
            }
            Self::CommitteeUnavailable { .. } | Self::QuorumSetupError { .. } => {
                ErrorCategory::Configuration
            }
            Self::QuorumNotMet { .. } => ErrorCategory::Rejection,
            Self::SignatureInvalid { .. } => ErrorCategory::Cryptographic,
        }
    }
}

/// Why aggregate signature bytes were rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureDecodeError {
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Not a point on the curve, bad compression flags, or outside the subgroup
    #[error("invalid point encoding")]
    InvalidEncoding,

    #[error("point at infinity")]
    Infinity,
}

/// Why a participation mask could not be built over a key set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MaskSetupReason {
    #[error("empty committee")]
    EmptyCommittee,

    #[error("duplicate key at index {index}")]
    DuplicateKey { index: usize },

    #[error("public key aggregation failed")]
    AggregationFailed,
}

/// Why bitmap bytes do not fit a committee.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BitmapError {
    #[error("mismatching bitmap lengths: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("bit {index} set beyond committee size {committee_size}")]
    BitOutOfRange { index: usize, committee_size: usize },
}

/// Why no quorum rule could be built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuorumSetupReason {
    #[error("empty committee")]
    EmptyCommittee,

    #[error("committee has no voting power")]
    ZeroVotingPower,

    #[error("voting power overflow")]
    VotingPowerOverflow,
}
