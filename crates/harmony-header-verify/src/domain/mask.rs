//! # Participation Mask & Signature/Bitmap Decoder
//!
//! Binds a relayed bitmap to an ordered committee and aggregates the public
//! keys of exactly the members that signed.
//!
//! ## Bitmap Layout
//!
//! Bit `i` refers to committee member `i` and lives in byte `i / 8` at bit
//! position `i % 8`, least significant bit first. A committee of `n` members
//! always uses `ceil(n / 8)` bytes; the unused high bits of the last byte
//! must be zero.

use super::bls::{AggregateSignature, BlsPublicKey};
use super::errors::{BitmapError, MaskSetupReason, VerificationResult};
use bitvec::prelude::*;
use std::collections::HashSet;

/// Number of bitmap bytes for a committee of `committee_size` members.
pub fn bitmap_len(committee_size: usize) -> usize {
    committee_size.div_ceil(8)
}

/// Which committee members endorsed a header, plus their aggregated key.
#[derive(Clone, Debug)]
pub struct ParticipationMask {
    publics: Vec<BlsPublicKey>,
    bitmap: BitVec<u8, Lsb0>,
    aggregate_public: Option<BlsPublicKey>,
}

impl ParticipationMask {
    /// Create an empty mask (nobody signed) over an ordered key set.
    ///
    /// # Errors
    /// * `EmptyCommittee` if `publics` is empty
    /// * `DuplicateKey` naming the second occurrence of a repeated key
    pub fn new(publics: Vec<BlsPublicKey>) -> Result<Self, MaskSetupReason> {
        if publics.is_empty() {
            return Err(MaskSetupReason::EmptyCommittee);
        }

        let mut seen = HashSet::with_capacity(publics.len());
        for (index, key) in publics.iter().enumerate() {
            if !seen.insert(key.to_bytes()) {
                return Err(MaskSetupReason::DuplicateKey { index });
            }
        }

        let bitmap = bitvec![u8, Lsb0; 0; publics.len()];
        Ok(Self {
            publics,
            bitmap,
            aggregate_public: None,
        })
    }

    /// Replace the participation bits and recompute the aggregated key.
    ///
    /// On error the mask is left unchanged.
    pub fn set_mask(&mut self, bitmap: &[u8]) -> VerificationResult<()> {
        let committee_size = self.publics.len();
        let expected = bitmap_len(committee_size);
        if bitmap.len() != expected {
            return Err(BitmapError::LengthMismatch {
                expected,
                actual: bitmap.len(),
            }
            .into());
        }

        let incoming = BitSlice::<u8, Lsb0>::from_slice(bitmap);
        if let Some(offset) = incoming[committee_size..].first_one() {
            return Err(BitmapError::BitOutOfRange {
                index: committee_size + offset,
                committee_size,
            }
            .into());
        }

        let mut next = bitvec![u8, Lsb0; 0; committee_size];
        for index in incoming[..committee_size].iter_ones() {
            next.set(index, true);
        }

        let enabled: Vec<&BlsPublicKey> = next.iter_ones().map(|i| &self.publics[i]).collect();
        let aggregate_public = if enabled.is_empty() {
            None
        } else {
            Some(
                BlsPublicKey::aggregate(&enabled)
                    .map_err(|_| MaskSetupReason::AggregationFailed)?,
            )
        };

        self.bitmap = next;
        self.aggregate_public = aggregate_public;
        Ok(())
    }

    /// Committee size the mask is bound to
    pub fn len(&self) -> usize {
        self.publics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publics.is_empty()
    }

    /// Number of members that signed
    pub fn count_enabled(&self) -> usize {
        self.bitmap.count_ones()
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        self.bitmap.get(index).map(|b| *b).unwrap_or(false)
    }

    /// Indices of signing members in ascending order
    pub fn participants(&self) -> impl Iterator<Item = usize> + '_ {
        self.bitmap.iter_ones()
    }

    pub fn public_keys(&self) -> &[BlsPublicKey] {
        &self.publics
    }

    /// Sum of the signers' keys, `None` while nobody has signed.
    pub fn aggregate_public(&self) -> Option<&BlsPublicKey> {
        self.aggregate_public.as_ref()
    }

    /// Canonical bitmap bytes for the current participation.
    pub fn to_bitmap(&self) -> Vec<u8> {
        self.bitmap.as_raw_slice().to_vec()
    }
}

/// Decode a relayed aggregate signature and bitmap against a committee.
///
/// Checks run in a fixed order: signature bytes, then mask setup over the
/// keys, then the bitmap itself.
pub fn decode_sig_bitmap(
    sig_bytes: &[u8],
    bitmap: &[u8],
    public_keys: Vec<BlsPublicKey>,
) -> VerificationResult<(AggregateSignature, ParticipationMask)> {
    let aggregate_sig = AggregateSignature::from_bytes(sig_bytes)?;
    let mut mask = ParticipationMask::new(public_keys)?;
    mask.set_mask(bitmap)?;
    Ok((aggregate_sig, mask))
}

/// Encode a participant set as bitmap bytes for a committee.
pub fn encode_bitmap(
    committee_size: usize,
    participants: impl IntoIterator<Item = usize>,
) -> Result<Vec<u8>, BitmapError> {
    let mut bits = bitvec![u8, Lsb0; 0; committee_size];
    for index in participants {
        if index >= committee_size {
            return Err(BitmapError::BitOutOfRange {
                index,
                committee_size,
            });
        }
        bits.set(index, true);
    }
    Ok(bits.into_vec())
}
