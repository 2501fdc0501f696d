//! # BLS12-381 Primitives
//!
//! Thin wrappers over blst's `min_pk` variant, matching the source chain's
//! key and signature sizes:
//! - Public keys are on G1 (48 bytes compressed)
//! - Signatures are on G2 (96 bytes compressed)
//!
//! Nothing here does curve arithmetic itself; the wrappers only pin down
//! which blst checks run at each boundary.

use super::entities::{SerializedPublicKey, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};
use super::errors::SignatureDecodeError;
use blst::min_pk::{AggregatePublicKey, PublicKey, Signature};
use blst::BLST_ERROR;

/// Default domain separation tag for commit signatures
pub const DEFAULT_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Validated committee public key.
#[derive(Clone, Debug)]
pub struct BlsPublicKey(PublicKey);

impl PartialEq for BlsPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for BlsPublicKey {}

impl BlsPublicKey {
    /// Decode a compressed key, rejecting infinity and non-subgroup points.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BLST_ERROR> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(BLST_ERROR::BLST_BAD_ENCODING);
        }
        PublicKey::key_validate(bytes).map(BlsPublicKey)
    }

    /// Serialize to 48-byte compressed form
    pub fn to_bytes(&self) -> SerializedPublicKey {
        self.0.to_bytes()
    }

    /// Sum of the given keys. Fails on an empty slice.
    pub fn aggregate(keys: &[&BlsPublicKey]) -> Result<Self, BLST_ERROR> {
        let refs: Vec<&PublicKey> = keys.iter().map(|k| &k.0).collect();
        // Keys were validated on decode.
        AggregatePublicKey::aggregate(&refs, false).map(|apk| BlsPublicKey(apk.to_public_key()))
    }

    pub(crate) fn as_blst(&self) -> &PublicKey {
        &self.0
    }
}

impl From<PublicKey> for BlsPublicKey {
    fn from(pk: PublicKey) -> Self {
        Self(pk)
    }
}

/// Decoded aggregate signature, already subgroup-checked.
#[derive(Clone, Debug)]
pub struct AggregateSignature(Signature);

impl PartialEq for AggregateSignature {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for AggregateSignature {}

impl AggregateSignature {
    /// Deserialize a compressed G2 signature.
    ///
    /// # Errors
    /// * `InvalidLength` unless exactly 96 bytes are given
    /// * `Infinity` for the identity point
    /// * `InvalidEncoding` for anything blst cannot decompress or that lies
    ///   outside the prime-order subgroup
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureDecodeError> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(SignatureDecodeError::InvalidLength {
                expected: SIGNATURE_SIZE,
                actual: bytes.len(),
            });
        }

        Signature::sig_validate(bytes, true)
            .map(AggregateSignature)
            .map_err(|err| match err {
                BLST_ERROR::BLST_PK_IS_INFINITY => SignatureDecodeError::Infinity,
                _ => SignatureDecodeError::InvalidEncoding,
            })
    }

    /// Serialize to 96-byte compressed form
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        self.0.to_bytes()
    }

    /// Pairing check of `payload` against an (aggregated) public key.
    pub fn verify_hash(&self, public_key: &BlsPublicKey, payload: &[u8], dst: &[u8]) -> bool {
        // Group checks already happened when both sides were decoded.
        let result = self
            .0
            .verify(false, payload, dst, &[], public_key.as_blst(), false);
        result == BLST_ERROR::BLST_SUCCESS
    }
}

/// Key generation and signing for tests and benchmarks.
///
/// The relay never signs; these exist so test suites can build committees
/// and endorsements.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers {
    use super::*;
    use blst::min_pk::{AggregateSignature as BlstAggregate, SecretKey};
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    /// BLS key pair for signing commit payloads
    pub struct BlsKeypair {
        secret: SecretKey,
        public: BlsPublicKey,
    }

    impl BlsKeypair {
        /// Generate a new random key pair
        pub fn generate() -> Self {
            let mut ikm = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut ikm);
            Self::from_ikm(&ikm)
        }

        /// Reproducible key pair for fixtures
        pub fn from_seed(seed: u64) -> Self {
            let mut ikm = [0u8; 32];
            StdRng::seed_from_u64(seed).fill_bytes(&mut ikm);
            Self::from_ikm(&ikm)
        }

        fn from_ikm(ikm: &[u8; 32]) -> Self {
            let secret = SecretKey::key_gen(ikm, &[]).expect("32-byte IKM is always valid");
            let public = BlsPublicKey(secret.sk_to_pk());
            Self { secret, public }
        }

        pub fn public_key(&self) -> BlsPublicKey {
            self.public.clone()
        }

        pub fn public_key_bytes(&self) -> SerializedPublicKey {
            self.public.to_bytes()
        }

        /// Sign a message, returning the raw compressed signature
        pub fn sign(&self, message: &[u8], dst: &[u8]) -> [u8; SIGNATURE_SIZE] {
            self.secret.sign(message, dst, &[]).to_bytes()
        }
    }

    /// Aggregate raw signatures into the bytes a relayer would submit.
    pub fn aggregate_signatures(signatures: &[[u8; SIGNATURE_SIZE]]) -> [u8; SIGNATURE_SIZE] {
        let parsed: Vec<Signature> = signatures
            .iter()
            .map(|s| Signature::from_bytes(s).expect("signature produced by BlsKeypair::sign"))
            .collect();
        let refs: Vec<&Signature> = parsed.iter().collect();
        BlstAggregate::aggregate(&refs, false)
            .expect("non-empty signature list")
            .to_signature()
            .to_bytes()
    }
}
