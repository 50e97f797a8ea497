//! Seed -> keypair derivation.
//!
//! The seed is hashed with the spec's hash function, the digest is cut to the
//! curve's seed length, and the curve's standard keypair-from-seed step runs on
//! the result. Nothing here logs or keeps seed or secret bytes.

use std::fmt;

use ed25519_dalek::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::DerivationError;
use crate::seed::SeedMaterial;
use crate::signer::{Curve, SignerSpec};

/// Derived keypair. The secret half is wiped on drop and never serialized.
#[derive(PartialEq, Eq)]
pub struct KeyPair {
    curve: Curve,
    public_key: Vec<u8>,
    private_key: [u8; 32],
}

impl KeyPair {
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Ed25519: 32 bytes. secp256k1: 33-byte compressed SEC1.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(&self.public_key)
    }

    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("curve", &self.curve)
            .field("public_key", &self.public_key_hex())
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// `derive(seed, spec)`: pure, deterministic seed -> keypair.
pub fn derive(seed: &SeedMaterial, spec: &SignerSpec) -> Result<KeyPair, DerivationError> {
    spec.validate()?;
    if seed.is_empty() {
        return Err(DerivationError::EmptySeed);
    }
    let digest = Zeroizing::new(spec.hash_function.digest(seed.as_bytes()));
    let curve_seed = curve_seed(&digest, spec.curve)?;
    keypair_from_curve_seed(spec.curve, &curve_seed)
}

/// Leading `curve.seed_len()` bytes of the digest.
pub fn curve_seed(digest: &[u8], curve: Curve) -> Result<Zeroizing<[u8; 32]>, DerivationError> {
    let need = curve.seed_len();
    if digest.len() < need {
        return Err(DerivationError::InsufficientEntropy {
            required: need,
            actual: digest.len(),
        });
    }
    let mut out = Zeroizing::new([0u8; 32]);
    out.copy_from_slice(&digest[..need]);
    Ok(out)
}

pub fn keypair_from_curve_seed(curve: Curve, seed: &[u8; 32]) -> Result<KeyPair, DerivationError> {
    match curve {
        Curve::Ed25519 => {
            // RFC 8032 / NaCl sign.keyPair.fromSeed
            let sk = SigningKey::from_bytes(seed);
            Ok(KeyPair {
                curve,
                public_key: sk.verifying_key().to_bytes().to_vec(),
                private_key: sk.to_bytes(),
            })
        }
        Curve::Secp256k1 => {
            let sk = k256::SecretKey::from_slice(seed).map_err(|e| DerivationError::InvalidScalar {
                curve,
                reason: e.to_string(),
            })?;
            let compressed = sk.public_key().to_encoded_point(true);
            let scalar = Zeroizing::new(sk.to_bytes());
            let mut private_key = [0u8; 32];
            private_key.copy_from_slice(&scalar);
            Ok(KeyPair {
                curve,
                public_key: compressed.as_bytes().to_vec(),
                private_key,
            })
        }
    }
}
