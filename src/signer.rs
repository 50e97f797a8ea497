//! Signer capability description: which curve, hash and signature format a
//! chain expects its keys to be derived with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use tiny_keccak::{Hasher, Keccak};

use crate::errors::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    Ed25519,
    Secp256k1,
}

impl Curve {
    /// Bytes of digest the curve's keypair-from-seed step consumes.
    pub const fn seed_len(self) -> usize {
        32
    }

    pub const fn public_key_len(self) -> usize {
        match self {
            Curve::Ed25519 => 32,
            Curve::Secp256k1 => 33, // compressed SEC1
        }
    }

    fn supports_format(self, format: SignatureFormat) -> bool {
        match self {
            Curve::Ed25519 => matches!(format, SignatureFormat::Rs),
            Curve::Secp256k1 => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashFunction {
    Sha256,
    Sha512,
    Keccak256,
}

impl HashFunction {
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            HashFunction::Sha256 => Sha256::digest(data).to_vec(),
            HashFunction::Sha512 => Sha512::digest(data).to_vec(),
            HashFunction::Keccak256 => keccak256(data).to_vec(),
        }
    }

    pub const fn output_len(self) -> usize {
        match self {
            HashFunction::Sha256 | HashFunction::Keccak256 => 32,
            HashFunction::Sha512 => 64,
        }
    }
}

pub(crate) fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut k = Keccak::v256();
    k.update(data);
    let mut out = [0u8; 32];
    k.finalize(&mut out);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureFormat {
    /// r || s
    Rs,
    /// r || s || v (recoverable)
    Rsv,
    Der,
}

macro_rules! display_from_serde_names {
    ($($ty:ty => { $($variant:path => $name:literal),+ $(,)? }),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(match self { $($variant => $name),+ })
                }
            }

            impl FromStr for $ty {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    match s.to_ascii_lowercase().as_str() {
                        $($name => Ok($variant),)+
                        other => Err(format!("unknown {}: {other}", stringify!($ty))),
                    }
                }
            }
        )+
    };
}

display_from_serde_names! {
    Curve => { Curve::Ed25519 => "ed25519", Curve::Secp256k1 => "secp256k1" },
    HashFunction => {
        HashFunction::Sha256 => "sha256",
        HashFunction::Sha512 => "sha512",
        HashFunction::Keccak256 => "keccak256",
    },
    SignatureFormat => {
        SignatureFormat::Rs => "rs",
        SignatureFormat::Rsv => "rsv",
        SignatureFormat::Der => "der",
    },
}

/// How one chain expects keys to be derived. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerSpec {
    pub curve: Curve,
    pub hash_function: HashFunction,
    pub signature_format: SignatureFormat,
    pub coin_type: String,
}

impl SignerSpec {
    pub fn new(
        curve: Curve,
        hash_function: HashFunction,
        signature_format: SignatureFormat,
        coin_type: impl Into<String>,
    ) -> Self {
        Self {
            curve,
            hash_function,
            signature_format,
            coin_type: coin_type.into(),
        }
    }

    /// TON: Ed25519 over SHA-256 of the seed, SLIP-44 coin type 607.
    pub fn ton() -> Self {
        Self::new(Curve::Ed25519, HashFunction::Sha256, SignatureFormat::Rs, "607")
    }

    /// Ethereum: secp256k1 over Keccak-256 of the seed, SLIP-44 coin type 60.
    pub fn ethereum() -> Self {
        Self::new(Curve::Secp256k1, HashFunction::Keccak256, SignatureFormat::Rsv, "60")
    }

    /// Rejects combinations the curve cannot serve, before any crypto runs.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.curve.supports_format(self.signature_format) {
            return Err(ConfigurationError::UnsupportedSignatureFormat {
                curve: self.curve,
                format: self.signature_format,
            });
        }
        if self.hash_function.output_len() < self.curve.seed_len() {
            return Err(ConfigurationError::UnsupportedHash {
                curve: self.curve,
                hash: self.hash_function,
            });
        }
        if self.coin_type.is_empty() || !self.coin_type.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigurationError::InvalidCoinType(self.coin_type.clone()));
        }
        Ok(())
    }
}
