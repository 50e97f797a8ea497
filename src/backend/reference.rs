//! Second, independently written pipeline used as the parity reference.
//!
//! It shares no derivation or encoding code with the native path: digests come
//! straight from `sha2` / `ethers-core`, Ed25519 keys from `ed25519-compact`,
//! secp256k1 keys from libsecp256k1, EIP-55 from `ethers-core`. The wallet
//! StateInit hash is laid out byte by byte instead of going through the cell
//! builder, and the friendly address is built by hand with a table CRC and a
//! standard base64 string patched to the URL-safe alphabet.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ethers_core::types::Address;
use ethers_core::utils::{keccak256, to_checksum};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

use super::Backend;
use crate::address::crc16::crc16_xmodem_table;
use crate::address::{Alphabet, AddressScheme, WalletVersion};
use crate::errors::{BackendError, DerivationError, EncodingError};
use crate::seed::SeedMaterial;
use crate::signer::{Curve, HashFunction, SignerSpec};

const V3R2_CODE: ([u8; 32], u16) = (
    [
        0x84, 0xda, 0xfa, 0x44, 0x9f, 0x98, 0xa6, 0x98, 0x77, 0x89, 0xba, 0x23, 0x23, 0x58, 0x07,
        0x2b, 0xc0, 0xf7, 0x6d, 0xc4, 0x52, 0x40, 0x02, 0xa5, 0xd0, 0x91, 0x8b, 0x9a, 0x75, 0xd2,
        0xd5, 0x99,
    ],
    0,
);

const V4R2_CODE: ([u8; 32], u16) = (
    [
        0xfe, 0xb5, 0xff, 0x68, 0x20, 0xe2, 0xff, 0x0d, 0x94, 0x83, 0xe7, 0xe0, 0xd6, 0x2c, 0x81,
        0x7d, 0x84, 0x67, 0x89, 0xfb, 0x4a, 0xe5, 0x80, 0xc8, 0x78, 0x86, 0x6d, 0x95, 0x9d, 0xab,
        0xd5, 0xc0,
    ],
    7,
);

pub struct ReferenceBackend {
    name: String,
    scheme: AddressScheme,
}

impl ReferenceBackend {
    pub fn new(name: impl Into<String>, scheme: AddressScheme) -> Self {
        Self {
            name: name.into(),
            scheme,
        }
    }

    fn public_key(&self, seed: &SeedMaterial, spec: &SignerSpec) -> Result<Vec<u8>, DerivationError> {
        spec.validate()?;
        if seed.is_empty() {
            return Err(DerivationError::EmptySeed);
        }
        let digest: Zeroizing<Vec<u8>> = Zeroizing::new(match spec.hash_function {
            HashFunction::Sha256 => Sha256::digest(seed.as_bytes()).to_vec(),
            HashFunction::Sha512 => Sha512::digest(seed.as_bytes()).to_vec(),
            HashFunction::Keccak256 => keccak256(seed.as_bytes()).to_vec(),
        });
        let secret: Zeroizing<[u8; 32]> = Zeroizing::new(
            digest
                .get(..32)
                .and_then(|s| s.try_into().ok())
                .ok_or(DerivationError::InsufficientEntropy {
                    required: 32,
                    actual: digest.len(),
                })?,
        );

        match spec.curve {
            Curve::Ed25519 => {
                // ed25519-compact panics on an all-zero seed
                if secret.iter().all(|b| *b == 0) {
                    return Err(DerivationError::InvalidScalar {
                        curve: Curve::Ed25519,
                        reason: "all-zero seed".into(),
                    });
                }
                let kp = ed25519_compact::KeyPair::from_seed(ed25519_compact::Seed::new(*secret));
                Ok(kp.pk.to_vec())
            }
            Curve::Secp256k1 => {
                let sk = SecretKey::from_slice(secret.as_ref()).map_err(|e| {
                    DerivationError::InvalidScalar {
                        curve: Curve::Secp256k1,
                        reason: e.to_string(),
                    }
                })?;
                let pk = PublicKey::from_secret_key(&Secp256k1::signing_only(), &sk);
                Ok(pk.serialize().to_vec())
            }
        }
    }
}

/// Representation hash of the wallet's StateInit, hashed directly from the
/// serialized cell bytes.
fn state_init_hash(version: WalletVersion, public_key: &[u8; 32], workchain: i8) -> [u8; 32] {
    let wallet_id = (698_983_191i64 + i64::from(workchain)) as u32;

    // seqno(32) wallet_id(32) public_key(256), plus one dict bit on v4
    let mut data = Sha256::new();
    let (code_hash, code_depth) = match version {
        WalletVersion::V3R2 => {
            data.update([0x00, 80]);
            V3R2_CODE
        }
        WalletVersion::V4R2 => {
            data.update([0x00, 81]);
            V4R2_CODE
        }
    };
    data.update(0u32.to_be_bytes());
    data.update(wallet_id.to_be_bytes());
    data.update(public_key);
    if version == WalletVersion::V4R2 {
        // a zero bit followed by the completion tag
        data.update([0x40]);
    }
    let data_hash = data.finalize();

    // two refs, five bits `00110` plus completion tag
    let mut state_init = Sha256::new();
    state_init.update([0x02, 0x01, 0x34]);
    state_init.update(code_depth.to_be_bytes());
    state_init.update(0u16.to_be_bytes());
    state_init.update(code_hash);
    state_init.update(data_hash);
    state_init.finalize().into()
}

fn ton_friendly(tag: u8, workchain: i8, hash: &[u8; 32], alphabet: Alphabet) -> String {
    let mut bytes = Vec::with_capacity(36);
    bytes.push(tag);
    bytes.push(workchain as u8);
    bytes.extend_from_slice(hash);
    let crc = crc16_xmodem_table(&bytes);
    bytes.push((crc >> 8) as u8);
    bytes.push((crc & 0xff) as u8);

    let text = STANDARD.encode(&bytes);
    match alphabet {
        Alphabet::Standard => text,
        Alphabet::UrlSafe => text.replace('+', "-").replace('/', "_"),
    }
}

fn evm_checksummed(public_key: &[u8]) -> Result<String, EncodingError> {
    let pk = PublicKey::from_slice(public_key).map_err(|_| EncodingError::UnsupportedPublicKey {
        expected: 33,
        actual: public_key.len(),
    })?;
    let uncompressed = pk.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    Ok(to_checksum(&Address::from_slice(&hash[12..]), None))
}

impl Backend for ReferenceBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn derive_public_key(
        &self,
        seed: &SeedMaterial,
        spec: &SignerSpec,
    ) -> Result<Vec<u8>, BackendError> {
        Ok(self.public_key(seed, spec)?)
    }

    fn derive_address(&self, seed: &SeedMaterial, spec: &SignerSpec) -> Result<String, BackendError> {
        let public_key = self.public_key(seed, spec)?;
        match &self.scheme {
            AddressScheme::Ton(params) => {
                let key: &[u8; 32] = public_key.as_slice().try_into().map_err(|_| {
                    EncodingError::UnsupportedPublicKey {
                        expected: 32,
                        actual: public_key.len(),
                    }
                })?;
                let hash = state_init_hash(params.wallet_version, key, params.workchain);
                let tag = match (params.bounceable, params.testnet) {
                    (true, false) => 0x11,
                    (false, false) => 0x51,
                    (true, true) => 0x91,
                    (false, true) => 0xd1,
                };
                Ok(ton_friendly(tag, params.workchain, &hash, params.alphabet))
            }
            AddressScheme::Evm => Ok(evm_checksummed(&public_key)?),
        }
    }
}
