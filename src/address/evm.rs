//! EVM account addresses from secp256k1 public keys, EIP-55 checksummed.

use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::errors::EncodingError;
use crate::signer::keccak256;

/// keccak256(X ‖ Y)[12..] of the uncompressed point.
/// Accepts compressed (33), uncompressed (65) or bare (64) public keys.
pub fn address_bytes(public_key: &[u8]) -> Result<[u8; 20], EncodingError> {
    let xy: Vec<u8> = match public_key.len() {
        64 => public_key.to_vec(),
        33 | 65 => {
            let pk = k256::PublicKey::from_sec1_bytes(public_key).map_err(|_| {
                EncodingError::UnsupportedPublicKey {
                    expected: 33,
                    actual: public_key.len(),
                }
            })?;
            pk.to_encoded_point(false).as_bytes()[1..].to_vec() // drop 0x04
        }
        n => {
            return Err(EncodingError::UnsupportedPublicKey {
                expected: 33,
                actual: n,
            })
        }
    };
    let hash = keccak256(&xy);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Ok(out)
}

/// EIP-55: uppercase a hex letter when the matching nibble of
/// keccak256(lowercase hex) is >= 8.
pub fn to_checksum_address(addr: &[u8; 20]) -> String {
    let lower = hex::encode(addr);
    let hash = keccak256(lower.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn encode(public_key: &[u8]) -> Result<String, EncodingError> {
    Ok(to_checksum_address(&address_bytes(public_key)?))
}
