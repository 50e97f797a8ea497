//! User-friendly TON address form:
//! base64(tag ‖ workchain ‖ account_hash ‖ crc16_be(tag ‖ workchain ‖ account_hash)).

use std::fmt;

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::crc16::crc16_xmodem;
use super::raw::RawAddress;
use crate::errors::EncodingError;

/// tag + workchain + hash + crc
pub const ADDRESS_LEN: usize = 36;
/// Base64 length of [`ADDRESS_LEN`] bytes. No padding is ever needed.
pub const ADDRESS_TEXT_LEN: usize = 48;

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TAG_TEST_ONLY: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressFlags {
    pub bounceable: bool,
    pub testnet: bool,
}

impl AddressFlags {
    pub const fn new(bounceable: bool, testnet: bool) -> Self {
        Self {
            bounceable,
            testnet,
        }
    }

    pub const fn tag(self) -> u8 {
        let base = if self.bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        };
        if self.testnet {
            base | TAG_TEST_ONLY
        } else {
            base
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self, EncodingError> {
        let testnet = tag & TAG_TEST_ONLY != 0;
        match tag & !TAG_TEST_ONLY {
            TAG_BOUNCEABLE => Ok(Self::new(true, testnet)),
            TAG_NON_BOUNCEABLE => Ok(Self::new(false, testnet)),
            _ => Err(EncodingError::UnknownTag(tag)),
        }
    }
}

impl Default for AddressFlags {
    fn default() -> Self {
        Self::new(true, false)
    }
}

/// Which base64 alphabet the text form uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alphabet {
    /// `-` and `_` in place of `+` and `/`
    #[default]
    UrlSafe,
    Standard,
}

impl Alphabet {
    fn engine(self) -> &'static base64::engine::GeneralPurpose {
        match self {
            Alphabet::UrlSafe => &URL_SAFE,
            Alphabet::Standard => &STANDARD,
        }
    }

    /// Standard-only characters pick the standard alphabet; anything else is
    /// read as URL-safe.
    fn detect(text: &str) -> Self {
        if text.contains(['+', '/']) {
            Alphabet::Standard
        } else {
            Alphabet::UrlSafe
        }
    }
}

/// Human-transferable address text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedAddress(String);

impl EncodedAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncodedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedAddress {
    pub raw: RawAddress,
    pub flags: AddressFlags,
    pub alphabet: Alphabet,
}

pub fn to_bytes(raw: &RawAddress, flags: AddressFlags) -> [u8; ADDRESS_LEN] {
    let mut out = [0u8; ADDRESS_LEN];
    out[0] = flags.tag();
    out[1] = raw.workchain as u8;
    out[2..34].copy_from_slice(&raw.account_hash);
    let crc = crc16_xmodem(&out[..34]);
    out[34..].copy_from_slice(&crc.to_be_bytes());
    out
}

/// Total: any raw address and flag combination encodes.
pub fn encode_raw(raw: &RawAddress, flags: AddressFlags, alphabet: Alphabet) -> EncodedAddress {
    EncodedAddress(alphabet.engine().encode(to_bytes(raw, flags)))
}

pub fn decode(text: &str) -> Result<DecodedAddress, EncodingError> {
    let alphabet = Alphabet::detect(text);
    let bytes = alphabet
        .engine()
        .decode(text)
        .map_err(|e| EncodingError::BadBase64(e.to_string()))?;
    let mut decoded = decode_bytes(&bytes)?;
    decoded.alphabet = alphabet;
    Ok(decoded)
}

/// Checks length, then checksum, then tag.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedAddress, EncodingError> {
    if bytes.len() != ADDRESS_LEN {
        return Err(EncodingError::BadLength {
            expected: ADDRESS_LEN,
            actual: bytes.len(),
        });
    }
    let expected = crc16_xmodem(&bytes[..34]);
    let found = u16::from_be_bytes([bytes[34], bytes[35]]);
    if expected != found {
        return Err(EncodingError::BadChecksum { expected, found });
    }
    let flags = AddressFlags::from_tag(bytes[0])?;
    let mut account_hash = [0u8; 32];
    account_hash.copy_from_slice(&bytes[2..34]);
    Ok(DecodedAddress {
        raw: RawAddress::new(bytes[1] as i8, account_hash),
        flags,
        alphabet: Alphabet::default(),
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn sample() -> RawAddress {
        "0:6f9e1f6b5a6077aadd040cb5e2c33fb6c15b497a4724d074fe19f29e81d8c640"
            .parse()
            .unwrap()
    }

    #[test]
    fn known_vectors() {
        let raw = sample();
        let enc = |b, t| encode_raw(&raw, AddressFlags::new(b, t), Alphabet::UrlSafe).into_string();
        assert_eq!(enc(true, false), "EQBvnh9rWmB3qt0EDLXiwz-2wVtJekck0HT-GfKegdjGQJXJ");
        assert_eq!(enc(false, false), "UQBvnh9rWmB3qt0EDLXiwz-2wVtJekck0HT-GfKegdjGQMgM");
        assert_eq!(enc(true, true), "kQBvnh9rWmB3qt0EDLXiwz-2wVtJekck0HT-GfKegdjGQC5D");
        assert!(enc(false, true).starts_with("0Q"));
    }

    #[test]
    fn masterchain_vector() {
        let raw: RawAddress = "-1:5502c2a7e19ba3ec9c6984ca97481562153f1556d4d31695c442626630db9549"
            .parse()
            .unwrap();
        let text = encode_raw(&raw, AddressFlags::default(), Alphabet::UrlSafe);
        assert_eq!(text.as_str(), "Ef9VAsKn4Zuj7JxphMqXSBViFT8VVtTTFpXEQmJmMNuVSaGf");
        assert_eq!(decode(text.as_str()).unwrap().raw, raw);
    }

    #[test]
    fn standard_alphabet_only_differs_in_two_symbols() {
        let raw = sample();
        let url = encode_raw(&raw, AddressFlags::default(), Alphabet::UrlSafe);
        let std = encode_raw(&raw, AddressFlags::default(), Alphabet::Standard);
        assert_eq!(url.as_str().replace('-', "+").replace('_', "/"), std.as_str());

        let back = decode(std.as_str()).unwrap();
        assert_eq!(back.alphabet, Alphabet::Standard);
        assert_eq!(back.raw, raw);
    }

    #[test]
    fn bounceable_flag_changes_only_tag_and_checksum_characters() {
        let raw = sample();
        let b = encode_raw(&raw, AddressFlags::new(true, false), Alphabet::UrlSafe);
        let n = encode_raw(&raw, AddressFlags::new(false, false), Alphabet::UrlSafe);
        assert_ne!(b, n);
        assert_eq!(b.as_str().len(), ADDRESS_TEXT_LEN);
        // chars 4..44 carry only account hash bytes 1..31
        assert_eq!(b.as_str()[4..44], n.as_str()[4..44]);
        assert_ne!(b.as_str()[..4], n.as_str()[..4]);

        let db = decode(b.as_str()).unwrap();
        let dn = decode(n.as_str()).unwrap();
        assert_eq!(db.raw, raw);
        assert_eq!(dn.raw, raw);
        assert!(db.flags.bounceable);
        assert!(!dn.flags.bounceable);
    }

    #[test]
    fn every_single_byte_mutation_fails_checksum() {
        let bytes = to_bytes(&sample(), AddressFlags::default());
        for i in 0..ADDRESS_LEN {
            for delta in 1..=255u8 {
                let mut m = bytes;
                m[i] ^= delta;
                let text = URL_SAFE.encode(m);
                assert!(
                    matches!(decode(&text), Err(EncodingError::BadChecksum { .. })),
                    "byte {i} ^ {delta:#04x} was not rejected by checksum"
                );
            }
        }
    }

    #[test]
    fn every_single_character_substitution_is_rejected() {
        const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
        let text = encode_raw(&sample(), AddressFlags::default(), Alphabet::UrlSafe).into_string();
        for (i, orig) in text.char_indices() {
            for c in ALPHABET.chars().filter(|c| *c != orig) {
                let mut m = text.clone();
                m.replace_range(i..i + 1, &c.to_string());
                assert!(
                    matches!(decode(&m), Err(EncodingError::BadChecksum { .. })),
                    "char {i} -> {c} accepted"
                );
            }
        }
    }

    #[test]
    fn wrong_length_and_garbage() {
        let short = URL_SAFE.encode([0x11u8; 33]);
        assert_eq!(
            decode(&short),
            Err(EncodingError::BadLength { expected: 36, actual: 33 })
        );
        assert!(matches!(decode("not base64 at all!"), Err(EncodingError::BadBase64(_))));
    }

    #[test]
    fn unknown_tag_with_valid_checksum() {
        let mut bytes = to_bytes(&sample(), AddressFlags::default());
        bytes[0] = 0x22;
        let crc = crc16_xmodem(&bytes[..34]);
        bytes[34..].copy_from_slice(&crc.to_be_bytes());
        assert_eq!(decode_bytes(&bytes), Err(EncodingError::UnknownTag(0x22)));
    }

    proptest! {
        #[test]
        fn round_trip(
            workchain in any::<i8>(),
            hash in any::<[u8; 32]>(),
            bounceable in any::<bool>(),
            testnet in any::<bool>(),
            url_safe in any::<bool>(),
        ) {
            let raw = RawAddress::new(workchain, hash);
            let flags = AddressFlags::new(bounceable, testnet);
            let alphabet = if url_safe { Alphabet::UrlSafe } else { Alphabet::Standard };
            let text = encode_raw(&raw, flags, alphabet);
            prop_assert_eq!(text.as_str().len(), ADDRESS_TEXT_LEN);
            let back = decode(text.as_str()).unwrap();
            prop_assert_eq!(back.raw, raw);
            prop_assert_eq!(back.flags, flags);
        }
    }
}
