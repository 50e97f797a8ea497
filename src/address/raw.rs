use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EncodingError;

/// `workchain:account_hash`, as produced by the wallet oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddress {
    pub workchain: i8,
    #[serde(with = "hex_32")]
    pub account_hash: [u8; 32],
}

impl RawAddress {
    pub const fn new(workchain: i8, account_hash: [u8; 32]) -> Self {
        Self {
            workchain,
            account_hash,
        }
    }
}

impl fmt::Display for RawAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.workchain, hex::encode(self.account_hash))
    }
}

impl FromStr for RawAddress {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || EncodingError::InvalidRawAddress(s.to_string());
        let (wc, hash) = s.split_once(':').ok_or_else(bad)?;
        let workchain: i8 = wc.parse().map_err(|_| bad())?;
        let bytes = hex::decode(hash).map_err(|_| bad())?;
        let account_hash: [u8; 32] = bytes.try_into().map_err(|_| bad())?;
        Ok(Self::new(workchain, account_hash))
    }
}

mod hex_32 {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(v: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(v))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(d)?;
        let bytes = hex::decode(&s).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|v: Vec<u8>| D::Error::custom(format!("expected 32 bytes, got {}", v.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse() {
        let raw = RawAddress::new(-1, [0xab; 32]);
        let text = raw.to_string();
        assert_eq!(text, format!("-1:{}", "ab".repeat(32)));
        assert_eq!(text.parse::<RawAddress>().unwrap(), raw);
    }

    #[test]
    fn parse_rejects_garbage() {
        let non_numeric = format!("x:{}", "00".repeat(32));
        for bad in ["", "0", "0:abcd", "300:00", non_numeric.as_str()] {
            assert!(bad.parse::<RawAddress>().is_err(), "{bad}");
        }
    }

    #[test]
    fn serde_uses_hex() {
        let raw = RawAddress::new(0, [1; 32]);
        let json = serde_json::to_value(raw).unwrap();
        assert_eq!(json["accountHash"], "01".repeat(32));
        let back: RawAddress = serde_json::from_value(json).unwrap();
        assert_eq!(back, raw);
    }
}
