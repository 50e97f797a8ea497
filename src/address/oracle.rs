//! Raw account address of a wallet contract, from its public key.
//!
//! The address of a TON wallet is the representation hash of its StateInit
//! cell: `code` and `data` references, where `data` holds the wallet's initial
//! storage (seqno, wallet id, public key).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::boc;
use super::cell::{CellBuilder, CellRef};
use super::raw::RawAddress;
use crate::errors::{ConfigurationError, EncodingError};

/// Default wallet id before the workchain is added.
pub const DEFAULT_WALLET_ID: u32 = 698_983_191;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletVersion {
    #[serde(rename = "v3R2")]
    V3R2,
    #[serde(rename = "v4R2")]
    V4R2,
}

impl WalletVersion {
    pub const ALL: [WalletVersion; 2] = [WalletVersion::V3R2, WalletVersion::V4R2];

    pub fn tag(self) -> &'static str {
        match self {
            WalletVersion::V3R2 => "v3R2",
            WalletVersion::V4R2 => "v4R2",
        }
    }

    /// Published representation hash of the version's code cell.
    pub const fn code_hash(self) -> [u8; 32] {
        match self {
            WalletVersion::V3R2 => V3R2_CODE_HASH,
            WalletVersion::V4R2 => V4R2_CODE_HASH,
        }
    }

    fn data_cell(self, public_key: &[u8; 32], workchain: i8) -> CellRef {
        let wallet_id = DEFAULT_WALLET_ID.wrapping_add_signed(i32::from(workchain));
        let mut b = CellBuilder::new();
        b.store_u32(0) // seqno
            .store_u32(wallet_id)
            .store_bytes(public_key);
        if self == WalletVersion::V4R2 {
            b.store_bit(false); // empty plugin dictionary
        }
        b.build().to_ref()
    }
}

impl fmt::Display for WalletVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for WalletVersion {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v3r2" => Ok(WalletVersion::V3R2),
            "v4r2" => Ok(WalletVersion::V4R2),
            _ => Err(ConfigurationError::UnknownWalletVersion(s.to_string())),
        }
    }
}

const V3R2_CODE_HASH: [u8; 32] =
    hex32("84dafa449f98a6987789ba232358072bc0f76dc4524002a5d0918b9a75d2d599");
const V4R2_CODE_HASH: [u8; 32] =
    hex32("feb5ff6820e2ff0d9483e7e0d62c817d846789fb4ae580c878866d959dabd5c0");

/// Depth of the v4R2 code cell tree.
const V4R2_CODE_DEPTH: u16 = 7;

const fn hex32(s: &str) -> [u8; 32] {
    const fn nibble(c: u8) -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            _ => panic!("bad hex digit"),
        }
    }
    let b = s.as_bytes();
    assert!(b.len() == 64, "expected 64 hex digits");
    let mut out = [0u8; 32];
    let mut i = 0;
    while i < 32 {
        out[i] = (nibble(b[2 * i]) << 4) | nibble(b[2 * i + 1]);
        i += 1;
    }
    out
}

/// Turns (public key, wallet version, workchain) into a raw address.
/// Must be deterministic for fixed inputs.
pub trait RawAddressOracle: Send + Sync {
    fn raw_address(
        &self,
        public_key: &[u8],
        version: WalletVersion,
        workchain: i8,
    ) -> Result<RawAddress, EncodingError>;
}

impl<T: RawAddressOracle + ?Sized> RawAddressOracle for Arc<T> {
    fn raw_address(
        &self,
        public_key: &[u8],
        version: WalletVersion,
        workchain: i8,
    ) -> Result<RawAddress, EncodingError> {
        (**self).raw_address(public_key, version, workchain)
    }
}

/// Computes the StateInit hash locally from registered wallet code.
///
/// Only the code cell's hash and depth enter the StateInit hash, so both
/// supported versions are built in. [`StateInitOracle::with_wallet_code`]
/// re-registers a version from a code BOC after checking it against the
/// published code hash.
#[derive(Debug, Clone)]
pub struct StateInitOracle {
    codes: HashMap<WalletVersion, CellRef>,
}

impl Default for StateInitOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl StateInitOracle {
    pub fn new() -> Self {
        let mut codes = HashMap::new();
        codes.insert(
            WalletVersion::V3R2,
            CellRef {
                hash: V3R2_CODE_HASH,
                depth: 0,
            },
        );
        codes.insert(
            WalletVersion::V4R2,
            CellRef {
                hash: V4R2_CODE_HASH,
                depth: V4R2_CODE_DEPTH,
            },
        );
        Self { codes }
    }

    pub fn with_wallet_code(
        mut self,
        version: WalletVersion,
        boc: &[u8],
    ) -> Result<Self, ConfigurationError> {
        let invalid = |reason: String| ConfigurationError::InvalidWalletCode {
            version: version.tag().to_string(),
            reason,
        };
        let code = boc::root_ref(boc).map_err(|e| invalid(e.to_string()))?;
        if code.hash != version.code_hash() {
            return Err(invalid(format!(
                "code hash {} does not match published {}",
                hex::encode(code.hash),
                hex::encode(version.code_hash())
            )));
        }
        self.codes.insert(version, code);
        Ok(self)
    }

    pub fn supports(&self, version: WalletVersion) -> bool {
        self.codes.contains_key(&version)
    }
}

impl RawAddressOracle for StateInitOracle {
    fn raw_address(
        &self,
        public_key: &[u8],
        version: WalletVersion,
        workchain: i8,
    ) -> Result<RawAddress, EncodingError> {
        let public_key: &[u8; 32] =
            public_key
                .try_into()
                .map_err(|_| EncodingError::UnsupportedPublicKey {
                    expected: 32,
                    actual: public_key.len(),
                })?;
        let code = self
            .codes
            .get(&version)
            .copied()
            .ok_or_else(|| EncodingError::MissingWalletCode(version.tag().to_string()))?;

        // split_depth: none, special: none, code: some, data: some, library: empty
        let mut state_init = CellBuilder::new();
        state_init
            .store_bits(&[false, false, true, true, false])
            .store_ref(code)
            .store_ref(version.data_cell(public_key, workchain));

        Ok(RawAddress::new(workchain, state_init.build().hash()))
    }
}
