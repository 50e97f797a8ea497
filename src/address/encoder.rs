use serde::{Deserialize, Serialize};

use super::friendly::{self, Alphabet, AddressFlags, DecodedAddress, EncodedAddress};
use super::oracle::{RawAddressOracle, StateInitOracle, WalletVersion};
use crate::errors::{ConfigurationError, EncodingError};

/// Per-chain knobs for the friendly address form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainParams {
    pub workchain: i8,
    pub bounceable: bool,
    pub testnet: bool,
    pub wallet_version: WalletVersion,
    pub alphabet: Alphabet,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            workchain: 0,
            bounceable: true,
            testnet: false,
            wallet_version: WalletVersion::V4R2,
            alphabet: Alphabet::UrlSafe,
        }
    }
}

impl ChainParams {
    pub fn with_wallet_version_tag(mut self, tag: &str) -> Result<Self, ConfigurationError> {
        self.wallet_version = tag.parse()?;
        Ok(self)
    }

    pub fn flags(&self) -> AddressFlags {
        AddressFlags::new(self.bounceable, self.testnet)
    }
}

/// Public key -> friendly address, via a raw-address oracle.
#[derive(Debug, Clone, Default)]
pub struct AddressEncoder<O = StateInitOracle> {
    oracle: O,
}

impl<O: RawAddressOracle> AddressEncoder<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn encode(
        &self,
        public_key: &[u8],
        params: &ChainParams,
    ) -> Result<EncodedAddress, EncodingError> {
        let raw = self
            .oracle
            .raw_address(public_key, params.wallet_version, params.workchain)?;
        Ok(friendly::encode_raw(&raw, params.flags(), params.alphabet))
    }

    /// Inverse of [`AddressEncoder::encode`]. Needs no oracle; forwards to
    /// [`friendly::decode`].
    pub fn decode(&self, address: &str) -> Result<DecodedAddress, EncodingError> {
        friendly::decode(address)
    }
}
