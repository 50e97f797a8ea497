pub mod boc;
pub mod cell;
pub mod crc16;
pub mod encoder;
pub mod evm;
pub mod friendly;
pub mod oracle;
pub mod raw;

use serde::{Deserialize, Serialize};

pub use encoder::{AddressEncoder, ChainParams};
pub use friendly::{AddressFlags, Alphabet, DecodedAddress, EncodedAddress};
pub use oracle::{RawAddressOracle, StateInitOracle, WalletVersion};
pub use raw::RawAddress;

/// How a chain renders a public key as an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum AddressScheme {
    /// Wallet-contract address in the friendly base64 form.
    Ton(ChainParams),
    /// 20-byte keccak address, EIP-55 checksummed.
    Evm,
}
