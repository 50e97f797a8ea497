//! Deterministic seed -> key -> address derivation with a cross-backend
//! parity check.

pub mod address;
pub mod backend;
pub mod config;
pub mod defaults;
pub mod errors;
pub mod key;
pub mod logging;
pub mod parity;
pub mod seed;
pub mod signer;
pub mod util;

pub use address::{AddressEncoder, AddressScheme, ChainParams, EncodedAddress, RawAddress};
pub use backend::{Backend, NativeBackend, ReferenceBackend};
pub use config::{ChainConfig, SeedSource};
pub use errors::{
    BackendError, ConfigurationError, DerivationError, EncodingError, ImpossibleReason,
    ParityError,
};
pub use parity::{BackendOutcome, ParityOrchestrator, ParityReport, Verdict};
pub use seed::{SeedEncoding, SeedMaterial};
pub use signer::{Curve, HashFunction, SignatureFormat, SignerSpec};
