use thiserror::Error;

use crate::signer::{Curve, HashFunction, SignatureFormat};

/// Invalid seed, signer spec or run setup. Fatal: nothing is derived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("seed is empty")]
    EmptySeed,

    #[error("seed not found: set {var} or add it to {file}")]
    MissingSeed { var: String, file: String },

    #[error("seed is not valid {encoding}: {reason}")]
    InvalidSeedEncoding { encoding: String, reason: String },

    #[error("signature format {format} is not supported by curve {curve}")]
    UnsupportedSignatureFormat {
        curve: Curve,
        format: SignatureFormat,
    },

    #[error("hash function {hash} is not supported by curve {curve}")]
    UnsupportedHash { curve: Curve, hash: HashFunction },

    #[error("coin type must be a decimal SLIP-44 index, got '{0}'")]
    InvalidCoinType(String),

    #[error("unknown wallet version '{0}' (expected v3R2 or v4R2)")]
    UnknownWalletVersion(String),

    #[error("wallet code for {version} rejected: {reason}")]
    InvalidWalletCode { version: String, reason: String },

    #[error("unknown chain '{0}'")]
    UnknownChain(String),

    #[error("chain '{chain}' cannot derive addresses for curve {curve}")]
    SchemeCurveMismatch { chain: String, curve: Curve },

    #[error("at least {required} backends are needed, got {actual}")]
    TooFewBackends { required: usize, actual: usize },

    #[error("backend name '{0}' is registered twice")]
    DuplicateBackend(String),
}

/// Failure inside one seed -> keypair derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("seed is empty")]
    EmptySeed,

    #[error("digest too short: curve needs {required} bytes, got {actual}")]
    InsufficientEntropy { required: usize, actual: usize },

    #[error("digest is not a valid {curve} secret: {reason}")]
    InvalidScalar { curve: Curve, reason: String },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Address encode/decode failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("address is not valid base64: {0}")]
    BadBase64(String),

    #[error("address must decode to {expected} bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },

    #[error("checksum mismatch: expected {expected:#06x}, found {found:#06x}")]
    BadChecksum { expected: u16, found: u16 },

    #[error("unknown address tag byte {0:#04x}")]
    UnknownTag(u8),

    #[error("invalid raw address '{0}'")]
    InvalidRawAddress(String),

    #[error("no contract code registered for wallet {0}")]
    MissingWalletCode(String),

    #[error("public key of {actual} bytes is not usable here (expected {expected})")]
    UnsupportedPublicKey { expected: usize, actual: usize },
}

/// What a single backend reports instead of a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("derivation failed: {0}")]
    Derivation(#[from] DerivationError),

    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    #[error("backend panicked: {0}")]
    Panicked(String),
}

impl BackendError {
    /// Stable, machine-readable error kind for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Derivation(_) => "derivation",
            BackendError::Encoding(_) => "encoding",
            BackendError::Panicked(_) => "panicked",
        }
    }
}

/// A backend failure kept alongside the backend's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    pub backend: String,
    pub error: BackendError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImpossibleReason {
    #[error("precondition failed: {0}")]
    Precondition(#[from] ConfigurationError),

    #[error("all {} backends failed", .0.len())]
    AllBackendsFailed(Vec<BackendFailure>),
}

/// Fatal outcomes of a parity run. No report is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParityError {
    #[error("comparison impossible: {0}")]
    ComparisonImpossible(ImpossibleReason),
}

impl From<ConfigurationError> for ParityError {
    fn from(e: ConfigurationError) -> Self {
        ParityError::ComparisonImpossible(ImpossibleReason::Precondition(e))
    }
}

impl ParityError {
    /// The configuration error behind a precondition failure, if any.
    pub fn configuration_error(&self) -> Option<&ConfigurationError> {
        match self {
            ParityError::ComparisonImpossible(ImpossibleReason::Precondition(e)) => Some(e),
            _ => None,
        }
    }
}
