use std::sync::Arc;

use super::{Backend, SharedOracle};
use crate::address::{evm, AddressEncoder, AddressScheme, StateInitOracle};
use crate::errors::BackendError;
use crate::key;
use crate::seed::SeedMaterial;
use crate::signer::SignerSpec;

/// This crate's own pipeline: [`key::derive`] then [`AddressEncoder`] or the
/// EIP-55 encoder.
pub struct NativeBackend {
    name: String,
    scheme: AddressScheme,
    encoder: AddressEncoder<SharedOracle>,
}

impl NativeBackend {
    pub fn new(name: impl Into<String>, scheme: AddressScheme, oracle: SharedOracle) -> Self {
        Self {
            name: name.into(),
            scheme,
            encoder: AddressEncoder::new(oracle),
        }
    }

    /// Native backend over the built-in StateInit oracle.
    pub fn with_default_oracle(name: impl Into<String>, scheme: AddressScheme) -> Self {
        Self::new(name, scheme, Arc::new(StateInitOracle::new()))
    }
}

impl Backend for NativeBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn derive_public_key(
        &self,
        seed: &SeedMaterial,
        spec: &SignerSpec,
    ) -> Result<Vec<u8>, BackendError> {
        let kp = key::derive(seed, spec)?;
        Ok(kp.public_key().to_vec())
    }

    fn derive_address(&self, seed: &SeedMaterial, spec: &SignerSpec) -> Result<String, BackendError> {
        let kp = key::derive(seed, spec)?;
        let address = match &self.scheme {
            AddressScheme::Ton(params) => self.encoder.encode(kp.public_key(), params)?.into_string(),
            AddressScheme::Evm => evm::encode(kp.public_key())?,
        };
        Ok(address)
    }
}
