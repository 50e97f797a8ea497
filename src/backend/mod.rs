//! Derivation pipelines the parity orchestrator can compare.
//!
//! A backend is anything that turns `(seed, spec)` into a public key and an
//! address. Backends share nothing and never hand out private key material.

mod native;
mod reference;

use std::sync::Arc;

pub use native::NativeBackend;
pub use reference::ReferenceBackend;

use crate::address::RawAddressOracle;
use crate::errors::BackendError;
use crate::seed::SeedMaterial;
use crate::signer::SignerSpec;

pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    fn derive_public_key(
        &self,
        seed: &SeedMaterial,
        spec: &SignerSpec,
    ) -> Result<Vec<u8>, BackendError>;

    fn derive_address(&self, seed: &SeedMaterial, spec: &SignerSpec)
        -> Result<String, BackendError>;
}

impl<T: Backend + ?Sized> Backend for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn derive_public_key(
        &self,
        seed: &SeedMaterial,
        spec: &SignerSpec,
    ) -> Result<Vec<u8>, BackendError> {
        (**self).derive_public_key(seed, spec)
    }

    fn derive_address(
        &self,
        seed: &SeedMaterial,
        spec: &SignerSpec,
    ) -> Result<String, BackendError> {
        (**self).derive_address(seed, spec)
    }
}

/// Raw-address oracle handed to the native backend.
pub type SharedOracle = Arc<dyn RawAddressOracle>;
