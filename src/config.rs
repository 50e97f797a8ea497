//! Chain presets and seed input resolution.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::address::{AddressScheme, ChainParams};
use crate::defaults::Defaults;
use crate::errors::ConfigurationError;
use crate::seed::{SeedEncoding, SeedMaterial};
use crate::signer::{Curve, SignerSpec};

/// Everything needed to derive and render addresses for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub chain_id: String,
    pub signer: SignerSpec,
    pub scheme: AddressScheme,
}

impl ChainConfig {
    pub fn ton(params: ChainParams) -> Self {
        Self {
            chain_id: "ton".into(),
            signer: SignerSpec::ton(),
            scheme: AddressScheme::Ton(params),
        }
    }

    pub fn ethereum() -> Self {
        Self {
            chain_id: "ethereum".into(),
            signer: SignerSpec::ethereum(),
            scheme: AddressScheme::Evm,
        }
    }

    /// Preset by name or SLIP-44 coin type. TON gets default chain params.
    pub fn from_chain_id(chain_id: &str) -> Result<Self, ConfigurationError> {
        match chain_id.trim().to_ascii_lowercase().as_str() {
            "ton" | "607" => Ok(Self::ton(ChainParams::default())),
            "ethereum" | "eth" | "60" => Ok(Self::ethereum()),
            _ => Err(ConfigurationError::UnknownChain(chain_id.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.signer.validate()?;
        match (&self.scheme, self.signer.curve) {
            (AddressScheme::Ton(_), Curve::Ed25519) | (AddressScheme::Evm, Curve::Secp256k1) => {
                Ok(())
            }
            (_, curve) => Err(ConfigurationError::SchemeCurveMismatch {
                chain: self.chain_id.clone(),
                curve,
            }),
        }
    }
}

/// Parses `KEY=value` lines. Blank lines and `#` comments are skipped;
/// one pair of surrounding quotes is stripped from values.
pub fn parse_env_file(contents: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();

    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);

        let Some((k, vraw)) = trimmed.split_once('=') else {
            continue;
        };
        let mut val = vraw.trim();
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = &val[1..val.len() - 1];
        }
        out.insert(k.trim().to_string(), val.to_string());
    }

    out
}

/// Where the seed comes from: an environment variable first, then a
/// dotenv-style file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSource {
    pub var: String,
    pub env_file: PathBuf,
    pub encoding: SeedEncoding,
}

impl Default for SeedSource {
    fn default() -> Self {
        Self {
            var: Defaults::SEED_ENV_VAR.to_string(),
            env_file: PathBuf::from(Defaults::ENV_FILE),
            encoding: SeedEncoding::default(),
        }
    }
}

impl SeedSource {
    pub fn resolve(&self) -> Result<SeedMaterial, ConfigurationError> {
        let raw = match env::var(&self.var) {
            Ok(v) => {
                debug!(var = %self.var, "seed taken from environment");
                Zeroizing::new(v)
            }
            Err(_) => self.read_file()?,
        };
        SeedMaterial::parse(&raw, self.encoding)
    }

    fn read_file(&self) -> Result<Zeroizing<String>, ConfigurationError> {
        let missing = || ConfigurationError::MissingSeed {
            var: self.var.clone(),
            file: self.env_file.display().to_string(),
        };
        let contents = Zeroizing::new(fs::read_to_string(&self.env_file).map_err(|_| missing())?);
        let mut vars = parse_env_file(&contents);
        let value = vars.remove(&self.var).map(Zeroizing::new).ok_or_else(missing)?;
        for (_, mut other) in vars.drain() {
            zeroize::Zeroize::zeroize(&mut other);
        }
        debug!(file = %self.env_file.display(), "seed taken from env file");
        Ok(value)
    }
}
