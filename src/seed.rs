use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use crate::errors::ConfigurationError;
use crate::util::hex_to_bytes;

/// How the out-of-band seed string turns into seed bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedEncoding {
    /// The phrase's UTF-8 bytes, unmodified.
    #[default]
    Utf8,
    /// Hex, optional 0x prefix.
    Hex,
}

impl FromStr for SeedEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" | "phrase" => Ok(SeedEncoding::Utf8),
            "hex" => Ok(SeedEncoding::Hex),
            other => Err(format!("unknown seed encoding '{other}' (utf8 or hex)")),
        }
    }
}

impl fmt::Display for SeedEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeedEncoding::Utf8 => "utf8",
            SeedEncoding::Hex => "hex",
        })
    }
}

/// Secret seed bytes. Wiped on drop; clones are independent wiped copies.
#[derive(Clone)]
pub struct SeedMaterial(Zeroizing<Vec<u8>>);

impl SeedMaterial {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub fn from_phrase(phrase: &str) -> Self {
        Self::from_bytes(phrase.as_bytes().to_vec())
    }

    /// Decodes `input` according to `encoding`. Empty results are rejected.
    pub fn parse(input: &str, encoding: SeedEncoding) -> Result<Self, ConfigurationError> {
        let seed = match encoding {
            SeedEncoding::Utf8 => Self::from_phrase(input),
            SeedEncoding::Hex => {
                let bytes = hex_to_bytes(input.trim()).map_err(|e| {
                    ConfigurationError::InvalidSeedEncoding {
                        encoding: encoding.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                Self::from_bytes(bytes)
            }
        };
        if seed.is_empty() {
            return Err(ConfigurationError::EmptySeed);
        }
        Ok(seed)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SeedMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedMaterial(<{} bytes redacted>)", self.0.len())
    }
}
