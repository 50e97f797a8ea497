// src/util.rs
use anyhow::Result;

pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>> {
    let t = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    Ok(hex::decode(t)?)
}

pub fn bytes_to_0x(v: &[u8]) -> String {
    format!("0x{}", hex::encode(v))
}
