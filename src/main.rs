use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

mod cli;

use address_parity::address::{friendly, Alphabet, StateInitOracle};
use address_parity::backend::{Backend, SharedOracle};
use address_parity::defaults::Defaults;
use address_parity::logging::{self, LoggerConfig};
use address_parity::util::bytes_to_0x;
use address_parity::{
    AddressScheme, ChainConfig, NativeBackend, ParityOrchestrator, ReferenceBackend, SeedSource,
};

use crate::cli::{ChainArgs, Cli, Command, SeedArgs};

const BOC_MAGIC: [u8; 4] = [0xb5, 0xee, 0x9c, 0x72];

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(LoggerConfig::default());

    match cli.cmd {
        Command::Parity { chain, seed, out } => {
            let (cfg, oracle) = chain_config(&chain)?;
            let seed = seed_source(&seed).resolve()?;

            let orchestrator = ParityOrchestrator::new(cfg.chain_id.clone())
                .with_backend(NativeBackend::new(Defaults::NATIVE_BACKEND, cfg.scheme, oracle))
                .with_backend(ReferenceBackend::new(Defaults::REFERENCE_BACKEND, cfg.scheme));

            let report = match orchestrator.run(seed, &cfg.signer).await {
                Ok(report) => report,
                Err(e) => {
                    error!(error = %e, "parity run aborted");
                    return Err(e).context("parity run");
                }
            };

            let json = report.to_json_pretty().context("serializing report")?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "report written");
                }
                None => println!("{json}"),
            }

            Ok(if report.verdict().is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Command::Address { chain, seed } => {
            let (cfg, oracle) = chain_config(&chain)?;
            let seed = seed_source(&seed).resolve()?;
            let backend = NativeBackend::new(Defaults::NATIVE_BACKEND, cfg.scheme, oracle);

            let public_key = backend
                .derive_public_key(&seed, &cfg.signer)
                .context("deriving public key")?;
            let address = backend
                .derive_address(&seed, &cfg.signer)
                .context("deriving address")?;

            let out = serde_json::json!({
                "chainId": cfg.chain_id,
                "signerSpec": cfg.signer,
                "publicKeyHex": bytes_to_0x(&public_key),
                "address": address,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Decode { address } => {
            let decoded = friendly::decode(address.trim())
                .with_context(|| format!("decoding {address}"))?;
            let out = serde_json::json!({
                "raw": decoded.raw.to_string(),
                "workchain": decoded.raw.workchain,
                "bounceable": decoded.flags.bounceable,
                "testnet": decoded.flags.testnet,
                "alphabet": decoded.alphabet,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn seed_source(args: &SeedArgs) -> SeedSource {
    SeedSource {
        var: args.seed_var.clone(),
        env_file: args.env_file.clone(),
        encoding: args.seed_encoding,
    }
}

/// Chain preset with the CLI's TON overrides applied, plus the oracle for the
/// native backend.
fn chain_config(args: &ChainArgs) -> Result<(ChainConfig, SharedOracle)> {
    let mut cfg = ChainConfig::from_chain_id(&args.chain)?;
    let mut oracle = StateInitOracle::new();

    if let AddressScheme::Ton(params) = &mut cfg.scheme {
        params.wallet_version = args.wallet_version;
        params.workchain = args.workchain;
        params.bounceable = !args.non_bounceable;
        params.testnet = args.testnet;
        params.alphabet = if args.standard_base64 {
            Alphabet::Standard
        } else {
            Alphabet::UrlSafe
        };

        if let Some(path) = &args.wallet_code {
            let boc = read_boc(path)?;
            oracle = oracle.with_wallet_code(args.wallet_version, &boc)?;
        }
        if !oracle.supports(args.wallet_version) {
            bail!(
                "wallet {} has no built-in code; pass --wallet-code <boc>",
                args.wallet_version
            );
        }
    }

    cfg.validate()?;
    Ok((cfg, Arc::new(oracle)))
}

/// BOC as raw bytes or as base64 text.
fn read_boc(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if bytes.starts_with(&BOC_MAGIC) {
        return Ok(bytes);
    }
    let text = String::from_utf8(bytes).context("wallet code is neither a BOC nor text")?;
    STANDARD
        .decode(text.trim())
        .with_context(|| format!("decoding base64 BOC in {}", path.display()))
}
