use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use address_parity::address::WalletVersion;
use address_parity::defaults::Defaults;
use address_parity::SeedEncoding;

/// Offline address derivation with a native-vs-reference parity check
#[derive(Parser, Debug)]
#[command(version, about = "Offline address derivation and parity checker")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Derive with both backends and compare; exit 0 only on MATCH
    Parity {
        #[command(flatten)]
        chain: ChainArgs,

        #[command(flatten)]
        seed: SeedArgs,

        /// Write the JSON report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Derive the public key and address with the native backend only
    Address {
        #[command(flatten)]
        chain: ChainArgs,

        #[command(flatten)]
        seed: SeedArgs,
    },

    /// Decode a friendly TON address into its raw form and flags
    Decode {
        /// Address in either base64 alphabet
        address: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ChainArgs {
    /// Chain preset: ton (607) or ethereum (60)
    #[arg(long, default_value = Defaults::CHAIN_ID)]
    pub chain: String,

    /// TON wallet contract version (v3R2, v4R2)
    #[arg(long, default_value = Defaults::WALLET_VERSION)]
    pub wallet_version: WalletVersion,

    /// Wallet code BOC (binary or base64) for versions without built-in code
    #[arg(long)]
    pub wallet_code: Option<PathBuf>,

    /// TON workchain id
    #[arg(long, default_value_t = Defaults::WORKCHAIN, allow_negative_numbers = true)]
    pub workchain: i8,

    /// Render the non-bounceable form
    #[arg(long)]
    pub non_bounceable: bool,

    /// Set the test-network flag
    #[arg(long)]
    pub testnet: bool,

    /// Use the standard base64 alphabet instead of the URL-safe one
    #[arg(long)]
    pub standard_base64: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    /// Environment variable holding the seed
    #[arg(long, default_value = Defaults::SEED_ENV_VAR)]
    pub seed_var: String,

    /// Fallback dotenv-style file
    #[arg(long, default_value = Defaults::ENV_FILE)]
    pub env_file: PathBuf,

    /// How to read the seed string: utf8 or hex
    #[arg(long, default_value = Defaults::SEED_ENCODING)]
    pub seed_encoding: SeedEncoding,
}
