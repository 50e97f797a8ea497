//! Central place for the tool's default values.
//! Update these and the CLI and orchestrator pick them up.

pub struct Defaults;

impl Defaults {
    /* Seed input */
    pub const SEED_ENV_VAR: &'static str = "UNSECURE_LOCAL_SEED";
    pub const ENV_FILE: &'static str = ".env.local";
    pub const SEED_ENCODING: &'static str = "utf8";

    /* Chain */
    pub const CHAIN_ID: &'static str = "ton";
    pub const WALLET_VERSION: &'static str = "v4R2";
    pub const WORKCHAIN: i8 = 0;

    /* Parity run */
    pub const NATIVE_BACKEND: &'static str = "native";
    pub const REFERENCE_BACKEND: &'static str = "reference";
    pub const MIN_BACKENDS: usize = 2;

    /* Logging */
    pub const LOG_WHOAMI: &'static str = "(address-parity)";
    pub const SVC_LABEL_ENVVAR: &'static str = "ADDRESS_PARITY_SVC_LABEL";
}
