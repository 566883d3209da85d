use std::fmt;

use crate::error::{RegistryError, Result};
use crate::validate::MAX_SCHEMA_ID_LEN;

pub const ENV_CONTRACT_ADDRESS: &str = "ETHSCHEMA_CONTRACT_ADDRESS";
pub const ENV_RPC_URL: &str = "ETHSCHEMA_RPC_URL";
pub const ENV_PRIVATE_KEY: &str = "ETHSCHEMA_PRIVATE_KEY";

/// Connection settings for one schema manager.
#[derive(Clone, PartialEq, Eq)]
pub struct SchemaManagerConfig {
    /// Address of the deployed registry contract.
    pub contract_address: String,
    /// JSON-RPC endpoint of the target chain.
    pub rpc_url: String,
    /// Hex-encoded signing key. Without it only read operations succeed.
    /// Treated as secret material and redacted in debug output.
    pub private_key: Option<String>,
}

impl SchemaManagerConfig {
    pub fn new(
        contract_address: impl Into<String>,
        rpc_url: impl Into<String>,
        private_key: Option<String>,
    ) -> Self {
        Self {
            contract_address: contract_address.into(),
            rpc_url: rpc_url.into(),
            private_key,
        }
    }

    /// Read the config from `ETHSCHEMA_*` environment variables.
    ///
    /// The contract address and RPC url are required; the private key is optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .ok_or_else(|| RegistryError::validation(format!("{name} is not set")))
        };

        Ok(Self {
            contract_address: required(ENV_CONTRACT_ADDRESS)?,
            rpc_url: required(ENV_RPC_URL)?,
            private_key: lookup(ENV_PRIVATE_KEY).filter(|key| !key.is_empty()),
        })
    }

    pub fn has_signer(&self) -> bool {
        self.private_key.is_some()
    }
}

impl fmt::Debug for SchemaManagerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("SchemaManagerConfig");
        dbg.field("contract_address", &self.contract_address)
            .field("rpc_url", &self.rpc_url);
        if let Some(key) = &self.private_key {
            dbg.field(
                "private_key",
                &format_args!("<redacted:{} bytes>", key.len()),
            );
        } else {
            dbg.field("private_key", &Option::<String>::None);
        }
        dbg.finish()
    }
}

/// Controls how strictly payloads and ids are checked before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// When true, payloads must compile as a JSON Schema, not just parse as JSON.
    pub strict_json_schema: bool,
    /// Maximum schema id length in characters. Values above 256 are capped at 256.
    pub max_schema_id_len: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict_json_schema: false,
            max_schema_id_len: MAX_SCHEMA_ID_LEN,
        }
    }
}
