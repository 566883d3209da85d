use std::path::PathBuf;

use clap::{Args, Subcommand};
use ethschema::common::config::{ENV_CONTRACT_ADDRESS, ENV_PRIVATE_KEY, ENV_RPC_URL};
use ethschema::{SchemaManager, SchemaManagerConfig, ValidationConfig};

use crate::exit::{io_error, registry_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod create;
pub mod get;
pub mod owner;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a schema under the signer's address.
    Create(CreateArgs),
    /// Store a schema under another address (registry owner only).
    AdminCreate(AdminCreateArgs),
    /// Read a stored schema.
    Get(GetArgs),
    /// Print the registry owner.
    Owner,
    /// Transfer registry ownership (registry owner only).
    TransferOwnership(TransferOwnershipArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub async fn run(
    command: Command,
    connection: ConnectionArgs,
    format: OutputFormat,
) -> CliResult<i32> {
    match command {
        Command::Version(args) => version::run(args),
        Command::Create(args) => create::run(args, &connection.manager()?, format).await,
        Command::AdminCreate(args) => {
            create::run_admin(args, &connection.manager()?, format).await
        }
        Command::Get(args) => get::run(args, &connection.manager()?, format).await,
        Command::Owner => owner::run(&connection.manager()?, format).await,
        Command::TransferOwnership(args) => {
            owner::run_transfer(args, &connection.manager()?, format).await
        }
    }
}

/// Registry connection settings shared by every networked subcommand.
#[derive(Args, Clone)]
pub struct ConnectionArgs {
    /// Registry contract address.
    #[arg(long = "contract", env = ENV_CONTRACT_ADDRESS, global = true)]
    pub contract_address: Option<String>,
    /// JSON-RPC endpoint URL.
    #[arg(long, env = ENV_RPC_URL, global = true)]
    pub rpc_url: Option<String>,
    /// Hex private key used to sign writes.
    #[arg(long, env = ENV_PRIVATE_KEY, hide_env_values = true, global = true)]
    pub private_key: Option<String>,
    /// Require payloads to compile as JSON Schema documents.
    #[arg(long, global = true)]
    pub strict: bool,
}

impl ConnectionArgs {
    pub fn config(&self) -> CliResult<SchemaManagerConfig> {
        let contract_address = self.contract_address.clone().ok_or_else(|| {
            CliError::new(
                USAGE,
                format!("--contract or {ENV_CONTRACT_ADDRESS} is required"),
            )
        })?;
        let rpc_url = self.rpc_url.clone().ok_or_else(|| {
            CliError::new(USAGE, format!("--rpc-url or {ENV_RPC_URL} is required"))
        })?;

        Ok(SchemaManagerConfig::new(
            contract_address,
            rpc_url,
            self.private_key.clone().filter(|key| !key.is_empty()),
        ))
    }

    pub fn manager(&self) -> CliResult<SchemaManager> {
        let manager = SchemaManager::new(self.config()?)
            .map_err(|err| registry_error("invalid configuration", err))?;
        Ok(manager.with_validation(ValidationConfig {
            strict_json_schema: self.strict,
            ..ValidationConfig::default()
        }))
    }
}

impl std::fmt::Debug for ConnectionArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionArgs")
            .field("contract_address", &self.contract_address)
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("strict", &self.strict)
            .finish()
    }
}

/// Where the schema payload comes from.
#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Inline JSON payload.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,
    /// Read the JSON payload from a file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
}

impl PayloadArgs {
    /// The payload exactly as given; file contents are not trimmed or reformatted.
    pub fn resolve(&self) -> CliResult<String> {
        if let Some(json) = &self.json {
            return Ok(json.clone());
        }
        match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err)),
            None => Err(CliError::new(USAGE, "either --json or --file is required")),
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Schema id.
    pub schema_id: String,
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct AdminCreateArgs {
    /// Address that will own the schema.
    pub owner: String,
    /// Schema id.
    pub schema_id: String,
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Owner address.
    pub owner: String,
    /// Schema id.
    pub schema_id: String,
}

#[derive(Args, Debug)]
pub struct TransferOwnershipArgs {
    /// Address of the new registry owner.
    pub new_owner: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
