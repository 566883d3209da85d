//! Validated, typed client for an on-chain JSON schema registry.
//!
//! ethschema stores JSON schema documents in a `SchemaRegistry` contract keyed
//! by `(owner address, schema id)`, checking every input before gas is spent and
//! reporting every failure as one of three typed errors.
//!
//! # Crate Structure
//!
//! - [`common`]: Validators, error taxonomy, config and receipt types
//! - [`gateway`]: Contract gateway, backend trait and the `alloy` RPC backend
//! - [`SchemaManager`]: The facade most callers need
//!
//! # Example
//!
//! ```no_run
//! use ethschema::{SchemaManager, SchemaManagerConfig};
//!
//! # async fn run() -> ethschema::Result<()> {
//! let manager = SchemaManager::new(SchemaManagerConfig::new(
//!     "0xc7336Ea25657Ce7B2E9B8A28624C173C2B80F9c9",
//!     "https://rpc.sepolia.org",
//!     std::env::var("ETHSCHEMA_PRIVATE_KEY").ok(),
//! ))?;
//!
//! manager.create_schema("schema-1", r#"{"type":"object"}"#).await?;
//! # Ok(())
//! # }
//! ```

pub mod manager;

/// Re-export core types.
pub mod common {
    pub use ethschema_core::*;
}

/// Re-export gateway types.
pub mod gateway {
    pub use ethschema_gateway::*;
}

pub use ethschema_core::{
    Address, ErrorCode, RegistryError, Result, SchemaManagerConfig, TransactionReceipt,
    ValidationConfig, INVALID_OWNER, NOT_OWNER, SCHEMA_EXISTS,
};
pub use manager::SchemaManager;
