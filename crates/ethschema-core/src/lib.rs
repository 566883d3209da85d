//! Validation and error translation for the ethschema registry client.
//!
//! Everything in this crate is synchronous and free of network access:
//! validators reject malformed input before any gas is spent, and the error
//! taxonomy defines the closed set of failures callers can branch on.

pub mod config;
pub mod error;
pub mod receipt;
pub mod types;
pub mod validate;

pub use alloy_primitives::Address;
pub use config::{SchemaManagerConfig, ValidationConfig};
pub use error::{
    BoxError, ErrorCode, RawFailure, RegistryError, Result, INVALID_OWNER, NOT_OWNER,
    SCHEMA_EXISTS,
};
pub use receipt::TransactionReceipt;
pub use types::{SchemaId, SchemaJson};
pub use validate::{
    validate_address, validate_config, validate_json, validate_json_schema, validate_payload,
    validate_private_key, validate_schema_id, validate_schema_id_with, MAX_SCHEMA_ID_LEN,
};
