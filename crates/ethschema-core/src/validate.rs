//! Pre-flight input checks.
//!
//! Every function here is pure and synchronous: it either returns the validated
//! value or a [`RegistryError::Validation`]. Nothing in this module touches the
//! network.

use alloy_primitives::Address;
use serde::de::{Deserialize, IgnoredAny};
use tracing::debug;

use crate::config::{SchemaManagerConfig, ValidationConfig};
use crate::error::{RegistryError, Result};
use crate::types::{SchemaId, SchemaJson};

/// Longest schema id the registry accepts, counted in characters.
pub const MAX_SCHEMA_ID_LEN: usize = 256;

const ADDRESS_HEX_LEN: usize = 40;
const PRIVATE_KEY_HEX_LEN: usize = 64;

/// Check that `address` is `0x` followed by 40 hex digits.
///
/// Letter case is not interpreted, so checksummed and lowercase forms both pass.
pub fn validate_address(address: &str) -> Result<Address> {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| invalid_address(address))?;

    if digits.len() != ADDRESS_HEX_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid_address(address));
    }

    digits
        .parse::<Address>()
        .map_err(|_| invalid_address(address))
}

pub fn validate_schema_id(id: &str) -> Result<SchemaId> {
    validate_schema_id_with(id, MAX_SCHEMA_ID_LEN)
}

/// Schema id check with an explicit length bound.
///
/// `max_len` can only tighten the limit; it is capped at [`MAX_SCHEMA_ID_LEN`].
pub fn validate_schema_id_with(id: &str, max_len: usize) -> Result<SchemaId> {
    if id.trim().is_empty() {
        return Err(RegistryError::validation("schema id must not be empty"));
    }

    let max_len = max_len.min(MAX_SCHEMA_ID_LEN);
    let len = id.chars().count();
    if len > max_len {
        return Err(RegistryError::validation(format!(
            "schema id too long ({len} characters, max {max_len})"
        )));
    }

    Ok(SchemaId::new_unchecked(id))
}

/// Check that `payload` parses as JSON. The payload itself is never rewritten.
pub fn validate_json(payload: &str) -> Result<SchemaJson> {
    parse_json::<IgnoredAny>(payload)?;
    Ok(SchemaJson::new_unchecked(payload))
}

/// Strict variant of [`validate_json`]: the payload must also compile as a JSON Schema.
///
/// External `$ref` targets are never fetched; a schema that needs one is rejected.
pub fn validate_json_schema(payload: &str) -> Result<SchemaJson> {
    let value = parse_json::<serde_json::Value>(payload)?;
    jsonschema::options()
        .with_retriever(LocalOnly)
        .build(&value)
        .map_err(|err| {
            debug!(error = %err, "payload rejected in strict mode");
            RegistryError::validation(format!("payload is not a valid JSON Schema: {err}"))
        })?;
    Ok(SchemaJson::new_unchecked(payload))
}

/// Apply the payload rule selected by `config`.
pub fn validate_payload(payload: &str, config: &ValidationConfig) -> Result<SchemaJson> {
    if config.strict_json_schema {
        validate_json_schema(payload)
    } else {
        validate_json(payload)
    }
}

/// Check that `key` is 32 bytes of hex, with or without a `0x` prefix.
pub fn validate_private_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(RegistryError::validation("private key must not be empty"));
    }

    let digits = key
        .strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key);
    if digits.len() != PRIVATE_KEY_HEX_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        // The key itself never goes into the message.
        return Err(RegistryError::validation(format!(
            "private key must be {PRIVATE_KEY_HEX_LEN} hex digits"
        )));
    }

    Ok(())
}

/// Check every field of a manager config without touching the network.
pub fn validate_config(config: &SchemaManagerConfig) -> Result<()> {
    validate_address(&config.contract_address).map_err(|err| {
        RegistryError::validation(format!("contract address: {}", err.message()))
    })?;

    if config.rpc_url.trim().is_empty() {
        return Err(RegistryError::validation("rpc url must not be empty"));
    }

    if let Some(key) = &config.private_key {
        validate_private_key(key)?;
    }

    Ok(())
}

/// Parse with no nesting limit. Deep documents grow the stack on the heap
/// instead of overflowing it.
fn parse_json<T>(payload: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if payload.trim().is_empty() {
        return Err(RegistryError::validation("json payload must not be empty"));
    }

    let mut de = serde_json::Deserializer::from_str(payload);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de)).map_err(invalid_json)?;
    de.end().map_err(invalid_json)?;
    Ok(value)
}

fn invalid_json(err: serde_json::Error) -> RegistryError {
    RegistryError::validation_with_source(format!("payload is not valid JSON: {err}"), err)
}

/// Retriever that refuses every external resource, keeping validation offline.
struct LocalOnly;

impl jsonschema::Retrieve for LocalOnly {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<String>,
    ) -> std::result::Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external reference '{}' is not resolved", uri.as_str()).into())
    }
}

fn invalid_address(address: &str) -> RegistryError {
    RegistryError::validation(format!("invalid address: '{address}'"))
}
