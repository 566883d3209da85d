use std::fmt;
use std::io;

use ethschema::{ErrorCode, RegistryError};

pub const SUCCESS: i32 = 0;
/// The registry rejected the call or the transaction failed on chain.
pub const CONTRACT_REJECTED: i32 = 1;
pub const NETWORK_ERROR: i32 = 3;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::InvalidData => DATA_INVALID,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn registry_error(context: &str, err: RegistryError) -> CliError {
    let code = match err.code() {
        ErrorCode::Validation => DATA_INVALID,
        ErrorCode::Contract => CONTRACT_REJECTED,
        ErrorCode::Network => NETWORK_ERROR,
    };
    let message = match err.revert_reason() {
        Some(reason) => format!("{context}: {err} [{}: {reason}]", err.code()),
        None => format!("{context}: {err} [{}]", err.code()),
    };
    CliError::new(code, message)
}
