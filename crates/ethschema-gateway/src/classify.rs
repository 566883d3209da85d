//! Mapping of `alloy` failures onto [`RawFailure`].

use alloy::providers::PendingTransactionError;
use alloy::sol_types::{Panic, Revert, SolError, SolInterface};
use alloy::transports::{RpcError, TransportErrorKind};
use ethschema_core::{RawFailure, INVALID_OWNER, NOT_OWNER};

use crate::contract::SchemaRegistry::SchemaRegistryErrors;

const EXECUTION_REVERTED: &str = "execution reverted:";
const HARDHAT_REASON: &str = "reverted with reason string '";

enum Class {
    Reverted(String),
    Network,
    Other,
}

/// Classify a failure raised while preparing, estimating or sending a call.
pub(crate) fn contract_failure(err: alloy::contract::Error) -> RawFailure {
    let class = match &err {
        alloy::contract::Error::TransportError(rpc) => classify_rpc(rpc),
        alloy::contract::Error::PendingTransactionError(pending) => classify_pending(pending),
        _ => Class::Other,
    };
    build(class, err)
}

/// Classify a failure raised while waiting for a broadcast transaction to be mined.
pub(crate) fn pending_failure(err: PendingTransactionError) -> RawFailure {
    let class = classify_pending(&err);
    build(class, err)
}

fn build<E>(class: Class, err: E) -> RawFailure
where
    E: std::error::Error + Send + Sync + 'static,
{
    let message = err.to_string();
    let raw = match class {
        Class::Reverted(reason) => RawFailure::reverted(reason, message),
        Class::Network => RawFailure::network(message),
        Class::Other => RawFailure::other(message),
    };
    raw.with_source(err)
}

fn classify_pending(err: &PendingTransactionError) -> Class {
    match err {
        // The transaction already left this process; only a revert is a logical rejection.
        PendingTransactionError::TransportError(rpc) => match classify_rpc(rpc) {
            Class::Reverted(reason) => Class::Reverted(reason),
            Class::Network | Class::Other => Class::Network,
        },
        _ => Class::Network,
    }
}

fn classify_rpc(err: &RpcError<TransportErrorKind>) -> Class {
    match err {
        RpcError::ErrorResp(payload) => {
            let from_data = payload
                .as_revert_data()
                .and_then(|data| revert_reason(data.as_ref()));
            match from_data.or_else(|| reason_from_message(&payload.message)) {
                Some(reason) => Class::Reverted(reason),
                None => Class::Other,
            }
        }
        RpcError::Transport(_) => Class::Network,
        _ => Class::Other,
    }
}

/// Decode ABI-encoded revert data into a short reason code.
pub(crate) fn revert_reason(data: &[u8]) -> Option<String> {
    if let Ok(custom) = SchemaRegistryErrors::abi_decode(data) {
        let reason = match custom {
            SchemaRegistryErrors::OwnableUnauthorizedAccount(_) => NOT_OWNER,
            SchemaRegistryErrors::OwnableInvalidOwner(_) => INVALID_OWNER,
        };
        return Some(reason.to_string());
    }

    if let Ok(revert) = Revert::abi_decode(data) {
        return Some(revert.reason).filter(|reason| !reason.is_empty());
    }

    if let Ok(panic) = Panic::abi_decode(data) {
        return Some(format!("PANIC({})", panic.code));
    }

    None
}

/// Extract a reason from node messages that carry it only as text.
pub(crate) fn reason_from_message(message: &str) -> Option<String> {
    if let Some(start) = message.find(HARDHAT_REASON) {
        let rest = &message[start + HARDHAT_REASON.len()..];
        return rest
            .split('\'')
            .next()
            .filter(|reason| !reason.is_empty())
            .map(str::to_string);
    }

    let start = message.find(EXECUTION_REVERTED)?;
    let reason = message[start + EXECUTION_REVERTED.len()..].trim();
    if reason.is_empty() {
        None
    } else {
        Some(reason.to_string())
    }
}
