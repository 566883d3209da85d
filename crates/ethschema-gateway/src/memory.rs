//! In-process registry backend.
//!
//! Mirrors the deployed contract's rules: one record per (owner, schema id),
//! owner-only administrative writes and ownership transfer, and an empty
//! string for unknown pairs. Handles created with [`MemoryRegistry::connect_as`]
//! share one registry state, so tests can act as several identities.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use alloy::primitives::B256;
use async_trait::async_trait;
use ethschema_core::{
    Address, RawFailure, SchemaId, SchemaJson, TransactionReceipt, INVALID_OWNER, NOT_OWNER,
    SCHEMA_EXISTS,
};

use crate::backend::RegistryBackend;

const BASE_GAS: u64 = 21_000;
const GAS_PER_BYTE: u64 = 16;
const GAS_PRICE: u128 = 1_000_000_000;

/// Failure injected into the next backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The call never reaches the registry.
    NetworkOutage,
    /// The transaction is mined with a failure status and changes nothing.
    FailedReceipt,
}

#[derive(Debug, Default)]
struct RegistryState {
    owner: Address,
    schemas: HashMap<(Address, String), String>,
    calls: usize,
    block_number: u64,
    faults: VecDeque<Fault>,
}

/// Registry held in memory, with call counting and fault injection.
#[derive(Debug, Clone)]
pub struct MemoryRegistry {
    contract: Address,
    state: Arc<Mutex<RegistryState>>,
    signer: Option<Address>,
}

impl MemoryRegistry {
    /// Create an empty registry administered by `owner`, with no signer attached.
    pub fn new(owner: Address) -> Self {
        Self {
            contract: Address::repeat_byte(0xc7),
            state: Arc::new(Mutex::new(RegistryState {
                owner,
                ..RegistryState::default()
            })),
            signer: None,
        }
    }

    /// Handle on the same registry that signs as `signer`.
    pub fn connect_as(&self, signer: Address) -> Self {
        Self {
            signer: Some(signer),
            ..self.clone()
        }
    }

    /// Handle on the same registry without a signing identity.
    pub fn read_only(&self) -> Self {
        Self {
            signer: None,
            ..self.clone()
        }
    }

    /// Number of calls that reached the registry, across all handles.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    /// Queue a fault for a later call. Faults fire in order; reads pass over a
    /// queued failed receipt.
    pub fn inject(&self, fault: Fault) {
        self.lock().faults.push_back(fault);
    }

    /// Stored payload, bypassing the backend interface and its call counter.
    pub fn stored(&self, owner: Address, schema_id: &str) -> Option<String> {
        self.lock()
            .schemas
            .get(&(owner, schema_id.to_string()))
            .cloned()
    }

    pub fn current_owner(&self) -> Address {
        self.lock().owner
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count a write and take any pending fault.
    fn enter(&self) -> (MutexGuard<'_, RegistryState>, Option<Fault>) {
        let mut state = self.lock();
        state.calls += 1;
        let fault = state.faults.pop_front();
        (state, fault)
    }

    /// Count a read. Only an outage applies to reads; a queued
    /// [`Fault::FailedReceipt`] stays queued for the next write.
    fn enter_read(&self) -> Result<MutexGuard<'_, RegistryState>, RawFailure> {
        let mut state = self.lock();
        state.calls += 1;
        if state.faults.front() == Some(&Fault::NetworkOutage) {
            state.faults.pop_front();
            return Err(outage());
        }
        Ok(state)
    }

    fn require_signer(&self) -> Result<Address, RawFailure> {
        self.signer
            .ok_or_else(|| RawFailure::other("no signing identity attached to this handle"))
    }

    fn execute<F>(&self, payload_len: usize, apply: F) -> Result<TransactionReceipt, RawFailure>
    where
        F: FnOnce(&mut RegistryState, Address) -> Result<(), RawFailure>,
    {
        let from = self.require_signer()?;
        let (mut state, fault) = self.enter();

        let status = match fault {
            Some(Fault::NetworkOutage) => return Err(outage()),
            Some(Fault::FailedReceipt) => false,
            None => {
                apply(&mut state, from)?;
                true
            }
        };

        state.block_number += 1;
        let gas_used = BASE_GAS + GAS_PER_BYTE * payload_len as u64;
        Ok(TransactionReceipt {
            transaction_hash: B256::left_padding_from(&(state.calls as u64).to_be_bytes()),
            block_hash: Some(B256::left_padding_from(&state.block_number.to_be_bytes())),
            block_number: Some(state.block_number),
            gas_used,
            effective_gas_price: GAS_PRICE,
            from,
            to: Some(self.contract),
            status,
        })
    }
}

fn outage() -> RawFailure {
    RawFailure::network("could not reach registry endpoint").with_source(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

fn revert(reason: &str) -> RawFailure {
    RawFailure::reverted(reason, format!("execution reverted: {reason}"))
}

fn insert(
    state: &mut RegistryState,
    owner: Address,
    schema_id: &SchemaId,
    json: &SchemaJson,
) -> Result<(), RawFailure> {
    let key = (owner, schema_id.to_string());
    if state.schemas.contains_key(&key) {
        return Err(revert(SCHEMA_EXISTS));
    }
    state.schemas.insert(key, json.as_str().to_string());
    Ok(())
}

fn require_owner(state: &RegistryState, caller: Address) -> Result<(), RawFailure> {
    if state.owner != caller {
        return Err(revert(NOT_OWNER));
    }
    Ok(())
}

#[async_trait]
impl RegistryBackend for MemoryRegistry {
    fn signer_address(&self) -> Option<Address> {
        self.signer
    }

    async fn create_schema(
        &self,
        schema_id: &SchemaId,
        json: &SchemaJson,
    ) -> Result<TransactionReceipt, RawFailure> {
        self.execute(json.len(), |state, from| {
            insert(state, from, schema_id, json)
        })
    }

    async fn admin_create_schema(
        &self,
        owner: Address,
        schema_id: &SchemaId,
        json: &SchemaJson,
    ) -> Result<TransactionReceipt, RawFailure> {
        self.execute(json.len(), |state, from| {
            require_owner(state, from)?;
            insert(state, owner, schema_id, json)
        })
    }

    async fn schema(&self, owner: Address, schema_id: &SchemaId) -> Result<String, RawFailure> {
        let state = self.enter_read()?;
        Ok(state
            .schemas
            .get(&(owner, schema_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn owner(&self) -> Result<Address, RawFailure> {
        let state = self.enter_read()?;
        Ok(state.owner)
    }

    async fn transfer_ownership(
        &self,
        new_owner: Address,
    ) -> Result<TransactionReceipt, RawFailure> {
        self.execute(0, |state, from| {
            require_owner(state, from)?;
            if new_owner == Address::ZERO {
                return Err(revert(INVALID_OWNER));
            }
            state.owner = new_owner;
            Ok(())
        })
    }
}
