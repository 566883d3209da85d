//! Typed async access to the on-chain `SchemaRegistry` contract.
//!
//! [`ContractGateway`] runs the five registry operations over any
//! [`RegistryBackend`]. [`RpcRegistry`] is the JSON-RPC backend built on
//! `alloy`; `MemoryRegistry` (feature `memory`) keeps the same rules in
//! process for tests.

pub mod backend;
mod classify;
pub mod contract;
pub mod gateway;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod rpc;

pub use backend::RegistryBackend;
pub use gateway::ContractGateway;
#[cfg(any(test, feature = "memory"))]
pub use memory::{Fault, MemoryRegistry};
pub use rpc::RpcRegistry;
