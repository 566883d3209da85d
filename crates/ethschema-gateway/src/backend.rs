use async_trait::async_trait;
use ethschema_core::{Address, RawFailure, SchemaId, SchemaJson, TransactionReceipt};

/// Connection to a registry contract, optionally with a signing identity.
///
/// Implementations perform the call and report failures as [`RawFailure`]
/// without classifying them further; translation into typed errors happens in
/// [`crate::ContractGateway`]. Write methods resolve only once the transaction
/// is mined and must return the receipt as-is, including a failed status.
#[async_trait]
pub trait RegistryBackend: Send + Sync {
    /// Address of the signing identity, if one is attached.
    fn signer_address(&self) -> Option<Address>;

    /// Store `json` under `(signer, schema_id)`.
    async fn create_schema(
        &self,
        schema_id: &SchemaId,
        json: &SchemaJson,
    ) -> Result<TransactionReceipt, RawFailure>;

    /// Store `json` under `(owner, schema_id)` on behalf of the registry owner.
    async fn admin_create_schema(
        &self,
        owner: Address,
        schema_id: &SchemaId,
        json: &SchemaJson,
    ) -> Result<TransactionReceipt, RawFailure>;

    /// Stored payload for the pair; the registry returns an empty string for unknown pairs.
    async fn schema(&self, owner: Address, schema_id: &SchemaId) -> Result<String, RawFailure>;

    /// Current administrative owner of the registry.
    async fn owner(&self) -> Result<Address, RawFailure>;

    async fn transfer_ownership(&self, new_owner: Address)
        -> Result<TransactionReceipt, RawFailure>;
}
