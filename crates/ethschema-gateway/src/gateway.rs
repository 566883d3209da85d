use ethschema_core::{
    Address, RawFailure, RegistryError, Result, SchemaId, SchemaJson, TransactionReceipt,
};
use tracing::{debug, info, warn};

use crate::backend::RegistryBackend;

/// Typed operations over one registry backend.
///
/// Inputs arrive already validated (see [`ethschema_core::validate`]); this
/// layer enforces the signing requirement, turns failed receipts into errors and
/// is the only place backend failures are translated.
#[derive(Debug, Clone)]
pub struct ContractGateway<B> {
    backend: B,
}

impl<B: RegistryBackend> ContractGateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn signer_address(&self) -> Option<Address> {
        self.backend.signer_address()
    }

    /// Store `json` under `(signer, schema_id)` and wait for it to be mined.
    pub async fn create_schema(
        &self,
        schema_id: &SchemaId,
        json: &SchemaJson,
    ) -> Result<TransactionReceipt> {
        let signer = self.require_signer("createSchema")?;
        debug!(%signer, %schema_id, bytes = json.len(), "submitting createSchema");

        let receipt = translate("createSchema", self.backend.create_schema(schema_id, json).await)?;
        ensure_mined("createSchema", receipt)
    }

    /// Store `json` under `(owner, schema_id)`. The signer must own the registry.
    pub async fn admin_create_schema(
        &self,
        owner: Address,
        schema_id: &SchemaId,
        json: &SchemaJson,
    ) -> Result<TransactionReceipt> {
        let signer = self.require_signer("adminCreateSchema")?;
        debug!(%signer, %owner, %schema_id, bytes = json.len(), "submitting adminCreateSchema");

        let receipt = translate(
            "adminCreateSchema",
            self.backend
                .admin_create_schema(owner, schema_id, json)
                .await,
        )?;
        ensure_mined("adminCreateSchema", receipt)
    }

    /// Stored payload for the pair, or `None` when the registry holds no record.
    pub async fn get_schema(&self, owner: Address, schema_id: &SchemaId) -> Result<Option<String>> {
        let stored = translate("schemas", self.backend.schema(owner, schema_id).await)?;
        if stored.is_empty() {
            debug!(%owner, %schema_id, "no schema stored");
            return Ok(None);
        }
        Ok(Some(stored))
    }

    pub async fn get_owner(&self) -> Result<Address> {
        translate("owner", self.backend.owner().await)
    }

    /// Hand administrative ownership to `new_owner`. The signer must be the current owner.
    pub async fn transfer_ownership(&self, new_owner: Address) -> Result<TransactionReceipt> {
        let signer = self.require_signer("transferOwnership")?;
        debug!(%signer, %new_owner, "submitting transferOwnership");

        let receipt = translate(
            "transferOwnership",
            self.backend.transfer_ownership(new_owner).await,
        )?;
        ensure_mined("transferOwnership", receipt)
    }

    fn require_signer(&self, operation: &str) -> Result<Address> {
        self.backend.signer_address().ok_or_else(|| {
            RegistryError::validation(format!(
                "signing required: {operation} needs a private key"
            ))
        })
    }
}

fn translate<T>(operation: &str, result: std::result::Result<T, RawFailure>) -> Result<T> {
    result.map_err(|raw| {
        let err = RegistryError::from_raw(raw);
        warn!(
            operation,
            code = %err.code(),
            reason = err.revert_reason().unwrap_or("-"),
            "registry call failed: {}",
            err.message()
        );
        err
    })
}

fn ensure_mined(operation: &str, receipt: TransactionReceipt) -> Result<TransactionReceipt> {
    if !receipt.is_success() {
        warn!(operation, tx_hash = %receipt.transaction_hash, "transaction mined with failure status");
        return Err(RegistryError::contract(
            format!(
                "{operation} transaction {} failed (status 0)",
                receipt.transaction_hash
            ),
            None,
        ));
    }

    info!(
        operation,
        tx_hash = %receipt.transaction_hash,
        block = receipt.block_number.unwrap_or_default(),
        gas_used = receipt.gas_used,
        "transaction mined"
    );
    Ok(receipt)
}
