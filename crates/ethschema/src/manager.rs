use ethschema_core::{
    validate_address, validate_config, validate_payload, validate_schema_id_with, Address,
    Result, SchemaManagerConfig, TransactionReceipt, ValidationConfig,
};
use ethschema_gateway::{ContractGateway, RegistryBackend, RpcRegistry};
use tracing::debug;

/// Public entry point to a schema registry contract.
///
/// Every operation validates its arguments before any network call, so a
/// validation error guarantees nothing was submitted. Failures past that point
/// come from the gateway already translated.
#[derive(Debug)]
pub struct SchemaManager<B = RpcRegistry> {
    config: SchemaManagerConfig,
    validation: ValidationConfig,
    gateway: ContractGateway<B>,
}

impl SchemaManager<RpcRegistry> {
    /// Validate `config` and build a JSON-RPC backed manager.
    ///
    /// No request is sent. Without a private key the manager is read-only and
    /// write operations fail at call time.
    pub fn new(config: SchemaManagerConfig) -> Result<Self> {
        let backend = RpcRegistry::from_config(&config)?;
        Ok(Self::from_parts(config, backend))
    }
}

impl<B: RegistryBackend> SchemaManager<B> {
    /// Build a manager over an explicit backend. `config` is still validated.
    pub fn with_backend(config: SchemaManagerConfig, backend: B) -> Result<Self> {
        validate_config(&config)?;
        Ok(Self::from_parts(config, backend))
    }

    fn from_parts(config: SchemaManagerConfig, backend: B) -> Self {
        debug!(
            contract = %config.contract_address,
            signer = ?backend.signer_address(),
            "schema manager ready"
        );
        Self {
            config,
            validation: ValidationConfig::default(),
            gateway: ContractGateway::new(backend),
        }
    }

    /// Replace the payload and id rules applied before submission.
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    pub fn config(&self) -> &SchemaManagerConfig {
        &self.config
    }

    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }

    pub fn gateway(&self) -> &ContractGateway<B> {
        &self.gateway
    }

    /// Address that signs writes, if a private key was configured.
    pub fn signer_address(&self) -> Option<Address> {
        self.gateway.signer_address()
    }

    /// Store `json` under `(signer, schema_id)`.
    pub async fn create_schema(&self, schema_id: &str, json: &str) -> Result<TransactionReceipt> {
        let schema_id = validate_schema_id_with(schema_id, self.validation.max_schema_id_len)?;
        let json = validate_payload(json, &self.validation)?;
        self.gateway.create_schema(&schema_id, &json).await
    }

    /// Store `json` under `(owner, schema_id)`; requires the registry owner's key.
    pub async fn admin_create_schema(
        &self,
        owner: &str,
        schema_id: &str,
        json: &str,
    ) -> Result<TransactionReceipt> {
        let owner = validate_address(owner)?;
        let schema_id = validate_schema_id_with(schema_id, self.validation.max_schema_id_len)?;
        let json = validate_payload(json, &self.validation)?;
        self.gateway
            .admin_create_schema(owner, &schema_id, &json)
            .await
    }

    /// Stored schema for the pair, or `None` if there is none.
    pub async fn get_schema(&self, owner: &str, schema_id: &str) -> Result<Option<String>> {
        let owner = validate_address(owner)?;
        let schema_id = validate_schema_id_with(schema_id, self.validation.max_schema_id_len)?;
        self.gateway.get_schema(owner, &schema_id).await
    }

    pub async fn get_owner(&self) -> Result<Address> {
        self.gateway.get_owner().await
    }

    pub async fn transfer_ownership(&self, new_owner: &str) -> Result<TransactionReceipt> {
        let new_owner = validate_address(new_owner)?;
        self.gateway.transfer_ownership(new_owner).await
    }
}
