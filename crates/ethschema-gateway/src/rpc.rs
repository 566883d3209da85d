use std::fmt;

use alloy::network::EthereumWallet;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt as RpcReceipt;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use ethschema_core::{
    validate_address, validate_config, Address, RawFailure, RegistryError, Result, SchemaId,
    SchemaJson, SchemaManagerConfig, TransactionReceipt,
};
use tracing::debug;

use crate::backend::RegistryBackend;
use crate::classify::{contract_failure, pending_failure};
use crate::contract::SchemaRegistry::{self, SchemaRegistryInstance};

/// JSON-RPC connection to a deployed registry contract.
///
/// Building one performs no network round-trip; the first call does.
#[derive(Clone)]
pub struct RpcRegistry {
    contract: SchemaRegistryInstance<DynProvider>,
    signer: Option<Address>,
}

impl RpcRegistry {
    /// Connect to `contract` through `rpc_url`, signing with `signer` when given.
    pub fn connect(contract: Address, rpc_url: Url, signer: Option<PrivateKeySigner>) -> Self {
        let signer_address = signer.as_ref().map(|signer| signer.address());
        let provider = match signer {
            Some(signer) => ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer))
                .connect_http(rpc_url)
                .erased(),
            None => ProviderBuilder::new().connect_http(rpc_url).erased(),
        };

        Self {
            contract: SchemaRegistry::new(contract, provider),
            signer: signer_address,
        }
    }

    /// Validate `config` and connect with it.
    pub fn from_config(config: &SchemaManagerConfig) -> Result<Self> {
        validate_config(config)?;

        let contract = validate_address(&config.contract_address)?;
        let rpc_url = Url::parse(config.rpc_url.trim()).map_err(|err| {
            RegistryError::validation(format!("invalid rpc url '{}': {err}", config.rpc_url))
        })?;
        let signer = config
            .private_key
            .as_deref()
            .map(parse_signer)
            .transpose()?;

        Ok(Self::connect(contract, rpc_url, signer))
    }

    pub fn contract_address(&self) -> Address {
        *self.contract.address()
    }
}

fn parse_signer(key: &str) -> Result<PrivateKeySigner> {
    let digits = key
        .strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key);
    digits
        .parse::<PrivateKeySigner>()
        .map_err(|_| RegistryError::validation("private key is not a valid secp256k1 key"))
}

fn convert_receipt(receipt: &RpcReceipt) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: receipt.transaction_hash,
        block_hash: receipt.block_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
        effective_gas_price: receipt.effective_gas_price,
        from: receipt.from,
        to: receipt.to,
        status: receipt.status(),
    }
}

#[async_trait]
impl RegistryBackend for RpcRegistry {
    fn signer_address(&self) -> Option<Address> {
        self.signer
    }

    async fn create_schema(
        &self,
        schema_id: &SchemaId,
        json: &SchemaJson,
    ) -> std::result::Result<TransactionReceipt, RawFailure> {
        let pending = self
            .contract
            .createSchema(schema_id.to_string(), json.as_str().to_string())
            .send()
            .await
            .map_err(contract_failure)?;
        debug!(tx_hash = %pending.tx_hash(), "createSchema broadcast");

        let receipt = pending.get_receipt().await.map_err(pending_failure)?;
        Ok(convert_receipt(&receipt))
    }

    async fn admin_create_schema(
        &self,
        owner: Address,
        schema_id: &SchemaId,
        json: &SchemaJson,
    ) -> std::result::Result<TransactionReceipt, RawFailure> {
        let pending = self
            .contract
            .adminCreateSchema(owner, schema_id.to_string(), json.as_str().to_string())
            .send()
            .await
            .map_err(contract_failure)?;
        debug!(tx_hash = %pending.tx_hash(), "adminCreateSchema broadcast");

        let receipt = pending.get_receipt().await.map_err(pending_failure)?;
        Ok(convert_receipt(&receipt))
    }

    async fn schema(
        &self,
        owner: Address,
        schema_id: &SchemaId,
    ) -> std::result::Result<String, RawFailure> {
        self.contract
            .schemas(owner, schema_id.to_string())
            .call()
            .await
            .map_err(contract_failure)
    }

    async fn owner(&self) -> std::result::Result<Address, RawFailure> {
        self.contract
            .owner()
            .call()
            .await
            .map_err(contract_failure)
    }

    async fn transfer_ownership(
        &self,
        new_owner: Address,
    ) -> std::result::Result<TransactionReceipt, RawFailure> {
        let pending = self
            .contract
            .transferOwnership(new_owner)
            .send()
            .await
            .map_err(contract_failure)?;
        debug!(tx_hash = %pending.tx_hash(), "transferOwnership broadcast");

        let receipt = pending.get_receipt().await.map_err(pending_failure)?;
        Ok(convert_receipt(&receipt))
    }
}

impl fmt::Debug for RpcRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcRegistry")
            .field("contract", self.contract.address())
            .field("signer", &self.signer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use ethschema_core::ErrorCode;

    use super::*;

    const CONTRACT: &str = "0xc7336Ea25657Ce7B2E9B8A28624C173C2B80F9c9";
    // Well-known development key (first default Hardhat/Anvil account).
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn builds_without_network_access() {
        let config = SchemaManagerConfig::new(CONTRACT, "http://127.0.0.1:9", Some(DEV_KEY.into()));
        let registry = RpcRegistry::from_config(&config).expect("registry should build");

        assert_eq!(
            registry.contract_address(),
            validate_address(CONTRACT).expect("valid address")
        );
        assert_eq!(
            registry.signer_address(),
            Some(validate_address(DEV_ADDRESS).expect("valid address"))
        );
    }

    #[test]
    fn key_prefix_case_does_not_matter() {
        let bare = &DEV_KEY[2..];
        let expected = Some(validate_address(DEV_ADDRESS).expect("valid address"));
        for key in [bare.to_string(), format!("0X{bare}")] {
            let config = SchemaManagerConfig::new(CONTRACT, "http://127.0.0.1:9", Some(key));
            let registry = RpcRegistry::from_config(&config).expect("registry should build");
            assert_eq!(registry.signer_address(), expected);
        }
    }

    #[test]
    fn read_only_without_key() {
        let config = SchemaManagerConfig::new(CONTRACT, "http://127.0.0.1:9", None);
        let registry = RpcRegistry::from_config(&config).expect("registry should build");
        assert_eq!(registry.signer_address(), None);
    }

    #[test]
    fn rejects_unparseable_rpc_url() {
        let config = SchemaManagerConfig::new(CONTRACT, "not a url", None);
        let err = RpcRegistry::from_config(&config).expect_err("bad url should fail");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[test]
    fn rejects_out_of_range_key() {
        let zero_key = format!("0x{}", "0".repeat(64));
        let config = SchemaManagerConfig::new(CONTRACT, "http://127.0.0.1:9", Some(zero_key));
        let err = RpcRegistry::from_config(&config).expect_err("zero key should fail");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[test]
    fn debug_omits_key_material() {
        let config = SchemaManagerConfig::new(CONTRACT, "http://127.0.0.1:9", Some(DEV_KEY.into()));
        let registry = RpcRegistry::from_config(&config).expect("registry should build");
        let rendered = format!("{registry:?}");
        assert!(!rendered.contains(&DEV_KEY[2..]));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let config = SchemaManagerConfig::new(CONTRACT, "http://127.0.0.1:9", None);
        let registry = RpcRegistry::from_config(&config).expect("registry should build");

        let raw = registry.owner().await.expect_err("nothing listens on port 9");
        let err = RegistryError::from_raw(raw);
        assert_eq!(err.code(), ErrorCode::Network);
    }
}
