use std::error::Error as _;

use ethschema::gateway::{Fault, MemoryRegistry};
use ethschema::{
    Address, ErrorCode, SchemaManager, SchemaManagerConfig, ValidationConfig, NOT_OWNER,
    SCHEMA_EXISTS,
};

const CONTRACT: &str = "0xc7336Ea25657Ce7B2E9B8A28624C173C2B80F9c9";
const RPC_URL: &str = "https://eth-sepolia.example/v2/test";
const KEY: &str = "0x3f6254328fa58202094c954d89964119830f85e2f4bfdbabb1d8bcfc008d2fdd";
const OTHER: &str = "0x4444444444444444444444444444444444444444";

fn admin() -> Address {
    Address::repeat_byte(0xaa)
}

fn client() -> Address {
    Address::repeat_byte(0xbb)
}

fn config() -> SchemaManagerConfig {
    SchemaManagerConfig::new(CONTRACT, RPC_URL, Some(KEY.to_string()))
}

fn manager_for(registry: &MemoryRegistry, signer: Address) -> SchemaManager<MemoryRegistry> {
    SchemaManager::with_backend(config(), registry.connect_as(signer))
        .expect("config should be valid")
}

// A compact JSON-LD context like the ones the registry is used for.
fn sample_schema() -> String {
    r#"{"@context":[{"@version":1.1},"https://www.w3.org/ns/odrl.jsonld",{"ex":"https://example.org/examples#","schema":"http://schema.org/","degree":"ex:degree","name":{"@id":"schema:name","@type":"rdf:HTML"}}]}"#
        .to_string()
}

#[tokio::test]
async fn create_duplicate_and_read_scenario() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, client());

    let receipt = manager
        .create_schema("schema-1", r#"{"a":1}"#)
        .await
        .expect("first create should succeed");
    assert!(receipt.is_success());
    assert!(receipt.block_number.is_some());

    let err = manager
        .create_schema("schema-1", r#"{"a":2}"#)
        .await
        .expect_err("duplicate create should fail");
    assert_eq!(err.code(), ErrorCode::Contract);
    assert_eq!(err.revert_reason(), Some(SCHEMA_EXISTS));

    let signer = manager.signer_address().expect("manager has a signer");
    let stored = manager
        .get_schema(&signer.to_string(), "schema-1")
        .await
        .expect("read should succeed");
    assert_eq!(stored.as_deref(), Some(r#"{"a":1}"#));
}

#[tokio::test]
async fn round_trip_preserves_bytes() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, client());
    let payload = "{\n  \"b\" : [ 1, 2.50, \"\\u00e9\" ],\n  \"a\": null\n}\n";

    manager
        .create_schema("formatted", payload)
        .await
        .expect("create should succeed");
    let stored = manager
        .get_schema(&client().to_string(), "formatted")
        .await
        .expect("read should succeed");

    assert_eq!(stored.as_deref(), Some(payload));

    let sample = sample_schema();
    manager
        .create_schema("json-ld", &sample)
        .await
        .expect("create should succeed");
    let stored = manager
        .get_schema(&client().to_string(), "json-ld")
        .await
        .expect("read should succeed");
    assert_eq!(stored, Some(sample));
}

#[tokio::test]
async fn unused_id_reads_as_absent() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, client());

    let stored = manager
        .get_schema(&client().to_string(), "never-created")
        .await
        .expect("absence is not an error");
    assert_eq!(stored, None);
}

#[tokio::test]
async fn invalid_ids_never_reach_the_network() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, client());
    let too_long = "x".repeat(257);
    let owner = client().to_string();

    for id in ["", "   ", "\t\n", too_long.as_str()] {
        let err = manager
            .create_schema(id, "{}")
            .await
            .expect_err("create with bad id should fail");
        assert_eq!(err.code(), ErrorCode::Validation);

        let err = manager
            .admin_create_schema(&owner, id, "{}")
            .await
            .expect_err("admin create with bad id should fail");
        assert_eq!(err.code(), ErrorCode::Validation);

        let err = manager
            .get_schema(&owner, id)
            .await
            .expect_err("read with bad id should fail");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    assert_eq!(registry.calls(), 0);
}

#[tokio::test]
async fn invalid_json_is_rejected_before_submission() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, admin());

    for payload in ["", "  ", "invalid-json", "{\"a\":", "{a:1}"] {
        let err = manager
            .create_schema("schema", payload)
            .await
            .expect_err("bad json should fail");
        assert_eq!(err.code(), ErrorCode::Validation);

        let err = manager
            .admin_create_schema(OTHER, "schema", payload)
            .await
            .expect_err("bad json should fail");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    assert_eq!(registry.calls(), 0);
}

#[tokio::test]
async fn invalid_addresses_are_validation_errors() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, admin());

    let err = manager
        .get_schema("invalid-address", "schema")
        .await
        .expect_err("bad owner should fail");
    assert_eq!(err.code(), ErrorCode::Validation);

    let err = manager
        .admin_create_schema("invalid-address", "schema", "{}")
        .await
        .expect_err("bad target should fail");
    assert_eq!(err.code(), ErrorCode::Validation);

    let err = manager
        .transfer_ownership("invalid-address")
        .await
        .expect_err("bad new owner should fail");
    assert_eq!(err.code(), ErrorCode::Validation);

    assert_eq!(registry.calls(), 0);
}

#[tokio::test]
async fn admin_create_by_non_owner_is_not_owner() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, client());

    let err = manager
        .admin_create_schema(OTHER, "schema-1", "{}")
        .await
        .expect_err("client is not the registry owner");
    assert_eq!(err.code(), ErrorCode::Contract);
    assert_eq!(err.revert_reason(), Some(NOT_OWNER));
}

#[tokio::test]
async fn admin_creates_for_other_addresses() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, admin());

    manager
        .admin_create_schema(OTHER, "schema-1", "{}")
        .await
        .expect("owner may create for others");
    let stored = manager
        .get_schema(OTHER, "schema-1")
        .await
        .expect("read should succeed");
    assert_eq!(stored.as_deref(), Some("{}"));

    let err = manager
        .admin_create_schema(OTHER, "schema-1", "[]")
        .await
        .expect_err("pair already exists");
    assert_eq!(err.revert_reason(), Some(SCHEMA_EXISTS));
}

#[tokio::test]
async fn owner_read_and_transfer() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, admin());

    assert_eq!(manager.get_owner().await.expect("owner read"), admin());

    let receipt = manager
        .transfer_ownership(OTHER)
        .await
        .expect("owner may transfer");
    assert!(receipt.is_success());
    assert_eq!(
        manager.get_owner().await.expect("owner read").to_string(),
        "0x4444444444444444444444444444444444444444"
    );

    let err = manager
        .transfer_ownership(&admin().to_string())
        .await
        .expect_err("former owner can no longer transfer");
    assert_eq!(err.revert_reason(), Some(NOT_OWNER));
}

#[tokio::test]
async fn writes_fail_at_call_time_without_key() {
    let registry = MemoryRegistry::new(admin());
    let config = SchemaManagerConfig::new(CONTRACT, RPC_URL, None);
    let manager = SchemaManager::with_backend(config, registry.read_only())
        .expect("signer is optional at construction");

    let err = manager
        .create_schema("schema-1", "{}")
        .await
        .expect_err("create needs a key");
    assert_eq!(err.code(), ErrorCode::Validation);

    let err = manager
        .admin_create_schema(OTHER, "schema-1", "{}")
        .await
        .expect_err("admin create needs a key");
    assert_eq!(err.code(), ErrorCode::Validation);

    let err = manager
        .transfer_ownership(OTHER)
        .await
        .expect_err("transfer needs a key");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(registry.calls(), 0);

    assert_eq!(manager.get_owner().await.expect("reads still work"), admin());
}

#[tokio::test]
async fn failed_status_and_outage_are_typed() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, client());

    registry.inject(Fault::FailedReceipt);
    let err = manager
        .create_schema("schema-1", "{}")
        .await
        .expect_err("failed receipt is an error");
    assert_eq!(err.code(), ErrorCode::Contract);

    registry.inject(Fault::NetworkOutage);
    let err = manager
        .get_schema(&client().to_string(), "schema-1")
        .await
        .expect_err("outage is an error");
    assert_eq!(err.code(), ErrorCode::Network);
    assert!(err.source().is_some());

    let stored = manager
        .get_schema(&client().to_string(), "schema-1")
        .await
        .expect("read should succeed");
    assert_eq!(stored, None);
}

#[tokio::test]
async fn concurrent_duplicate_creates_have_one_winner() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, client());

    let (first, second) = tokio::join!(
        manager.create_schema("race", r#"{"n":1}"#),
        manager.create_schema("race", r#"{"n":2}"#),
    );

    let outcomes = [first, second];
    let winners = outcomes.iter().filter(|result| result.is_ok()).count();
    assert_eq!(winners, 1);
    let loser = outcomes
        .iter()
        .find_map(|result| result.as_ref().err())
        .expect("one create must fail");
    assert_eq!(loser.revert_reason(), Some(SCHEMA_EXISTS));
}

#[tokio::test]
async fn strict_mode_requires_json_schema() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, client()).with_validation(ValidationConfig {
        strict_json_schema: true,
        ..ValidationConfig::default()
    });

    let err = manager
        .create_schema("strict", r#"{"type": 7}"#)
        .await
        .expect_err("not a valid JSON Schema");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(registry.calls(), 0);

    manager
        .create_schema("strict", r#"{"type":"object"}"#)
        .await
        .expect("valid JSON Schema should be stored");
}

#[tokio::test]
async fn strict_mode_rejects_remote_refs_without_fetching() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, client()).with_validation(ValidationConfig {
        strict_json_schema: true,
        ..ValidationConfig::default()
    });

    let err = manager
        .create_schema("remote", r#"{"$ref":"http://127.0.0.1:9/s.json"}"#)
        .await
        .expect_err("unresolvable reference should fail");
    assert_eq!(err.code(), ErrorCode::Validation);

    let err = manager
        .admin_create_schema(OTHER, "remote", r#"{"$ref":"https://example.org/s.json"}"#)
        .await
        .expect_err("unresolvable reference should fail");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(registry.calls(), 0);
}

#[tokio::test]
async fn deeply_nested_payload_round_trips() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, client());
    let payload = format!("{}{}", "[".repeat(200), "]".repeat(200));

    manager
        .create_schema("deep", &payload)
        .await
        .expect("deep but well-formed json should be stored");
    let stored = manager
        .get_schema(&client().to_string(), "deep")
        .await
        .expect("read should succeed");
    assert_eq!(stored, Some(payload));
}

#[tokio::test]
async fn raised_id_limit_is_capped_at_registry_bound() {
    let registry = MemoryRegistry::new(admin());
    let manager = manager_for(&registry, client()).with_validation(ValidationConfig {
        max_schema_id_len: 1_000,
        ..ValidationConfig::default()
    });

    let err = manager
        .create_schema(&"x".repeat(257), "{}")
        .await
        .expect_err("257 characters exceeds the registry bound");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(registry.calls(), 0);

    manager
        .create_schema(&"x".repeat(256), "{}")
        .await
        .expect("256 characters is allowed");
}

#[test]
fn construction_rejects_empty_rpc_url() {
    let err = SchemaManager::new(SchemaManagerConfig::new(CONTRACT, "", Some(KEY.into())))
        .expect_err("empty rpc url should fail");
    assert_eq!(err.code(), ErrorCode::Validation);

    let registry = MemoryRegistry::new(admin());
    let err = SchemaManager::with_backend(
        SchemaManagerConfig::new(CONTRACT, "  ", None),
        registry.clone(),
    )
    .expect_err("blank rpc url should fail");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(registry.calls(), 0);
}

#[test]
fn construction_rejects_bad_contract_and_key() {
    let err = SchemaManager::new(SchemaManagerConfig::new("0xAbC", RPC_URL, None))
        .expect_err("short address should fail");
    assert_eq!(err.code(), ErrorCode::Validation);

    let err = SchemaManager::new(SchemaManagerConfig::new(
        CONTRACT,
        RPC_URL,
        Some("0x1234".into()),
    ))
    .expect_err("short key should fail");
    assert_eq!(err.code(), ErrorCode::Validation);
}

#[test]
fn construction_with_key_exposes_signer() {
    let manager = SchemaManager::new(config()).expect("config is valid");
    assert!(manager.signer_address().is_some());
    assert_eq!(manager.config().rpc_url, RPC_URL);

    let read_only =
        SchemaManager::new(SchemaManagerConfig::new(CONTRACT, RPC_URL, None)).expect("valid");
    assert!(read_only.signer_address().is_none());
}
