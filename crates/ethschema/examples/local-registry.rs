//! Walk through the registry lifecycle against an in-memory backend.
//!
//! Run with `cargo run -p ethschema --example local-registry --features memory`.

use ethschema::gateway::MemoryRegistry;
use ethschema::{Address, SchemaManager, SchemaManagerConfig};

const CONTRACT: &str = "0xc7336Ea25657Ce7B2E9B8A28624C173C2B80F9c9";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let admin = Address::repeat_byte(0xaa);
    let client = Address::repeat_byte(0xbb);
    let registry = MemoryRegistry::new(admin);

    let config = SchemaManagerConfig::new(CONTRACT, "http://localhost:8545", None);
    let as_client = SchemaManager::with_backend(config.clone(), registry.connect_as(client))?;
    let as_admin = SchemaManager::with_backend(config, registry.connect_as(admin))?;

    let receipt = as_client
        .create_schema("degree", r#"{"@context":{"degree":"ex:degree"}}"#)
        .await?;
    println!(
        "created degree: tx={} block={:?}",
        receipt.transaction_hash, receipt.block_number
    );

    match as_client.create_schema("degree", "{}").await {
        Ok(_) => println!("unexpected: duplicate accepted"),
        Err(err) => println!("duplicate rejected: {err} ({:?})", err.revert_reason()),
    }

    let stored = as_client.get_schema(&client.to_string(), "degree").await?;
    println!("stored: {}", stored.as_deref().unwrap_or("<none>"));

    as_admin
        .admin_create_schema(&client.to_string(), "profile", r#"{"type":"object"}"#)
        .await?;
    println!("registry owner: {}", as_admin.get_owner().await?);

    Ok(())
}
