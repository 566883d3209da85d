use ethschema::SchemaManager;
use ethschema_gateway::RegistryBackend;

use crate::cmd::TransferOwnershipArgs;
use crate::exit::{registry_error, CliResult, SUCCESS};
use crate::output::{print_owner, print_receipt, OutputFormat};

pub async fn run<B: RegistryBackend>(
    manager: &SchemaManager<B>,
    format: OutputFormat,
) -> CliResult<i32> {
    let owner = manager
        .get_owner()
        .await
        .map_err(|err| registry_error("owner lookup failed", err))?;

    print_owner(owner, format);
    Ok(SUCCESS)
}

pub async fn run_transfer<B: RegistryBackend>(
    args: TransferOwnershipArgs,
    manager: &SchemaManager<B>,
    format: OutputFormat,
) -> CliResult<i32> {
    let receipt = manager
        .transfer_ownership(&args.new_owner)
        .await
        .map_err(|err| registry_error("ownership transfer failed", err))?;

    print_receipt("transferOwnership", &receipt, format);
    Ok(SUCCESS)
}
