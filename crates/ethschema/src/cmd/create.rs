use ethschema::SchemaManager;
use ethschema_gateway::RegistryBackend;

use crate::cmd::{AdminCreateArgs, CreateArgs};
use crate::exit::{registry_error, CliResult, SUCCESS};
use crate::output::{print_receipt, OutputFormat};

pub async fn run<B: RegistryBackend>(
    args: CreateArgs,
    manager: &SchemaManager<B>,
    format: OutputFormat,
) -> CliResult<i32> {
    let payload = args.payload.resolve()?;
    let receipt = manager
        .create_schema(&args.schema_id, &payload)
        .await
        .map_err(|err| registry_error("create failed", err))?;

    print_receipt("createSchema", &receipt, format);
    Ok(SUCCESS)
}

pub async fn run_admin<B: RegistryBackend>(
    args: AdminCreateArgs,
    manager: &SchemaManager<B>,
    format: OutputFormat,
) -> CliResult<i32> {
    let payload = args.payload.resolve()?;
    let receipt = manager
        .admin_create_schema(&args.owner, &args.schema_id, &payload)
        .await
        .map_err(|err| registry_error("admin create failed", err))?;

    print_receipt("adminCreateSchema", &receipt, format);
    Ok(SUCCESS)
}
