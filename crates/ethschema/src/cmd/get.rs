use ethschema::SchemaManager;
use ethschema_gateway::RegistryBackend;

use crate::cmd::GetArgs;
use crate::exit::{registry_error, CliResult, SUCCESS};
use crate::output::{print_schema, OutputFormat};

/// A missing record is reported in the output, not as a failure.
pub async fn run<B: RegistryBackend>(
    args: GetArgs,
    manager: &SchemaManager<B>,
    format: OutputFormat,
) -> CliResult<i32> {
    let schema = manager
        .get_schema(&args.owner, &args.schema_id)
        .await
        .map_err(|err| registry_error("get failed", err))?;

    print_schema(&args.owner, &args.schema_id, schema.as_deref(), format);
    Ok(SUCCESS)
}
