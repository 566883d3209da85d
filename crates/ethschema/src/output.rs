use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use ethschema::{Address, TransactionReceipt};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ReceiptOutput<'a> {
    operation: &'a str,
    #[serde(flatten)]
    receipt: &'a TransactionReceipt,
}

#[derive(Serialize)]
struct SchemaOutput<'a> {
    owner: String,
    schema_id: &'a str,
    found: bool,
    schema: Option<&'a str>,
}

#[derive(Serialize)]
struct OwnerOutput {
    owner: String,
}

pub fn print_receipt(operation: &str, receipt: &TransactionReceipt, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&ReceiptOutput { operation, receipt }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["OPERATION", "TX HASH", "BLOCK", "GAS USED", "STATUS"])
                .add_row(vec![
                    operation.to_string(),
                    receipt.transaction_hash.to_string(),
                    block_label(receipt),
                    receipt.gas_used.to_string(),
                    status_label(receipt).to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "{} mined: tx={} block={} gas_used={} status={}",
                operation,
                receipt.transaction_hash,
                block_label(receipt),
                receipt.gas_used,
                status_label(receipt)
            );
        }
        OutputFormat::Raw => println!("{}", receipt.transaction_hash),
    }
}

pub fn print_schema(owner: &str, schema_id: &str, schema: Option<&str>, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&SchemaOutput {
            owner: owner.to_string(),
            schema_id,
            found: schema.is_some(),
            schema,
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["OWNER", "SCHEMA ID", "SCHEMA"])
                .add_row(vec![
                    owner.to_string(),
                    schema_id.to_string(),
                    schema.unwrap_or("<not found>").to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => match schema {
            Some(schema) => println!("{owner}/{schema_id}: {schema}"),
            None => println!("{owner}/{schema_id}: not found"),
        },
        // Raw output is the stored string exactly, without a trailing newline.
        OutputFormat::Raw => {
            if let Some(schema) = schema {
                let mut out = std::io::stdout();
                let _ = out.write_all(schema.as_bytes());
                let _ = out.flush();
            }
        }
    }
}

pub fn print_owner(owner: Address, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&OwnerOutput {
            owner: owner.to_string(),
        }),
        OutputFormat::Table | OutputFormat::Pretty => println!("Registry owner: {owner}"),
        OutputFormat::Raw => println!("{owner}"),
    }
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn block_label(receipt: &TransactionReceipt) -> String {
    receipt
        .block_number
        .map(|block| block.to_string())
        .unwrap_or_else(|| "pending".to_string())
}

fn status_label(receipt: &TransactionReceipt) -> &'static str {
    if receipt.is_success() {
        "success"
    } else {
        "failed"
    }
}
