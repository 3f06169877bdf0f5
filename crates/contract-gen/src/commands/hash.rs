use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use contract_schema::{canonical_schema_hash, FileSchemaProvider, SchemaProvider};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Linked schema document.
    #[arg(long)]
    pub schema: PathBuf,
}

#[derive(Debug, Serialize)]
struct HashReport {
    schema_hash: String,
    files: usize,
    services: usize,
    messages: usize,
}

pub fn run(args: &HashArgs) -> Result<(), Box<dyn Error>> {
    let graph = FileSchemaProvider::new(&args.schema).load()?;
    let report = HashReport {
        schema_hash: canonical_schema_hash(&graph)?,
        files: graph.file_count(),
        services: graph.service_count(),
        messages: graph.message_count(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
