use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use contract_core::diagnostics::{Diagnostic, DiagnosticPolicy, TracingSink};
use contract_plan::{build_universe, collect_used_messages, resolve_chain};
use contract_schema::{FileId, FileSchemaProvider, MessageId, SchemaProvider, ServiceId};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Linked schema document.
    #[arg(long)]
    pub schema: PathBuf,
    /// Fully-qualified service name.
    #[arg(long)]
    pub service: String,
    /// Fail on any schema diagnostic.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct ChainReport {
    service: ServiceId,
    universe: Vec<FileId>,
    chain: Vec<ServiceId>,
    methods: Vec<String>,
    messages: Vec<MessageId>,
    diagnostics: Vec<Diagnostic>,
}

pub fn run(args: &ChainArgs) -> Result<(), Box<dyn Error>> {
    let graph = FileSchemaProvider::new(&args.schema).load()?;
    let target = ServiceId::new(args.service.as_str());
    let mut sink = TracingSink::new();
    let universe = build_universe(&graph, &target, &mut sink)?;
    let chain = resolve_chain(&graph, &universe, &target, &mut sink)?;
    DiagnosticPolicy {
        strict: args.strict,
    }
    .check(sink.diagnostics())?;

    let report = ChainReport {
        service: target,
        universe: universe.files().to_vec(),
        chain: chain.services().to_vec(),
        methods: chain
            .methods()
            .iter()
            .map(|resolved| format!("{}/{}", resolved.service, resolved.method.name))
            .collect(),
        messages: collect_used_messages(chain.methods().iter().map(|resolved| &resolved.method)),
        diagnostics: sink.diagnostics().to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
