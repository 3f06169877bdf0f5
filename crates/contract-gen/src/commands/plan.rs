use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use contract_core::diagnostics::{DiagnosticPolicy, TracingSink};
use contract_core::errors::GenError;
use contract_core::flags::GenerationFlags;
use contract_plan::{build_plan, plan_provenance, ArtifactEmitter, JsonPlanEmitter};
use contract_schema::{canonical_schema_hash, FileId, FileSchemaProvider, SchemaProvider};
use tracing::info;

use crate::config::{load_config, parse_bits, GenConfig};
use crate::writer::PlanWriter;

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Linked schema document (`.json`, or `.bin` for bincode).
    #[arg(long)]
    pub schema: PathBuf,
    /// Schema files to plan; every file when omitted.
    #[arg(long = "file", value_name = "NAME")]
    pub files: Vec<String>,
    /// Output directory; plans go to stdout when neither this nor the config sets one.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Plan the contract base.
    #[arg(long)]
    pub contract: bool,
    /// Plan the tester stub.
    #[arg(long)]
    pub tester: bool,
    /// Plan the reference state.
    #[arg(long)]
    pub reference: bool,
    /// Plan event accessors.
    #[arg(long)]
    pub events: bool,
    /// Use internal visibility.
    #[arg(long)]
    pub internal_access: bool,
    /// Plugin flag bit-set such as `0x09`.
    #[arg(long)]
    pub bits: Option<String>,
    /// Plugin parameter such as `contract,event`.
    #[arg(long)]
    pub parameter: Option<String>,
    /// TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Fail on any schema diagnostic.
    #[arg(long)]
    pub strict: bool,
}

impl PlanArgs {
    fn switches(&self) -> GenerationFlags {
        GenerationFlags {
            contract: self.contract,
            tester: self.tester,
            reference: self.reference,
            events: self.events,
            internal_access: self.internal_access,
        }
    }
}

/// Config flags, then switches, bits and parameter, all OR-ed together.
pub fn resolve_flags(args: &PlanArgs, config: &GenConfig) -> Result<GenerationFlags, GenError> {
    let mut flags = config.flags.union(args.switches());
    if let Some(bits) = &args.bits {
        flags = flags.union(GenerationFlags::from_bits(parse_bits(bits)?));
    }
    if let Some(parameter) = &args.parameter {
        flags = flags.union(GenerationFlags::from_parameter(parameter)?);
    }
    Ok(flags)
}

pub fn run(args: &PlanArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GenConfig::default(),
    };
    let flags = resolve_flags(args, &config)?;
    let policy = DiagnosticPolicy {
        strict: args.strict || config.strict,
    };
    let writer = match args.out.as_ref().or(config.out_dir.as_ref()) {
        Some(dir) => Some(PlanWriter::create(dir)?),
        None => None,
    };

    let graph = FileSchemaProvider::new(&args.schema).load()?;
    let schema_hash = canonical_schema_hash(&graph)?;
    let files: Vec<FileId> = if args.files.is_empty() {
        graph.files().map(|file| file.name.clone()).collect()
    } else {
        args.files.iter().map(|name| FileId::new(name.as_str())).collect()
    };
    info!(
        schema = %args.schema.display(),
        files = files.len(),
        bits = flags.bits(),
        "planning"
    );

    let emitter = JsonPlanEmitter::pretty();
    let mut sink = TracingSink::new();
    for file in &files {
        sink.clear();
        let plan = build_plan(&graph, file, flags, &mut sink)?;
        policy.check(sink.diagnostics())?;

        let Some(text) = emitter.emit(&plan)? else {
            info!(file = %file, reason = ?plan.skip_reason, "skipped");
            continue;
        };
        match &writer {
            Some(writer) => {
                let provenance = plan_provenance(&plan, schema_hash.clone(), flags)?;
                let path = writer.write(file.as_str(), &text, &provenance)?;
                info!(file = %file, path = %path.display(), "wrote plan");
            }
            None => println!("{text}"),
        }
    }
    Ok(())
}
