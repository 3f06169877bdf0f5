mod common;

use contract_core::diagnostics::{CollectingSink, DiagnosticPolicy};
use contract_core::errors::GenError;
use contract_core::flags::GenerationFlags;
use contract_plan::{
    build_plan, from_json_slice, plan_fingerprint, plan_provenance, to_canonical_json_bytes,
    ArtifactEmitter, GenerationPlan, JsonPlanEmitter,
};
use contract_schema::{canonical_schema_hash, FileId};

use common::{builder, diamond, layer, token_with_events};

#[test]
fn repeated_resolution_is_bit_identical() -> Result<(), GenError> {
    let graph = diamond();
    let file = FileId::new("s.proto");
    let flags = GenerationFlags::from_bits(0x0f);

    let mut sink_a = CollectingSink::new();
    let plan_a = build_plan(&graph, &file, flags, &mut sink_a)?;
    let mut sink_b = CollectingSink::new();
    let plan_b = build_plan(&graph, &file, flags, &mut sink_b)?;

    assert_eq!(plan_a, plan_b);
    assert_eq!(to_canonical_json_bytes(&plan_a)?, to_canonical_json_bytes(&plan_b)?);
    assert_eq!(plan_fingerprint(&plan_a)?, plan_fingerprint(&plan_b)?);
    assert_eq!(sink_a, sink_b);
    Ok(())
}

#[test]
fn plans_round_trip_through_json() -> Result<(), GenError> {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let plan = build_plan(
        &graph,
        &FileId::new("token.proto"),
        GenerationFlags::contract_with_events(),
        &mut sink,
    )?;
    let bytes = to_canonical_json_bytes(&plan)?;
    let restored: GenerationPlan = from_json_slice(&bytes)?;
    assert_eq!(restored, plan);
    Ok(())
}

#[test]
fn provenance_records_hashes_and_flags() -> Result<(), GenError> {
    let graph = token_with_events();
    let flags = GenerationFlags::contract_with_events();
    let mut sink = CollectingSink::new();
    let plan = build_plan(&graph, &FileId::new("token.proto"), flags, &mut sink)?;
    let schema_hash = canonical_schema_hash(&graph)?;

    let provenance = plan_provenance(&plan, schema_hash.clone(), flags)?;
    assert_eq!(provenance.schema_hash, schema_hash);
    assert_eq!(provenance.flags_bits, 0x09);
    assert_eq!(provenance.plan_hash, plan_fingerprint(&plan)?);
    assert!(provenance.tool_versions.contains_key("contract-plan"));
    Ok(())
}

#[test]
fn json_emitter_skips_hollow_plans() -> Result<(), GenError> {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let skipped = build_plan(
        &graph,
        &FileId::new("empty.proto"),
        GenerationFlags::contract_with_events(),
        &mut sink,
    )?;
    assert!(JsonPlanEmitter::pretty().emit(&skipped)?.is_none());

    let plan = build_plan(
        &graph,
        &FileId::new("token.proto"),
        GenerationFlags::contract_with_events(),
        &mut sink,
    )?;
    let compact = JsonPlanEmitter::compact().emit(&plan)?.expect("compact output");
    let pretty = JsonPlanEmitter::pretty().emit(&plan)?.expect("pretty output");
    assert!(!compact.contains('\n'));
    assert!(pretty.contains('\n'));
    let from_compact: GenerationPlan = from_json_slice(compact.as_bytes())?;
    let from_pretty: GenerationPlan = from_json_slice(pretty.as_bytes())?;
    assert_eq!(from_compact, from_pretty);
    Ok(())
}

#[test]
fn strict_policy_rejects_degraded_plans() -> Result<(), GenError> {
    let mut builder = builder();
    layer(&mut builder, "s.proto", &[], "S", &["missing.proto"]);
    let graph = builder.build()?;
    let mut sink = CollectingSink::new();
    build_plan(&graph, &FileId::new("s.proto"), GenerationFlags::from_bits(0x01), &mut sink)?;

    assert!(DiagnosticPolicy::lenient().check(sink.diagnostics()).is_ok());
    let err = DiagnosticPolicy::strict()
        .check(sink.diagnostics())
        .unwrap_err();
    assert!(matches!(&err, GenError::Schema(info) if info.code == "unresolved-base"));
    Ok(())
}

#[test]
fn canonical_bytes_sort_nested_keys() -> Result<(), GenError> {
    let value = serde_json::json!({
        "names": {"stub": "S", "container": "C"},
        "chain": [{"index": 1, "file": "b.proto"}],
        "access_level": "public",
    });
    let bytes = to_canonical_json_bytes(&value)?;
    assert_eq!(
        String::from_utf8(bytes).expect("utf8 json"),
        r#"{"access_level":"public","chain":[{"file":"b.proto","index":1}],"names":{"container":"C","stub":"S"}}"#
    );
    Ok(())
}
