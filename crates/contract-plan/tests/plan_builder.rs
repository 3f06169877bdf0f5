mod common;

use contract_core::diagnostics::{CollectingSink, DiagnosticKind};
use contract_core::errors::GenError;
use contract_core::flags::GenerationFlags;
use contract_plan::{build_plan, AccessLevel, MethodKind, SkipReason};
use contract_schema::{FileId, MessageId, MethodStreaming, ServiceId};

use common::{builder, layer, service, token_with_events};

fn contract_flags() -> GenerationFlags {
    GenerationFlags {
        contract: true,
        ..GenerationFlags::none()
    }
}

fn events_only() -> GenerationFlags {
    GenerationFlags {
        events: true,
        ..GenerationFlags::none()
    }
}

#[test]
fn file_without_services_is_skipped_for_any_flags() -> Result<(), GenError> {
    let graph = token_with_events();
    let file = FileId::new("empty.proto");
    for bits in [0x00, 0x01, 0x02, 0x04, 0x08, 0x09, 0x0f, 0x8f] {
        let mut sink = CollectingSink::new();
        let plan = build_plan(&graph, &file, GenerationFlags::from_bits(bits), &mut sink)?;
        assert!(plan.skip);
        assert_eq!(plan.skip_reason, Some(SkipReason::NoServices));
        assert!(plan.chain.is_empty());
        assert!(plan.names.is_none());
        assert!(sink.is_empty());
    }
    Ok(())
}

#[test]
fn events_only_without_event_messages_is_skipped() -> Result<(), GenError> {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let plan = build_plan(&graph, &FileId::new("quiet.proto"), events_only(), &mut sink)?;
    assert!(plan.skip);
    assert_eq!(plan.skip_reason, Some(SkipReason::NoEventMessages));

    let plan = build_plan(
        &graph,
        &FileId::new("quiet.proto"),
        GenerationFlags::contract_with_events(),
        &mut sink,
    )?;
    assert!(!plan.skip);
    assert!(plan.events.is_empty());
    assert!(plan.groups.events);
    Ok(())
}

#[test]
fn events_only_plan_carries_file_events() -> Result<(), GenError> {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let plan = build_plan(&graph, &FileId::new("token.proto"), events_only(), &mut sink)?;
    assert!(!plan.skip);
    assert!(plan.groups.events);
    assert!(plan.groups.scaffolding && plan.groups.descriptors);
    assert!(!plan.groups.contract && !plan.groups.tester && !plan.groups.reference);

    let names: Vec<_> = plan.events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Transferred", "Burned"]);
    Ok(())
}

#[test]
fn event_projections_follow_declaration_order() -> Result<(), GenError> {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let plan = build_plan(
        &graph,
        &FileId::new("token.proto"),
        GenerationFlags::contract_with_events(),
        &mut sink,
    )?;

    let transferred = &plan.events[0];
    assert_eq!(transferred.message, MessageId::new("token.Transferred"));
    let indexed: Vec<_> = transferred.indexed.iter().map(|p| p.names()).collect();
    assert_eq!(indexed, vec![vec!["f1"], vec!["f3"]]);
    assert_eq!(transferred.non_indexed.names(), vec!["f2"]);
    assert_eq!(transferred.indexed[1].fields[0].accessor, "F3");

    let burned = &plan.events[1];
    assert_eq!(burned.indexed.len(), 1);
    assert!(burned.non_indexed.is_empty());
    Ok(())
}

#[test]
fn events_are_left_out_unless_requested() -> Result<(), GenError> {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let plan = build_plan(&graph, &FileId::new("token.proto"), contract_flags(), &mut sink)?;
    assert!(plan.events.is_empty());
    assert!(!plan.groups.events);
    Ok(())
}

#[test]
fn contract_plan_resolves_chain_methods_and_messages() -> Result<(), GenError> {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let plan = build_plan(&graph, &FileId::new("token.proto"), contract_flags(), &mut sink)?;
    assert!(sink.is_empty());

    assert_eq!(plan.service, Some(ServiceId::new("token.TokenContract")));
    assert_eq!(
        plan.chain,
        vec![
            ServiceId::new("acs1.MethodFeeProvider"),
            ServiceId::new("token.TokenContract"),
        ]
    );
    let methods: Vec<_> = plan.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        methods,
        vec!["DoMethodFeeProvider", "Transfer", "GetBalance", "Watch", "Upload"]
    );
    let messages: Vec<_> = plan.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "shared.Empty",
            "shared.Value",
            "token.TransferInput",
            "token.Transferred",
        ]
    );

    let descriptors: Vec<_> = plan
        .descriptors
        .iter()
        .map(|d| (d.file.as_str(), d.index))
        .collect();
    assert_eq!(descriptors, vec![("acs1.proto", 0), ("token.proto", 0)]);
    Ok(())
}

#[test]
fn methods_carry_kind_and_parameter_shape() -> Result<(), GenError> {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let plan = build_plan(&graph, &FileId::new("token.proto"), contract_flags(), &mut sink)?;

    let transfer = &plan.methods[1];
    assert_eq!(transfer.kind, MethodKind::Action);
    assert_eq!(transfer.field_name, "__Method_Transfer");
    assert!(!transfer.shape.request_stream && !transfer.shape.response_stream);

    let balance = &plan.methods[2];
    assert_eq!(balance.kind, MethodKind::View);

    let watch = &plan.methods[3];
    assert_eq!(watch.streaming, MethodStreaming::ServerStreaming);
    assert!(!watch.shape.request_stream && watch.shape.response_stream);

    let upload = &plan.methods[4];
    assert_eq!(upload.streaming, MethodStreaming::ClientStreaming);
    assert!(upload.shape.request_stream && !upload.shape.response_stream);
    Ok(())
}

#[test]
fn derived_names_match_generated_code() -> Result<(), GenError> {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let plan = build_plan(&graph, &FileId::new("token.proto"), contract_flags(), &mut sink)?;
    let names = plan.names.as_ref().expect("names for planned service");

    assert_eq!(names.full_name, "token.TokenContract");
    assert_eq!(names.container, "TokenContractContainer");
    assert_eq!(names.contract_base, "TokenContractBase");
    assert_eq!(names.stub, "TokenContractStub");
    assert_eq!(names.reference_state, "TokenContractReferenceState");
    assert_eq!(names.service_name_field, "__ServiceName");
    assert_eq!(names.state_type, "TokenContractState");
    assert_eq!(plan.messages[0].marshaller_field, "__Marshaller_shared_Empty");
    assert_eq!(plan.access_level, AccessLevel::Public);
    Ok(())
}

#[test]
fn internal_access_and_missing_state_type() -> Result<(), GenError> {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let flags = GenerationFlags::from_bits(GenerationFlags::CONTRACT | GenerationFlags::INTERNAL_ACCESS);
    let plan = build_plan(&graph, &FileId::new("quiet.proto"), flags, &mut sink)?;

    assert_eq!(plan.access_level, AccessLevel::Internal);
    assert_eq!(plan.access_level.as_str(), "internal");
    assert_eq!(plan.names.as_ref().map(|n| n.state_type.as_str()), Some(""));
    assert!(sink.is_empty());
    Ok(())
}

#[test]
fn groups_follow_flags() -> Result<(), GenError> {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let plan = build_plan(
        &graph,
        &FileId::new("token.proto"),
        GenerationFlags::tester_with_events(),
        &mut sink,
    )?;
    assert!(plan.groups.tester && plan.groups.events);
    assert!(!plan.groups.contract && !plan.groups.reference);
    assert!(plan.groups.scaffolding && plan.groups.descriptors);
    Ok(())
}

#[test]
fn multi_service_file_uses_first_service() -> Result<(), GenError> {
    let mut builder = builder();
    layer(&mut builder, "pair.proto", &[], "First", &[]);
    builder.service("pair.proto", service("Second", &[], &[]));
    let graph = builder.build()?;
    let mut sink = CollectingSink::new();

    let plan = build_plan(&graph, &FileId::new("pair.proto"), contract_flags(), &mut sink)?;
    assert!(!plan.skip);
    assert_eq!(plan.service, Some(ServiceId::new("pair.First")));
    assert_eq!(sink.count(DiagnosticKind::MultipleServices), 1);
    assert_eq!(sink.diagnostics()[0].subject, "pair.First");
    Ok(())
}

#[test]
fn unresolved_base_does_not_abort_planning() -> Result<(), GenError> {
    let mut builder = builder();
    layer(&mut builder, "s.proto", &[], "S", &["missing.proto"]);
    let graph = builder.build()?;
    let mut sink = CollectingSink::new();

    let plan = build_plan(&graph, &FileId::new("s.proto"), contract_flags(), &mut sink)?;
    assert_eq!(plan.chain, vec![ServiceId::new("s.S")]);
    assert_eq!(sink.count(DiagnosticKind::UnresolvedBase), 1);
    Ok(())
}

#[test]
fn unknown_file_is_an_error() {
    let graph = token_with_events();
    let mut sink = CollectingSink::new();
    let err = build_plan(&graph, &FileId::new("nope.proto"), contract_flags(), &mut sink)
        .unwrap_err();
    assert_eq!(err.code(), "missing-file");
}
