use contract_core::diagnostics::{Diagnostic, DiagnosticSink};
use contract_core::errors::GenError;
use contract_core::flags::GenerationFlags;
use contract_core::provenance::SchemaVersion;
use contract_schema::{FileId, MessageId, MethodStreaming, SchemaGraph, ServiceId};
use serde::{Deserialize, Serialize};

use crate::events::{plan_events, EventPlan};
use crate::inheritance::resolve_chain;
use crate::naming::{
    marshaller_field_name, method_field_name, AccessLevel, MethodKind, ParameterShape,
    ServiceNames,
};
use crate::universe::build_universe;
use crate::used_types::collect_used_messages;

/// Why a plan is intentionally empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The file declares no service.
    NoServices,
    /// Only events were requested and the file declares no event message.
    NoEventMessages,
}

/// Artifact groups selected for emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtifactGroups {
    /// Method, marshaller and service-name fields.
    pub scaffolding: bool,
    /// Descriptor accessors for the chain services.
    pub descriptors: bool,
    /// Contract base class.
    pub contract: bool,
    /// Tester stub.
    pub tester: bool,
    /// Reference state.
    pub reference: bool,
    /// Event accessors.
    pub events: bool,
}

impl ArtifactGroups {
    fn for_flags(flags: &GenerationFlags) -> Self {
        Self {
            scaffolding: true,
            descriptors: true,
            contract: flags.contract,
            tester: flags.tester,
            reference: flags.reference,
            events: flags.events,
        }
    }
}

/// A method to emit, in resolved chain order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMethod {
    /// Chain service declaring the method.
    pub service: ServiceId,
    /// Method name.
    pub name: String,
    /// Method descriptor field.
    pub field_name: String,
    /// View or action.
    pub kind: MethodKind,
    /// Request message.
    pub input: MessageId,
    /// Response message.
    pub output: MessageId,
    /// Streaming classification.
    pub streaming: MethodStreaming,
    /// Parameter shape of the generated method.
    pub shape: ParameterShape,
}

/// A message that needs a marshaller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMessage {
    /// Message.
    pub id: MessageId,
    /// Marshaller field.
    pub marshaller_field: String,
}

/// Location of a chain service's descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorRef {
    /// Declaring file.
    pub file: FileId,
    /// Service index within the file.
    pub index: usize,
}

/// Target-independent description of what to emit for one schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPlan {
    /// Layout version of the serialized plan.
    pub format: SchemaVersion,
    /// File the plan was built for.
    pub file: FileId,
    /// Nothing should be emitted.
    pub skip: bool,
    /// Reason for a skipped plan.
    pub skip_reason: Option<SkipReason>,
    /// Target service.
    pub service: Option<ServiceId>,
    /// Resolved chain, ancestors first.
    pub chain: Vec<ServiceId>,
    /// Methods in chain order.
    pub methods: Vec<PlannedMethod>,
    /// Messages used by the methods, first occurrence order.
    pub messages: Vec<PlannedMessage>,
    /// Selected artifact groups.
    pub groups: ArtifactGroups,
    /// Event accessor plans for the file.
    pub events: Vec<EventPlan>,
    /// Derived class and field names.
    pub names: Option<ServiceNames>,
    /// Descriptor accessors, chain order.
    pub descriptors: Vec<DescriptorRef>,
    /// Visibility of generated types.
    pub access_level: AccessLevel,
}

impl GenerationPlan {
    fn skipped(file: &FileId, reason: SkipReason, flags: &GenerationFlags) -> Self {
        Self {
            format: SchemaVersion::default(),
            file: file.clone(),
            skip: true,
            skip_reason: Some(reason),
            service: None,
            chain: Vec::new(),
            methods: Vec::new(),
            messages: Vec::new(),
            groups: ArtifactGroups::default(),
            events: Vec::new(),
            names: None,
            descriptors: Vec::new(),
            access_level: AccessLevel::from_internal(flags.internal_access),
        }
    }
}

/// Builds the generation plan for `file`.
///
/// Files without services and events-only requests on files without event messages
/// yield skipped plans. A file with several services is planned for its first one.
/// Schema-authoring problems go to `sink`; only graph inconsistencies are errors.
pub fn build_plan(
    graph: &SchemaGraph,
    file: &FileId,
    flags: GenerationFlags,
    sink: &mut dyn DiagnosticSink,
) -> Result<GenerationPlan, GenError> {
    let services = &graph.file(file)?.services;
    let Some(target) = services.first() else {
        tracing::debug!(file = %file, "no services, skipping");
        return Ok(GenerationPlan::skipped(file, SkipReason::NoServices, &flags));
    };
    if services.len() > 1 {
        sink.report(Diagnostic::multiple_services(
            file.as_str(),
            target.as_str(),
            services.len(),
        ));
    }

    let events = if flags.events {
        plan_events(graph, file)?
    } else {
        Vec::new()
    };
    if flags.events_only() && events.is_empty() {
        tracing::debug!(file = %file, "events only without event messages, skipping");
        return Ok(GenerationPlan::skipped(
            file,
            SkipReason::NoEventMessages,
            &flags,
        ));
    }

    let universe = build_universe(graph, target, sink)?;
    let chain = resolve_chain(graph, &universe, target, sink)?;

    let methods = chain
        .methods()
        .iter()
        .map(|resolved| PlannedMethod {
            service: resolved.service.clone(),
            name: resolved.method.name.clone(),
            field_name: method_field_name(&resolved.method.name),
            kind: MethodKind::from_view_only(resolved.method.view_only),
            input: resolved.method.input.clone(),
            output: resolved.method.output.clone(),
            streaming: resolved.method.streaming,
            shape: ParameterShape::from(resolved.method.streaming),
        })
        .collect();
    let messages = collect_used_messages(chain.methods().iter().map(|resolved| &resolved.method))
        .into_iter()
        .map(|id| PlannedMessage {
            marshaller_field: marshaller_field_name(&id),
            id,
        })
        .collect();
    let descriptors = chain
        .services()
        .iter()
        .map(|id| {
            graph.service(id).map(|service| DescriptorRef {
                file: service.file.clone(),
                index: service.index,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let target_record = graph.service(target)?;
    tracing::debug!(
        file = %file,
        service = %target,
        chain = chain.len(),
        "built generation plan"
    );
    Ok(GenerationPlan {
        format: SchemaVersion::default(),
        file: file.clone(),
        skip: false,
        skip_reason: None,
        service: Some(target.clone()),
        chain: chain.services().to_vec(),
        methods,
        messages,
        groups: ArtifactGroups::for_flags(&flags),
        events,
        names: Some(ServiceNames::for_service(target_record)),
        descriptors,
        access_level: AccessLevel::from_internal(flags.internal_access),
    })
}
