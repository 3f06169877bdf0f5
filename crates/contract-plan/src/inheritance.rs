use std::collections::BTreeSet;

use contract_core::diagnostics::{Diagnostic, DiagnosticSink};
use contract_core::errors::{ErrorInfo, GenError};
use contract_schema::{FileId, MethodRecord, SchemaGraph, ServiceId, ServiceRecord};
use serde::{Deserialize, Serialize};

use crate::universe::ServiceUniverse;

/// A method together with the chain service that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMethod {
    /// Declaring service.
    pub service: ServiceId,
    /// Method as declared.
    pub method: MethodRecord,
}

/// Flattened inheritance chain of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedChain {
    services: Vec<ServiceId>,
    methods: Vec<ResolvedMethod>,
}

impl ResolvedChain {
    /// Chain services, ancestors first and the target last.
    pub fn services(&self) -> &[ServiceId] {
        &self.services
    }

    /// Methods of every chain service, chain order then declaration order.
    pub fn methods(&self) -> &[ResolvedMethod] {
        &self.methods
    }

    /// The service the chain was resolved for.
    pub fn target(&self) -> Option<&ServiceId> {
        self.services.last()
    }

    /// Number of services in the chain.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the chain holds no service.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

struct Frame<'g> {
    service: &'g ServiceRecord,
    next_base: usize,
}

/// Resolves the inheritance chain of `target`.
///
/// Bases are visited depth first in declaration order and services are appended
/// post-order, so every ancestor precedes its descendants. Each file enters the
/// chain at most once, which also breaks base cycles. Base references are looked up
/// in `universe` by file name; an unresolvable reference is reported to `sink` and
/// that branch is dropped.
pub fn resolve_chain(
    graph: &SchemaGraph,
    universe: &ServiceUniverse,
    target: &ServiceId,
    sink: &mut dyn DiagnosticSink,
) -> Result<ResolvedChain, GenError> {
    let root = graph.service(target)?;
    let mut visited: BTreeSet<&FileId> = BTreeSet::new();
    let mut services = Vec::new();
    let mut stack = Vec::new();

    visited.insert(&root.file);
    stack.push(Frame {
        service: root,
        next_base: 0,
    });

    while let Some(frame) = stack.last_mut() {
        let current = frame.service;
        let Some(reference) = current.bases.get(frame.next_base) else {
            services.push(current.id.clone());
            stack.pop();
            continue;
        };
        frame.next_base += 1;

        let Some(base_id) = universe.get(reference) else {
            sink.report(Diagnostic::unresolved_base(
                current.file.as_str(),
                current.id.as_str(),
                reference.as_str(),
            ));
            continue;
        };
        let base = graph.get_service(base_id).ok_or_else(|| {
            GenError::Resolve(
                ErrorInfo::new(
                    "universe-mismatch",
                    "service universe refers to a service missing from the schema",
                )
                .with_context("service", base_id.as_str())
                .with_context("reference", reference.as_str())
                .with_context("target", target.as_str()),
            )
        })?;
        if !visited.insert(&base.file) {
            tracing::debug!(base = %base.id, "base already in chain");
            continue;
        }
        stack.push(Frame {
            service: base,
            next_base: 0,
        });
    }

    let methods = services
        .iter()
        .map(|id| graph.service(id))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flat_map(|service| {
            service.methods.iter().map(|method| ResolvedMethod {
                service: service.id.clone(),
                method: method.clone(),
            })
        })
        .collect();

    tracing::debug!(
        target_service = %target,
        chain = services.len(),
        "resolved inheritance chain"
    );
    Ok(ResolvedChain { services, methods })
}
