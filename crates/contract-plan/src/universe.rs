use std::collections::{BTreeMap, BTreeSet};

use contract_core::diagnostics::{Diagnostic, DiagnosticSink};
use contract_core::errors::GenError;
use contract_schema::{FileId, SchemaGraph, ServiceId};
use serde::{Deserialize, Serialize};

/// Services reachable through the import closure of a target service's file.
///
/// Each file contributes at most one representative service. Lookups go by file
/// name, which is how base references are written in schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUniverse {
    order: Vec<FileId>,
    by_file: BTreeMap<FileId, ServiceId>,
}

impl ServiceUniverse {
    /// Representative service of a file.
    pub fn get(&self, file: &str) -> Option<&ServiceId> {
        self.by_file.get(&FileId::new(file))
    }

    /// Whether the file contributed a service.
    pub fn contains_file(&self, file: &FileId) -> bool {
        self.by_file.contains_key(file)
    }

    /// Contributing files in discovery order (imports before importers).
    pub fn files(&self) -> &[FileId] {
        &self.order
    }

    /// Representative services in discovery order.
    pub fn services(&self) -> impl Iterator<Item = &ServiceId> + '_ {
        self.order.iter().filter_map(|file| self.by_file.get(file))
    }

    /// Number of contributing files.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no file contributed a service.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, file: FileId, service: ServiceId) {
        self.order.push(file.clone());
        self.by_file.insert(file, service);
    }
}

/// Collects the representative services of every file reachable from the
/// target's file through imports.
///
/// Traversal is depth first in import order; files are recorded post-order. A file
/// declaring several services is represented by its first one and reported as
/// [`DiagnosticKind::MultipleServices`](contract_core::DiagnosticKind). The target's
/// own file is represented by the target itself and is never reported here.
pub fn build_universe(
    graph: &SchemaGraph,
    target: &ServiceId,
    sink: &mut dyn DiagnosticSink,
) -> Result<ServiceUniverse, GenError> {
    let root = graph.service(target)?.file.clone();
    let mut universe = ServiceUniverse::default();
    let mut visited = BTreeSet::new();
    let mut stack: Vec<(FileId, usize)> = Vec::new();

    visited.insert(root.clone());
    stack.push((root.clone(), 0));

    while let Some((file, next)) = stack.pop() {
        let dependencies = graph.dependencies(&file)?;
        if let Some(dependency) = dependencies.get(next) {
            stack.push((file, next + 1));
            if visited.insert(dependency.clone()) {
                stack.push((dependency.clone(), 0));
            }
            continue;
        }

        if file == root {
            universe.insert(file, target.clone());
            continue;
        }
        let services = &graph.file(&file)?.services;
        if let Some(first) = services.first() {
            if services.len() > 1 {
                sink.report(Diagnostic::multiple_services(
                    file.as_str(),
                    first.as_str(),
                    services.len(),
                ));
            }
            universe.insert(file, first.clone());
        }
    }

    tracing::debug!(
        target_service = %target,
        files = universe.len(),
        "built service universe"
    );
    Ok(universe)
}
