//! Non-fatal schema-authoring diagnostics and the sinks that receive them.
//!
//! Resolution never stops on a diagnostic. A sink records what went wrong and the
//! caller decides, through [`DiagnosticPolicy`], whether the recorded set is acceptable.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, GenError};

/// Category of a schema-authoring problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A declared base service does not name any service visible through imports.
    UnresolvedBase,
    /// A file declares more than one service where exactly one is expected.
    MultipleServices,
}

impl DiagnosticKind {
    /// Stable code used in logs and escalated errors.
    pub const fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::UnresolvedBase => "unresolved-base",
            DiagnosticKind::MultipleServices => "multiple-services",
        }
    }
}

/// A single recoverable problem found in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Problem category.
    pub kind: DiagnosticKind,
    /// File in which the problem was found.
    pub file: String,
    /// Offending reference (base name, or the service kept for a multi-service file).
    pub subject: String,
    /// Human readable description.
    pub message: String,
}

impl Diagnostic {
    /// A base reference that could not be resolved.
    pub fn unresolved_base(
        file: impl Into<String>,
        service: &str,
        reference: impl Into<String>,
    ) -> Self {
        let reference = reference.into();
        Self {
            kind: DiagnosticKind::UnresolvedBase,
            file: file.into(),
            message: format!(
                "base `{reference}` of service `{service}` is not declared by any imported file"
            ),
            subject: reference,
        }
    }

    /// A file declaring `count` services; only `kept` is considered.
    pub fn multiple_services(file: impl Into<String>, kept: impl Into<String>, count: usize) -> Self {
        let kept = kept.into();
        Self {
            kind: DiagnosticKind::MultipleServices,
            file: file.into(),
            message: format!("file declares {count} services, only `{kept}` is used"),
            subject: kept,
        }
    }

    /// Converts the diagnostic into an error payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo::new(self.kind.code(), self.message.clone())
            .with_context("file", self.file.clone())
            .with_context("subject", self.subject.clone())
    }
}

/// Receiver for non-fatal diagnostics.
///
/// Implementations must not abort resolution. Strictness is applied afterwards by
/// [`DiagnosticPolicy::check`] over what the sink recorded.
pub trait DiagnosticSink {
    /// Records a diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink that keeps every diagnostic in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// Consumes the sink and returns the recorded diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Sink that logs every diagnostic as a `tracing` warning and keeps a copy.
#[derive(Debug, Default)]
pub struct TracingSink {
    inner: CollectingSink,
}

impl TracingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.inner.diagnostics()
    }

    /// Drops the recorded diagnostics, typically between files.
    pub fn clear(&mut self) {
        self.inner = CollectingSink::new();
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            code = diagnostic.kind.code(),
            file = %diagnostic.file,
            subject = %diagnostic.subject,
            "{}",
            diagnostic.message
        );
        self.inner.report(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Decides whether recorded diagnostics are acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiagnosticPolicy {
    /// Reject any diagnostic instead of continuing in degraded form.
    #[serde(default)]
    pub strict: bool,
}

impl DiagnosticPolicy {
    /// Lenient policy: diagnostics are reported and generation continues.
    pub const fn lenient() -> Self {
        Self { strict: false }
    }

    /// Strict policy: the first diagnostic becomes an error.
    pub const fn strict() -> Self {
        Self { strict: true }
    }

    /// Applies the policy to a set of recorded diagnostics.
    pub fn check(&self, diagnostics: &[Diagnostic]) -> Result<(), GenError> {
        if !self.strict {
            return Ok(());
        }
        match diagnostics.first() {
            None => Ok(()),
            Some(first) => {
                let mut info = first.to_error_info();
                if diagnostics.len() > 1 {
                    info = info.with_context("total", diagnostics.len().to_string());
                }
                Err(GenError::Schema(
                    info.with_hint("strict mode rejects degraded generation"),
                ))
            }
        }
    }
}
