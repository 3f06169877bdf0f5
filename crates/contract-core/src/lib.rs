#![deny(missing_docs)]
#![doc = "Shared errors, generation flags and diagnostics for the contract plan generator."]

pub mod diagnostics;
pub mod errors;
pub mod flags;
pub mod provenance;

pub use diagnostics::{
    CollectingSink, Diagnostic, DiagnosticKind, DiagnosticPolicy, DiagnosticSink, TracingSink,
};
pub use errors::{ErrorInfo, GenError};
pub use flags::GenerationFlags;
pub use provenance::{PlanProvenance, SchemaVersion};
