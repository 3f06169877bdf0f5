#![deny(missing_docs)]
#![doc = "Service chain resolution and generation planning for contract code generators."]

mod emitter;
mod events;
mod hash;
mod inheritance;
pub mod naming;
mod plan;
mod serde;
mod universe;
mod used_types;

pub use emitter::{ArtifactEmitter, JsonPlanEmitter};
pub use events::{plan_events, EventPlan, FieldProjection, ProjectedField};
pub use hash::{plan_fingerprint, plan_provenance};
pub use inheritance::{resolve_chain, ResolvedChain, ResolvedMethod};
pub use naming::{AccessLevel, MethodKind, ParameterShape, ServiceNames};
pub use plan::{
    build_plan, ArtifactGroups, DescriptorRef, GenerationPlan, PlannedMessage, PlannedMethod,
    SkipReason,
};
pub use crate::serde::{from_json_slice, to_canonical_json_bytes, to_canonical_value};
pub use universe::{build_universe, ServiceUniverse};
pub use used_types::collect_used_messages;
