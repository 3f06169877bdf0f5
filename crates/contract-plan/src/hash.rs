use std::collections::BTreeMap;

use contract_core::errors::GenError;
use contract_core::flags::GenerationFlags;
use contract_core::provenance::PlanProvenance;
use sha2::{Digest, Sha256};

use crate::plan::GenerationPlan;
use crate::serde::to_canonical_json_bytes;

/// Fingerprint of a plan: hex sha256 over its canonical JSON encoding.
///
/// Two plans share a fingerprint exactly when they would emit the same artifacts,
/// including method, message and event order.
pub fn plan_fingerprint(plan: &GenerationPlan) -> Result<String, GenError> {
    let digest = Sha256::digest(to_canonical_json_bytes(plan)?);
    Ok(format!("{digest:x}"))
}

/// Provenance record tying a plan to the schema and flags it came from.
pub fn plan_provenance(
    plan: &GenerationPlan,
    schema_hash: impl Into<String>,
    flags: GenerationFlags,
) -> Result<PlanProvenance, GenError> {
    let tool_versions = BTreeMap::from([(
        env!("CARGO_PKG_NAME").to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    )]);
    Ok(PlanProvenance {
        schema_hash: schema_hash.into(),
        flags_bits: flags.bits(),
        plan_hash: plan_fingerprint(plan)?,
        tool_versions,
    })
}
