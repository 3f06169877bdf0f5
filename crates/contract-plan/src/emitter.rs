use contract_core::errors::{ErrorInfo, GenError};

use crate::plan::GenerationPlan;
use crate::serde::{to_canonical_json_bytes, to_canonical_value};

/// Turns a plan into emitted artifacts.
///
/// Skipped plans produce `None`.
pub trait ArtifactEmitter {
    /// Emitted artifact.
    type Output;

    /// Emits the artifacts for one plan.
    fn emit(&self, plan: &GenerationPlan) -> Result<Option<Self::Output>, GenError>;
}

/// Renders plans as canonical JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonPlanEmitter {
    pretty: bool,
}

impl JsonPlanEmitter {
    /// Emitter producing indented JSON.
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Emitter producing single-line JSON.
    pub const fn compact() -> Self {
        Self { pretty: false }
    }
}

impl ArtifactEmitter for JsonPlanEmitter {
    type Output = String;

    fn emit(&self, plan: &GenerationPlan) -> Result<Option<String>, GenError> {
        if plan.skip {
            return Ok(None);
        }
        let text = if self.pretty {
            serde_json::to_string_pretty(&to_canonical_value(plan)?)
                .map_err(|err| GenError::Serde(ErrorInfo::new("plan-write", err.to_string())))?
        } else {
            let bytes = to_canonical_json_bytes(plan)?;
            String::from_utf8(bytes)
                .map_err(|err| GenError::Serde(ErrorInfo::new("json-utf8", err.to_string())))?
        };
        Ok(Some(text))
    }
}
