//! Names and shapes derived for generated code.

use std::fmt;

use contract_schema::{MessageId, MethodStreaming, ServiceRecord};
use serde::{Deserialize, Serialize};

/// Name of the static field holding the full service name.
pub const SERVICE_NAME_FIELD: &str = "__ServiceName";

/// Visibility of generated types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Visible outside the assembly.
    #[default]
    Public,
    /// Visible inside the assembly only.
    Internal,
}

impl AccessLevel {
    /// Access level for the `internal_access` flag.
    pub const fn from_internal(internal_access: bool) -> Self {
        if internal_access {
            AccessLevel::Internal
        } else {
            AccessLevel::Public
        }
    }

    /// Keyword as written in generated code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            AccessLevel::Internal => "internal",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime classification of a contract method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    /// Read-only method.
    View,
    /// State-changing method.
    Action,
}

impl MethodKind {
    /// Kind for a method's `is_view` option.
    pub const fn from_view_only(view_only: bool) -> Self {
        if view_only {
            MethodKind::View
        } else {
            MethodKind::Action
        }
    }
}

/// Parameter shape of a generated service method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterShape {
    /// The request arrives as a stream instead of a single value.
    pub request_stream: bool,
    /// A response stream parameter is present.
    pub response_stream: bool,
}

impl From<MethodStreaming> for ParameterShape {
    fn from(streaming: MethodStreaming) -> Self {
        Self {
            request_stream: streaming.client_streams(),
            response_stream: streaming.server_streams(),
        }
    }
}

/// Class and field names derived from the target service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceNames {
    /// Full service name, value of the service-name field.
    pub full_name: String,
    /// Static container class.
    pub container: String,
    /// Contract base class.
    pub contract_base: String,
    /// Tester stub class.
    pub stub: String,
    /// Reference state class.
    pub reference_state: String,
    /// Service-name field.
    pub service_name_field: String,
    /// Contract state type, empty when the service declares none.
    pub state_type: String,
}

impl ServiceNames {
    /// Derives the names for a service.
    pub fn for_service(service: &ServiceRecord) -> Self {
        let name = &service.name;
        Self {
            full_name: service.id.to_string(),
            container: format!("{name}Container"),
            contract_base: format!("{name}Base"),
            stub: format!("{name}Stub"),
            reference_state: format!("{name}ReferenceState"),
            service_name_field: SERVICE_NAME_FIELD.to_string(),
            state_type: service.state_type.clone().unwrap_or_default(),
        }
    }
}

/// Marshaller field for a message: `__Marshaller_` followed by the full name with
/// dots replaced by underscores.
pub fn marshaller_field_name(message: &MessageId) -> String {
    format!("__Marshaller_{}", message.as_str().replace('.', "_"))
}

/// Method descriptor field for a method.
pub fn method_field_name(method: &str) -> String {
    format!("__Method_{method}")
}
