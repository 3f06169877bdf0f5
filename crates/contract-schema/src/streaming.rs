use std::fmt;
use std::str::FromStr;

use contract_core::errors::{ErrorInfo, GenError};
use serde::{Deserialize, Serialize};

/// Streaming classification of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodStreaming {
    /// Single request, single response.
    #[default]
    Unary,
    /// Request stream, single response.
    ClientStreaming,
    /// Single request, response stream.
    ServerStreaming,
    /// Request stream and response stream.
    Bidirectional,
}

impl MethodStreaming {
    /// Classifies a method from the protobuf streaming markers.
    pub const fn from_flags(client_streaming: bool, server_streaming: bool) -> Self {
        match (client_streaming, server_streaming) {
            (false, false) => MethodStreaming::Unary,
            (true, false) => MethodStreaming::ClientStreaming,
            (false, true) => MethodStreaming::ServerStreaming,
            (true, true) => MethodStreaming::Bidirectional,
        }
    }

    /// Whether requests arrive as a stream.
    pub const fn client_streams(&self) -> bool {
        matches!(
            self,
            MethodStreaming::ClientStreaming | MethodStreaming::Bidirectional
        )
    }

    /// Whether responses leave as a stream.
    pub const fn server_streams(&self) -> bool {
        matches!(
            self,
            MethodStreaming::ServerStreaming | MethodStreaming::Bidirectional
        )
    }

    /// Short tag used by schema documents.
    pub const fn tag(&self) -> &'static str {
        match self {
            MethodStreaming::Unary => "none",
            MethodStreaming::ClientStreaming => "client",
            MethodStreaming::ServerStreaming => "server",
            MethodStreaming::Bidirectional => "bidi",
        }
    }
}

impl fmt::Display for MethodStreaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MethodStreaming {
    type Err = GenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" | "unary" => Ok(MethodStreaming::Unary),
            "client" | "client-streaming" => Ok(MethodStreaming::ClientStreaming),
            "server" | "server-streaming" => Ok(MethodStreaming::ServerStreaming),
            "bidi" | "bidirectional" => Ok(MethodStreaming::Bidirectional),
            other => Err(GenError::Contract(
                ErrorInfo::new(
                    "unknown-streaming",
                    format!("unrecognized streaming classification `{other}`"),
                )
                .with_hint("the schema linker must emit none, client, server or bidi"),
            )),
        }
    }
}
