use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use crate::ids::{FileId, MessageId, ServiceId};
use crate::streaming::MethodStreaming;

/// A schema file with its imports and declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File name as handed to the compiler.
    pub name: FileId,
    /// Protobuf package of the file.
    pub package: String,
    /// Imported files in import order.
    pub dependencies: Vec<FileId>,
    /// Declared services in declaration order.
    pub services: Vec<ServiceId>,
    /// Declared top-level messages in declaration order.
    pub messages: Vec<MessageId>,
}

/// A service with its methods and declared bases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Fully-qualified service name.
    pub id: ServiceId,
    /// Short service name.
    pub name: String,
    /// File declaring the service.
    pub file: FileId,
    /// Position of the service within its file.
    pub index: usize,
    /// Methods in declaration order.
    pub methods: Vec<MethodRecord>,
    /// Declared base references (file names) in declaration order.
    pub bases: Vec<String>,
    /// Contract state type option, when declared.
    pub state_type: Option<String>,
}

/// A remote-callable method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    /// Method name.
    pub name: String,
    /// Request message.
    pub input: MessageId,
    /// Response message.
    pub output: MessageId,
    /// Whether the method is annotated as view-only.
    pub view_only: bool,
    /// Streaming classification.
    pub streaming: MethodStreaming,
}

/// A message with its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Fully-qualified message name.
    pub id: MessageId,
    /// Short message name.
    pub name: String,
    /// File declaring the message.
    pub file: FileId,
    /// Fields in declaration order.
    pub fields: Vec<FieldRecord>,
    /// Whether the message is annotated as an event.
    pub is_event: bool,
}

impl MessageRecord {
    /// Fields annotated as indexed, declaration order.
    pub fn indexed_fields(&self) -> impl Iterator<Item = &FieldRecord> {
        self.fields.iter().filter(|field| field.indexed)
    }

    /// Fields not annotated as indexed, declaration order.
    pub fn non_indexed_fields(&self) -> impl Iterator<Item = &FieldRecord> {
        self.fields.iter().filter(|field| !field.indexed)
    }
}

/// A message field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Field name as declared in the schema.
    pub name: String,
    /// Field number.
    #[serde(default)]
    pub number: u32,
    /// Whether the field is annotated as indexed.
    #[serde(default)]
    pub indexed: bool,
}

impl FieldRecord {
    /// Generated property name (`from_address` becomes `FromAddress`).
    pub fn accessor_name(&self) -> String {
        self.name.to_case(Case::Pascal)
    }
}
