use serde::{Deserialize, Serialize};

use crate::records::FieldRecord;

/// Serialized, nested form of a linked schema: what a schema provider hands over.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Files in the order the compiler listed them.
    #[serde(default)]
    pub files: Vec<FileDocument>,
}

/// One schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDocument {
    /// File name.
    pub name: String,
    /// Protobuf package.
    #[serde(default)]
    pub package: String,
    /// Imported file names, import order.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Declared services.
    #[serde(default)]
    pub services: Vec<ServiceDocument>,
    /// Declared top-level messages.
    #[serde(default)]
    pub messages: Vec<MessageDocument>,
}

impl FileDocument {
    /// Creates an empty file declaration.
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            dependencies: Vec::new(),
            services: Vec::new(),
            messages: Vec::new(),
        }
    }
}

/// One service declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDocument {
    /// Short service name.
    pub name: String,
    /// Methods, declaration order.
    #[serde(default)]
    pub methods: Vec<MethodDocument>,
    /// Base references (file names) from the `base` service option.
    #[serde(default)]
    pub bases: Vec<String>,
    /// Value of the `state_type` service option.
    #[serde(default)]
    pub state_type: Option<String>,
}

impl ServiceDocument {
    /// Creates a service without methods or bases.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            bases: Vec::new(),
            state_type: None,
        }
    }
}

/// One method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDocument {
    /// Method name.
    pub name: String,
    /// Fully-qualified request message name.
    pub input: String,
    /// Fully-qualified response message name.
    pub output: String,
    /// Value of the `is_view` method option.
    #[serde(default)]
    pub view_only: bool,
    /// Streaming tag (`none`, `client`, `server`, `bidi`); wins over the boolean markers.
    #[serde(default)]
    pub streaming: Option<String>,
    /// Protobuf `client_streaming` marker.
    #[serde(default)]
    pub client_streaming: bool,
    /// Protobuf `server_streaming` marker.
    #[serde(default)]
    pub server_streaming: bool,
}

impl MethodDocument {
    /// A unary method taking `input` and returning `output`.
    pub fn unary(name: impl Into<String>, input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            output: output.into(),
            view_only: false,
            streaming: None,
            client_streaming: false,
            server_streaming: false,
        }
    }

    /// Marks the method as view-only.
    pub fn view(mut self) -> Self {
        self.view_only = true;
        self
    }

    /// Sets the streaming tag.
    pub fn streaming(mut self, tag: impl Into<String>) -> Self {
        self.streaming = Some(tag.into());
        self
    }
}

/// One message declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDocument {
    /// Short message name.
    pub name: String,
    /// Fields, declaration order.
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
    /// Value of the `is_event` message option.
    #[serde(default)]
    pub is_event: bool,
}

impl MessageDocument {
    /// A plain message without fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            is_event: false,
        }
    }

    /// Appends a field; numbers follow declaration order.
    pub fn field(mut self, name: impl Into<String>, indexed: bool) -> Self {
        let number = self.fields.len() as u32 + 1;
        self.fields.push(FieldRecord {
            name: name.into(),
            number,
            indexed,
        });
        self
    }

    /// Marks the message as an event.
    pub fn event(mut self) -> Self {
        self.is_event = true;
        self
    }
}
