use std::collections::BTreeMap;

use contract_core::errors::{ErrorInfo, GenError};

use crate::document::{FileDocument, MessageDocument, MethodDocument, SchemaDocument, ServiceDocument};
use crate::ids::{qualify, FileId, MessageId, ServiceId};
use crate::records::{FileRecord, MessageRecord, MethodRecord, ServiceRecord};
use crate::streaming::MethodStreaming;

fn schema_error(code: &str, message: impl Into<String>) -> GenError {
    GenError::Schema(ErrorInfo::new(code, message.into()))
}

/// Immutable, linked schema graph.
///
/// Records live in arenas keyed by fully-qualified name. Every cross reference is a
/// name, never a pointer, so cyclic imports and cyclic bases are plain data and all
/// traversal state lives with the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaGraph {
    file_order: Vec<FileId>,
    files: BTreeMap<FileId, FileRecord>,
    services: BTreeMap<ServiceId, ServiceRecord>,
    messages: BTreeMap<MessageId, MessageRecord>,
}

impl SchemaGraph {
    /// Links a schema document, validating every cross reference.
    pub fn from_document(document: SchemaDocument) -> Result<Self, GenError> {
        let mut graph = Self {
            file_order: Vec::with_capacity(document.files.len()),
            files: BTreeMap::new(),
            services: BTreeMap::new(),
            messages: BTreeMap::new(),
        };
        for file in document.files {
            graph.insert_file(file)?;
        }
        graph.validate_links()?;
        tracing::debug!(
            files = graph.files.len(),
            services = graph.services.len(),
            messages = graph.messages.len(),
            "linked schema graph"
        );
        Ok(graph)
    }

    fn insert_file(&mut self, file: FileDocument) -> Result<(), GenError> {
        let file_id = FileId::new(file.name.clone());
        if self.files.contains_key(&file_id) {
            return Err(GenError::Schema(
                ErrorInfo::new("duplicate-file", "file declared twice")
                    .with_context("file", file.name),
            ));
        }

        let mut message_ids = Vec::with_capacity(file.messages.len());
        for message in file.messages {
            let id = MessageId::new(qualify(&file.package, &message.name));
            if self.messages.contains_key(&id) {
                return Err(GenError::Schema(
                    ErrorInfo::new("duplicate-message", "message declared twice")
                        .with_context("message", id.as_str())
                        .with_context("file", file_id.as_str()),
                ));
            }
            message_ids.push(id.clone());
            self.messages.insert(id.clone(), message_record(id, &file_id, message));
        }

        let mut service_ids = Vec::with_capacity(file.services.len());
        for (index, service) in file.services.into_iter().enumerate() {
            let id = ServiceId::new(qualify(&file.package, &service.name));
            if self.services.contains_key(&id) {
                return Err(GenError::Schema(
                    ErrorInfo::new("duplicate-service", "service declared twice")
                        .with_context("service", id.as_str())
                        .with_context("file", file_id.as_str()),
                ));
            }
            let record = service_record(id.clone(), &file_id, index, service)?;
            service_ids.push(id.clone());
            self.services.insert(id, record);
        }

        self.file_order.push(file_id.clone());
        self.files.insert(
            file_id.clone(),
            FileRecord {
                name: file_id,
                package: file.package,
                dependencies: file.dependencies.into_iter().map(FileId::new).collect(),
                services: service_ids,
                messages: message_ids,
            },
        );
        Ok(())
    }

    fn validate_links(&self) -> Result<(), GenError> {
        for file in self.files.values() {
            for dependency in &file.dependencies {
                if !self.files.contains_key(dependency) {
                    return Err(GenError::Schema(
                        ErrorInfo::new("dangling-dependency", "imported file is not part of the schema")
                            .with_context("file", file.name.as_str())
                            .with_context("dependency", dependency.as_str()),
                    ));
                }
            }
        }
        for service in self.services.values() {
            for method in &service.methods {
                for message in [&method.input, &method.output] {
                    if !self.messages.contains_key(message) {
                        return Err(GenError::Schema(
                            ErrorInfo::new("dangling-message", "method references an undeclared message")
                                .with_context("service", service.id.as_str())
                                .with_context("method", method.name.clone())
                                .with_context("message", message.as_str()),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Files in the order they were declared.
    pub fn files(&self) -> impl Iterator<Item = &FileRecord> + '_ {
        self.file_order.iter().filter_map(|id| self.files.get(id))
    }

    /// Number of files in the graph.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of services in the graph.
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Number of messages in the graph.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Looks up a file.
    pub fn file(&self, id: &FileId) -> Result<&FileRecord, GenError> {
        self.files.get(id).ok_or_else(|| {
            GenError::Schema(
                ErrorInfo::new("missing-file", "file is not part of the schema")
                    .with_context("file", id.as_str()),
            )
        })
    }

    /// Looks up a service.
    pub fn service(&self, id: &ServiceId) -> Result<&ServiceRecord, GenError> {
        self.get_service(id).ok_or_else(|| {
            GenError::Schema(
                ErrorInfo::new("missing-service", "service is not part of the schema")
                    .with_context("service", id.as_str()),
            )
        })
    }

    /// Looks up a service without failing.
    pub fn get_service(&self, id: &ServiceId) -> Option<&ServiceRecord> {
        self.services.get(id)
    }

    /// Whether the graph declares the service.
    pub fn contains_service(&self, id: &ServiceId) -> bool {
        self.services.contains_key(id)
    }

    /// Looks up a message.
    pub fn message(&self, id: &MessageId) -> Result<&MessageRecord, GenError> {
        self.messages.get(id).ok_or_else(|| {
            GenError::Schema(
                ErrorInfo::new("missing-message", "message is not part of the schema")
                    .with_context("message", id.as_str()),
            )
        })
    }

    /// Services declared by a file, declaration order.
    pub fn services_in(&self, file: &FileId) -> Result<Vec<&ServiceRecord>, GenError> {
        self.file(file)?
            .services
            .iter()
            .map(|id| self.service(id))
            .collect()
    }

    /// Messages declared by a file, declaration order.
    pub fn messages_in(&self, file: &FileId) -> Result<Vec<&MessageRecord>, GenError> {
        self.file(file)?
            .messages
            .iter()
            .map(|id| self.message(id))
            .collect()
    }

    /// Event-annotated messages declared by a file, declaration order.
    pub fn event_messages(&self, file: &FileId) -> Result<Vec<&MessageRecord>, GenError> {
        Ok(self
            .messages_in(file)?
            .into_iter()
            .filter(|message| message.is_event)
            .collect())
    }

    /// Files imported by a file, import order.
    pub fn dependencies(&self, file: &FileId) -> Result<&[FileId], GenError> {
        Ok(&self.file(file)?.dependencies)
    }

    /// Declared base references of a service, declaration order.
    pub fn bases(&self, service: &ServiceId) -> Result<&[String], GenError> {
        Ok(&self.service(service)?.bases)
    }

    /// Methods of a service, declaration order.
    pub fn methods(&self, service: &ServiceId) -> Result<&[MethodRecord], GenError> {
        Ok(&self.service(service)?.methods)
    }

    /// Rebuilds the nested document form of the graph.
    pub fn to_document(&self) -> SchemaDocument {
        let files = self
            .files()
            .map(|file| FileDocument {
                name: file.name.to_string(),
                package: file.package.clone(),
                dependencies: file.dependencies.iter().map(ToString::to_string).collect(),
                services: file
                    .services
                    .iter()
                    .filter_map(|id| self.services.get(id))
                    .map(service_document)
                    .collect(),
                messages: file
                    .messages
                    .iter()
                    .filter_map(|id| self.messages.get(id))
                    .map(|message| MessageDocument {
                        name: message.name.clone(),
                        fields: message.fields.clone(),
                        is_event: message.is_event,
                    })
                    .collect(),
            })
            .collect();
        SchemaDocument { files }
    }
}

fn message_record(id: MessageId, file: &FileId, message: MessageDocument) -> MessageRecord {
    MessageRecord {
        id,
        name: message.name,
        file: file.clone(),
        fields: message.fields,
        is_event: message.is_event,
    }
}

fn service_record(
    id: ServiceId,
    file: &FileId,
    index: usize,
    service: ServiceDocument,
) -> Result<ServiceRecord, GenError> {
    let mut methods = Vec::with_capacity(service.methods.len());
    for method in service.methods {
        let streaming = match method.streaming.as_deref() {
            Some(tag) => tag.parse::<MethodStreaming>().map_err(|err| match err {
                GenError::Contract(info) => GenError::Contract(
                    info.with_context("service", id.as_str())
                        .with_context("method", method.name.clone()),
                ),
                other => other,
            })?,
            None => MethodStreaming::from_flags(method.client_streaming, method.server_streaming),
        };
        methods.push(MethodRecord {
            name: method.name,
            input: MessageId::new(method.input),
            output: MessageId::new(method.output),
            view_only: method.view_only,
            streaming,
        });
    }
    for base in &service.bases {
        if base.trim().is_empty() {
            return Err(schema_error("empty-base", format!("service {id} declares an empty base")));
        }
    }
    Ok(ServiceRecord {
        name: service.name,
        file: file.clone(),
        index,
        methods,
        bases: service.bases,
        state_type: service.state_type,
        id,
    })
}

fn service_document(service: &ServiceRecord) -> ServiceDocument {
    ServiceDocument {
        name: service.name.clone(),
        methods: service
            .methods
            .iter()
            .map(|method| MethodDocument {
                name: method.name.clone(),
                input: method.input.to_string(),
                output: method.output.to_string(),
                view_only: method.view_only,
                streaming: Some(method.streaming.tag().to_string()),
                client_streaming: method.streaming.client_streams(),
                server_streaming: method.streaming.server_streams(),
            })
            .collect(),
        bases: service.bases.clone(),
        state_type: service.state_type.clone(),
    }
}

/// Incremental builder producing a [`SchemaGraph`].
///
/// Declarations are collected in order and linked on [`SchemaGraphBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct SchemaGraphBuilder {
    document: SchemaDocument,
    pending: Option<GenError>,
}

impl SchemaGraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a file with its imports.
    pub fn file(&mut self, name: &str, package: &str, dependencies: &[&str]) -> &mut Self {
        let mut file = FileDocument::new(name, package);
        file.dependencies = dependencies.iter().map(|dep| dep.to_string()).collect();
        self.document.files.push(file);
        self
    }

    /// Declares a message in a previously declared file.
    pub fn message(&mut self, file: &str, message: MessageDocument) -> &mut Self {
        if let Some(target) = self.file_mut(file) {
            target.messages.push(message);
        }
        self
    }

    /// Declares a service in a previously declared file.
    pub fn service(&mut self, file: &str, service: ServiceDocument) -> &mut Self {
        if let Some(target) = self.file_mut(file) {
            target.services.push(service);
        }
        self
    }

    fn file_mut(&mut self, name: &str) -> Option<&mut FileDocument> {
        let found = self.document.files.iter_mut().find(|file| file.name == name);
        if found.is_none() && self.pending.is_none() {
            self.pending = Some(GenError::Schema(
                ErrorInfo::new("missing-file", "declaration targets an undeclared file")
                    .with_context("file", name),
            ));
        }
        found
    }

    /// Returns the collected document without linking it.
    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    /// Links the collected declarations.
    pub fn build(&self) -> Result<SchemaGraph, GenError> {
        if let Some(err) = &self.pending {
            return Err(err.clone());
        }
        SchemaGraph::from_document(self.document.clone())
    }
}
