#![deny(missing_docs)]

//! Read-only schema graph adapter for the contract plan generator.
//!
//! A schema arrives already compiled and linked: files with their imports, services
//! with methods and declared bases, messages with fields, and every custom option
//! (`is_view`, `is_event`, `is_indexed`, `base`, `state_type`) resolved to plain data.
//! This crate stores that graph in name-addressed arenas and answers the primitive
//! queries the resolver needs.

mod document;
mod graph;
mod hash;
mod ids;
mod provider;
mod records;
mod serialization;
mod streaming;

pub use document::{
    FileDocument, MessageDocument, MethodDocument, SchemaDocument, ServiceDocument,
};
pub use graph::{SchemaGraph, SchemaGraphBuilder};
pub use hash::canonical_schema_hash;
pub use ids::{FileId, MessageId, ServiceId};
pub use provider::{FileSchemaProvider, SchemaProvider};
pub use records::{FieldRecord, FileRecord, MessageRecord, MethodRecord, ServiceRecord};
pub use streaming::MethodStreaming;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{schema_from_bytes, schema_from_json, schema_to_bytes, schema_to_json};
