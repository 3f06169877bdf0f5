use contract_core::errors::{ErrorInfo, GenError};

use crate::document::SchemaDocument;
use crate::graph::SchemaGraph;

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn schema_to_bytes(graph: &SchemaGraph) -> Result<Vec<u8>, GenError> {
    bincode::serialize(&graph.to_document())
        .map_err(|err| GenError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores and links a graph from its binary representation.
pub fn schema_from_bytes(bytes: &[u8]) -> Result<SchemaGraph, GenError> {
    let document: SchemaDocument = bincode::deserialize(bytes)
        .map_err(|err| GenError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    SchemaGraph::from_document(document)
}

/// Serializes the graph to a JSON schema document.
pub fn schema_to_json(graph: &SchemaGraph) -> Result<String, GenError> {
    serde_json::to_string_pretty(&graph.to_document())
        .map_err(|err| GenError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores and links a graph from a JSON schema document.
pub fn schema_from_json(json: &str) -> Result<SchemaGraph, GenError> {
    let document: SchemaDocument = serde_json::from_str(json)
        .map_err(|err| GenError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    SchemaGraph::from_document(document)
}
