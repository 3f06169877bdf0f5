use std::fs;
use std::path::PathBuf;

use contract_core::errors::{ErrorInfo, GenError};

use crate::graph::SchemaGraph;
use crate::serialization::{schema_from_bytes, schema_from_json};

/// Supplies a linked schema graph from whatever serialized form is in use.
pub trait SchemaProvider {
    /// Loads and links the schema.
    fn load(&self) -> Result<SchemaGraph, GenError>;
}

/// Reads a schema document from disk. `.bin` files are bincode, anything else JSON.
#[derive(Debug, Clone)]
pub struct FileSchemaProvider {
    path: PathBuf,
}

impl FileSchemaProvider {
    /// Creates a provider for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaProvider for FileSchemaProvider {
    fn load(&self) -> Result<SchemaGraph, GenError> {
        let bytes = fs::read(&self.path).map_err(|err| {
            GenError::Serde(
                ErrorInfo::new("schema-io", err.to_string())
                    .with_context("path", self.path.display().to_string()),
            )
        })?;
        let graph = match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("bin") => schema_from_bytes(&bytes),
            _ => {
                let text = String::from_utf8(bytes).map_err(|err| {
                    GenError::Serde(
                        ErrorInfo::new("schema-utf8", err.to_string())
                            .with_context("path", self.path.display().to_string()),
                    )
                })?;
                schema_from_json(&text)
            }
        };
        graph.map_err(|err| match err {
            GenError::Serde(info) => {
                GenError::Serde(info.with_context("path", self.path.display().to_string()))
            }
            other => other,
        })
    }
}

impl SchemaProvider for SchemaGraph {
    fn load(&self) -> Result<SchemaGraph, GenError> {
        Ok(self.clone())
    }
}
