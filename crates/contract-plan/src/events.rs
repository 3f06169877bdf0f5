use contract_core::errors::GenError;
use contract_schema::{FieldRecord, FileId, MessageId, MessageRecord, SchemaGraph};
use serde::{Deserialize, Serialize};

/// A field carried by a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedField {
    /// Field name as declared.
    pub name: String,
    /// Field number.
    pub number: u32,
    /// Generated property name.
    pub accessor: String,
}

impl From<&FieldRecord> for ProjectedField {
    fn from(field: &FieldRecord) -> Self {
        Self {
            name: field.name.clone(),
            number: field.number,
            accessor: field.accessor_name(),
        }
    }
}

/// An ordered subset of an event's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProjection {
    /// Projected fields, declaration order.
    pub fields: Vec<ProjectedField>,
}

impl FieldProjection {
    /// Whether the projection carries no field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the projected fields.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}

/// Accessors to generate for one event message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPlan {
    /// Event message.
    pub message: MessageId,
    /// Short message name.
    pub name: String,
    /// One single-field projection per indexed field.
    pub indexed: Vec<FieldProjection>,
    /// All non-indexed fields in one projection, possibly empty.
    pub non_indexed: FieldProjection,
}

impl EventPlan {
    /// Builds the accessor plan of an event message.
    pub fn for_message(message: &MessageRecord) -> Self {
        Self {
            message: message.id.clone(),
            name: message.name.clone(),
            indexed: message
                .indexed_fields()
                .map(|field| FieldProjection {
                    fields: vec![ProjectedField::from(field)],
                })
                .collect(),
            non_indexed: FieldProjection {
                fields: message.non_indexed_fields().map(ProjectedField::from).collect(),
            },
        }
    }
}

/// Accessor plans for the event messages declared by `file`, declaration order.
pub fn plan_events(graph: &SchemaGraph, file: &FileId) -> Result<Vec<EventPlan>, GenError> {
    Ok(graph
        .event_messages(file)?
        .into_iter()
        .map(EventPlan::for_message)
        .collect())
}
