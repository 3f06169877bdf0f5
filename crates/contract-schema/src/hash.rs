use contract_core::errors::GenError;
use sha2::{Digest, Sha256};

use crate::graph::SchemaGraph;
use crate::records::{MessageRecord, ServiceRecord};

/// Computes the canonical structural hash for the provided schema.
///
/// Files are hashed in name order; everything inside a file keeps declaration order,
/// since that order is observable in generated plans.
pub fn canonical_schema_hash(graph: &SchemaGraph) -> Result<String, GenError> {
    let mut hasher = Sha256::new();
    let mut files: Vec<_> = graph.files().collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));
    hasher.update((files.len() as u64).to_le_bytes());

    for file in files {
        update_str(file.name.as_str(), &mut hasher);
        update_str(&file.package, &mut hasher);
        update_list(file.dependencies.iter().map(|dep| dep.as_str()), &mut hasher);

        hasher.update((file.services.len() as u64).to_le_bytes());
        for service in graph.services_in(&file.name)? {
            encode_service(service, &mut hasher);
        }
        hasher.update((file.messages.len() as u64).to_le_bytes());
        for message in graph.messages_in(&file.name)? {
            encode_message(message, &mut hasher);
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}

fn encode_service(service: &ServiceRecord, hasher: &mut Sha256) {
    update_str(service.id.as_str(), hasher);
    update_list(service.bases.iter().map(String::as_str), hasher);
    match &service.state_type {
        Some(state) => {
            hasher.update(b"state:some");
            update_str(state, hasher);
        }
        None => hasher.update(b"state:none"),
    }
    hasher.update((service.methods.len() as u64).to_le_bytes());
    for method in &service.methods {
        update_str(&method.name, hasher);
        update_str(method.input.as_str(), hasher);
        update_str(method.output.as_str(), hasher);
        hasher.update([u8::from(method.view_only)]);
        update_str(method.streaming.tag(), hasher);
    }
}

fn encode_message(message: &MessageRecord, hasher: &mut Sha256) {
    update_str(message.id.as_str(), hasher);
    hasher.update([u8::from(message.is_event)]);
    hasher.update((message.fields.len() as u64).to_le_bytes());
    for field in &message.fields {
        update_str(&field.name, hasher);
        hasher.update(field.number.to_le_bytes());
        hasher.update([u8::from(field.indexed)]);
    }
}

fn update_str(value: &str, hasher: &mut Sha256) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn update_list<'a>(values: impl Iterator<Item = &'a str>, hasher: &mut Sha256) {
    let values: Vec<&str> = values.collect();
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        update_str(value, hasher);
    }
}
