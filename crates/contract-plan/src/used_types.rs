use contract_schema::{MessageId, MethodRecord};
use indexmap::IndexSet;

/// Messages referenced by `methods`, request before response, first occurrence wins.
pub fn collect_used_messages<'a, I>(methods: I) -> Vec<MessageId>
where
    I: IntoIterator<Item = &'a MethodRecord>,
{
    let mut used = IndexSet::new();
    for method in methods {
        used.insert(method.input.clone());
        used.insert(method.output.clone());
    }
    used.into_iter().collect()
}
