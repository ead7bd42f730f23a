//! Enum merge: fold enum value symbols into their enum's field list.
//!
//! The language server exports `Callbacks.FOO` as a top-level symbol of its
//! own. Any such symbol whose first dotted segment names an enum declared
//! earlier in the dump is appended to that enum's fields.

use crate::model::DocEntry;
use std::collections::HashMap;

/// Merge enum value entries into their owning enums, in dump order.
///
/// Idempotent: a field is only appended when the enum does not already have
/// a field of that name. When two enums share a name the first one wins.
pub fn merge_enums(entries: &mut [DocEntry]) {
    let mut enums: HashMap<String, usize> = HashMap::new();

    for index in 0..entries.len() {
        if entries[index].is_enum() {
            enums.entry(entries[index].name.clone()).or_insert(index);
            continue;
        }

        let owner = enum_prefix(&entries[index].name);
        let Some(&owner_index) = enums.get(owner) else {
            continue;
        };

        let field = entries[index].to_field();
        let owner = &mut entries[owner_index];
        if !owner.fields.iter().any(|existing| existing.name == field.name) {
            owner.fields.push(field);
        }
    }
}

/// First dotted segment of a symbol name.
/// "Callbacks.FOO" → "Callbacks", "Foo" → "Foo"
fn enum_prefix(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
