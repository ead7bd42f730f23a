//! Display order of reference sections.

use crate::model::DocEntry;
use std::cmp::Ordering;

/// Sort entries for display: the library root first, enums last, otherwise
/// by name.
pub fn sort_entries(entries: &mut [DocEntry], root_symbol: &str) {
    entries.sort_by(|a, b| compare(a, b, root_symbol));
}

fn compare(a: &DocEntry, b: &DocEntry, root_symbol: &str) -> Ordering {
    (a.name != root_symbol)
        .cmp(&(b.name != root_symbol))
        .then_with(|| a.is_enum().cmp(&b.is_enum()))
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Case-insensitive order, with lowercase before uppercase on ties.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocDefine, KIND_ENUM};

    fn entry(name: &str, kind: &str) -> DocEntry {
        DocEntry {
            name: name.to_string(),
            defines: vec![DocDefine {
                kind: kind.to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn names(entries: &[DocEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn root_first_enums_last() {
        let mut entries = vec![
            entry("Zebra", "doc.class"),
            entry("LibHistoire", "doc.class"),
            entry("FooEnum", KIND_ENUM),
            entry("Bar", "doc.class"),
        ];
        sort_entries(&mut entries, "LibHistoire");
        assert_eq!(names(&entries), vec!["LibHistoire", "Bar", "Zebra", "FooEnum"]);
    }

    #[test]
    fn root_first_even_if_enum() {
        let mut entries = vec![entry("Alpha", "doc.class"), entry("LibHistoire", KIND_ENUM)];
        sort_entries(&mut entries, "LibHistoire");
        assert_eq!(names(&entries), vec!["LibHistoire", "Alpha"]);
    }

    #[test]
    fn enums_sorted_among_themselves() {
        let mut entries = vec![
            entry("StopReason", KIND_ENUM),
            entry("Callbacks", KIND_ENUM),
            entry("GuildHistoryEventProcessor", "doc.class"),
        ];
        sort_entries(&mut entries, "LibHistoire");
        assert_eq!(
            names(&entries),
            vec!["GuildHistoryEventProcessor", "Callbacks", "StopReason"]
        );
    }

    #[test]
    fn names_ignore_case_first() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Banana", "apple"), Ordering::Greater);
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[test]
    fn entries_without_defines_sort_as_non_enum() {
        let mut entries = vec![entry("Beta", KIND_ENUM), DocEntry {
            name: "Alpha".to_string(),
            ..Default::default()
        }];
        sort_entries(&mut entries, "LibHistoire");
        assert_eq!(names(&entries), vec!["Alpha", "Beta"]);
    }
}
