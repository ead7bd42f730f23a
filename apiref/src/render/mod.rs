//! BBCode renderer for the forum API reference.
//!
//! One `[SIZE="3"]` section per symbol, each member indented beneath it with
//! its signature in a `[highlight]` block and its converted description.

pub mod description;
pub mod links;

use crate::config::GeneratorConfig;
use crate::model::{DocEntry, DocField};
use links::Links;
use std::collections::HashSet;

/// Field kind of a plain assignment; hidden on the processor.
const KIND_SET_FIELD: &str = "setfield";
const DEPRECATION_COLOR: &str = "DarkOrange";

pub struct BbcodeRenderer<'a> {
    config: &'a GeneratorConfig,
    links: Links,
}

impl<'a> BbcodeRenderer<'a> {
    pub fn new(config: &'a GeneratorConfig, links: Links) -> Self {
        Self { config, links }
    }

    /// Render sorted, merged entries into the complete reference text.
    pub fn render(&self, entries: &[DocEntry]) -> String {
        let mut lines = self.config.header.clone();
        let mut rendered: HashSet<&str> = HashSet::new();

        for entry in entries.iter().filter(|entry| !entry.is_table_field()) {
            lines.push(format!("[SIZE=\"3\"]{}[/SIZE]", entry.name));

            for field in &entry.fields {
                if self.config.is_hidden(&field.name)
                    || rendered.contains(field.name.as_str())
                    || self.is_internal(entry, field)
                {
                    continue;
                }
                self.render_field(&mut lines, &entry.name, field);
                rendered.insert(&field.name);
            }
        }

        lines.join("\n")
    }

    /// Processor members that are plain assignments or marked internal.
    fn is_internal(&self, owner: &DocEntry, field: &DocField) -> bool {
        owner.name == self.config.processor_symbol
            && (field.kind == KIND_SET_FIELD
                || field.desc.as_deref() == Some(self.config.internal_marker.as_str()))
    }

    fn render_field(&self, lines: &mut Vec<String>, owner: &str, field: &DocField) {
        let note = self.config.deprecation_note(owner, &field.name);

        lines.push("[INDENT]".to_string());
        match note {
            Some(_) => lines.push(format!(
                "[SIZE=\"2\"][STRIKE]{}[/STRIKE] [COLOR=\"{DEPRECATION_COLOR}\"](deprecated)[/COLOR][/SIZE]",
                field.name
            )),
            None => lines.push(format!("[SIZE=\"2\"]{}[/SIZE]", field.name)),
        }
        lines.push("[INDENT]".to_string());

        if let Some(note) = note {
            lines.push(format!("[COLOR=\"{DEPRECATION_COLOR}\"]"));
            lines.push(note.to_string());
            lines.push("[/COLOR]".to_string());
        }
        if let Some(view) = field.view() {
            lines.push("[highlight=\"Lua\"]".to_string());
            lines.push(view.to_string());
            lines.push("[/highlight]".to_string());
        }
        if let Some(desc) = field.desc.as_deref().filter(|desc| !desc.is_empty()) {
            lines.push(description::convert(desc, &self.links));
        }

        lines.push("[/INDENT]".to_string());
        lines.push("[/INDENT]".to_string());
    }
}
