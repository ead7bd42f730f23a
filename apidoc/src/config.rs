//! Names used when rewriting the internal library table into its public form.

/// Rewrite and header configuration for the extractor.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Public name of the library table, e.g. `LibHistoire`.
    pub library_name: &'static str,
    /// Local alias the sources use for the library table.
    pub internal_namespace: &'static str,
    /// Internal initialization call that must never reach the stub.
    pub init_call: &'static str,
    pub processor_name: &'static str,
    pub legacy_listener_name: &'static str,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            library_name: "LibHistoire",
            internal_namespace: "lib",
            init_call: "internal:Initialize()",
            processor_name: "GuildHistoryEventProcessor",
            legacy_listener_name: "GuildHistoryLegacyEventListener",
        }
    }
}

impl ExtractConfig {
    /// `lib.` for the default configuration.
    pub fn internal_namespace_prefix(&self) -> String {
        format!("{}.", self.internal_namespace)
    }

    /// Fixed preamble of the stub file: license, `@meta` tag and the three
    /// public class declarations.
    pub fn header(&self) -> String {
        let mut header = String::from(
            "-- SPDX-FileCopyrightText: 2025 sirinsidiator\n\
             --\n\
             -- SPDX-License-Identifier: Artistic-2.0\n\n",
        );
        header.push_str(&format!("--- @meta {}", self.library_name));
        for class in [
            self.library_name,
            self.processor_name,
            self.legacy_listener_name,
        ] {
            header.push_str(&format!("\n\n--- @class {class}\nlocal {class} = {{}}"));
        }
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_declares_the_three_public_types() {
        let header = ExtractConfig::default().header();
        assert!(header.starts_with("-- SPDX-FileCopyrightText"));
        assert!(header.contains("--- @meta LibHistoire\n\n--- @class LibHistoire\nlocal LibHistoire = {}"));
        assert!(header.contains("--- @class GuildHistoryEventProcessor\nlocal GuildHistoryEventProcessor = {}"));
        assert!(header.ends_with(
            "--- @class GuildHistoryLegacyEventListener\nlocal GuildHistoryLegacyEventListener = {}"
        ));
    }
}
