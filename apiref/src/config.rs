//! Generator configuration: symbol names, allow-list and lookup tables.
//!
//! Built once at startup from the built-in defaults, optionally overridden by
//! a JSON file. Keys missing from the file keep their default value.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Library table, always rendered first
    pub root_symbol: String,
    /// Owner whose setfield and @internal members are hidden
    pub processor_symbol: String,
    /// Relative paths a symbol must be defined in to be documented
    pub allowed_files: Vec<String>,
    /// Field names never rendered
    pub hidden_fields: Vec<String>,
    /// Description marking a processor member as internal
    pub internal_marker: String,
    /// Field name (bare or `Owner.name`) → migration note
    pub deprecated: BTreeMap<String, String>,
    /// Public location of the project sources, replacing the local file URI
    pub repository_url: String,
    /// `~Symbol~` cross references to external sources
    pub external_links: BTreeMap<String, String>,
    /// Lines written before the first section
    pub header: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let deprecated = [
            (
                "CreateGuildHistoryListener",
                "This method will be removed in a future version. Use CreateGuildHistoryProcessor instead.",
            ),
            ("Callbacks.HISTORY_RESCAN_STARTED", "Rescan no longer exists."),
            ("Callbacks.HISTORY_RESCAN_ENDED", "Rescan no longer exists."),
            ("Callbacks.LINKED_RANGE_LOST", "Use MANAGED_RANGE_LOST instead."),
            ("Callbacks.LINKED_RANGE_FOUND", "Use MANAGED_RANGE_FOUND instead."),
        ];
        let external_links = [(
            "ZO_GuildHistoryEventData_Base",
            "https://github.com/esoui/esoui/blob/master/esoui/ingame/guildhistory/guildhistory_data.lua#L49",
        )];

        Self {
            root_symbol: "LibHistoire".to_string(),
            processor_symbol: "GuildHistoryEventProcessor".to_string(),
            allowed_files: vec![
                "api.lua".to_string(),
                "guildHistoryCache/GuildHistoryEventProcessor.lua".to_string(),
            ],
            hidden_fields: vec!["StopReason".to_string(), "callback".to_string()],
            internal_marker: " @internal".to_string(),
            deprecated: to_map(&deprecated),
            repository_url: "https://github.com/sirinsidiator/ESO-LibHistoire/blob/master/src/"
                .to_string(),
            external_links: to_map(&external_links),
            header: vec![
                "; SPDX-FileCopyrightText: 2025 sirinsidiator".to_string(),
                ";".to_string(),
                "; SPDX-License-Identifier: Artistic-2.0".to_string(),
                String::new(),
            ],
        }
    }
}

impl GeneratorConfig {
    /// Load overrides from a JSON file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    /// Migration note for a field, looked up by bare name first, then by
    /// `owner.field`.
    pub fn deprecation_note(&self, owner: &str, field: &str) -> Option<&str> {
        self.deprecated
            .get(field)
            .or_else(|| self.deprecated.get(&format!("{owner}.{field}")))
            .map(String::as_str)
    }

    pub fn is_hidden(&self, field: &str) -> bool {
        self.hidden_fields.iter().any(|name| name == field)
    }
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
