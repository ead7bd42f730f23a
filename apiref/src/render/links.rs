//! Link rewriting for `See:` references.
//!
//! Local file links point at the developer's checkout and are redirected to
//! the public repository; `~Symbol~` cross references are resolved against
//! a table of external source locations.

use crate::config::GeneratorConfig;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static RE_MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*)\]\((.*)\)").unwrap());

/// Language server location fragment `#<line>#<column>`.
static RE_LOCATION_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)#\d+$").unwrap());

static RE_CROSS_REFERENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~(.*)~").unwrap());

#[derive(Debug, Clone)]
pub struct Links {
    /// URL prefix → replacement prefix
    replacements: Vec<(String, String)>,
    external: BTreeMap<String, String>,
}

impl Links {
    /// Redirect `project_uri` to the configured repository URL.
    pub fn new(project_uri: &str, config: &GeneratorConfig) -> Self {
        Self {
            replacements: vec![(project_uri.to_string(), config.repository_url.clone())],
            external: config.external_links.clone(),
        }
    }

    /// Rewrite a single reference line into BBCode.
    ///
    /// `[label](file:///c%3A/p/src/api.lua#10#4)` → `[URL='https://…/src/api.lua#L10']label[/URL]`
    pub fn rewrite(&self, reference: &str) -> String {
        if let Some(caps) = RE_MARKDOWN_LINK.captures(reference) {
            let label = &caps[1];
            let mut url = caps[2].to_string();
            for (prefix, replacement) in &self.replacements {
                if let Some(rest) = url.strip_prefix(prefix.as_str()) {
                    let public = format!("{replacement}{rest}");
                    url = RE_LOCATION_FRAGMENT.replace(&public, "#L${1}").into_owned();
                }
            }
            return format!("[URL='{url}']{label}[/URL]");
        }

        if let Some(caps) = RE_CROSS_REFERENCE.captures(reference) {
            let label = &caps[1];
            if let Some(target) = self.external.get(label) {
                return format!("[URL='{target}']{label}[/URL]");
            }
        }

        reference.to_string()
    }
}
