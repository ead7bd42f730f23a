//! Markdown description → BBCode.

use super::links::Links;
use regex::Regex;
use std::sync::LazyLock;

/// `@*param* `name` text` closing a paragraph
static RE_TAG_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\*(.*?)\* `(.+)` (.+)\n\n").unwrap());

/// `@*param* `name` text` anywhere else, e.g. at the end of the description
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\*(.*?)\* `(.+)` (.+)").unwrap());

static RE_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*\s*").unwrap());

const SEE_MARKER: &str = "See:";

/// Convert a language server description into BBCode.
///
/// Blank lines under `See:` produce no list item, so the output has no
/// empty `[*]` entries.
pub fn convert(desc: &str, links: &Links) -> String {
    let desc = RE_TAG_PARAGRAPH.replace_all(desc, "[I]@${1}[/I] [B]${2}[/B] ${3}\n");
    let desc = RE_TAG.replace_all(&desc, "[I]@${1}[/I] [B]${2}[/B] ${3}");

    if !desc.contains(SEE_MARKER) {
        return desc.into_owned();
    }

    let mut parts = desc.split(SEE_MARKER);
    let preamble = parts.next().unwrap_or_default();
    let references = parts.next().unwrap_or_default();

    let mut lines = vec![preamble.to_string(), SEE_MARKER.to_string(), "[LIST]".to_string()];
    for reference in references.split('\n') {
        let reference = RE_BULLET.replace(reference.trim(), "");
        if reference.is_empty() {
            continue;
        }
        lines.push(format!("[*]{}", links.rewrite(&reference)));
    }
    lines.push("[/LIST]".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;

    fn links() -> Links {
        Links::new("file:///c%3A/p/src/", &GeneratorConfig::default())
    }

    #[test]
    fn plain_description_is_unchanged() {
        assert_eq!(convert("Starts the processor.", &links()), "Starts the processor.");
    }

    #[test]
    fn tag_at_end() {
        assert_eq!(
            convert("Does a thing.\n\n@*param* `guildId` the guild", &links()),
            "Does a thing.\n\n[I]@param[/I] [B]guildId[/B] the guild"
        );
    }

    #[test]
    fn tags_in_paragraphs_collapse_blank_line() {
        assert_eq!(
            convert(
                "@*param* `guildId` the guild\n\n@*return* `boolean` success",
                &links()
            ),
            "[I]@param[/I] [B]guildId[/B] the guild\n[I]@return[/I] [B]boolean[/B] success"
        );
    }

    #[test]
    fn see_section_becomes_list() {
        let desc = "Creates a processor.\n\nSee:\n  * [GuildHistoryEventProcessor](file:///c%3A/p/src/guildHistoryCache/GuildHistoryEventProcessor.lua#12#0)\n  * ~ZO_GuildHistoryEventData_Base~";
        assert_eq!(
            convert(desc, &links()),
            "Creates a processor.\n\n\n\
             See:\n\
             [LIST]\n\
             [*][URL='https://github.com/sirinsidiator/ESO-LibHistoire/blob/master/src/guildHistoryCache/GuildHistoryEventProcessor.lua#L12']GuildHistoryEventProcessor[/URL]\n\
             [*][URL='https://github.com/esoui/esoui/blob/master/esoui/ingame/guildhistory/guildhistory_data.lua#L49']ZO_GuildHistoryEventData_Base[/URL]\n\
             [/LIST]"
        );
    }

    #[test]
    fn see_section_skips_blank_lines() {
        assert_eq!(
            convert("Intro\nSee:\n\n  * first\n\n  * second\n", &links()),
            "Intro\n\nSee:\n[LIST]\n[*]first\n[*]second\n[/LIST]"
        );
    }

    #[test]
    fn see_section_keeps_unknown_references() {
        assert_eq!(
            convert("See:\n* some other place", &links()),
            "\nSee:\n[LIST]\n[*]some other place\n[/LIST]"
        );
    }
}
