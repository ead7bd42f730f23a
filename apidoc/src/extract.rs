//! Line-oriented public API extraction.
//!
//! Each file is scanned once, top to bottom, by a small state machine:
//!
//! - **Searching**: skip everything until the `--- public api` marker
//! - **Active**: pass through top-level declarations and comments,
//!   suppress indented statement bodies
//! - **InEnum**: copy an `--- @enum` table, blanking every assigned value
//! - **InFunction**: swallow a function body until its closing `end`

use crate::config::ExtractConfig;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;
use tracing::debug;

/// Marker comment that opens the exported part of a source file.
pub const PUBLIC_API_MARKER: &str = "--- public api";

const ENUM_MARKER: &str = "--- @enum";
const BODY_INDENT: &str = "    ";

/// Everything from the first ` = ` on an enum value line.
static RE_ENUM_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" = .+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Searching,
    Active,
    InEnum,
    InFunction,
}

/// Extract the stub lines of a single source file.
///
/// Files without the public api marker yield nothing.
pub fn extract(source: &str, config: &ExtractConfig) -> Vec<String> {
    let mut state = State::Searching;
    let mut out = Vec::new();

    for line in source.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        state = match state {
            State::Searching => {
                if line.starts_with(PUBLIC_API_MARKER) {
                    State::Active
                } else {
                    State::Searching
                }
            }
            State::InEnum => enum_line(line, &mut out),
            State::InFunction => {
                if line.starts_with("end") {
                    State::Active
                } else {
                    State::InFunction
                }
            }
            State::Active => active_line(line, config, &mut out),
        };
    }

    debug!(lines = out.len(), final_state = ?state, "extracted public api");
    out
}

/// Build the complete stub file: header followed by every file's extract,
/// in the order given.
pub fn skeleton<S: AsRef<str>>(sources: &[S], config: &ExtractConfig) -> String {
    let mut lines = vec![config.header()];
    for source in sources {
        lines.extend(extract(source.as_ref(), config));
    }
    lines.join("\n")
}

fn enum_line(line: &str, out: &mut Vec<String>) -> State {
    let trimmed = line.trim();
    if trimmed == "}" {
        out.push(line.to_string());
        return State::Active;
    }
    if trimmed.ends_with(',') {
        out.push(blank_enum_value(line));
    } else {
        out.push(line.to_string());
    }
    State::InEnum
}

fn active_line(line: &str, config: &ExtractConfig, out: &mut Vec<String>) -> State {
    let mut next = State::Active;
    let line = if let Some(rest) = line.strip_prefix(config.internal_namespace_prefix().as_str()) {
        format!("{}.{}", config.library_name, rest)
    } else if line.starts_with(config.init_call) {
        return State::Active;
    } else if line.starts_with(ENUM_MARKER) {
        next = State::InEnum;
        line.to_string()
    } else if line.starts_with("function") {
        let signature = rewrite_signature(line, config);
        if closes_inline(&signature) {
            out.push(signature);
            return State::Active;
        }
        out.push(format!("{} end", signature));
        return State::InFunction;
    } else if line.starts_with("local function") {
        if closes_inline(line.trim()) {
            return State::Active;
        }
        return State::InFunction;
    } else {
        line.to_string()
    };

    if line.trim().is_empty() || !line.starts_with(BODY_INDENT) {
        out.push(line);
    }
    next
}

/// Replace the assigned value of an enum field with an empty string literal.
///
/// `    FOO = 1,` → `    FOO = "",`
fn blank_enum_value(line: &str) -> String {
    RE_ENUM_VALUE
        .replacen(line, 1, NoExpand(r#" = "","#))
        .into_owned()
}

/// Trim a function declaration and point an internal namespace at the
/// public library table.
///
/// `function lib:Foo(a)` → `function LibHistoire:Foo(a)`
fn rewrite_signature(line: &str, config: &ExtractConfig) -> String {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix("function") else {
        return trimmed.to_string();
    };
    let name = rest.trim_start();
    match name.strip_prefix(config.internal_namespace) {
        Some(tail) if tail.starts_with([':', '.']) => {
            format!("function {}{}", config.library_name, tail)
        }
        _ => trimmed.to_string(),
    }
}

/// True when a function declaration carries its own `end`.
fn closes_inline(declaration: &str) -> bool {
    declaration.ends_with(" end") || declaration.ends_with(")end")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Vec<String> {
        extract(source, &ExtractConfig::default())
    }

    #[test]
    fn ignores_lines_before_marker() {
        let out = run("local x = 1\n--- @class Foo\n--- public api\n--- @class Bar\n");
        assert_eq!(out, vec!["--- @class Bar", ""]);
    }

    #[test]
    fn file_without_marker_yields_nothing() {
        assert!(run("--- @class Foo\nfunction lib:Foo()\n    return 1\nend\n").is_empty());
    }

    #[test]
    fn enum_values_are_blanked() {
        let source = "--- public api\n--- @enum Reason\nlib.Reason = {\n    FOO = 1,\n    BAR = \"bar\",\n    --- comment\n}\n";
        assert_eq!(
            run(source),
            vec![
                "--- @enum Reason",
                "lib.Reason = {",
                "    FOO = \"\",",
                "    BAR = \"\",",
                "    --- comment",
                "}",
                "",
            ]
        );
    }

    #[test]
    fn enum_line_without_assignment_is_kept() {
        assert_eq!(blank_enum_value("    FOO,"), "    FOO,");
    }

    #[test]
    fn enum_value_with_trailing_space() {
        assert_eq!(blank_enum_value("    FOO = 42,  "), "    FOO = \"\",");
    }

    #[test]
    fn function_becomes_single_stub_line() {
        let source = "--- public api\n--- Does a thing\n--- @param a string\nfunction lib:DoThing(a)\n    local b = a\n    return b\nend\n";
        assert_eq!(
            run(source),
            vec![
                "--- Does a thing",
                "--- @param a string",
                "function LibHistoire:DoThing(a) end",
                "",
            ]
        );
    }

    #[test]
    fn local_function_is_dropped_with_body() {
        let source = "--- public api\nlocal function helper(x)\n    return x\nend\n--- @class Foo\n";
        assert_eq!(run(source), vec!["--- @class Foo", ""]);
    }

    #[test]
    fn one_line_function_does_not_swallow_following_lines() {
        let source = "--- public api\nfunction lib:Noop() end\n--- @class Foo\nlocal function a() end\n--- @class Bar\n";
        assert_eq!(
            run(source),
            vec!["function LibHistoire:Noop() end", "--- @class Foo", "--- @class Bar", ""]
        );
    }

    #[test]
    fn indented_statements_are_suppressed() {
        let source = "--- public api\nlocal x = {}\n    x.y = 1\n\nreturn x\n";
        assert_eq!(run(source), vec!["local x = {}", "", "return x", ""]);
    }

    #[test]
    fn init_call_is_dropped() {
        let source = "--- public api\ninternal:Initialize()\n--- @class Foo\n";
        assert_eq!(run(source), vec!["--- @class Foo", ""]);
    }

    #[test]
    fn internal_namespace_is_rewritten() {
        let source = "--- public api\nlib.Callbacks = {}\n";
        assert_eq!(run(source), vec!["LibHistoire.Callbacks = {}", ""]);
    }

    #[test]
    fn signature_rewrite_handles_dot_and_other_tables() {
        let config = ExtractConfig::default();
        assert_eq!(
            rewrite_signature("function lib.Foo(a, b)", &config),
            "function LibHistoire.Foo(a, b)"
        );
        assert_eq!(
            rewrite_signature("function GuildHistoryEventProcessor:Start()  ", &config),
            "function GuildHistoryEventProcessor:Start()"
        );
        assert_eq!(rewrite_signature("function library()", &config), "function library()");
    }

    #[test]
    fn crlf_input_is_tolerated() {
        let source = "--- public api\r\n--- @enum E\r\nlib.E = {\r\n    A = 1,\r\n}\r\n";
        assert_eq!(
            run(source),
            vec!["--- @enum E", "lib.E = {", "    A = \"\",", "}", ""]
        );
    }

    #[test]
    fn skeleton_starts_with_header_and_concatenates_files() {
        let config = ExtractConfig::default();
        let out = skeleton(&["--- public api\n--- @class A", "nothing here", "--- public api\n--- @class B"], &config);
        assert!(out.starts_with(&config.header()));
        assert!(out.ends_with("--- @class A\n--- @class B"));
    }
}
