//! File URIs in the form the language server writes them.
//!
//! The server lowercases Windows drive letters and encodes their colon,
//! e.g. `file:///c%3A/dev/src/api.lua`.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Component, Path, PathBuf};

/// URL path percent-encode set.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Fold away `.` and `..` components without touching the filesystem.
///
/// The server reports resolved paths, so a project given as `../src` must
/// be folded before it can prefix them. `..` above the root is dropped.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Directory URI with a trailing slash, usable as a link prefix.
///
/// `C:\dev\src` → `file:///c%3A/dev/src/`, `/home/u/src` → `file:///home/u/src/`
pub fn to_file_uri(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    // verbatim `\\?\C:\dev` prefix
    let raw = raw.strip_prefix("//?/").unwrap_or(&raw);
    let mut uri = String::from("file://");

    let rest = match drive_letter(raw) {
        Some(letter) => {
            uri.push('/');
            uri.push(letter.to_ascii_lowercase());
            uri.push_str("%3A");
            &raw[2..]
        }
        None => raw,
    };

    if !rest.starts_with('/') {
        uri.push('/');
    }
    uri.extend(utf8_percent_encode(rest, PATH));
    if !uri.ends_with('/') {
        uri.push('/');
    }
    uri
}

/// Filesystem path of a `file://` URI. Anything else is taken as a path.
pub fn from_file_uri(uri: &str) -> PathBuf {
    let Some(encoded) = uri.strip_prefix("file://") else {
        return PathBuf::from(uri);
    };
    let decoded = percent_decode_str(encoded).decode_utf8_lossy();
    // "/c:/dev" → "c:/dev"
    match decoded.strip_prefix('/') {
        Some(rest) if drive_letter(rest).is_some() => PathBuf::from(rest),
        _ => PathBuf::from(&*decoded),
    }
}

fn drive_letter(path: &str) -> Option<char> {
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => Some(letter),
        _ => None,
    }
}
