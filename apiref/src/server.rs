//! Discovery and invocation of `lua-language-server`.
//!
//! The server ships inside the sumneko.lua VS Code extension. The newest
//! installed extension is used unless an executable is given explicitly.

use crate::uri;
use anyhow::{bail, Context, Result};
use regex::Regex;
use semver::Version;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use tracing::{debug, error, info};

/// `sumneko.lua-3.13.5-win32-x64` → `3.13.5`
static RE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^sumneko\.lua-(\d+\.\d+\.\d+)(?:-.+)?$").unwrap());

static RE_MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\(([^)]+)\)").unwrap());

/// Name of the dump the server writes into its output directory.
pub const DUMP_FILE: &str = "doc.json";

/// Home directory: `USERPROFILE`, then `HOME`, then the platform default.
pub fn home_dir() -> Option<PathBuf> {
    ["USERPROFILE", "HOME"]
        .iter()
        .filter_map(|var| env::var_os(var))
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Locate the server executable of the newest installed extension.
pub fn discover() -> Result<PathBuf> {
    let home = home_dir().context("cannot determine home directory (USERPROFILE/HOME unset)")?;
    let extensions = home.join(".vscode").join("extensions");
    let latest = find_latest_extension(&extensions)?;
    info!(extension = %latest.display(), "using language server");
    Ok(server_executable(&latest))
}

/// Newest `sumneko.lua-<version>` directory under `extensions_dir`.
pub fn find_latest_extension(extensions_dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(extensions_dir)
        .with_context(|| format!("failed to read {}", extensions_dir.display()))?;

    let mut candidates: Vec<(Version, PathBuf)> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let version = extension_version(&name)?;
            debug!(%name, %version, "found extension");
            Some((version, entry.path()))
        })
        .collect();
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    candidates
        .into_iter()
        .next()
        .map(|(_, path)| path)
        .with_context(|| format!("no sumneko.lua extension in {}", extensions_dir.display()))
}

fn extension_version(name: &str) -> Option<Version> {
    let caps = RE_EXTENSION.captures(name)?;
    Version::parse(&caps[1]).ok()
}

/// Path of the server binary inside an extension directory.
pub fn server_executable(extension_dir: &Path) -> PathBuf {
    extension_dir
        .join("server")
        .join("bin")
        .join(format!("lua-language-server{}", env::consts::EXE_SUFFIX))
}

/// Run the documentation export and return the server's stdout.
///
/// Blocks until the server exits. A spawn failure or non-zero exit status
/// is an error.
pub fn export_docs(executable: &Path, project: &Path, out_dir: &Path) -> Result<String> {
    let mut command = Command::new(executable);
    command
        .arg(format!("--doc={}", project.display()))
        .arg(format!("--doc_out_path={}", out_dir.display()))
        .arg(format!("--logpath={}", out_dir.display()));
    info!(?command, "running language server");

    let output = match command.output() {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, executable = %executable.display(), "failed to start language server");
            return Err(e).with_context(|| format!("failed to run {}", executable.display()));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!(status = %output.status, stderr = %stderr.trim(), "language server failed");
        bail!("language server exited with {}", output.status);
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Where the export wrote its dump.
///
/// Without a log prefix the dump is `<out_dir>/doc.json`. With one, the
/// first stdout line containing the prefix names it, either as a plain path,
/// a `file://` URI or a markdown link to one.
pub fn locate_dump(stdout: &str, log_prefix: Option<&str>, out_dir: &Path) -> Result<PathBuf> {
    let Some(prefix) = log_prefix else {
        return Ok(out_dir.join(DUMP_FILE));
    };

    let Some(rest) = stdout
        .lines()
        .find_map(|line| line.find(prefix).map(|at| line[at + prefix.len()..].trim()))
    else {
        bail!("language server output has no line containing {:?}", prefix);
    };

    let target = match RE_MARKDOWN_LINK.captures(rest) {
        Some(caps) => caps[1].to_string(),
        None => rest.to_string(),
    };
    if target.is_empty() {
        bail!("no dump path after {:?} in language server output", prefix);
    }
    Ok(uri::from_file_uri(&target))
}
