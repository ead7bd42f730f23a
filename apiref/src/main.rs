//! apiref: generate the LibHistoire forum API reference.
//!
//! Runs `lua-language-server --doc` on the project, then turns the exported
//! `doc.json` into BBCode (`api_reference.txt`):
//!
//! 1. **Filter**: keep symbols defined in the allow-listed files
//! 2. **Merge**: fold enum values into their enum
//! 3. **Sort**: library root first, enums last, otherwise by name
//! 4. **Render**: one section per symbol with its members
//!
//! - **server mode** (default): `apiref -p ../src`
//! - **dump mode**: `apiref --input doc.json --project-uri file:///c%3A/dev/src/`

mod config;
mod dump;
mod merge;
mod model;
mod order;
mod render;
mod server;
mod uri;

use anyhow::{Context, Result};
use clap::Parser;
use config::GeneratorConfig;
use model::DocEntry;
use render::links::Links;
use render::BbcodeRenderer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "apiref",
    about = "Generate the BBCode API reference from a lua-language-server doc export"
)]
struct Cli {
    /// Project source directory
    #[arg(short = 'p', long, default_value = "../src")]
    project: PathBuf,

    /// Output file
    #[arg(short = 'o', long, default_value = "api_reference.txt")]
    output: PathBuf,

    /// Directory the language server writes doc.json and its logs into
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Language server executable (default: newest sumneko.lua VS Code extension)
    #[arg(long)]
    server: Option<PathBuf>,

    /// Use an existing doc.json instead of running the language server
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Read the doc.json path from the server output line containing this text
    #[arg(long)]
    log_prefix: Option<String>,

    /// File URI of the project, as used in the dump's links
    /// (default: derived from --project)
    #[arg(long)]
    project_uri: Option<String>,

    /// JSON file overriding the built-in generator configuration
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    let project = std::path::absolute(&cli.project)
        .map(|path| uri::normalize(&path))
        .with_context(|| format!("failed to resolve {}", cli.project.display()))?;

    let dump_path = match &cli.input {
        Some(path) => path.clone(),
        None => export_dump(&cli, &project)?,
    };
    info!(path = %dump_path.display(), "loading symbol dump");
    let entries = dump::load(&dump_path)?;

    let project_uri = cli
        .project_uri
        .clone()
        .unwrap_or_else(|| uri::to_file_uri(&project));
    let reference = generate(entries, &config, &project_uri);

    fs::write(&cli.output, &reference)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(path = %cli.output.display(), "wrote api reference");

    Ok(())
}

/// Run the language server and return the path of its dump.
fn export_dump(cli: &Cli, project: &Path) -> Result<PathBuf> {
    let out_dir = std::path::absolute(&cli.out_dir)
        .with_context(|| format!("failed to resolve {}", cli.out_dir.display()))?;
    let executable = match &cli.server {
        Some(path) => path.clone(),
        None => server::discover()?,
    };
    let stdout = server::export_docs(&executable, project, &out_dir)?;
    server::locate_dump(&stdout, cli.log_prefix.as_deref(), &out_dir)
}

/// Filter → merge → sort → render.
fn generate(mut entries: Vec<DocEntry>, config: &GeneratorConfig, project_uri: &str) -> String {
    dump::retain_allowed(&mut entries, &config.allowed_files);
    if entries.is_empty() {
        warn!("no symbols defined in the allow-listed files");
    }
    merge::merge_enums(&mut entries);
    order::sort_entries(&mut entries, &config.root_symbol);

    let links = Links::new(project_uri, config);
    BbcodeRenderer::new(config, links).render(&entries)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
