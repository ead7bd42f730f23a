//! apidoc: extract the public API skeleton of LibHistoire into `api.doc.lua`.
//!
//! Every input file is scanned for the `--- public api` marker. What follows
//! is copied into a single stub file with function bodies stripped and enum
//! values blanked, so the language server sees the API without the
//! implementation.
//!
//! `apidoc` (defaults) or `apidoc -p ../src -o ../src/api.doc.lua api.lua`

mod config;
mod extract;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "apidoc",
    about = "Extract the public API skeleton from annotated Lua sources"
)]
struct Cli {
    /// Source files relative to the project directory, processed in order
    #[arg(default_values = ["api.lua", "guildHistoryCache/GuildHistoryEventProcessor.lua"])]
    files: Vec<PathBuf>,

    /// Project source directory
    #[arg(short = 'p', long, default_value = "../src")]
    project: PathBuf,

    /// Output file (default: <project>/api.doc.lua)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.project.join("api.doc.lua"));

    // Read everything up front so an unreadable file leaves no partial output
    let sources = read_sources(&cli.project, &cli.files)?;
    let skeleton = extract::skeleton(&sources, &config::ExtractConfig::default());

    fs::write(&output, &skeleton)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), "wrote api skeleton");

    Ok(())
}

fn read_sources(project: &Path, files: &[PathBuf]) -> Result<Vec<String>> {
    files
        .iter()
        .map(|file| {
            let path = project.join(file);
            info!(path = %path.display(), "reading");
            fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
        })
        .collect()
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
