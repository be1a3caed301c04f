//! `casc-extract`: lists or extracts files out of a CASC installation,
//! either a local install directory or an online title's current build.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use casc_cli::pattern::Pattern;
use casc_cdn::{OnlineBackend, Region};
use casc_core::{Backend, Explorer};
use casc_storage::{LocalBackend, Title};

/// List or extract files from a CASC content store.
#[derive(Parser)]
#[command(name = "casc-extract", version)]
struct Cli {
    /// Path to a local install directory.
    #[arg(long, conflicts_with = "app", required_unless_present = "app")]
    dir: Option<PathBuf>,

    /// Title code to bootstrap online (`d3`, `s1`, `w3`, `wow`).
    #[arg(long, conflicts_with = "dir", required_unless_present = "dir")]
    app: Option<String>,

    /// Patch-service region for version selection.
    #[arg(long, default_value = "us")]
    region: String,

    /// CDN region, if different from `--region`.
    #[arg(long)]
    cdn: Option<String>,

    /// Unused placeholder for an HTTP response cache; out of scope here.
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Only list/extract files whose name matches this glob.
    #[arg(long)]
    pattern: Option<String>,

    /// List matching file names instead of extracting them.
    #[arg(long)]
    list: bool,

    /// Directory to write extracted files under (default: current directory).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Increase log verbosity; repeatable.
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    if let Some(cache) = &cli.cache {
        tracing::debug!(cache = %cache.display(), "--cache is accepted but not yet implemented");
    }

    let pattern = cli.pattern.as_deref().map(Pattern::new).transpose().context("invalid --pattern")?;

    let (backend, title) = if let Some(dir) = &cli.dir {
        let title = Title::detect(dir).with_context(|| format!("no known title at {}", dir.display()))?;
        let local = LocalBackend::open(dir).with_context(|| format!("opening {}", dir.display()))?;
        (Backend::Local(local), title)
    } else if let Some(app) = &cli.app {
        let title = Title::from_code(app).with_context(|| format!("unknown title code {app}"))?;
        let region = Region::parse(&cli.region)?;
        let cdn_region = cli.cdn.as_deref().map(Region::parse).transpose()?.unwrap_or(region);
        let http = reqwest::Client::new();
        let online = OnlineBackend::bootstrap_with_cdn_region(http, &region.patch_base_url(), app, region, cdn_region)
            .await
            .with_context(|| format!("bootstrapping {app}"))?;
        (Backend::Online(online), title)
    } else {
        bail!("one of --dir or --app is required");
    };

    let explorer = Explorer::open(backend, title).context("building explorer")?;

    let mut names = explorer.files();
    if let Some(pattern) = &pattern {
        names.retain(|name| pattern.matches(name));
    }

    if cli.list {
        for name in &names {
            println!("{name}");
        }
        return Ok(());
    }

    let out_dir = cli.out.unwrap_or_else(|| PathBuf::from("."));
    let mut extracted = 0usize;
    for name in &names {
        match explorer.extract(name) {
            Ok(bytes) => {
                if let Err(err) = write_output(&out_dir, name, &bytes) {
                    tracing::warn!(name = %name, %err, "failed to write extracted file");
                    continue;
                }
                extracted += 1;
            }
            Err(err) => tracing::warn!(name = %name, %err, "failed to extract file"),
        }
    }
    tracing::info!(extracted, total = names.len(), "extraction complete");

    if extracted == 0 && !names.is_empty() {
        bail!("no files could be extracted");
    }

    Ok(())
}

fn write_output(out_dir: &Path, name: &str, bytes: &[u8]) -> std::io::Result<()> {
    let path = out_dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
}
