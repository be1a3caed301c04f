//! `blte`: decodes BLTE-framed files on disk, writing each decoded payload
//! alongside its source under a suffixed name.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Decode BLTE-framed files matching a filesystem glob.
#[derive(Parser)]
#[command(name = "blte", version)]
struct Cli {
    /// Filesystem glob matching the files to decode.
    glob: String,

    /// Suffix appended to each decoded file's name.
    #[arg(long, default_value = "_decoded")]
    suffix: String,

    /// Increase log verbosity; repeatable.
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    let paths: Vec<PathBuf> = glob::glob(&cli.glob)
        .with_context(|| format!("invalid glob {}", cli.glob))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable glob entry");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();

    if paths.is_empty() {
        tracing::warn!(glob = %cli.glob, "no files matched");
        return Ok(());
    }

    let mut decoded = 0usize;
    for path in &paths {
        match decode_one(path, &cli.suffix) {
            Ok(out_path) => {
                tracing::info!(src = %path.display(), out = %out_path.display(), "decoded");
                decoded += 1;
            }
            Err(err) => tracing::warn!(src = %path.display(), %err, "failed to decode"),
        }
    }
    tracing::info!(decoded, total = paths.len(), "decode complete");

    if decoded == 0 {
        anyhow::bail!("no files could be decoded");
    }

    Ok(())
}

fn decode_one(path: &std::path::Path, suffix: &str) -> Result<PathBuf> {
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let decoded = casc_blte::BlteDecoder::new(raw.as_slice())
        .and_then(casc_blte::BlteDecoder::decode_all)
        .with_context(|| format!("decoding {}", path.display()))?;

    let mut out_name = path.file_name().context("glob entry has no file name")?.to_os_string();
    out_name.push(suffix);
    let out_path = path.with_file_name(out_name);
    std::fs::write(&out_path, decoded).with_context(|| format!("writing {}", out_path.display()))?;

    Ok(out_path)
}
