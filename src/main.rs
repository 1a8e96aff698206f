//! `collate [FILES...]` – sorts lines with a configured collator.
//!
//! Lines are read from the given files, or from stdin when none are given.
//! Settings come from `collate.{toml,json,yaml}` (or the file named by
//! `COLLATE_CONFIG`) and `COLLATE_*` environment variables.

use std::io::{self, BufRead, BufWriter, Write};

use collate::error::{CollateError, Result};
use collate::settings::{Settings, DEFAULT_FILE};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
    if let Err(e) = run() {
        error!(error = %e, "collate failed");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let file = std::env::var("COLLATE_CONFIG").unwrap_or_else(|_| DEFAULT_FILE.to_string());
    let settings = Settings::load(&file)?;
    if !matches!(settings.output.as_str(), "text" | "json") {
        return Err(CollateError::InvalidConfiguration(format!("unknown output '{}'", settings.output)));
    }
    let collator = settings.collator()?;
    info!(
        locale = %settings.locale,
        strength = %collator.strength(),
        decomposition = %collator.decomposition(),
        "collator ready"
    );

    let mut lines = Vec::new();
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        for line in io::stdin().lock().lines() {
            lines.push(line?);
        }
    } else {
        for path in &paths {
            let content = std::fs::read_to_string(path).map_err(|e| CollateError::Io(format!("{path}: {e}")))?;
            lines.extend(content.lines().map(String::from));
        }
    }

    collator.sort(&mut lines);
    if settings.unique {
        lines.dedup_by(|a, b| collator.equals(a, b));
    }
    if settings.reverse {
        lines.reverse();
    }
    info!(lines = lines.len(), "sorted");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if settings.output == "json" {
        serde_json::to_writer_pretty(&mut out, &lines)?;
        writeln!(out)?;
    } else {
        for line in &lines {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()?;
    Ok(())
}
