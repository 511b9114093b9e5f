//! cf-repair -- suggest fixes for broken content-fragment references.
//!
//! Usage: cf-repair --listing <json> --broken <json|txt> [--config <json>] [--output <file>]
//!
//! With the `http` feature the listing can come from a live author instance
//! instead: `--author <url> --root <path>`, token in `CF_REPAIR_TOKEN`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use cf_repair::util::atomic::atomic_write;
use cf_repair::{
    AemAuthorClient, ContentPath, PathIndex, RepairConfig, RuleEngine, StaticAemAuthorClient,
};
use tracing::info;

/// Value following `--name`, if present.
fn arg(name: &str) -> Option<String> {
    std::env::args().skip_while(|a| a != name).nth(1)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Listing entries, normalized so a missing locale is derived from the path.
fn load_listing(path: &Path) -> Result<Vec<ContentPath>> {
    let entries: Vec<ContentPath> = serde_json::from_str(&read(path)?)
        .with_context(|| format!("{} is not a JSON array of content paths", path.display()))?;
    Ok(entries
        .into_iter()
        .map(|cp| ContentPath::new(cp.path, cp.status, cp.locale))
        .collect())
}

/// Broken paths as a JSON array of strings or one path per line.
fn load_broken(path: &Path) -> Result<Vec<String>> {
    let text = read(path)?;
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(&text)
            .with_context(|| format!("{} is not a JSON array of strings", path.display()));
    }
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}

#[cfg(feature = "http")]
async fn load_from_author(config: &RepairConfig) -> Result<Option<(PathIndex, Arc<dyn AemAuthorClient>)>> {
    let Some(author) = arg("--author") else {
        return Ok(None);
    };
    let token = std::env::var("CF_REPAIR_TOKEN").context("CF_REPAIR_TOKEN is not set")?;
    let roots: Vec<String> = arg("--root").into_iter().collect();
    if roots.is_empty() {
        bail!("--author requires --root <path>");
    }

    let client: Arc<dyn AemAuthorClient> = Arc::new(cf_repair::client::HttpAemAuthorClient::new(author, token)?);
    let index = cf_repair::index::load_index(&*client, &roots, &config.index).await?;
    Ok(Some((index, client)))
}

#[cfg(not(feature = "http"))]
#[allow(clippy::unused_async)]
async fn load_from_author(_config: &RepairConfig) -> Result<Option<(PathIndex, Arc<dyn AemAuthorClient>)>> {
    Ok(None)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match arg("--config") {
        Some(path) => RepairConfig::load(Path::new(&path))?,
        None => RepairConfig::default(),
    };

    let (index, client) = if let Some(loaded) = load_from_author(&config).await? {
        loaded
    } else {
        let Some(listing) = arg("--listing") else {
            bail!("usage: cf-repair --listing <json> --broken <json|txt> [--config <json>] [--output <file>]");
        };
        let entries = load_listing(Path::new(&listing))?;
        let index: PathIndex = entries.iter().cloned().collect();
        let client: Arc<dyn AemAuthorClient> = Arc::new(StaticAemAuthorClient::new(entries));
        (index, client)
    };

    let Some(broken) = arg("--broken") else {
        bail!("missing --broken <json|txt>");
    };
    let broken = load_broken(Path::new(&broken))?;
    info!(indexed = index.len(), broken = broken.len(), "starting repair");

    let engine = RuleEngine::with_default_rules(&config.rules, Some(client));
    let suggestions = engine.suggest_all(&broken, &index).await;
    let report = serde_json::to_string_pretty(&suggestions)?;

    match arg("--output").map(PathBuf::from) {
        Some(output) => atomic_write(&output, &report)?,
        None => println!("{report}"),
    }
    Ok(())
}
