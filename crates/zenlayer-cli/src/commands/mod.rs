pub mod kinds;
pub mod query;
pub mod read;
pub mod schema;
pub mod validate;

use anyhow::Context;
use colored::Colorize;
use std::io::Read;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use zenlayer_cloud::{Attributes, Diagnostic, Provider, Severity};
use zenlayer_config::PartialConfig;
use zenlayer_provider::ZenlayerClient;

/// JSON object from `file`, or from stdin when no file is given
pub fn read_attributes(file: Option<&Path>) -> anyhow::Result<Attributes> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    let value: serde_json::Value = serde_json::from_str(&content).context("configuration is not valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!("configuration must be a JSON object, got {other}"),
    }
}

/// Print diagnostics to stderr; returns whether any of them is an error
pub fn report(diagnostics: &[Diagnostic]) -> bool {
    let mut failed = false;
    for diagnostic in diagnostics {
        let label = match diagnostic.severity {
            Severity::Error => {
                failed = true;
                "✗ error".red().bold()
            }
            Severity::Warning => "! warning".yellow().bold(),
        };
        eprintln!("{} {}", label, diagnostic.summary);
        if !diagnostic.detail.is_empty() {
            eprintln!("  {}", diagnostic.detail);
        }
    }
    failed
}

/// Provider backed by resolved credentials
pub fn connect(endpoint: PartialConfig) -> anyhow::Result<Provider<ZenlayerClient>> {
    let config = zenlayer_config::resolve(endpoint).context("failed to resolve provider configuration")?;
    tracing::debug!(domain = %config.domain, "connecting");
    Ok(zenlayer_provider::provider(&config)?)
}

/// Token cancelled on Ctrl-C
pub fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("{}", "interrupted, cancelling...".yellow());
            child.cancel();
        }
    });
    token
}

pub fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
