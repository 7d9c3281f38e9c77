use super::{read_attributes, report};
use crate::offline;
use colored::Colorize;
use std::path::Path;

pub fn handle(kind: &str, file: Option<&Path>) -> anyhow::Result<()> {
    let config = read_attributes(file)?;
    let provider = offline::provider();

    println!("{}", format!("Validating {kind}...").blue());
    let diagnostics = provider.validate(kind, &config);
    if report(&diagnostics) {
        anyhow::bail!("{kind} configuration is invalid");
    }
    println!("{}", "✓ configuration is valid".green().bold());
    Ok(())
}
