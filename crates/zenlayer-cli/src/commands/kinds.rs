use crate::offline;
use colored::Colorize;

pub fn handle() -> anyhow::Result<()> {
    let provider = offline::provider();

    println!("{}", "Resources:".bold());
    for kind in provider.resource_types() {
        println!("  {}", kind.cyan());
    }
    println!();
    println!("{}", "Data sources:".bold());
    for kind in provider.data_source_types() {
        println!("  {}", kind.cyan());
    }
    Ok(())
}
