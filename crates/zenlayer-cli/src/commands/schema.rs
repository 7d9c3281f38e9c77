use crate::offline;
use colored::Colorize;
use zenlayer_cloud::schema::Mode;

pub fn handle(kind: &str) -> anyhow::Result<()> {
    let provider = offline::provider();
    let Some(schema) = provider
        .resource_schema(kind)
        .or_else(|| provider.data_source_schema(kind))
    else {
        anyhow::bail!("unknown kind {kind} (see `zlc kinds`)");
    };

    println!("{}", schema.name.cyan().bold());
    if let Some(description) = schema.description {
        println!("{description}");
    }
    println!();

    let width = schema.attributes.iter().map(|a| a.name.len()).max().unwrap_or(0);
    for attr in &schema.attributes {
        let mode = match attr.mode {
            Mode::Required => "required".red(),
            Mode::Optional => "optional".normal(),
            Mode::Computed => "computed".dimmed(),
            Mode::OptionalComputed => "optional, computed".normal(),
        };
        let mut flags = Vec::new();
        if attr.force_new {
            flags.push("forces new".yellow().to_string());
        }
        if attr.sensitive {
            flags.push("sensitive".magenta().to_string());
        }
        if let Some(default) = &attr.default {
            flags.push(format!("default {default}"));
        }
        println!(
            "  {:width$}  {:<8} {}{}",
            attr.name,
            format!("{:?}", attr.attr_type),
            mode,
            if flags.is_empty() {
                String::new()
            } else {
                format!(" ({})", flags.join(", "))
            },
        );
        if let Some(description) = attr.description {
            println!("  {:width$}  {}", "", description.dimmed());
        }
    }
    Ok(())
}
