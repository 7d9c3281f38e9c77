mod commands;
mod offline;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "zlc")]
#[command(about = "Drive Zenlayer Cloud resource handlers from the command line", long_about = None)]
struct Cli {
    /// API domain (overrides ZENLAYERCLOUD_DOMAIN and the credentials file)
    #[arg(long, global = true)]
    domain: Option<String>,
    /// http or https
    #[arg(long, global = true)]
    scheme: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered resource and data-source kinds
    Kinds,
    /// Show the attributes of a kind
    Schema {
        /// Kind name, e.g. zenlayercloud_zec_vpc
        kind: String,
    },
    /// Validate a JSON configuration against a kind's schema
    Validate {
        kind: String,
        /// JSON object with the attributes (stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Import a remote object by id and print its state
    Read {
        kind: String,
        /// Identifier, composite for attachments (e.g. eip-1:nic-1:NIC)
        id: String,
    },
    /// Run a data-source query and print the result
    Query {
        kind: String,
        /// JSON object with the query arguments (none when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries JSON, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let endpoint = zenlayer_config::PartialConfig {
        domain: cli.domain,
        scheme: cli.scheme,
        ..Default::default()
    };

    match cli.command {
        Commands::Version => {
            println!("zenlayer-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Kinds => commands::kinds::handle(),
        Commands::Schema { kind } => commands::schema::handle(&kind),
        Commands::Validate { kind, file } => commands::validate::handle(&kind, file.as_deref()),
        Commands::Read { kind, id } => commands::read::handle(endpoint, &kind, &id).await,
        Commands::Query { kind, file } => commands::query::handle(endpoint, &kind, file.as_deref()).await,
    }
}
