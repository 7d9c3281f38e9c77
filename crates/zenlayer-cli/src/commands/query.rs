use super::{connect, interrupt_token, print_json, read_attributes, report};
use std::path::Path;
use zenlayer_cloud::Attributes;
use zenlayer_config::PartialConfig;

pub async fn handle(endpoint: PartialConfig, kind: &str, file: Option<&Path>) -> anyhow::Result<()> {
    let config = match file {
        Some(path) => read_attributes(Some(path))?,
        None => Attributes::new(),
    };
    let provider = connect(endpoint)?;

    let response = provider.read_data_source(kind, config, interrupt_token()).await;
    if report(&response.diagnostics) {
        anyhow::bail!("{kind} query failed");
    }
    print_json(&response.state)
}
