use super::{connect, interrupt_token, print_json, report};
use zenlayer_config::PartialConfig;

pub async fn handle(endpoint: PartialConfig, kind: &str, id: &str) -> anyhow::Result<()> {
    let provider = connect(endpoint)?;

    tracing::info!(kind, id, "importing");
    let response = provider.import(kind, id, interrupt_token()).await;
    if report(&response.diagnostics) {
        anyhow::bail!("failed to read {kind} {id}");
    }
    match response.state {
        Some(state) => print_json(&state),
        None => anyhow::bail!("{kind} {id} does not exist"),
    }
}
