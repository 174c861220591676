use anyhow::Context;
use paper_relay::{Config, Relay, RelayOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let relay = Relay::from_config(&config)?;

    match relay.run().await? {
        RelayOutcome::NoNewEntries => info!("Done, nothing to deliver"),
        RelayOutcome::Processed {
            delivered,
            skipped,
            watermark,
        } => info!(
            "Done: {} delivered, {} skipped, watermark {}",
            delivered,
            skipped,
            watermark.to_rfc3339()
        ),
    }

    Ok(())
}
