use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use testnet_minter::chain::{NodeClient, Wallet};
use testnet_minter::config::load_or_default;
use testnet_minter::pipeline::BatchRunner;

const CONFIG_PATH: &str = "minter.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_or_default(Path::new(CONFIG_PATH))?;

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "testnet_minter={}",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("testnet-minter v0.1.0 starting");
    tracing::info!(
        node_url = %config.node.url,
        wallet_count = config.wallets.count,
        use_existing = config.wallets.use_existing,
        amount_apt = config.funding.amount_apt,
        "configuration loaded"
    );

    let main_wallet = Wallet::from_env()?;
    let ledger = NodeClient::new(&config)?;

    let runner = BatchRunner::new(ledger, config, main_wallet);
    runner.run().await?;

    tracing::info!("all done");
    Ok(())
}
