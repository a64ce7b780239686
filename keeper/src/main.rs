use std::sync::Arc;

use clap::Parser;
use common::logger::init_logger;
use common::time::{Clock, SystemClock};
use keeper::{cli::Cli, config::KeeperConfig, runner::Keeper};
use metadata::{JsonMetadataRenderer, TokenUriResolver};
use oracle::{HttpPriceFeed, MockAggregator, PriceSource, StalenessGuard};
use registry::{InMemoryRegistry, OwnershipRegistry};
use tokio::sync::watch;
use trend::{TrendConfig, TrendEngine};

fn build_price_source(
    cfg: &KeeperConfig,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<Arc<dyn PriceSource>> {
    match &cfg.feed_url {
        Some(url) => {
            let feed = HttpPriceFeed::new(url.clone(), cfg.feed_timeout)?;
            tracing::info!(%url, max_age_s = cfg.feed_max_age.as_secs(), "using http price feed");
            Ok(Arc::new(StalenessGuard::new(feed, cfg.feed_max_age, clock)))
        }
        None => {
            tracing::warn!(
                answer = %cfg.initial_price,
                decimals = cfg.price_decimals,
                "no feed url configured; using a fixed in-memory feed"
            );
            Ok(Arc::new(MockAggregator::new(
                cfg.price_decimals,
                cfg.initial_price,
            )))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = cli.apply(KeeperConfig::from_env()?);

    init_logger("keeper", cfg.log_json);
    tracing::info!(?cfg, "starting keeper");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let price_source = build_price_source(&cfg, clock.clone())?;
    let registry = Arc::new(InMemoryRegistry::with_clock(
        cfg.operator.clone(),
        clock.clone(),
    ));

    let engine = Arc::new(
        TrendEngine::new(
            TrendConfig::new(cfg.interval).with_mode(cfg.mode),
            price_source,
            registry.clone(),
            clock,
        )
        .await?,
    );

    for owner in &cfg.mint_to {
        engine.mint(&cfg.operator, owner).await?;
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let keeper = Keeper::new(engine.clone(), cfg.poll);
    let handle = tokio::spawn(keeper.run(shutdown_rx));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    shutdown_tx.send(true)?;
    handle.await?;

    let resolver = TokenUriResolver::new(engine.clone(), Arc::new(JsonMetadataRenderer::default()));
    for token_id in 0..registry.total_issued().await {
        let owner = registry.owner_of(token_id).await?;
        let uri = resolver.token_uri(token_id).await?;
        tracing::info!(token_id, %owner, %uri, "final token uri");
    }

    Ok(())
}
