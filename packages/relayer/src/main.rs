//! Bridge relayer node
//!
//! Serves `POST /relay`: a request signed with the shared hook secret is
//! checked for freshness, integrity and replay, then turned into a
//! `MintToken` or `UnwrapToken` call on the bridge contract.

use std::sync::Arc;

use relayer::config::{Config, LogFormat};
use relayer::metrics::Metrics;
use relayer::relay::RelayService;
use relayer::replay_cache::ReplayCache;
use relayer::server::start_server;
use relayer::terra_client::TerraClient;
use tracing::info;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> eyre::Result<()> {
    init_logging();

    info!("Starting bridge relayer");

    let config = Config::load()?;
    info!(
        terra_lcd = %config.terra.lcd_url,
        bridge = %config.terra.bridge_address,
        freshness_secs = config.freshness_secs,
        "Configuration loaded"
    );

    let client = TerraClient::new(&config.terra)?;
    let metrics = Arc::new(Metrics::new()?);
    let service = RelayService::new(
        config.hook_secret.clone(),
        config.freshness_secs,
        config.terra.bridge_address.clone(),
        ReplayCache::new(config.replay_cache_size, config.replay_cache_ttl),
        Arc::new(client),
        metrics,
    );

    tokio::select! {
        res = start_server(&config.bind_address, Arc::new(service)) => res?,
        _ = wait_for_shutdown_signal() => {}
    }

    info!("Bridge relayer stopped");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,relayer=debug"));

    match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_target(true))
            .with(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init(),
    }
}

async fn wait_for_shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown");
        }
    }
}
