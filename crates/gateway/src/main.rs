//! veilnode: a JSON-RPC gateway that routes raw transactions through a
//! private relay and keeps re-targeting them until inclusion.

use clap::Parser;
use eyre::WrapErr;
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};
use veil_chain::ChainWatcher;
use veil_gateway::{serve, GatewayState, Ingress, IpAllowlist, ProxyForwarder};
use veil_relay::{BundleSigner, PendingRegistry, RelayClient, TxMonitor};
use veil_types::RelayKeyConfig;

/// Buffer between the chain watcher and the resubmit monitor.
const BLOCK_CHANNEL_CAPACITY: usize = 10;

/// Command-line arguments for the gateway.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listen address for the gateway endpoint.
    #[arg(long, default_value = "0.0.0.0:9000")]
    listen: SocketAddr,

    /// URL of the backing node for proxied methods.
    #[arg(long, default_value = "http://127.0.0.1:8545")]
    proxy: reqwest::Url,

    /// URL of the private bundle relay.
    #[arg(long, default_value = "https://relay.flashbots.net")]
    relayer: reqwest::Url,

    /// WebSocket URL for head subscriptions and block lookups.
    #[arg(long, default_value = "ws://127.0.0.1:8546")]
    subscribe: String,

    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt().with_env_filter(filter).init();

    // The signing identity and the chain watch are both required up front;
    // failure of either aborts startup.
    let keys = RelayKeyConfig::from_env().wrap_err("relay signing identity not configured")?;
    let watcher = ChainWatcher::connect(&args.subscribe)
        .await
        .wrap_err("failed to establish chain watch")?;

    let registry = Arc::new(PendingRegistry::default());
    let relay = RelayClient::new(args.relayer, BundleSigner::from(keys));

    let (blocks_tx, blocks_rx) = mpsc::channel(BLOCK_CHANNEL_CAPACITY);
    watcher.subscribe_new_blocks(blocks_tx);
    TxMonitor::new(registry.clone(), relay.clone(), watcher.head(), blocks_rx).spawn();

    let state = GatewayState {
        ingress: Arc::new(Ingress::new(watcher.head(), relay, registry)),
        proxy: ProxyForwarder::new(args.proxy),
        allowlist: IpAllowlist::default(),
    };

    serve(args.listen, state).await.wrap_err("gateway server failed")
}
