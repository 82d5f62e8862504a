use crate::{BlockFanout, ChainHead};
use alloy::{
    providers::{Provider, ProviderBuilder, WsConnect},
    pubsub::Subscription,
    rpc::types::{Block, Header},
};
use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, mpsc};
use tracing::{debug, info, warn};

/// Error establishing the chain watch.
///
/// Any of these is fatal: without an initial height and a live header
/// subscription the gateway cannot target bundles.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Transport or RPC failure while dialing the node, fetching the
    /// initial height, or installing the subscription.
    #[error(transparent)]
    Rpc(#[from] alloy::transports::TransportError),
}

/// Tracks the chain head over a WebSocket subscription and publishes full
/// blocks to subscribers.
///
/// Construction is fallible and synchronous in effect: the current height
/// is fetched and the header subscription installed before `connect`
/// returns. After that a background task runs for the process lifetime;
/// steady-state errors are logged, never surfaced.
#[derive(Debug, Clone)]
pub struct ChainWatcher {
    head: ChainHead,
    fanout: Arc<BlockFanout>,
}

impl ChainWatcher {
    /// Dial `ws_url`, fetch the current block number, install a header
    /// subscription, and spawn the watch loop.
    pub async fn connect(ws_url: &str) -> Result<Self, WatchError> {
        let provider = ProviderBuilder::new().connect_ws(WsConnect::new(ws_url)).await?;
        let latest = provider.get_block_number().await?;
        let sub = provider.subscribe_blocks().await?;
        info!(latest, ws_url, "chain watch established");

        let head = ChainHead::new(latest);
        let fanout = Arc::new(BlockFanout::default());
        tokio::spawn(watch_loop(provider, sub, head.clone(), fanout.clone()));

        Ok(Self { head, fanout })
    }

    /// Handle to the monotonic latest-block scalar.
    pub fn head(&self) -> ChainHead {
        self.head.clone()
    }

    /// Register `sub` to receive every fetched block, minus any it is too
    /// slow to accept.
    pub fn subscribe_new_blocks(&self, sub: mpsc::Sender<Block>) {
        self.fanout.subscribe(sub);
    }
}

async fn watch_loop<P: Provider + 'static>(
    provider: P,
    mut sub: Subscription<Header>,
    head: ChainHead,
    fanout: Arc<BlockFanout>,
) {
    loop {
        let header = match sub.recv().await {
            Ok(header) => header,
            Err(RecvError::Lagged(missed)) => {
                warn!(missed, "header subscription lagged");
                continue;
            }
            Err(RecvError::Closed) => {
                warn!("header subscription closed, chain watch stopping");
                return;
            }
        };

        let number = header.number;
        debug!(number, "new header");
        if !head.advance(number) {
            info!(number, latest = head.latest(), "stale header, head unchanged");
        }

        // The body is fetched and broadcast even for a stale-numbered
        // header: a reorged-in block can still consume pending slots.
        match provider.get_block_by_number(number.into()).full().await {
            Ok(Some(block)) => fanout.broadcast(&block),
            Ok(None) => warn!(number, "block body not yet available"),
            Err(e) => warn!(%e, number, "failed to fetch block body"),
        }
    }
}
