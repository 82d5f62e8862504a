use crate::{PendingRegistry, RelayClient};
use alloy::rpc::types::Block;
use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{info, warn};
use veil_chain::ChainHead;

/// Re-submits surviving pending transactions on every new block.
///
/// For each block delivered by the chain watcher the monitor first frees
/// every `(sender, nonce)` slot the block consumed, then re-sends each
/// remaining entry whose target has fallen behind the head, bumping the
/// target to the block after the current head.
///
/// The loop is purely event-driven. A stalled block feed stalls
/// resubmission; there is no time-based retry.
#[derive(Debug)]
pub struct TxMonitor {
    registry: Arc<PendingRegistry>,
    relay: RelayClient,
    head: ChainHead,
    blocks: mpsc::Receiver<Block>,
}

impl TxMonitor {
    /// Create a monitor draining `blocks`.
    pub fn new(
        registry: Arc<PendingRegistry>,
        relay: RelayClient,
        head: ChainHead,
        blocks: mpsc::Receiver<Block>,
    ) -> Self {
        Self { registry, relay, head, blocks }
    }

    /// Spawn the monitor loop; it runs until the block feed closes.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        while let Some(block) = self.blocks.recv().await {
            self.process_block(&block).await;
        }
        warn!("block feed closed, resubmission stopped");
    }

    /// One cancellation-then-resubmit pass.
    async fn process_block(&self, block: &Block) {
        info!(number = block.header.number, "monitor got new block");

        // Cancellation first: slots this block consumed must not be resent
        // below.
        self.registry.cancel_included_slots(block).await;

        let head = self.head.clone();
        let relay = self.relay.clone();
        self.registry
            .sweep(async move |entry| {
                // Entries already pointing past the head were re-targeted by
                // an earlier pass that outran this block's delivery.
                let latest = head.latest();
                if entry.next_target_block > latest {
                    return;
                }
                entry.next_target_block = latest + 1;

                info!(
                    sender = %entry.sender,
                    nonce = entry.nonce,
                    hash = %entry.hash,
                    target = entry.next_target_block,
                    "re-sending pending tx"
                );
                if let Err(e) =
                    relay.send_bundle(vec![entry.raw.clone()], entry.next_target_block).await
                {
                    warn!(%e, hash = %entry.hash, "failed to re-send bundle");
                }
            })
            .await;
    }
}
