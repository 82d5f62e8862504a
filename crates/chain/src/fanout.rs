use alloy::rpc::types::Block;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;
use tracing::warn;

/// Fan-out of full blocks to registered subscribers.
///
/// Delivery is non-blocking: a subscriber whose channel is full misses that
/// block. Subscribers are never removed and must tolerate gaps.
#[derive(Debug, Default)]
pub struct BlockFanout {
    subs: Mutex<Vec<mpsc::Sender<Block>>>,
}

impl BlockFanout {
    /// Register a subscriber channel.
    pub fn subscribe(&self, sub: mpsc::Sender<Block>) {
        self.subs.lock().unwrap_or_else(PoisonError::into_inner).push(sub);
    }

    /// Deliver `block` to every subscriber without blocking.
    pub fn broadcast(&self, block: &Block) {
        let subs = self.subs.lock().unwrap_or_else(PoisonError::into_inner);
        for sub in subs.iter() {
            match sub.try_send(block.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(number = block.header.number, "subscriber lagging, dropping block");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    warn!(number = block.header.number, "subscriber channel closed");
                }
            }
        }
    }
}
