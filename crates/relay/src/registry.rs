use alloy::{
    consensus::Transaction,
    primitives::{Address, Bytes, B256},
    rpc::types::Block,
};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// A privately relayed transaction awaiting on-chain resolution.
#[derive(Debug, Clone)]
pub struct PendingEntry {
    /// The exact raw bytes the caller submitted; resent verbatim.
    pub raw: Bytes,
    /// Recovered transaction sender.
    pub sender: Address,
    /// The sender-scoped nonce identifying the slot.
    pub nonce: u64,
    /// Transaction hash, for logs and the caller's response.
    pub hash: B256,
    /// The block the next resubmission will target. Always strictly ahead
    /// of the observed head once a sweep has touched the entry.
    pub next_target_block: u64,
}

/// Registry of pending private transactions keyed by `(sender, nonce)`.
///
/// A slot holds at most one entry; inserting over a live slot replaces it,
/// since the caller is presumed to have built a replacement transaction. A
/// slot is freed the moment any on-chain transaction consumes it, whether
/// or not that transaction is the one we relayed.
///
/// One mutex guards the whole map. The resubmit sweep holds it across its
/// relay calls, making the sweep the sole writer of `next_target_block`.
#[derive(Debug, Default)]
pub struct PendingRegistry {
    slots: Mutex<HashMap<Address, HashMap<u64, PendingEntry>>>,
}

impl PendingRegistry {
    /// Install `entry` at its `(sender, nonce)` slot, replacing any
    /// previous occupant.
    pub async fn insert(&self, entry: PendingEntry) {
        debug!(
            sender = %entry.sender,
            nonce = entry.nonce,
            hash = %entry.hash,
            target = entry.next_target_block,
            "recording pending tx"
        );
        let mut slots = self.slots.lock().await;
        slots.entry(entry.sender).or_default().insert(entry.nonce, entry);
    }

    /// Free the slot at `(sender, nonce)` if present. Idempotent.
    pub async fn remove(&self, sender: Address, nonce: u64) {
        let mut slots = self.slots.lock().await;
        Self::remove_slot(&mut slots, sender, nonce);
    }

    /// Free every slot consumed by a transaction in `block`, regardless of
    /// whether the included transaction is the one we relayed.
    pub async fn cancel_included_slots(&self, block: &Block) {
        let mut slots = self.slots.lock().await;
        for tx in block.transactions.txns() {
            Self::remove_slot(&mut slots, tx.inner.signer(), tx.nonce());
        }
    }

    fn remove_slot(
        slots: &mut HashMap<Address, HashMap<u64, PendingEntry>>,
        sender: Address,
        nonce: u64,
    ) {
        let Some(by_nonce) = slots.get_mut(&sender) else { return };
        if let Some(entry) = by_nonce.remove(&nonce) {
            debug!(%sender, nonce, hash = %entry.hash, "pending slot freed");
        }
        if by_nonce.is_empty() {
            slots.remove(&sender);
        }
    }

    /// Run `f` over every entry while holding the exclusive lock.
    ///
    /// `f` may rewrite `next_target_block` in place. The lock is held for
    /// the whole pass, awaits included, so no other writer can interleave.
    pub async fn sweep<F>(&self, mut f: F)
    where
        F: AsyncFnMut(&mut PendingEntry),
    {
        let mut slots = self.slots.lock().await;
        for by_nonce in slots.values_mut() {
            for entry in by_nonce.values_mut() {
                f(entry).await;
            }
        }
    }

    /// The entry at `(sender, nonce)`, if any.
    pub async fn get(&self, sender: Address, nonce: u64) -> Option<PendingEntry> {
        self.slots.lock().await.get(&sender).and_then(|by_nonce| by_nonce.get(&nonce)).cloned()
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.values().map(HashMap::len).sum()
    }

    /// True if nothing is pending.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
