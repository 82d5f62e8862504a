use crate::IngressError;
use alloy::{
    consensus::{transaction::SignerRecoverable, Transaction, TxEnvelope},
    eips::eip2718::Decodable2718,
    primitives::Bytes,
};
use std::sync::Arc;
use tracing::{info, instrument};
use veil_chain::ChainHead;
use veil_relay::{PendingEntry, PendingRegistry, RelayClient};
use veil_types::{JsonRpcRequest, JsonRpcResponse};

/// The RPC method the gateway intercepts.
pub const ETH_SEND_RAW_TRANSACTION: &str = "eth_sendRawTransaction";

/// Converts raw-transaction submissions into private bundle submissions and
/// records them for resubmission.
#[derive(Debug, Clone)]
pub struct Ingress {
    head: ChainHead,
    relay: RelayClient,
    registry: Arc<PendingRegistry>,
}

impl Ingress {
    /// Create the dispatcher.
    pub fn new(head: ChainHead, relay: RelayClient, registry: Arc<PendingRegistry>) -> Self {
        Self { head, relay, registry }
    }

    /// Handle an `eth_sendRawTransaction` request end to end.
    ///
    /// The first relay submission happens before the registry insert; a
    /// crash between the two loses the retries, not the send.
    #[instrument(skip_all, fields(id = %request.id))]
    pub async fn submit_raw_transaction(
        &self,
        request: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, IngressError> {
        let raw_hex = request
            .params
            .first()
            .ok_or(IngressError::InvalidParams)?
            .as_str()
            .ok_or(IngressError::InvalidParams)?;

        let stripped = raw_hex.strip_prefix("0x").ok_or(IngressError::InvalidRawTransaction)?;
        let raw = alloy::hex::decode(stripped).map_err(|_| IngressError::InvalidRawTransaction)?;

        let envelope = TxEnvelope::decode_2718(&mut raw.as_slice())?;
        let hash = *envelope.tx_hash();

        // First submission targets the block after the current head.
        let target = self.head.latest() + 1;
        self.relay.send_bundle(vec![Bytes::from(raw.clone())], target).await?;

        let sender = envelope.recover_signer()?;
        let entry = PendingEntry {
            raw: raw.into(),
            sender,
            nonce: envelope.nonce(),
            hash,
            next_target_block: target,
        };
        info!(%sender, nonce = entry.nonce, %hash, target, "relayed private tx");
        self.registry.insert(entry).await;

        Ok(JsonRpcResponse::result_for(request.id.clone(), hash.to_string()))
    }
}
