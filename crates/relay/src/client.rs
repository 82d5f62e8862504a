use crate::{BundleSigner, FLASHBOTS_SIGNATURE_HEADER};
use alloy::{primitives::Bytes, rpc::types::mev::EthSendBundle};
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tracing::{debug, instrument};
use veil_types::{JsonRpcRequest, JsonRpcResponse};

/// JSON-RPC method used to submit bundles.
const ETH_SEND_BUNDLE: &str = "eth_sendBundle";

/// Floor for outbound RPC ids; low ids stay free for debug use.
const ID_FLOOR: u64 = 1_000_000_000;

/// Outbound HTTP timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors returned by the [`RelayClient`].
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The relay could not be reached, or answered with a non-2xx status.
    #[error("relay transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The relay answered 200 with a non-null `error` payload.
    #[error("relay rejected bundle: {0}")]
    Remote(serde_json::Value),
    /// The relay's reply was not a JSON-RPC response.
    #[error("malformed relay response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Signing the request body failed.
    #[error("failed to sign relay request: {0}")]
    Sign(#[from] alloy::signers::Error),
}

/// Client for a private bundle-accepting relay.
///
/// Wraps an ordered list of raw transactions into an `eth_sendBundle`
/// envelope targeting a specific block, signs the exact request bytes, and
/// POSTs them. Clones share one id counter, so ids stay process-wide
/// monotonic however many handles exist.
#[derive(Debug, Clone)]
pub struct RelayClient {
    url: reqwest::Url,
    client: reqwest::Client,
    signer: Arc<BundleSigner>,
    id: Arc<AtomicU64>,
}

impl RelayClient {
    /// Instantiate a new client with the given URL, signer, and a new
    /// reqwest client.
    pub fn new(url: reqwest::Url, signer: BundleSigner) -> Self {
        Self::new_with_client(url, reqwest::Client::new(), signer)
    }

    /// Create a new client with the given URL and client.
    pub fn new_with_client(url: reqwest::Url, client: reqwest::Client, signer: BundleSigner) -> Self {
        Self { url, client, signer: Arc::new(signer), id: Arc::new(AtomicU64::new(ID_FLOOR)) }
    }

    /// The next outbound request id.
    fn next_id(&self) -> u64 {
        self.id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Serialize the `eth_sendBundle` envelope for `txs` at `target_block`.
    fn bundle_request(&self, txs: Vec<Bytes>, target_block: u64) -> Result<Vec<u8>, RelayError> {
        let bundle = EthSendBundle { txs, block_number: target_block, ..Default::default() };
        let request = JsonRpcRequest::new(
            self.next_id(),
            ETH_SEND_BUNDLE,
            vec![serde_json::to_value(&bundle)?],
        );
        Ok(serde_json::to_vec(&request)?)
    }

    /// Submit `txs` as a single bundle targeting `target_block`.
    #[instrument(skip_all, fields(target_block, txs = txs.len()))]
    pub async fn send_bundle(&self, txs: Vec<Bytes>, target_block: u64) -> Result<(), RelayError> {
        let body = self.bundle_request(txs, target_block)?;
        let signature = self.signer.signature_header(&body)?;
        debug!(body = %String::from_utf8_lossy(&body), "eth_sendBundle request");

        let response = self
            .client
            .post(self.url.clone())
            .timeout(REQUEST_TIMEOUT)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .header(FLASHBOTS_SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        let payload = response.text().await?;
        debug!(%payload, "eth_sendBundle response");

        let reply: JsonRpcResponse = serde_json::from_str(&payload)?;
        if let Some(error) = reply.error {
            return Err(RelayError::Remote(error));
        }
        Ok(())
    }
}
