use bytes::Bytes;
use reqwest::{header, StatusCode};
use std::time::Duration;
use tracing::instrument;

/// Outbound HTTP timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Forwards non-intercepted JSON-RPC requests to the backing node.
///
/// The request body, the response body, and the response status all pass
/// through untouched; the gateway takes no position on methods it does not
/// handle.
#[derive(Debug, Clone)]
pub struct ProxyForwarder {
    url: reqwest::Url,
    client: reqwest::Client,
}

impl ProxyForwarder {
    /// Instantiate a new forwarder with the given URL and a new reqwest
    /// client.
    pub fn new(url: reqwest::Url) -> Self {
        Self::new_with_client(url, reqwest::Client::new())
    }

    /// Create a new forwarder with the given URL and client.
    pub const fn new_with_client(url: reqwest::Url, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    /// POST `body` to the backing node, returning its status and body.
    #[instrument(skip_all)]
    pub async fn forward(&self, body: Bytes) -> Result<(StatusCode, Bytes), reqwest::Error> {
        let response = self
            .client
            .post(self.url.clone())
            .timeout(REQUEST_TIMEOUT)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let payload = response.bytes().await?;
        Ok((status, payload))
    }
}
