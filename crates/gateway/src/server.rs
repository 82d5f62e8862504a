use crate::{Ingress, ProxyForwarder, ETH_SEND_RAW_TRANSACTION};
use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};
use veil_types::{JsonRpcRequest, JsonRpcResponse};

/// Client IPs allowed through, matched by string prefix.
#[derive(Debug, Clone)]
pub struct IpAllowlist(Arc<Vec<String>>);

impl Default for IpAllowlist {
    fn default() -> Self {
        Self::new(vec!["127.0.0.1".to_owned()])
    }
}

impl IpAllowlist {
    /// An allow-list with explicit prefixes.
    pub fn new(prefixes: Vec<String>) -> Self {
        Self(Arc::new(prefixes))
    }

    /// True if `ip` starts with any allowed prefix.
    pub fn permits(&self, ip: &str) -> bool {
        self.0.iter().any(|prefix| ip.starts_with(prefix.as_str()))
    }
}

/// Shared state behind the RPC route.
#[derive(Debug, Clone)]
pub struct GatewayState {
    /// Raw-transaction dispatcher.
    pub ingress: Arc<Ingress>,
    /// Pass-through for every other method.
    pub proxy: ProxyForwarder,
    /// Admission control, applied before any parsing.
    pub allowlist: IpAllowlist,
}

/// Build the gateway router.
pub fn router(state: GatewayState) -> Router {
    Router::new().route("/", post(handle_rpc)).with_state(state)
}

/// Serve the gateway on `listen` until the process exits.
pub async fn serve(listen: SocketAddr, state: GatewayState) -> std::io::Result<()> {
    let listener = TcpListener::bind(listen).await?;
    info!(%listen, "gateway endpoint listening");
    axum::serve(listener, router(state).into_make_service_with_connect_info::<SocketAddr>()).await
}

/// The client IP: `X-Forwarded-For` when present, else the peer address.
fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| peer.ip().to_string())
}

async fn handle_rpc(
    State(state): State<GatewayState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ip = client_ip(&headers, peer);
    if !state.allowlist.permits(&ip) {
        warn!(%ip, "blocked request from non-allowed address");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(%e, "failed to parse JSON-RPC request");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    // Everything except raw-tx submission passes through to the node.
    if request.method != ETH_SEND_RAW_TRANSACTION {
        return match state.proxy.forward(body).await {
            Ok((status, payload)) => {
                info!(method = %request.method, %status, "proxied request");
                (status, payload).into_response()
            }
            Err(e) => {
                warn!(%e, method = %request.method, "proxy request failed");
                StatusCode::BAD_REQUEST.into_response()
            }
        };
    }

    match state.ingress.submit_raw_transaction(&request).await {
        Ok(response) => {
            info!("relayed raw transaction");
            Json(response).into_response()
        }
        Err(e) => {
            warn!(%e, "failed to relay raw transaction");
            let response = JsonRpcResponse::error_for(request.id, e.code(), e.to_string());
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
    }
}
