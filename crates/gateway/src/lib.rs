//! HTTP shell and ingress dispatch for the veilnode gateway.
//!
//! The gateway exposes one JSON-RPC endpoint. `eth_sendRawTransaction`
//! requests go through [`Ingress`], which performs the first relay
//! submission and records the pending slot; every other method is passed
//! through to the backing node by [`ProxyForwarder`], status and body
//! verbatim.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    rustdoc::all
)]
#![deny(unused_must_use, rust_2018_idioms)]

mod error;
pub use error::IngressError;

mod ingress;
pub use ingress::{Ingress, ETH_SEND_RAW_TRANSACTION};

mod proxy;
pub use proxy::ProxyForwarder;

mod server;
pub use server::{router, serve, GatewayState, IpAllowlist};
