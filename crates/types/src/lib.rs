//! Wire envelopes and configuration shared across the veilnode gateway.
//!
//! This is a utility and data-type crate. The interesting behavior lives in
//! `veil-chain`, `veil-relay`, and `veil-gateway`.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]

mod envelope;
pub use envelope::{JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};

/// Environment-derived configuration.
pub mod config;
pub use config::{ConfigError, RelayKeyConfig, RELAY_ADDRESS, RELAY_PRIVATE_KEY};
