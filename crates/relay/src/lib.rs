//! Private relay client, pending-transaction registry, and resubmission.
//!
//! A privately relayed transaction is never gossiped, so nothing on the
//! network will retry it for us. [`RelayClient`] turns raw transactions into
//! signed `eth_sendBundle` submissions, [`PendingRegistry`] remembers each
//! submission by its `(sender, nonce)` slot, and [`TxMonitor`] re-targets
//! every surviving entry at the next block until the chain shows the slot
//! consumed.

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

mod auth;
pub use auth::{BundleSigner, FLASHBOTS_SIGNATURE_HEADER};

mod client;
pub use client::{RelayClient, RelayError};

mod registry;
pub use registry::{PendingEntry, PendingRegistry};

mod monitor;
pub use monitor::TxMonitor;
