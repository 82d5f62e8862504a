//! Chain head tracking and block fan-out for the veilnode gateway.
//!
//! [`ChainWatcher`] owns a WebSocket header subscription to a node. For every
//! new header it advances a monotonic latest-block scalar ([`ChainHead`]),
//! fetches the full block body, and hands the block to every registered
//! subscriber without ever blocking on a slow one.

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

mod head;
pub use head::ChainHead;

mod fanout;
pub use fanout::BlockFanout;

mod watcher;
pub use watcher::{ChainWatcher, WatchError};
