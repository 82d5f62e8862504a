//! Helpers for loading gateway configuration from the environment.
//!
//! The relay signing identity is process-wide and read exactly once at
//! startup; there is no hot-reload.

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use std::env;

/// Env var naming the address placed verbatim in the relay signature header.
pub const RELAY_ADDRESS: &str = "RELAY_ADDRESS";

/// Env var holding the hex-encoded secp256k1 key that signs relay request
/// bodies.
pub const RELAY_PRIVATE_KEY: &str = "RELAY_PRIVATE_KEY";

/// Error type for the [`crate::config`] module. Captures errors related to
/// loading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Missing or non-unicode environment variable.
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing an address from an environment variable.
    #[error("failed to parse address: {0}")]
    Address(#[from] alloy::hex::FromHexError),
    /// Error parsing a private key from an environment variable.
    #[error("failed to parse private key: {0}")]
    Key(#[from] alloy::signers::local::LocalSignerError),
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        Self::Var(s.to_string())
    }
}

/// Load a variable from the environment.
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::missing(key))
}

/// Load an address from the environment.
pub fn load_address(key: &str) -> Result<Address, ConfigError> {
    Ok(load_string(key)?.parse()?)
}

/// Load a secp256k1 private key from the environment.
pub fn load_signer(key: &str) -> Result<PrivateKeySigner, ConfigError> {
    Ok(load_string(key)?.parse()?)
}

/// The relay request-signing identity.
#[derive(Debug, Clone)]
pub struct RelayKeyConfig {
    /// Address used verbatim in the signature header.
    pub address: Address,
    /// Key that signs relay request bodies.
    pub signer: PrivateKeySigner,
}

impl RelayKeyConfig {
    /// Load the signing identity from [`RELAY_ADDRESS`] and
    /// [`RELAY_PRIVATE_KEY`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self { address: load_address(RELAY_ADDRESS)?, signer: load_signer(RELAY_PRIVATE_KEY)? })
    }
}
