use alloy::{consensus::crypto::RecoveryError, eips::eip2718::Eip2718Error};
use veil_relay::RelayError;

/// Errors from the raw-transaction ingress path.
///
/// Input-side variants map to HTTP 400 at the shell; a relay failure on the
/// first submission is surfaced to the caller verbatim.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IngressError {
    /// `params` was missing, empty, or its first element was not a string.
    #[error("invalid params")]
    InvalidParams,
    /// The parameter was not decodable `0x`-prefixed hex.
    #[error("invalid raw transaction")]
    InvalidRawTransaction,
    /// The bytes were not a valid transaction envelope.
    #[error("failed to decode transaction: {0}")]
    DecodeFailed(#[from] Eip2718Error),
    /// The transaction signature did not yield a sender.
    #[error("failed to recover transaction signer: {0}")]
    SignerRecoveryFailed(#[from] RecoveryError),
    /// The first relay submission failed.
    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl IngressError {
    /// The JSON-RPC error code reported for this error.
    pub const fn code(&self) -> i64 {
        match self {
            Self::InvalidParams => -32602,
            _ => -32000,
        }
    }
}
