use alloy::{
    primitives::{keccak256, Address},
    signers::{local::PrivateKeySigner, SignerSync},
};
use veil_types::RelayKeyConfig;

/// Header carrying the request-body signature expected by bundle relays.
pub const FLASHBOTS_SIGNATURE_HEADER: &str = "X-Flashbots-Signature";

/// Signs relay request bodies.
///
/// The header value is `<address>:0x<sig>`. The signed payload is not the
/// body digest itself but its hex rendering: the 66-character `0x…` string
/// of `keccak256(body)` is run through the EIP-191 personal-message scheme
/// and signed with the configured key.
#[derive(Debug, Clone)]
pub struct BundleSigner {
    address: Address,
    signer: PrivateKeySigner,
}

impl BundleSigner {
    /// Create a signer from an address and key.
    pub const fn new(address: Address, signer: PrivateKeySigner) -> Self {
        Self { address, signer }
    }

    /// The address placed in the header.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Compute the [`FLASHBOTS_SIGNATURE_HEADER`] value for `body`.
    pub fn signature_header(&self, body: &[u8]) -> Result<String, alloy::signers::Error> {
        let digest_hex = keccak256(body).to_string();
        let signature = self.signer.sign_message_sync(digest_hex.as_bytes())?;
        Ok(format!("{:#x}:0x{}", self.address, alloy::hex::encode(signature.as_bytes())))
    }
}

impl From<RelayKeyConfig> for BundleSigner {
    fn from(keys: RelayKeyConfig) -> Self {
        Self::new(keys.address, keys.signer)
    }
}
