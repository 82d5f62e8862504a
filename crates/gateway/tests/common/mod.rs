//! Shared helpers for gateway integration tests.

#![allow(dead_code)]

use alloy::{
    consensus::{SignableTransaction, TxEip1559, TxEnvelope, TypedTransaction},
    eips::Encodable2718,
    primitives::{Address, TxKind, B256, U256},
    signers::{local::PrivateKeySigner, SignerSync},
};
use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use veil_relay::{BundleSigner, RelayClient};

/// Bodies a stub endpoint accepted, in arrival order.
#[derive(Clone, Default)]
pub struct SeenBodies(Arc<Mutex<Vec<Value>>>);

impl SeenBodies {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn get(&self, index: usize) -> Value {
        self.0.lock().unwrap()[index].clone()
    }

    fn push(&self, body: Value) {
        self.0.lock().unwrap().push(body);
    }
}

#[derive(Clone)]
struct Stub {
    seen: SeenBodies,
    status: u16,
    reply: String,
}

async fn handle(State(stub): State<Stub>, body: String) -> (StatusCode, String) {
    stub.seen.push(serde_json::from_str(&body).unwrap_or(Value::Null));
    (StatusCode::from_u16(stub.status).unwrap(), stub.reply.clone())
}

/// Spawn a stub HTTP endpoint returning `status` and `reply` to every POST.
pub async fn spawn_stub_endpoint(status: u16, reply: &str) -> (reqwest::Url, SeenBodies) {
    let seen = SeenBodies::default();
    let stub = Stub { seen: seen.clone(), status, reply: reply.to_owned() };
    let app = Router::new().route("/", post(handle)).with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    (reqwest::Url::parse(&format!("http://{addr}/")).unwrap(), seen)
}

/// A stub relay that accepts every bundle.
pub async fn spawn_accepting_relay() -> (reqwest::Url, SeenBodies) {
    spawn_stub_endpoint(200, r#"{"id":1,"jsonrpc":"2.0","result":"0xb0b1"}"#).await
}

/// A relay client with a deterministic signing key.
pub fn relay_client(url: reqwest::Url) -> RelayClient {
    let signer = make_wallet(0x11);
    let address = signer.address();
    RelayClient::new(url, BundleSigner::new(address, signer))
}

/// Make a wallet with a deterministic keypair.
pub fn make_wallet(i: u8) -> PrivateKeySigner {
    PrivateKeySigner::from_bytes(&B256::repeat_byte(i)).unwrap()
}

/// A signed EIP-1559 value transfer.
pub fn signed_tx(wallet: &PrivateKeySigner, nonce: u64, value: u64) -> TxEnvelope {
    let tx: TypedTransaction = TxEip1559 {
        chain_id: 1,
        nonce,
        gas_limit: 21_000,
        to: TxKind::Call(Address::repeat_byte(0x22)),
        value: U256::from(value),
        max_fee_per_gas: 100_000_000_000,
        max_priority_fee_per_gas: 1_000_000_000,
        ..Default::default()
    }
    .into();
    let signature = wallet.sign_hash_sync(&tx.signature_hash()).unwrap();
    TxEnvelope::new_unhashed(tx, signature)
}

/// The `0x` hex wire form of a signed envelope.
pub fn raw_hex(envelope: &TxEnvelope) -> String {
    format!("0x{}", alloy::hex::encode(envelope.encoded_2718()))
}
