//! Shared helpers for relay integration tests: deterministic wallets, signed
//! envelopes, rpc blocks, and a stub relay endpoint.

#![allow(dead_code)]

use alloy::{
    consensus::{
        transaction::Recovered, SignableTransaction, TxEip1559, TxEnvelope, TypedTransaction,
    },
    eips::Encodable2718,
    primitives::{Address, TxKind, B256, U256},
    rpc::types::{Block, BlockTransactions, Transaction as RpcTransaction},
    signers::{local::PrivateKeySigner, SignerSync},
};
use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Router};
use serde_json::Value;
use std::{
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::net::TcpListener;
use veil_relay::{BundleSigner, PendingEntry, RelayClient, FLASHBOTS_SIGNATURE_HEADER};

/// One request a stub relay accepted.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub signature: Option<String>,
    pub body: Value,
}

/// Requests accepted by a stub relay, in arrival order.
#[derive(Clone, Default)]
pub struct SeenRequests(Arc<Mutex<Vec<SeenRequest>>>);

impl SeenRequests {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn get(&self, index: usize) -> SeenRequest {
        self.0.lock().unwrap()[index].clone()
    }

    fn push(&self, request: SeenRequest) {
        self.0.lock().unwrap().push(request);
    }
}

#[derive(Clone)]
struct Stub {
    seen: SeenRequests,
    status: u16,
    reply: String,
}

async fn handle(State(stub): State<Stub>, headers: HeaderMap, body: String) -> (StatusCode, String) {
    stub.seen.push(SeenRequest {
        signature: headers
            .get(FLASHBOTS_SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    (StatusCode::from_u16(stub.status).unwrap(), stub.reply.clone())
}

/// Spawn a stub relay returning `status` and `reply` to every POST.
pub async fn spawn_stub_relay(status: u16, reply: &str) -> (reqwest::Url, SeenRequests) {
    let seen = SeenRequests::default();
    let stub = Stub { seen: seen.clone(), status, reply: reply.to_owned() };
    let app = Router::new().route("/", post(handle)).with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    (reqwest::Url::parse(&format!("http://{addr}/")).unwrap(), seen)
}

/// A stub relay that accepts every bundle.
pub async fn spawn_accepting_relay() -> (reqwest::Url, SeenRequests) {
    spawn_stub_relay(200, r#"{"id":1,"jsonrpc":"2.0","result":"0xb0b1"}"#).await
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

/// A pending entry backed by a real signed transaction.
pub fn entry_for(wallet: &PrivateKeySigner, nonce: u64, target: u64) -> PendingEntry {
    entry_from(wallet, &signed_tx(wallet, nonce, 1), target)
}

/// A pending entry wrapping an already-signed envelope.
pub fn entry_from(wallet: &PrivateKeySigner, envelope: &TxEnvelope, target: u64) -> PendingEntry {
    PendingEntry {
        raw: envelope.encoded_2718().into(),
        sender: wallet.address(),
        nonce: alloy::consensus::Transaction::nonce(envelope),
        hash: *envelope.tx_hash(),
        next_target_block: target,
    }
}

/// A full rpc block at `number` containing the given transactions.
pub fn block_with(number: u64, txs: Vec<(&PrivateKeySigner, TxEnvelope)>) -> Block {
    let txs = txs
        .into_iter()
        .map(|(wallet, envelope)| RpcTransaction {
            inner: Recovered::new_unchecked(envelope, wallet.address()),
            block_hash: None,
            block_number: Some(number),
            transaction_index: None,
            effective_gas_price: None,
        })
        .collect();
    let mut block: Block = Block::default();
    block.header.inner.number = number;
    block.transactions = BlockTransactions::Full(txs);
    block
}

/// Poll `cond` until it holds, failing the test after five seconds.
pub async fn eventually<F, Fut>(mut cond: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if cond().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}
