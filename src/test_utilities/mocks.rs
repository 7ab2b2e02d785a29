use crate::endpoint::NodeEndpoint;
use crate::error::GatewayError;
use crate::params::Height;
use crate::rpc::beacon::{BeaconBackend, EpochTime};
use crate::rpc::broker::{BackendClient, BackendKind, ConnectionBroker, Session};
use crate::rpc::consensus::ConsensusBackend;
use crate::rpc::light::LightClientBackend;
use crate::types::Block;
use ciborium::value::Value;
use serde_bytes::ByteBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tonic::Status;

/// Height the mock node reports as its latest block.
pub const MOCK_LATEST_HEIGHT: i64 = 1000;
pub const MOCK_CHAIN_ID: &str = "oasis-test";
pub const MOCK_EPOCH_INTERVAL: i64 = 100;

#[derive(Debug, Clone, Default)]
pub struct MockBehaviour {
    /// `open` fails as if the node were unreachable
    pub fail_open: bool,
    /// every RPC call fails with `UNAVAILABLE`
    pub fail_calls: bool,
    /// blocks carry metadata that is not CBOR
    pub corrupt_meta: bool,
}

#[derive(Debug, Default)]
pub struct Counters {
    pub opened: AtomicUsize,
    pub calls: AtomicUsize,
    pub released: AtomicUsize,
}

impl Counters {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

/// A broker whose sessions talk to an in-memory node.
pub struct MockBroker {
    behaviour: MockBehaviour,
    counters: Arc<Counters>,
}

impl MockBroker {
    pub fn new(behaviour: MockBehaviour) -> Self {
        MockBroker {
            behaviour,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn counters(&self) -> Arc<Counters> {
        self.counters.clone()
    }
}

#[tonic::async_trait]
impl ConnectionBroker for MockBroker {
    async fn open(
        &self,
        endpoint: &NodeEndpoint,
        kind: BackendKind,
    ) -> Result<Session, GatewayError> {
        if self.behaviour.fail_open {
            return Err(GatewayError::connection(
                &endpoint.socket,
                "connection refused",
            ));
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        let node = MockNode {
            behaviour: self.behaviour.clone(),
            counters: self.counters.clone(),
        };
        let client = match kind {
            BackendKind::Consensus => BackendClient::Consensus(Box::new(node)),
            BackendKind::LightClient => BackendClient::LightClient(Box::new(node)),
            BackendKind::Beacon => BackendClient::Beacon(Box::new(node)),
        };
        Ok(Session::new(endpoint, client))
    }
}

struct MockNode {
    behaviour: MockBehaviour,
    counters: Arc<Counters>,
}

impl MockNode {
    fn call(&self) -> Result<(), Status> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        if self.behaviour.fail_calls {
            return Err(Status::unavailable("node is still syncing"));
        }
        Ok(())
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

fn resolve(height: Height) -> i64 {
    match height {
        Height::Latest => MOCK_LATEST_HEIGHT,
        Height::At(height) => height,
    }
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn map(entries: Vec<(&str, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(key, value)| (text(key), value))
            .collect(),
    )
}

pub fn encoded_block_meta(height: i64) -> Vec<u8> {
    let meta = map(vec![
        (
            "header",
            map(vec![
                ("chain_id", text(MOCK_CHAIN_ID)),
                ("height", Value::Integer(height.into())),
            ]),
        ),
        (
            "last_commit",
            map(vec![
                ("height", Value::Integer((height - 1).into())),
                ("signatures", Value::Array(vec![])),
            ]),
        ),
    ]);
    let mut encoded = vec![];
    ciborium::ser::into_writer(&meta, &mut encoded).unwrap();
    encoded
}

pub fn mock_block(height: i64) -> Block {
    Block {
        height,
        hash: Value::Bytes(vec![height as u8; 32]),
        time: Value::Integer(1_600_000_000.into()),
        state_root: map(vec![
            ("version", Value::Integer(height.into())),
            ("hash", Value::Bytes(vec![7; 32])),
        ]),
        meta: Value::Bytes(encoded_block_meta(height)),
    }
}

#[tonic::async_trait]
impl ConsensusBackend for MockNode {
    async fn get_block(&self, height: Height) -> Result<Block, Status> {
        self.call()?;
        let mut block = mock_block(resolve(height));
        if self.behaviour.corrupt_meta {
            block.meta = Value::Bytes(vec![0xff, 0xfe, 0xfd]);
        }
        Ok(block)
    }

    async fn get_transactions(&self, _height: Height) -> Result<Vec<ByteBuf>, Status> {
        self.call()?;
        Ok(vec![
            ByteBuf::from(b"first".to_vec()),
            ByteBuf::from(b"second".to_vec()),
        ])
    }

    async fn get_transactions_with_results(&self, _height: Height) -> Result<Value, Status> {
        self.call()?;
        Ok(map(vec![
            ("transactions", Value::Array(vec![Value::Bytes(b"first".to_vec())])),
            ("results", Value::Array(vec![map(vec![("events", Value::Null)])])),
        ]))
    }

    async fn state_to_genesis(&self, height: Height) -> Result<Value, Status> {
        self.call()?;
        Ok(map(vec![
            ("height", Value::Integer(resolve(height).into())),
            ("chain_id", text(MOCK_CHAIN_ID)),
        ]))
    }

    async fn get_genesis_document(&self) -> Result<Value, Status> {
        self.call()?;
        Ok(map(vec![
            ("height", Value::Integer(1.into())),
            ("chain_id", text(MOCK_CHAIN_ID)),
        ]))
    }

    async fn get_status(&self) -> Result<Value, Status> {
        self.call()?;
        Ok(map(vec![
            ("latest_height", Value::Integer(MOCK_LATEST_HEIGHT.into())),
            ("status", text("ready")),
        ]))
    }
}

#[tonic::async_trait]
impl LightClientBackend for MockNode {
    async fn get_signed_header(&self, height: Height) -> Result<Value, Status> {
        self.call()?;
        Ok(map(vec![
            ("height", Value::Integer(resolve(height).into())),
            ("meta", Value::Bytes(vec![1, 2, 3])),
        ]))
    }

    async fn get_validator_set(&self, height: Height) -> Result<Value, Status> {
        self.call()?;
        Ok(map(vec![
            ("height", Value::Integer(resolve(height).into())),
            ("validators", Value::Array(vec![])),
        ]))
    }

    async fn get_parameters(&self, height: Height) -> Result<Value, Status> {
        self.call()?;
        Ok(map(vec![
            ("height", Value::Integer(resolve(height).into())),
            ("max_tx_size", Value::Integer(32768.into())),
        ]))
    }
}

#[tonic::async_trait]
impl BeaconBackend for MockNode {
    async fn get_epoch(&self, height: Height) -> Result<EpochTime, Status> {
        self.call()?;
        Ok((resolve(height) / MOCK_EPOCH_INTERVAL) as EpochTime)
    }
}
