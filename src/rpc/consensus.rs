use crate::params::Height;
use crate::rpc::client::CborClient;
use crate::types::Block;
use ciborium::value::Value;
use serde_bytes::ByteBuf;
use tonic::transport::Channel;
use tonic::Status;

pub const METHOD_GET_BLOCK: &str = "/oasis-core.Consensus/GetBlock";
pub const METHOD_GET_TRANSACTIONS: &str = "/oasis-core.Consensus/GetTransactions";
pub const METHOD_GET_TRANSACTIONS_WITH_RESULTS: &str =
    "/oasis-core.Consensus/GetTransactionsWithResults";
pub const METHOD_STATE_TO_GENESIS: &str = "/oasis-core.Consensus/StateToGenesis";
pub const METHOD_GET_GENESIS_DOCUMENT: &str = "/oasis-core.Consensus/GetGenesisDocument";
pub const METHOD_GET_STATUS: &str = "/oasis-core.Consensus/GetStatus";

/// Queries against the consensus service.
#[tonic::async_trait]
pub trait ConsensusBackend: Send + Sync {
    async fn get_block(&self, height: Height) -> Result<Block, Status>;

    /// Raw transactions included in the block at `height`.
    async fn get_transactions(&self, height: Height) -> Result<Vec<ByteBuf>, Status>;

    async fn get_transactions_with_results(&self, height: Height) -> Result<Value, Status>;

    /// Genesis document dumped from the state at `height`.
    async fn state_to_genesis(&self, height: Height) -> Result<Value, Status>;

    async fn get_genesis_document(&self) -> Result<Value, Status>;

    async fn get_status(&self) -> Result<Value, Status>;
}

pub struct GrpcConsensusClient {
    client: CborClient,
}

impl GrpcConsensusClient {
    pub fn new(channel: Channel) -> Self {
        GrpcConsensusClient {
            client: CborClient::new(channel),
        }
    }
}

#[tonic::async_trait]
impl ConsensusBackend for GrpcConsensusClient {
    async fn get_block(&self, height: Height) -> Result<Block, Status> {
        self.client.call(METHOD_GET_BLOCK, height.to_wire()).await
    }

    async fn get_transactions(&self, height: Height) -> Result<Vec<ByteBuf>, Status> {
        self.client
            .call(METHOD_GET_TRANSACTIONS, height.to_wire())
            .await
    }

    async fn get_transactions_with_results(&self, height: Height) -> Result<Value, Status> {
        self.client
            .call(METHOD_GET_TRANSACTIONS_WITH_RESULTS, height.to_wire())
            .await
    }

    async fn state_to_genesis(&self, height: Height) -> Result<Value, Status> {
        self.client
            .call(METHOD_STATE_TO_GENESIS, height.to_wire())
            .await
    }

    async fn get_genesis_document(&self) -> Result<Value, Status> {
        self.client.call(METHOD_GET_GENESIS_DOCUMENT, ()).await
    }

    async fn get_status(&self) -> Result<Value, Status> {
        self.client.call(METHOD_GET_STATUS, ()).await
    }
}
