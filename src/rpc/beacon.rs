use crate::params::Height;
use crate::rpc::client::CborClient;
use tonic::transport::Channel;
use tonic::Status;

pub const METHOD_GET_EPOCH: &str = "/oasis-core.Beacon/GetEpoch";

pub type EpochTime = u64;

#[tonic::async_trait]
pub trait BeaconBackend: Send + Sync {
    /// Epoch in effect at `height`.
    async fn get_epoch(&self, height: Height) -> Result<EpochTime, Status>;
}

pub struct GrpcBeaconClient {
    client: CborClient,
}

impl GrpcBeaconClient {
    pub fn new(channel: Channel) -> Self {
        GrpcBeaconClient {
            client: CborClient::new(channel),
        }
    }
}

#[tonic::async_trait]
impl BeaconBackend for GrpcBeaconClient {
    async fn get_epoch(&self, height: Height) -> Result<EpochTime, Status> {
        self.client.call(METHOD_GET_EPOCH, height.to_wire()).await
    }
}
