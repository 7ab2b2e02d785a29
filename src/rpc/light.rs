use crate::params::Height;
use crate::rpc::client::CborClient;
use ciborium::value::Value;
use tonic::transport::Channel;
use tonic::Status;

pub const METHOD_GET_SIGNED_HEADER: &str = "/oasis-core.ConsensusLight/GetSignedHeader";
pub const METHOD_GET_VALIDATOR_SET: &str = "/oasis-core.ConsensusLight/GetValidatorSet";
pub const METHOD_GET_PARAMETERS: &str = "/oasis-core.ConsensusLight/GetParameters";

/// Queries light clients need to follow consensus.
#[tonic::async_trait]
pub trait LightClientBackend: Send + Sync {
    async fn get_signed_header(&self, height: Height) -> Result<Value, Status>;
    async fn get_validator_set(&self, height: Height) -> Result<Value, Status>;
    async fn get_parameters(&self, height: Height) -> Result<Value, Status>;
}

pub struct GrpcLightClient {
    client: CborClient,
}

impl GrpcLightClient {
    pub fn new(channel: Channel) -> Self {
        GrpcLightClient {
            client: CborClient::new(channel),
        }
    }
}

#[tonic::async_trait]
impl LightClientBackend for GrpcLightClient {
    async fn get_signed_header(&self, height: Height) -> Result<Value, Status> {
        self.client
            .call(METHOD_GET_SIGNED_HEADER, height.to_wire())
            .await
    }

    async fn get_validator_set(&self, height: Height) -> Result<Value, Status> {
        self.client
            .call(METHOD_GET_VALIDATOR_SET, height.to_wire())
            .await
    }

    async fn get_parameters(&self, height: Height) -> Result<Value, Status> {
        self.client
            .call(METHOD_GET_PARAMETERS, height.to_wire())
            .await
    }
}
