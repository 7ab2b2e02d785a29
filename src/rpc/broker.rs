use crate::endpoint::NodeEndpoint;
use crate::error::GatewayError;
use crate::rpc::beacon::{BeaconBackend, GrpcBeaconClient};
use crate::rpc::channel::open_channel;
use crate::rpc::consensus::{ConsensusBackend, GrpcConsensusClient};
use crate::rpc::light::{GrpcLightClient, LightClientBackend};
use std::fmt;
use tracing::{event, Level};

/// Which service a channel is opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Consensus,
    LightClient,
    Beacon,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Consensus => "consensus",
            BackendKind::LightClient => "light client",
            BackendKind::Beacon => "beacon",
        };
        write!(f, "{}", name)
    }
}

/// A typed client bound to an open channel.
pub enum BackendClient {
    Consensus(Box<dyn ConsensusBackend>),
    LightClient(Box<dyn LightClientBackend>),
    Beacon(Box<dyn BeaconBackend>),
}

impl BackendClient {
    pub fn kind(&self) -> BackendKind {
        match self {
            BackendClient::Consensus(_) => BackendKind::Consensus,
            BackendClient::LightClient(_) => BackendKind::LightClient,
            BackendClient::Beacon(_) => BackendKind::Beacon,
        }
    }
}

/// One request's connection to a node.
///
/// The channel lives inside the client and is released when the session is dropped, so
/// every exit path of a handler closes it, including early returns through `?`.
pub struct Session {
    node: String,
    socket: String,
    client: BackendClient,
}

impl Session {
    pub fn new(endpoint: &NodeEndpoint, client: BackendClient) -> Session {
        event!(
            Level::DEBUG,
            node = %endpoint.name,
            socket = %endpoint.socket,
            "opened {} channel",
            client.kind()
        );
        Session {
            node: endpoint.name.clone(),
            socket: endpoint.socket.clone(),
            client,
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.client.kind()
    }

    pub fn socket(&self) -> &str {
        &self.socket
    }

    pub fn consensus(&self) -> Result<&dyn ConsensusBackend, GatewayError> {
        match &self.client {
            BackendClient::Consensus(client) => Ok(client.as_ref()),
            _ => Err(self.wrong_kind(BackendKind::Consensus)),
        }
    }

    pub fn light_client(&self) -> Result<&dyn LightClientBackend, GatewayError> {
        match &self.client {
            BackendClient::LightClient(client) => Ok(client.as_ref()),
            _ => Err(self.wrong_kind(BackendKind::LightClient)),
        }
    }

    pub fn beacon(&self) -> Result<&dyn BeaconBackend, GatewayError> {
        match &self.client {
            BackendClient::Beacon(client) => Ok(client.as_ref()),
            _ => Err(self.wrong_kind(BackendKind::Beacon)),
        }
    }

    /// Release the channel now rather than at the end of scope.
    pub fn close(self) {}

    fn wrong_kind(&self, wanted: BackendKind) -> GatewayError {
        GatewayError::connection(
            &self.socket,
            format!(
                "channel is bound to the {} service, not {}",
                self.client.kind(),
                wanted
            ),
        )
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        event!(
            Level::DEBUG,
            node = %self.node,
            socket = %self.socket,
            "released {} channel",
            self.client.kind()
        );
    }
}

/// Opens sessions. Implementations must not retry: a failed open is final for the request.
#[tonic::async_trait]
pub trait ConnectionBroker: Send + Sync {
    async fn open(
        &self,
        endpoint: &NodeEndpoint,
        kind: BackendKind,
    ) -> Result<Session, GatewayError>;
}

/// Broker speaking gRPC to real nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcBroker;

#[tonic::async_trait]
impl ConnectionBroker for GrpcBroker {
    async fn open(
        &self,
        endpoint: &NodeEndpoint,
        kind: BackendKind,
    ) -> Result<Session, GatewayError> {
        let channel = open_channel(endpoint).await?;
        let client = match kind {
            BackendKind::Consensus => {
                BackendClient::Consensus(Box::new(GrpcConsensusClient::new(channel)))
            }
            BackendKind::LightClient => {
                BackendClient::LightClient(Box::new(GrpcLightClient::new(channel)))
            }
            BackendKind::Beacon => BackendClient::Beacon(Box::new(GrpcBeaconClient::new(channel))),
        };
        Ok(Session::new(endpoint, client))
    }
}
