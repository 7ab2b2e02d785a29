use crate::rpc::codec::CborCodec;
use serde::{de::DeserializeOwned, Serialize};
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{Request, Status};

/// Unary CBOR calls over an open channel.
///
/// Cloning is cheap and shares the underlying channel.
#[derive(Debug, Clone)]
pub struct CborClient {
    inner: Grpc<Channel>,
}

impl CborClient {
    pub fn new(channel: Channel) -> Self {
        CborClient {
            inner: Grpc::new(channel),
        }
    }

    /// Call `method` (a full `/service/Method` path) with `request`.
    pub async fn call<Req, Resp>(&self, method: &'static str, request: Req) -> Result<Resp, Status>
    where
        Req: Serialize + Send + Sync + 'static,
        Resp: DeserializeOwned + Send + Sync + 'static,
    {
        let mut grpc = self.inner.clone();
        grpc.ready()
            .await
            .map_err(|err| Status::unknown(format!("Service was not ready: {}", err)))?;
        let response = grpc
            .unary(
                Request::new(request),
                PathAndQuery::from_static(method),
                CborCodec::<Req, Resp>::default(),
            )
            .await?;
        Ok(response.into_inner())
    }
}
