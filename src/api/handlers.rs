use crate::address::{StakingAddress, TendermintAddress};
use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::params::{Height, QueryParams};
use crate::rpc::broker::BackendKind;
use crate::types::cbor_to_json;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use tonic::Status;
use tracing::{event, Level};
use warp::Rejection;

use super::responses::{reply, SuccessResponse, PONG};

type Outcome = Result<JsonValue, GatewayError>;

/// Queries served under `/api/consensus/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsensusRoute {
    Genesis,
    GenesisDocument,
    Epoch,
    Block,
    BlockHeader,
    BlockLastCommit,
    Transactions,
    TransactionsWithResults,
    Status,
    Height,
    SignedHeader,
    ValidatorSet,
    Parameters,
    PubKeyAddress,
    PubKeyBech32Address,
    Base64Bech32Address,
}

impl ConsensusRoute {
    pub const ALL: [ConsensusRoute; 16] = [
        ConsensusRoute::Genesis,
        ConsensusRoute::GenesisDocument,
        ConsensusRoute::Epoch,
        ConsensusRoute::Block,
        ConsensusRoute::BlockHeader,
        ConsensusRoute::BlockLastCommit,
        ConsensusRoute::Transactions,
        ConsensusRoute::TransactionsWithResults,
        ConsensusRoute::Status,
        ConsensusRoute::Height,
        ConsensusRoute::SignedHeader,
        ConsensusRoute::ValidatorSet,
        ConsensusRoute::Parameters,
        ConsensusRoute::PubKeyAddress,
        ConsensusRoute::PubKeyBech32Address,
        ConsensusRoute::Base64Bech32Address,
    ];

    pub fn from_segment(segment: &str) -> Option<ConsensusRoute> {
        ConsensusRoute::ALL
            .iter()
            .copied()
            .find(|route| route.segment() == segment)
    }

    pub fn segment(&self) -> &'static str {
        match self {
            ConsensusRoute::Genesis => "genesis",
            ConsensusRoute::GenesisDocument => "genesisdocument",
            ConsensusRoute::Epoch => "epoch",
            ConsensusRoute::Block => "block",
            ConsensusRoute::BlockHeader => "blockheader",
            ConsensusRoute::BlockLastCommit => "blocklastcommit",
            ConsensusRoute::Transactions => "transactions",
            ConsensusRoute::TransactionsWithResults => "transactionswithresults",
            ConsensusRoute::Status => "status",
            ConsensusRoute::Height => "height",
            ConsensusRoute::SignedHeader => "signedheader",
            ConsensusRoute::ValidatorSet => "validatorset",
            ConsensusRoute::Parameters => "parameters",
            ConsensusRoute::PubKeyAddress => "pubkeyaddress",
            ConsensusRoute::PubKeyBech32Address => "pubkeybech32address",
            ConsensusRoute::Base64Bech32Address => "base64bech32address",
        }
    }

    /// What the route returns, as it appears in log lines.
    fn payload(&self) -> &'static str {
        match self {
            ConsensusRoute::Genesis => "Genesis File",
            ConsensusRoute::GenesisDocument => "Genesis Document",
            ConsensusRoute::Epoch => "Epoch",
            ConsensusRoute::Block => "Block",
            ConsensusRoute::BlockHeader => "Block Header",
            ConsensusRoute::BlockLastCommit => "Block Last Commit",
            ConsensusRoute::Transactions => "Transactions",
            ConsensusRoute::TransactionsWithResults => "Transactions With Results",
            ConsensusRoute::Status => "Status",
            ConsensusRoute::Height => "Height",
            ConsensusRoute::SignedHeader => "Signed Header",
            ConsensusRoute::ValidatorSet => "Validator Set",
            ConsensusRoute::Parameters => "Consensus Parameters",
            ConsensusRoute::PubKeyAddress => "Tendermint Address",
            ConsensusRoute::PubKeyBech32Address => "Bech32 Address",
            ConsensusRoute::Base64Bech32Address => "Bech32 Address",
        }
    }
}

pub async fn ping_api_handler() -> Result<warp::reply::Json, Rejection> {
    event!(Level::INFO, "Request at /api/pingapi responding with pong!");
    Ok(warp::reply::json(&SuccessResponse { result: PONG }))
}

pub async fn connections_list_handler(gateway: Gateway) -> Result<warp::reply::Json, Rejection> {
    let names = gateway.registry().names();
    event!(
        Level::INFO,
        "Request at /api/getconnectionslist responding with {} node names!",
        names.len()
    );
    Ok(warp::reply::json(&SuccessResponse { result: names }))
}

pub async fn ping_node_handler(
    query: HashMap<String, String>,
    gateway: Gateway,
) -> Result<warp::reply::Json, Rejection> {
    let params = QueryParams::from(query);
    let outcome = ping_node(&gateway, &params).await;
    Ok(respond("/api/pingnode", "pong", &params, outcome))
}

pub async fn consensus_handler(
    segment: String,
    query: HashMap<String, String>,
    gateway: Gateway,
) -> Result<warp::reply::Json, Rejection> {
    let route = ConsensusRoute::from_segment(&segment).ok_or_else(warp::reject::not_found)?;
    let params = QueryParams::from(query);
    let outcome = dispatch(route, &gateway, &params).await;
    let path = format!("/api/consensus/{}", route.segment());
    Ok(respond(&path, route.payload(), &params, outcome))
}

pub async fn dispatch(route: ConsensusRoute, gateway: &Gateway, params: &QueryParams) -> Outcome {
    match route {
        ConsensusRoute::Genesis => get_state_to_genesis(gateway, params).await,
        ConsensusRoute::GenesisDocument => get_genesis_document(gateway, params).await,
        ConsensusRoute::Epoch => get_epoch(gateway, params).await,
        ConsensusRoute::Block => get_block(gateway, params).await,
        ConsensusRoute::BlockHeader => get_block_header(gateway, params).await,
        ConsensusRoute::BlockLastCommit => get_block_last_commit(gateway, params).await,
        ConsensusRoute::Transactions => get_transactions(gateway, params).await,
        ConsensusRoute::TransactionsWithResults => {
            get_transactions_with_results(gateway, params).await
        }
        ConsensusRoute::Status => get_status(gateway, params).await,
        ConsensusRoute::Height => get_height(gateway, params).await,
        ConsensusRoute::SignedHeader => get_signed_header(gateway, params).await,
        ConsensusRoute::ValidatorSet => get_validator_set(gateway, params).await,
        ConsensusRoute::Parameters => get_parameters(gateway, params).await,
        ConsensusRoute::PubKeyAddress => public_key_to_address(params),
        ConsensusRoute::PubKeyBech32Address => public_key_to_bech32_address(params),
        ConsensusRoute::Base64Bech32Address => base64_to_bech32_address(params),
    }
}

fn respond(path: &str, payload: &str, params: &QueryParams, outcome: Outcome) -> warp::reply::Json {
    match &outcome {
        Ok(_) => event!(Level::INFO, "Request at {} responding with {}!", path, payload),
        Err(err @ GatewayError::NotFound { .. }) | Err(err @ GatewayError::Validation { .. }) => {
            event!(
                Level::INFO,
                kind = err.kind(),
                name = params.name(),
                "Request at {} rejected: {}",
                path,
                err
            )
        }
        Err(err) => event!(
            Level::ERROR,
            kind = err.kind(),
            name = params.name(),
            reason = err.reason().unwrap_or_default(),
            "Request at {} failed: {}",
            path,
            err
        ),
    }
    reply(&outcome)
}

fn backend_error(what: &'static str) -> impl Fn(Status) -> GatewayError {
    move |status| {
        GatewayError::backend(what, format!("{:?}: {}", status.code(), status.message()))
    }
}

async fn ping_node(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let session = gateway.open(endpoint, BackendKind::Consensus).await?;
    session
        .consensus()?
        .get_block(Height::Latest)
        .await
        .map_err(backend_error("highest block height"))?;
    Ok(json!(PONG))
}

async fn get_state_to_genesis(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let height = params.height()?;
    let session = gateway.open(endpoint, BackendKind::Consensus).await?;
    let genesis = session
        .consensus()?
        .state_to_genesis(height)
        .await
        .map_err(backend_error("Genesis File"))?;
    Ok(cbor_to_json(&genesis))
}

async fn get_genesis_document(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let session = gateway.open(endpoint, BackendKind::Consensus).await?;
    let document = session
        .consensus()?
        .get_genesis_document()
        .await
        .map_err(backend_error("Genesis Document"))?;
    Ok(cbor_to_json(&document))
}

async fn get_epoch(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let height = params.height()?;
    let session = gateway.open(endpoint, BackendKind::Beacon).await?;
    let epoch = session
        .beacon()?
        .get_epoch(height)
        .await
        .map_err(backend_error("Epoch"))?;
    Ok(json!(epoch))
}

async fn get_block(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let height = params.height()?;
    let session = gateway.open(endpoint, BackendKind::Consensus).await?;
    let block = session
        .consensus()?
        .get_block(height)
        .await
        .map_err(backend_error("Block"))?;
    Ok(block.to_json())
}

async fn get_block_header(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let height = params.height()?;
    let session = gateway.open(endpoint, BackendKind::Consensus).await?;
    let block = session
        .consensus()?
        .get_block(height)
        .await
        .map_err(backend_error("Block"))?;
    let meta = block.decode_meta()?;
    Ok(cbor_to_json(&meta.header))
}

async fn get_block_last_commit(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let height = params.height()?;
    let session = gateway.open(endpoint, BackendKind::Consensus).await?;
    let block = session
        .consensus()?
        .get_block(height)
        .await
        .map_err(backend_error("Block"))?;
    let meta = block.decode_meta()?;
    Ok(cbor_to_json(&meta.last_commit))
}

async fn get_transactions(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let height = params.height()?;
    let session = gateway.open(endpoint, BackendKind::Consensus).await?;
    let transactions = session
        .consensus()?
        .get_transactions(height)
        .await
        .map_err(backend_error("Transactions"))?;
    let encoded: Vec<String> = transactions
        .iter()
        .map(|transaction| STANDARD.encode(transaction))
        .collect();
    Ok(json!(encoded))
}

async fn get_transactions_with_results(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let height = params.height()?;
    let session = gateway.open(endpoint, BackendKind::Consensus).await?;
    let transactions = session
        .consensus()?
        .get_transactions_with_results(height)
        .await
        .map_err(backend_error("Transactions With Results"))?;
    Ok(cbor_to_json(&transactions))
}

async fn get_status(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let session = gateway.open(endpoint, BackendKind::Consensus).await?;
    let status = session
        .consensus()?
        .get_status()
        .await
        .map_err(backend_error("Status"))?;
    Ok(cbor_to_json(&status))
}

/// Height of the latest block the node has.
async fn get_height(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let session = gateway.open(endpoint, BackendKind::Consensus).await?;
    let block = session
        .consensus()?
        .get_block(Height::Latest)
        .await
        .map_err(backend_error("Height"))?;
    Ok(json!(block.height))
}

async fn get_signed_header(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let height = params.height()?;
    let session = gateway.open(endpoint, BackendKind::LightClient).await?;
    let header = session
        .light_client()?
        .get_signed_header(height)
        .await
        .map_err(backend_error("Signed Header"))?;
    Ok(cbor_to_json(&header))
}

async fn get_validator_set(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let height = params.height()?;
    let session = gateway.open(endpoint, BackendKind::LightClient).await?;
    let validators = session
        .light_client()?
        .get_validator_set(height)
        .await
        .map_err(backend_error("Validator Set"))?;
    Ok(cbor_to_json(&validators))
}

async fn get_parameters(gateway: &Gateway, params: &QueryParams) -> Outcome {
    let endpoint = gateway.resolve(params.name())?;
    let height = params.height()?;
    let session = gateway.open(endpoint, BackendKind::LightClient).await?;
    let parameters = session
        .light_client()?
        .get_parameters(height)
        .await
        .map_err(backend_error("Consensus Parameters"))?;
    Ok(cbor_to_json(&parameters))
}

fn public_key_to_address(params: &QueryParams) -> Outcome {
    let public_key = params.public_key()?;
    let address = TendermintAddress::from_public_key(&public_key);
    Ok(json!(address.to_string()))
}

fn public_key_to_bech32_address(params: &QueryParams) -> Outcome {
    let public_key = params.public_key()?;
    bech32_of(&StakingAddress::from_public_key(&public_key))
}

fn base64_to_bech32_address(params: &QueryParams) -> Outcome {
    let address = params.address()?;
    bech32_of(&address)
}

fn bech32_of(address: &StakingAddress) -> Outcome {
    let encoded = address
        .to_bech32()
        .map_err(|err| GatewayError::decode("Address", err))?;
    Ok(json!(encoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::filters::routes;
    use crate::endpoint::{NodeEndpoint, NodeRegistry};
    use crate::rpc::broker::GrpcBroker;
    use crate::test_utilities::mocks::{
        MockBehaviour, MOCK_CHAIN_ID, MOCK_EPOCH_INTERVAL, MOCK_LATEST_HEIGHT,
    };
    use crate::test_utilities::{test_gateway, VALIDATOR_SOCKET};
    use std::sync::Arc;
    use warp::http::StatusCode;

    const KEY: &str = "CVzqFIADD2Ed0khGBNf4Rvh7vSNtrL1ULTkWYQszDpc%3D";

    async fn get(gateway: Gateway, path: &str) -> JsonValue {
        let response = warp::test::request()
            .method("GET")
            .path(path)
            .reply(&routes(gateway))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
        assert_eq!(
            response.headers()["content-type"],
            "application/json",
            "{}",
            path
        );
        serde_json::from_slice(response.body()).unwrap()
    }

    fn healthy() -> (Gateway, Arc<crate::test_utilities::mocks::Counters>) {
        test_gateway(MockBehaviour::default())
    }

    #[test]
    fn route_segments_round_trip() {
        for route in ConsensusRoute::ALL {
            assert_eq!(ConsensusRoute::from_segment(route.segment()), Some(route));
        }
        assert_eq!(ConsensusRoute::from_segment("Block"), None);
        assert_eq!(ConsensusRoute::from_segment(""), None);
    }

    #[tokio::test]
    async fn ping_api_test() {
        let (gateway, counters) = healthy();
        let body = get(gateway, "/api/pingapi").await;
        assert_eq!(body, json!({"result": "pong"}));
        assert_eq!(counters.opened(), 0);
    }

    #[tokio::test]
    async fn connections_list_test() {
        let (gateway, _) = healthy();
        let body = get(gateway, "/api/getconnectionslist").await;
        assert_eq!(body, json!({"result": ["validator", "sentry"]}));

        let empty = Gateway::new(
            NodeRegistry::default(),
            Arc::new(crate::test_utilities::mocks::MockBroker::new(
                MockBehaviour::default(),
            )),
        );
        assert_eq!(
            get(empty, "/api/getconnectionslist").await,
            json!({"result": []})
        );
    }

    #[tokio::test]
    async fn ping_node_test() {
        let (gateway, counters) = healthy();
        let body = get(gateway.clone(), "/api/pingnode?name=validator").await;
        assert_eq!(body, json!({"result": "pong"}));
        assert_eq!(counters.calls(), 1);
        assert_eq!(counters.released(), 1);

        let body = get(gateway, "/api/pingnode?name=nobody").await;
        assert_eq!(body, json!({"error": "Node name requested doesn't exist"}));

        let (gateway, _) = test_gateway(MockBehaviour {
            fail_calls: true,
            ..Default::default()
        });
        let body = get(gateway, "/api/pingnode?name=validator").await;
        assert_eq!(
            body,
            json!({"error": "Failed to retrieve highest block height!"})
        );
    }

    #[tokio::test]
    async fn block_at_height() {
        let (gateway, counters) = healthy();
        let body = get(gateway, "/api/consensus/block?name=validator&height=5").await;
        assert_eq!(body["result"]["height"], 5);
        assert!(body["result"]["hash"].is_string());
        assert!(body.get("error").is_none());
        assert_eq!(counters.opened(), 1);
        assert_eq!(counters.calls(), 1);
        assert_eq!(counters.released(), 1);
    }

    #[tokio::test]
    async fn block_latest() {
        let (gateway, _) = healthy();
        for path in [
            "/api/consensus/block?name=validator",
            "/api/consensus/block?name=validator&height=",
        ] {
            let body = get(gateway.clone(), path).await;
            assert_eq!(body["result"]["height"], MOCK_LATEST_HEIGHT);
        }
    }

    #[tokio::test]
    async fn unknown_node_opens_nothing() {
        let (gateway, counters) = healthy();
        for path in [
            "/api/consensus/block?name=nobody",
            "/api/consensus/block",
            "/api/consensus/epoch?name=Validator",
            "/api/consensus/signedheader?name=nobody&height=abc",
        ] {
            let body = get(gateway.clone(), path).await;
            assert_eq!(
                body,
                json!({"error": "Node name requested doesn't exist"}),
                "{}",
                path
            );
        }
        assert_eq!(counters.opened(), 0);
    }

    #[tokio::test]
    async fn invalid_height_opens_nothing() {
        let (gateway, counters) = healthy();
        for height in ["-5", "abc", "1.5"] {
            for route in ["block", "blockheader", "epoch", "validatorset", "genesis"] {
                let path = format!("/api/consensus/{}?name=validator&height={}", route, height);
                let body = get(gateway.clone(), &path).await;
                assert_eq!(
                    body,
                    json!({"error": "Unexpected value found, height needs to be string of int!"}),
                    "{}",
                    path
                );
            }
        }
        assert_eq!(counters.opened(), 0);
        assert_eq!(counters.calls(), 0);
    }

    #[tokio::test]
    async fn connection_failure_makes_no_calls() {
        let (gateway, counters) = test_gateway(MockBehaviour {
            fail_open: true,
            ..Default::default()
        });
        let body = get(gateway, "/api/consensus/status?name=validator").await;
        assert_eq!(
            body,
            json!({
                "error": format!("Failed to establish connection using socket: {}", VALIDATOR_SOCKET)
            })
        );
        assert_eq!(counters.calls(), 0);
    }

    #[tokio::test]
    async fn unreachable_node_over_grpc() {
        let dir = tempfile::tempdir().unwrap();
        let socket = format!("unix:{}", dir.path().join("internal.sock").display());
        let registry =
            NodeRegistry::new(vec![NodeEndpoint::new("validator", &socket)]).unwrap();
        let gateway = Gateway::new(registry, Arc::new(GrpcBroker));

        let body = get(gateway, "/api/consensus/block?name=validator&height=1").await;
        assert_eq!(
            body,
            json!({"error": format!("Failed to establish connection using socket: {}", socket)})
        );
    }

    #[tokio::test]
    async fn backend_failure_releases_channel() {
        let (gateway, counters) = test_gateway(MockBehaviour {
            fail_calls: true,
            ..Default::default()
        });
        let cases = [
            ("block", "Failed to retrieve Block!"),
            ("epoch", "Failed to retrieve Epoch!"),
            ("transactions", "Failed to retrieve Transactions!"),
            ("validatorset", "Failed to retrieve Validator Set!"),
            ("genesisdocument", "Failed to retrieve Genesis Document!"),
        ];
        for (route, message) in cases {
            let path = format!("/api/consensus/{}?name=validator", route);
            let body = get(gateway.clone(), &path).await;
            assert_eq!(body, json!({ "error": message }), "{}", path);
        }
        assert_eq!(counters.opened(), cases.len());
        assert_eq!(counters.calls(), cases.len());
        assert_eq!(counters.released(), cases.len());
    }

    #[tokio::test]
    async fn block_header_and_last_commit() {
        let (gateway, counters) = healthy();
        let body = get(gateway.clone(), "/api/consensus/blockheader?name=validator&height=7").await;
        assert_eq!(
            body,
            json!({"result": {"chain_id": MOCK_CHAIN_ID, "height": 7}})
        );

        let body = get(gateway, "/api/consensus/blocklastcommit?name=validator&height=7").await;
        assert_eq!(body, json!({"result": {"height": 6, "signatures": []}}));
        assert_eq!(counters.released(), counters.opened());
    }

    #[tokio::test]
    async fn corrupt_meta_is_a_decode_error() {
        let (gateway, counters) = test_gateway(MockBehaviour {
            corrupt_meta: true,
            ..Default::default()
        });
        for route in ["blockheader", "blocklastcommit"] {
            let path = format!("/api/consensus/{}?name=validator&height=7", route);
            let body = get(gateway.clone(), &path).await;
            assert_eq!(body, json!({"error": "Failed to Unmarshal Block Metadata!"}));
        }
        assert_eq!(counters.opened(), 2);
        assert_eq!(counters.released(), 2);
    }

    #[tokio::test]
    async fn transactions_are_base64() {
        let (gateway, _) = healthy();
        let body = get(gateway.clone(), "/api/consensus/transactions?name=validator&height=3").await;
        assert_eq!(body, json!({"result": ["Zmlyc3Q=", "c2Vjb25k"]}));

        let body = get(
            gateway,
            "/api/consensus/transactionswithresults?name=validator&height=3",
        )
        .await;
        assert_eq!(
            body,
            json!({"result": {"transactions": ["Zmlyc3Q="], "results": [{"events": null}]}})
        );
    }

    #[tokio::test]
    async fn node_state_routes() {
        let (gateway, counters) = healthy();

        let body = get(gateway.clone(), "/api/consensus/genesis?name=validator&height=20").await;
        assert_eq!(body, json!({"result": {"height": 20, "chain_id": MOCK_CHAIN_ID}}));

        let body = get(gateway.clone(), "/api/consensus/genesisdocument?name=sentry").await;
        assert_eq!(body["result"]["height"], 1);

        let body = get(gateway.clone(), "/api/consensus/status?name=validator").await;
        assert_eq!(body["result"]["latest_height"], MOCK_LATEST_HEIGHT);

        let body = get(gateway.clone(), "/api/consensus/height?name=validator").await;
        assert_eq!(body, json!({ "result": MOCK_LATEST_HEIGHT }));

        let body = get(gateway.clone(), "/api/consensus/epoch?name=validator&height=250").await;
        assert_eq!(body, json!({"result": 250 / MOCK_EPOCH_INTERVAL}));

        let body = get(gateway.clone(), "/api/consensus/epoch?name=validator").await;
        assert_eq!(
            body,
            json!({"result": MOCK_LATEST_HEIGHT / MOCK_EPOCH_INTERVAL})
        );

        assert_eq!(counters.opened(), 6);
        assert_eq!(counters.calls(), 6);
        assert_eq!(counters.released(), 6);
    }

    #[tokio::test]
    async fn light_client_routes() {
        let (gateway, _) = healthy();

        let body = get(gateway.clone(), "/api/consensus/signedheader?name=validator&height=9").await;
        assert_eq!(body, json!({"result": {"height": 9, "meta": "AQID"}}));

        let body = get(gateway.clone(), "/api/consensus/validatorset?name=validator").await;
        assert_eq!(
            body,
            json!({"result": {"height": MOCK_LATEST_HEIGHT, "validators": []}})
        );

        let body = get(gateway, "/api/consensus/parameters?name=validator&height=2").await;
        assert_eq!(body, json!({"result": {"height": 2, "max_tx_size": 32768}}));
    }

    #[tokio::test]
    async fn address_routes() {
        let (gateway, counters) = healthy();

        let body = get(
            gateway.clone(),
            &format!("/api/consensus/pubkeyaddress?consensus_public_key={}", KEY),
        )
        .await;
        assert_eq!(
            body,
            json!({"result": "829E5F47DDE029DC77BD8C49187F4C809023D5C1"})
        );

        let body = get(
            gateway.clone(),
            &format!("/api/consensus/pubkeybech32address?consensus_public_key={}", KEY),
        )
        .await;
        assert_eq!(
            body,
            json!({"result": "oasis1qzskk72k92y4duc47lqcsxhza6fahlqtlqyesw0p"})
        );

        let body = get(
            gateway.clone(),
            "/api/consensus/base64bech32address?address=AKFreVYqiVbzFffBiBri7pPb%2FAv4",
        )
        .await;
        assert_eq!(
            body,
            json!({"result": "oasis1qzskk72k92y4duc47lqcsxhza6fahlqtlqyesw0p"})
        );

        // no node is involved
        assert_eq!(counters.opened(), 0);
    }

    #[tokio::test]
    async fn address_routes_validate_input() {
        let (gateway, _) = healthy();
        let cases = [
            ("/api/consensus/pubkeyaddress", "No Consensus Key Provided"),
            (
                "/api/consensus/pubkeybech32address?consensus_public_key=",
                "No Consensus Key Provided",
            ),
            (
                "/api/consensus/pubkeyaddress?consensus_public_key=AAAA",
                "Failed to Unmarshal Public Key!",
            ),
            (
                "/api/consensus/pubkeybech32address?consensus_public_key=%21%21",
                "Failed to Unmarshal Public Key!",
            ),
            ("/api/consensus/base64bech32address", "No Address Provided"),
            (
                "/api/consensus/base64bech32address?address=AAAA",
                "Failed to Unmarshal Address!",
            ),
        ];
        for (path, message) in cases {
            assert_eq!(
                get(gateway.clone(), path).await,
                json!({ "error": message }),
                "{}",
                path
            );
        }
    }

    #[tokio::test]
    async fn unknown_paths_are_404() {
        let (gateway, counters) = healthy();
        for path in [
            "/api/consensus/blocks?name=validator",
            "/api/consensus",
            "/api/consensus/block/extra",
            "/api/unknown",
        ] {
            let response = warp::test::request()
                .method("GET")
                .path(path)
                .reply(&routes(gateway.clone()))
                .await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);
        }
        assert_eq!(counters.opened(), 0);
    }

    #[tokio::test]
    async fn concurrent_requests_are_isolated() {
        let (gateway, counters) = healthy();
        let paths: Vec<String> = (1..=20)
            .map(|height| format!("/api/consensus/block?name=validator&height={}", height))
            .collect();
        let bodies =
            futures::future::join_all(paths.iter().map(|path| get(gateway.clone(), path))).await;
        for (height, body) in (1..=20).zip(bodies) {
            assert_eq!(body["result"]["height"], height);
        }
        assert_eq!(counters.opened(), 20);
        assert_eq!(counters.released(), 20);
    }
}
