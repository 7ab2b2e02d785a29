use crate::gateway::Gateway;
use std::collections::HashMap;
use std::convert::Infallible;
use warp::{Filter, Reply};

use super::handlers::{
    connections_list_handler, consensus_handler, ping_api_handler, ping_node_handler,
};

/// All routes the gateway serves.
pub fn routes(
    gateway: Gateway,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    ping_api_route_filter()
        .or(connections_list_route_filter(gateway.clone()))
        .or(ping_node_route_filter(gateway.clone()))
        .or(consensus_route_filter(gateway))
        .with(warp::trace::request())
}

/// gateway liveness filter.
pub fn ping_api_route_filter(
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::get()
        .and(warp::path!("api" / "pingapi"))
        .and_then(ping_api_handler)
}

/// configured node names filter.
pub fn connections_list_route_filter(
    gateway: Gateway,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::get()
        .and(warp::path!("api" / "getconnectionslist"))
        .and(with_gateway(gateway))
        .and_then(connections_list_handler)
}

/// node liveness filter.
pub fn ping_node_route_filter(
    gateway: Gateway,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::get()
        .and(warp::path!("api" / "pingnode"))
        .and(warp::query::<HashMap<String, String>>())
        .and(with_gateway(gateway))
        .and_then(ping_node_handler)
}

/// consensus query filter. The last path segment picks the query, unknown segments are
/// rejected by the handler with a 404.
pub fn consensus_route_filter(
    gateway: Gateway,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::get()
        .and(warp::path!("api" / "consensus" / String))
        .and(warp::query::<HashMap<String, String>>())
        .and(with_gateway(gateway))
        .and_then(consensus_handler)
}

/// inject gateway context
fn with_gateway(
    gateway: Gateway,
) -> impl Filter<Extract = (Gateway,), Error = Infallible> + Clone {
    warp::any().map(move || gateway.clone())
}
