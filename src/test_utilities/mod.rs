pub mod mocks;

use crate::endpoint::{NodeEndpoint, NodeRegistry};
use crate::gateway::Gateway;
use mocks::{Counters, MockBehaviour, MockBroker};
use std::sync::Arc;

pub const VALIDATOR_SOCKET: &str = "unix:/serverdir/node/internal.sock";
pub const SENTRY_SOCKET: &str = "10.0.0.2:9001";

/// Two nodes, `validator` and `sentry`, in that order.
pub fn test_registry() -> NodeRegistry {
    NodeRegistry::new(vec![
        NodeEndpoint::new("validator", VALIDATOR_SOCKET),
        NodeEndpoint::new("sentry", SENTRY_SOCKET),
    ])
    .unwrap()
}

pub fn test_gateway(behaviour: MockBehaviour) -> (Gateway, Arc<Counters>) {
    let broker = MockBroker::new(behaviour);
    let counters = broker.counters();
    (Gateway::new(test_registry(), Arc::new(broker)), counters)
}
