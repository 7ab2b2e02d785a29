/*!
# Oasis Gateway

The Oasis Gateway is a **REST façade** over the gRPC surface of an Oasis node. It lets
external tools query consensus state (blocks, transactions, epochs, validator sets, signed
headers, genesis snapshots) and derive account addresses from public keys without speaking
the node's native protocol.

Every request resolves a logical node name against the configured endpoint table, opens a
short-lived channel to that node, issues exactly one RPC call and relays the result as JSON.
Nothing is cached, nothing is retried.

# Usage

```bash
oasis_gateway --config config
```

and then

```bash
curl 'http://127.0.0.1:8686/api/consensus/block?name=validator&height=1000'
```

Address derivation is also available offline through the `gatewaycli` binary.

# Contact

Oasis Gateway Developers

*/
pub mod address;
pub mod api;
pub mod crypto;
pub mod endpoint;
pub mod error;
pub mod gateway;
pub mod params;
pub mod rpc;
pub mod settings;
pub mod types;

#[cfg(test)]
pub mod test_setup;
#[cfg(test)]
pub mod test_utilities;

/// Error returned by most functions which bootstrap the process.
///
/// Request handling uses the typed [`error::GatewayError`] instead; this boxed error only
/// surfaces from settings loading, server start-up and the command line tools.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// A specialized `Result` type for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;
