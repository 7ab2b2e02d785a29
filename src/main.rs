/*!
# Oasis Gateway

## Help

```bash
oasis_gateway --help
```

## Example Usage

```bash
oasis_gateway --config config
```

Settings may be overridden from the environment:

```bash
GATEWAY_SERVER__PORT=9000 RUST_LOG=info oasis_gateway
```

## Dev

To run from source:

```bash
cargo run -- --help
cargo run -- --config config
```
*/

use oasis_gateway::gateway;

#[tokio::main]
pub async fn main() -> oasis_gateway::Result<()> {
    tracing_subscriber::fmt::init();
    gateway::run().await
}
