/*!

# Node RPC

## Introduction

Oasis nodes expose their services over gRPC. Unlike most gRPC services the messages are not
protobuf: request and response bodies are CBOR. The gateway talks to three of those
services:

```text
oasis-core.Consensus        blocks, transactions, status, genesis
oasis-core.ConsensusLight   signed headers, validator sets, consensus parameters
oasis-core.Beacon           epochs
```

## Channels

A channel is opened per request and dropped when the request is done. Nothing is pooled,
retried or shared between requests. The socket of a node is given in one of three forms:

```text
unix:/serverdir/node/internal.sock      local unix socket, plaintext
10.0.0.2:9001                           TCP, TLS when a certificate bundle is configured
https://sentry.example.com:9001         full URI, used as is
```

Opening is eager, so an unreachable node is reported when the channel is opened and no RPC
is attempted.

## Calls

Every call is unary. The request is a single CBOR value:

```text
GetBlock            height (int, 0 = latest)
GetTransactions     height
StateToGenesis      height
GetGenesisDocument  null
GetStatus           null
GetSignedHeader     height
GetValidatorSet     height
GetParameters       height
GetEpoch            height
```

The typed clients for each service live in `consensus`, `light` and `beacon`. `broker`
selects one of them when a channel is opened and wraps both in a `Session`.

*/

pub mod beacon;
pub mod broker;
pub mod channel;
pub mod client;
pub mod codec;
pub mod consensus;
pub mod light;
