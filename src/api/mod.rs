/*!

# REST Interface

## Introduction

The gateway exposes a small read-only HTTP API. Every route is a `GET` and every response is a
JSON object with HTTP status 200, carrying either a result or an error message:

```json
{"result": ...}
{"error": "Node name requested doesn't exist"}
```

Clients must inspect the body to tell the two apart. Paths that are not listed below are
answered with a plain 404.

## Query parameters

```text
name                  logical node name from the endpoint table
height                block height, non-negative integer. absent or empty means latest
consensus_public_key  base64 encoded 32 byte Ed25519 public key
address               base64 encoded 21 byte staking address
```

## Routes

```text
/api/pingapi                                   gateway liveness, no node contacted
/api/getconnectionslist                        names of configured nodes
/api/pingnode?name                             node liveness

/api/consensus/genesis?name&height             state dump as genesis document
/api/consensus/genesisdocument?name            original genesis document
/api/consensus/epoch?name&height               epoch number
/api/consensus/block?name&height               block
/api/consensus/blockheader?name&height         Tendermint header from block metadata
/api/consensus/blocklastcommit?name&height     Tendermint last commit from block metadata
/api/consensus/transactions?name&height        raw transactions, base64
/api/consensus/transactionswithresults?...     transactions with their execution results
/api/consensus/status?name                     node consensus status
/api/consensus/height?name                     latest block height
/api/consensus/signedheader?name&height        light client signed header
/api/consensus/validatorset?name&height        light client validator set
/api/consensus/parameters?name&height          consensus parameters

/api/consensus/pubkeyaddress?consensus_public_key          Tendermint address
/api/consensus/pubkeybech32address?consensus_public_key    staking address, bech32
/api/consensus/base64bech32address?address                 staking address, bech32
```

## Request pipeline

Each node query runs the same steps, stopping at the first failure:

1. look up `name` in the endpoint table
2. validate the remaining parameters
3. open a channel to the node
4. issue exactly one RPC call
5. decode embedded payloads, if the route needs it

The channel is dropped when the handler returns, whatever the outcome. Requests share no
mutable state, so any number can be in flight at once.

*/
pub mod filters;
pub mod handlers;
pub mod responses;
