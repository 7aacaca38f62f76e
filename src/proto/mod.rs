//! Wire types exchanged with the JSON-RPC endpoint.

pub mod rpc;
