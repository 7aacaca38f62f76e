//! Library root for the `rpc_form` crate: a JSON-RPC request form and client.

// Error handling
pub mod errors;

// Wire format
pub mod proto;

// Form fields
pub mod method;
pub mod params;
pub mod request_id;

// Transport
pub mod client;

// Submission flow and rendering
pub mod form;

// Configuration & CLI
pub mod cli;
pub mod config;

pub use client::RpcClient;
pub use errors::{FormError, FormResult};
pub use form::{FormSession, Outcome, RequestForm, ResultRegion, ResultView, Submission};
pub use method::RpcMethod;
