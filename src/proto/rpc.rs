//! JSON-RPC 2.0 envelopes sent and received by the form.
//!
//! The request side is strict: numeric id, a method name and an object of
//! params, serialized in the order `jsonrpc, id, method, params`. The response
//! side is lenient because the bridge may answer with anything; it is only
//! used to look for an `error` member after the fact.
//!
//! # Examples
//!
//! ```
//! use rpc_form::proto::rpc::RpcRequest;
//! use serde_json::{json, Map};
//!
//! let mut params = Map::new();
//! params.insert("name".into(), json!("airbnb_search"));
//! let request = RpcRequest::new(7, "tools/call", params);
//! let serialized = serde_json::to_string(&request).unwrap();
//! assert_eq!(
//!     serialized,
//!     r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"airbnb_search"}}"#
//! );
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Protocol version carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
/// Generic server failure used by the bridge.
pub const SERVER_ERROR: i64 = -32000;

/// A JSON-RPC request message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// JSON-RPC protocol version. Always "2.0".
    pub jsonrpc: String,
    /// Identifier established by the client.
    pub id: u64,
    /// The method to invoke on the server.
    pub method: String,
    /// Parameters for the method. Empty when the user typed nothing.
    pub params: Map<String, Value>,
}

impl RpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC response message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Kept raw: servers do not always send a `{code, message}` object here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl RpcResponse {
    /// Interpret an arbitrary JSON value as a response, if it has that shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// The `error` member as an error object. A non-null member that is not
    /// shaped like one still counts as an error.
    pub fn error_object(&self) -> Option<RpcErrorObject> {
        let raw = self.error.as_ref().filter(|raw| !raw.is_null())?;
        Some(
            serde_json::from_value(raw.clone())
                .unwrap_or_else(|_| RpcErrorObject::unstructured(raw)),
        )
    }
}

/// Details about a JSON-RPC error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    /// Error code as defined by the JSON-RPC spec.
    pub code: i64,
    /// A short description of the error.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcErrorObject {
    fn unstructured(raw: &Value) -> Self {
        let message = match raw {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        Self {
            code: SERVER_ERROR,
            message,
            data: Some(raw.clone()),
        }
    }
}
