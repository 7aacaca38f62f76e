//! Stand-in JSON-RPC bridge for integration tests.

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rpc_form::client::RpcClient;
use rpc_form::config::FormConfig;
use rpc_form::form::FormSession;
use rpc_form::request_id::RequestIdGenerator;

/// How the mock answers.
#[derive(Clone, Debug)]
pub enum Reply {
    /// `result` echoes the request's method and params.
    Echo,
    /// Always this body with a 200.
    Fixed(Value),
    /// Bridge-style failure: 500 with a JSON-RPC error object.
    ServerError(String),
    /// 200 with a body that is not JSON.
    NotJson,
}

#[derive(Clone)]
struct MockState {
    reply: Reply,
    received: Arc<Mutex<Vec<Value>>>,
}

pub struct MockBridge {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockBridge {
    pub async fn start(reply: Reply) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            reply,
            received: Arc::clone(&received),
        };
        let app = Router::new()
            .route("/jsonrpc", post(handle_jsonrpc))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock bridge");
        let addr = listener.local_addr().expect("mock bridge address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock bridge serve");
        });

        Self { addr, received }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/jsonrpc", self.addr)
    }

    /// Request bodies in arrival order.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }

    pub fn session(&self) -> FormSession {
        session_for(&self.endpoint())
    }

    pub fn session_with_timeout(&self, timeout_secs: u64) -> FormSession {
        session_with(FormConfig {
            endpoint: self.endpoint(),
            timeout_secs: Some(timeout_secs),
            ..FormConfig::default()
        })
    }
}

pub fn session_for(endpoint: &str) -> FormSession {
    session_with(FormConfig {
        endpoint: endpoint.to_string(),
        ..FormConfig::default()
    })
}

fn session_with(config: FormConfig) -> FormSession {
    let client = RpcClient::new(&config).expect("client for mock bridge");
    FormSession::new(client, RequestIdGenerator::starting_at(1))
}

/// An endpoint nothing listens on.
pub async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway port");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);
    format!("http://{addr}/jsonrpc")
}

// Json extractor insists on an application/json content type, so a request
// without that header never reaches this handler.
async fn handle_jsonrpc(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    state.received.lock().unwrap().push(body.clone());

    if let Some(delay) = body["params"]["delay_ms"].as_u64() {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    match state.reply {
        Reply::Echo => {
            let reply = json!({
                "jsonrpc": "2.0",
                "id": body["id"],
                "result": {"method": body["method"], "params": body["params"]}
            });
            (StatusCode::OK, reply.to_string())
        }
        Reply::Fixed(value) => (StatusCode::OK, value.to_string()),
        Reply::ServerError(message) => {
            let reply = json!({
                "jsonrpc": "2.0",
                "id": body["id"],
                "error": {"code": -32000, "message": message}
            });
            (StatusCode::INTERNAL_SERVER_ERROR, reply.to_string())
        }
        Reply::NotJson => (StatusCode::OK, "<html>bridge offline</html>".to_string()),
    }
}
