//! The single outbound call a submission makes.

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use crate::config::FormConfig;
use crate::errors::{FormError, FormResult};
use crate::proto::rpc::RpcRequest;

/// HTTP client bound to one JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    endpoint: Url,
}

impl RpcClient {
    pub fn new(config: &FormConfig) -> FormResult<Self> {
        let endpoint = config.endpoint_url()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| FormError::network("build http client", e))?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST the envelope and decode whatever JSON comes back.
    ///
    /// The status code is not inspected: the bridge reports its own failures as
    /// a JSON-RPC error body on a 500, and that body is what the user wants to
    /// see.
    pub async fn call(&self, request: &RpcRequest) -> FormResult<Value> {
        debug!(
            endpoint = %self.endpoint,
            id = request.id,
            method = %request.method,
            "sending json-rpc request"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| FormError::network("send request", e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FormError::network("read response body", e))?;

        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        serde_json::from_slice(&body).map_err(FormError::invalid_response)
    }
}
