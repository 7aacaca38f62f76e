//! The request form and what happens when it is submitted.
//!
//! A submission walks `Idle -> Sending -> Displayed`. Malformed params skip
//! straight to `Displayed` without touching the network. The outcome of every
//! submission is returned as its own [`Submission`] value and also handed to a
//! [`ResultView`], which is how front ends draw the result region.

use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use crate::client::RpcClient;
use crate::errors::{FormError, FormResult};
use crate::method::RpcMethod;
use crate::params::parse_params;
use crate::proto::rpc::{RpcErrorObject, RpcRequest, RpcResponse};
use crate::request_id::RequestIdGenerator;

/// Status text shown while a request is in flight.
pub const SENDING_STATUS: &str = "Sending...";

/// The two user-editable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestForm {
    pub method: RpcMethod,
    pub params_text: String,
}

impl RequestForm {
    pub fn new(method: RpcMethod, params_text: impl Into<String>) -> Self {
        Self {
            method,
            params_text: params_text.into(),
        }
    }

    /// Turn the field values into an envelope with a fresh id.
    pub fn prepare(&self, ids: &RequestIdGenerator) -> FormResult<RpcRequest> {
        let params = parse_params(&self.params_text)?;
        Ok(RpcRequest::new(ids.next_id(), self.method.as_str(), params))
    }
}

#[derive(Debug)]
pub enum Outcome {
    Success(Value),
    Failure(FormError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Exact text for the result region.
    pub fn render(&self) -> String {
        match self {
            Outcome::Success(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Outcome::Failure(err) => err.display_text(),
        }
    }
}

/// Everything one submission produced. Owned by the caller, not shared.
#[derive(Debug)]
pub struct Submission {
    /// `None` when params failed to parse and no envelope was built.
    pub id: Option<u64>,
    pub method: RpcMethod,
    pub outcome: Outcome,
}

impl Submission {
    pub fn render(&self) -> String {
        self.outcome.render()
    }

    /// The JSON-RPC `error` member of a delivered reply, if the server sent one.
    pub fn rpc_error(&self) -> Option<RpcErrorObject> {
        match &self.outcome {
            Outcome::Success(value) => RpcResponse::from_value(value)?.error_object(),
            Outcome::Failure(_) => None,
        }
    }

    /// Delivered, and the server did not answer with an error object.
    pub fn succeeded(&self) -> bool {
        self.outcome.is_success() && self.rpc_error().is_none()
    }
}

/// Rendering callback for submissions.
pub trait ResultView {
    fn show_status(&self, status: &str);
    fn show_outcome(&self, submission: &Submission);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Sending,
    Displayed { success: bool },
}

#[derive(Debug)]
struct RegionState {
    phase: Phase,
    text: String,
}

/// One shared display area, like the page's result box.
///
/// Overlapping submissions may all write here; whichever resolves last is what
/// remains on screen.
#[derive(Debug)]
pub struct ResultRegion {
    state: Mutex<RegionState>,
}

impl ResultRegion {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegionState {
                phase: Phase::Idle,
                text: String::new(),
            }),
        }
    }

    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    // The state is plain data, a panic elsewhere cannot leave it half-written.
    fn lock(&self) -> MutexGuard<'_, RegionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ResultRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultView for ResultRegion {
    fn show_status(&self, status: &str) {
        let mut state = self.lock();
        state.phase = Phase::Sending;
        state.text = status.to_string();
    }

    fn show_outcome(&self, submission: &Submission) {
        let mut state = self.lock();
        state.phase = Phase::Displayed {
            success: submission.outcome.is_success(),
        };
        state.text = submission.render();
    }
}

/// Client plus id source; shareable across concurrent submissions.
#[derive(Debug)]
pub struct FormSession {
    client: RpcClient,
    ids: RequestIdGenerator,
}

impl FormSession {
    pub fn new(client: RpcClient, ids: RequestIdGenerator) -> Self {
        Self { client, ids }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    /// Run one submission to completion. Never retries.
    pub async fn submit<V>(&self, form: &RequestForm, view: &V) -> Submission
    where
        V: ResultView + ?Sized,
    {
        let request = match form.prepare(&self.ids) {
            Ok(request) => request,
            Err(err) => {
                info!(method = %form.method, error = %err, "params rejected before sending");
                let submission = Submission {
                    id: None,
                    method: form.method,
                    outcome: Outcome::Failure(err),
                };
                view.show_outcome(&submission);
                return submission;
            }
        };

        view.show_status(SENDING_STATUS);

        let outcome = match self.client.call(&request).await {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::Failure(err),
        };

        let submission = Submission {
            id: Some(request.id),
            method: form.method,
            outcome,
        };

        match (&submission.outcome, submission.rpc_error()) {
            (Outcome::Failure(err), _) => {
                info!(id = request.id, method = %form.method, error = %err, "submission failed")
            }
            (Outcome::Success(_), Some(rpc_err)) => warn!(
                id = request.id,
                method = %form.method,
                code = rpc_err.code,
                message = %rpc_err.message,
                "server returned a json-rpc error"
            ),
            (Outcome::Success(_), None) => {
                info!(id = request.id, method = %form.method, "submission completed")
            }
        }

        view.show_outcome(&submission);
        submission
    }
}
