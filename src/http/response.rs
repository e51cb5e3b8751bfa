//! Response envelope and error mapping for the REST boundary.
//!
//! Success: `{"success": true}` plus optional `"data"`. Failure:
//! `{"success": false, "error_message": ...}` with the matching status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::error::{CompletionError, EngineError, StoreError, TreeError};

/// Builds a success response with a custom status and optional payload.
pub fn success(status: StatusCode, data: Option<Value>) -> Response {
  let mut body = json!({"success": true});
  if let Some(data) = data {
    body["data"] = data;
  }
  (status, Json(body)).into_response()
}

/// Boundary error: a status code plus the message rendered in the failure
/// envelope.
#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  pub message: String,
}

impl ApiError {
  pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status,
      message: message.into(),
    }
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (
      self.status,
      Json(json!({"success": false, "error_message": self.message})),
    )
      .into_response()
  }
}

impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::NotFound(_) => Self::not_found("provided dialogue tree does not exist"),
      StoreError::Io(_) | StoreError::Format(_) => {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
      }
    }
  }
}

impl From<TreeError> for ApiError {
  fn from(err: TreeError) -> Self {
    match err {
      TreeError::ComponentNotFound(_) => Self::not_found("provided component does not exist"),
      TreeError::EdgeNotFound { .. } => Self::not_found("provided edge does not exist"),
      TreeError::NotGeneration(_) => {
        Self::not_found("provided generation component does not exist")
      }
      TreeError::NotDetection(_) => Self::not_found("provided detection component does not exist"),
      TreeError::ClassNotFound(_) => Self::not_found("provided detection class does not exist"),
      TreeError::ExampleNotFound(_) => Self::not_found("provided example does not exist"),
      TreeError::SecondOutgoingEdge(_) => Self::new(StatusCode::CONFLICT, err.to_string()),
    }
  }
}

impl From<CompletionError> for ApiError {
  fn from(err: CompletionError) -> Self {
    Self::new(StatusCode::BAD_GATEWAY, err.to_string())
  }
}

impl From<EngineError> for ApiError {
  fn from(err: EngineError) -> Self {
    match err {
      EngineError::ComponentNotFound(_) => Self::not_found("provided component does not exist"),
      EngineError::Completion(inner) => inner.into(),
      // Routing failures and cycle guards signal an inconsistent tree; the
      // author fixes the graph, so they are request-level errors.
      EngineError::NoMatchingRoute { .. } | EngineError::StepLimitExceeded { .. } => {
        Self::bad_request(err.to_string())
      }
    }
  }
}
