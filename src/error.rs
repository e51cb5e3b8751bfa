//! Error types, one enum per concern. Messages carry the offending ids and
//! labels so a tree author can fix the underlying graph.

use thiserror::Error;

/// Failures of structural edit operations on a dialogue tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
  #[error("component {0} not found")]
  ComponentNotFound(String),
  #[error("edge from {start} to {end} not found")]
  EdgeNotFound { start: String, end: String },
  /// Generation components have single-successor semantics; a second
  /// outgoing edge is rejected at edit time.
  #[error("generation component {0} already has an outgoing edge")]
  SecondOutgoingEdge(String),
  #[error("component {0} is not a generation component")]
  NotGeneration(String),
  #[error("component {0} is not a detection component")]
  NotDetection(String),
  #[error("detection class {0} not found")]
  ClassNotFound(String),
  #[error("example {0} not found")]
  ExampleNotFound(String),
}

/// Failures of the external generative capability. Propagated unchanged,
/// never retried.
#[derive(Debug, Error)]
pub enum CompletionError {
  #[error("completion request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("completion service returned {status}: {message}")]
  Service { status: u16, message: String },
  #[error("completion response contained no choices")]
  EmptyResponse,
}

/// Failures raised by the traversal engine.
#[derive(Debug, Error)]
pub enum EngineError {
  #[error("component {0} not found")]
  ComponentNotFound(String),
  /// A detection component classified into a label with no matching
  /// outgoing generation edge. Signals an incomplete tree, not a transient
  /// fault.
  #[error("no edge found from {node_id} to generation component with class {label}")]
  NoMatchingRoute { node_id: String, label: String },
  #[error("traversal from {start_id} exceeded {limit} steps; the tree may contain a cycle")]
  StepLimitExceeded { start_id: String, limit: usize },
  #[error(transparent)]
  Completion(#[from] CompletionError),
}

/// Failures of the tree store.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("dialogue tree {0} not found")]
  NotFound(String),
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error("invalid dialogue tree file: {0}")]
  Format(#[from] serde_json::Error),
}
