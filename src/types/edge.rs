//! A directed edge between two components, flattened for reporting.

use serde::{Deserialize, Serialize};

/// Directed edge from `start` to `end` (component ids).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
  pub start: String,
  pub end: String,
}
