//! A node in the dialogue tree: shared identity plus a kind-specific body.

use serde::{Deserialize, Serialize};

use super::{Detection, Generation};
use crate::error::TreeError;

/// The two recognized component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
  Generation,
  Detection,
}

impl ComponentKind {
  /// Id prefix for this kind (`gc` for generation, `dc` for detection).
  pub fn prefix(self) -> &'static str {
    match self {
      ComponentKind::Generation => "gc",
      ComponentKind::Detection => "dc",
    }
  }
}

/// Kind-specific payload of a [Component].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentBody {
  Generation(Generation),
  Detection(Detection),
}

/// A node in the dialogue tree. `neighbors` holds the ids of the components
/// on this component's outgoing edges, in insertion order; the referenced
/// components live in the owning [super::DialogueTree]'s collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
  pub id: String,
  pub name: String,
  pub neighbors: Vec<String>,
  pub body: ComponentBody,
}

impl Component {
  pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ComponentKind) -> Self {
    let body = match kind {
      ComponentKind::Generation => ComponentBody::Generation(Generation::default()),
      ComponentKind::Detection => ComponentBody::Detection(Detection::default()),
    };
    Self {
      id: id.into(),
      name: name.into(),
      neighbors: vec![],
      body,
    }
  }

  /// A component is a leaf iff it has no outgoing edges.
  pub fn is_leaf(&self) -> bool {
    self.neighbors.is_empty()
  }

  pub fn kind(&self) -> ComponentKind {
    match self.body {
      ComponentBody::Generation(_) => ComponentKind::Generation,
      ComponentBody::Detection(_) => ComponentKind::Detection,
    }
  }

  pub fn as_generation(&self) -> Result<&Generation, TreeError> {
    match &self.body {
      ComponentBody::Generation(g) => Ok(g),
      ComponentBody::Detection(_) => Err(TreeError::NotGeneration(self.id.clone())),
    }
  }

  pub fn as_generation_mut(&mut self) -> Result<&mut Generation, TreeError> {
    match &mut self.body {
      ComponentBody::Generation(g) => Ok(g),
      ComponentBody::Detection(_) => Err(TreeError::NotGeneration(self.id.clone())),
    }
  }

  pub fn as_detection(&self) -> Result<&Detection, TreeError> {
    match &self.body {
      ComponentBody::Detection(d) => Ok(d),
      ComponentBody::Generation(_) => Err(TreeError::NotDetection(self.id.clone())),
    }
  }

  pub fn as_detection_mut(&mut self) -> Result<&mut Detection, TreeError> {
    match &mut self.body {
      ComponentBody::Detection(d) => Ok(d),
      ComponentBody::Generation(_) => Err(TreeError::NotDetection(self.id.clone())),
    }
  }

  /// JSON projection for external reporting. Empty collections and an unset
  /// generation class render as the [super::NOT_PROVIDED] sentinel.
  pub fn to_json(&self) -> serde_json::Value {
    match &self.body {
      ComponentBody::Generation(g) => g.to_json(&self.id, &self.name),
      ComponentBody::Detection(d) => d.to_json(&self.id, &self.name),
    }
  }
}
