//! The dialogue tree: flat component collection plus structural edit operations.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Component, ComponentBody, ComponentKind, Edge, NOT_PROVIDED, id_suffix};
use crate::error::TreeError;

/// A directed graph of generation and detection components authored for one
/// conversational flow. Components are stored in insertion order; edges live
/// as id lists on each component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueTree {
  pub id: String,
  pub name: String,
  pub components: Vec<Component>,
  /// High-water id counters per kind. Deleting the highest-numbered
  /// component must not free its id for reuse, so allocation cannot rely on
  /// scanning live components alone. Default 0 for files that predate the
  /// counters; allocation re-seeds from the live maximum in that case.
  #[serde(default)]
  next_generation_num: u64,
  #[serde(default)]
  next_detection_num: u64,
}

impl DialogueTree {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      components: vec![],
      next_generation_num: 0,
      next_detection_num: 0,
    }
  }

  /// Allocates the next component id for `kind` (`gc-N` or `dc-N`).
  /// Strictly increasing per prefix, never reused after deletion.
  fn next_component_id(&mut self, kind: ComponentKind) -> String {
    let prefix = kind.prefix();
    let live_max = self
      .components
      .iter()
      .filter_map(|c| id_suffix(&c.id, prefix))
      .max();
    let counter = match kind {
      ComponentKind::Generation => &mut self.next_generation_num,
      ComponentKind::Detection => &mut self.next_detection_num,
    };
    let num = (*counter).max(live_max.map_or(0, |n| n + 1));
    *counter = num + 1;
    format!("{}-{}", prefix, num)
  }

  /// Adds an empty component of the given kind and returns its id.
  pub fn add_component(&mut self, kind: ComponentKind, name: impl Into<String>) -> String {
    let id = self.next_component_id(kind);
    self.components.push(Component::new(id.clone(), name, kind));
    id
  }

  pub fn get_component(&self, id: &str) -> Option<&Component> {
    self.components.iter().find(|c| c.id == id)
  }

  pub fn get_component_mut(&mut self, id: &str) -> Option<&mut Component> {
    self.components.iter_mut().find(|c| c.id == id)
  }

  /// Like [Self::get_component] but with a not-found error for callers that
  /// require the component to exist.
  pub fn component(&self, id: &str) -> Result<&Component, TreeError> {
    self
      .get_component(id)
      .ok_or_else(|| TreeError::ComponentNotFound(id.to_string()))
  }

  pub fn component_mut(&mut self, id: &str) -> Result<&mut Component, TreeError> {
    self
      .get_component_mut(id)
      .ok_or_else(|| TreeError::ComponentNotFound(id.to_string()))
  }

  pub fn component_ids(&self) -> Vec<&str> {
    self.components.iter().map(|c| c.id.as_str()).collect()
  }

  /// Every edge in the tree, component insertion order then neighbor
  /// insertion order. Duplicate edges appear once per occurrence.
  pub fn edges(&self) -> Vec<Edge> {
    let mut edges = vec![];
    for component in &self.components {
      for neighbor in &component.neighbors {
        edges.push(Edge {
          start: component.id.clone(),
          end: neighbor.clone(),
        });
      }
    }
    edges
  }

  pub fn has_edge(&self, start: &str, end: &str) -> bool {
    self
      .get_component(start)
      .is_some_and(|c| c.neighbors.iter().any(|n| n == end))
  }

  /// Adds a directed edge. Both endpoints must exist. A generation component
  /// has single-successor semantics, so a second outgoing edge from one is
  /// rejected rather than silently ignored by the traversal.
  pub fn add_edge(&mut self, start: &str, end: &str) -> Result<(), TreeError> {
    if self.get_component(end).is_none() {
      return Err(TreeError::ComponentNotFound(end.to_string()));
    }
    let start_component = self.component_mut(start)?;
    if matches!(start_component.body, ComponentBody::Generation(_))
      && !start_component.neighbors.is_empty()
    {
      return Err(TreeError::SecondOutgoingEdge(start.to_string()));
    }
    start_component.neighbors.push(end.to_string());
    Ok(())
  }

  /// Removes one occurrence of the edge from `start` to `end`.
  pub fn delete_edge(&mut self, start: &str, end: &str) -> Result<(), TreeError> {
    let start_component = self.component_mut(start)?;
    let idx = start_component
      .neighbors
      .iter()
      .position(|n| n == end)
      .ok_or_else(|| TreeError::EdgeNotFound {
        start: start.to_string(),
        end: end.to_string(),
      })?;
    start_component.neighbors.remove(idx);
    Ok(())
  }

  /// Deletes a component, first removing every incoming edge that references
  /// it so no dangling neighbor ids remain. The component's own outgoing
  /// edges die with its neighbor list.
  pub fn delete_component(&mut self, id: &str) -> Result<(), TreeError> {
    let idx = self
      .components
      .iter()
      .position(|c| c.id == id)
      .ok_or_else(|| TreeError::ComponentNotFound(id.to_string()))?;
    for component in &mut self.components {
      component.neighbors.retain(|n| n != id);
    }
    self.components.remove(idx);
    Ok(())
  }

  /// Deep-copies a component under a fresh id. Sub-entity ids are preserved
  /// (they are scoped to the new parent); the copy starts disconnected, with
  /// no outgoing edges and nothing pointing at it.
  pub fn copy_component(&mut self, id: &str) -> Result<String, TreeError> {
    let mut copy = self.component(id)?.clone();
    let new_id = self.next_component_id(copy.kind());
    copy.id = new_id.clone();
    copy.neighbors.clear();
    self.components.push(copy);
    Ok(new_id)
  }

  /// JSON projection for external reporting.
  pub fn to_json(&self) -> serde_json::Value {
    let components = if self.components.is_empty() {
      json!(NOT_PROVIDED)
    } else {
      json!(self.component_ids())
    };
    let edges = self.edges();
    let edges = if edges.is_empty() {
      json!(NOT_PROVIDED)
    } else {
      json!(edges)
    };
    json!({"id": self.id, "name": self.name, "components": components, "edges": edges})
  }
}
