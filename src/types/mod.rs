//! Dialogue-tree data model.
//!
//! A [DialogueTree] owns a flat collection of [Component]s; edges are stored
//! as id lists on each component (arena + index, no reference cycles).

mod component;
mod detection;
mod dialogue_tree;
mod edge;
mod generation;
#[cfg(test)]
mod generation_test;
mod message;
#[cfg(test)]
mod message_test;

pub use component::{Component, ComponentBody, ComponentKind};
pub use detection::{Detection, DetectionClass, DetectionExample};
pub use dialogue_tree::DialogueTree;
pub use edge::Edge;
pub use generation::{Generation, GenerationExample};
pub use message::{Message, Role};

/// Sentinel rendered in JSON projections for empty collections and unset
/// fields. Consumers treat it as equivalent to an empty collection.
pub const NOT_PROVIDED: &str = "not provided";

/// Extracts the numeric suffix of an id of the form `{prefix}-{n}`.
pub(crate) fn id_suffix(id: &str, prefix: &str) -> Option<u64> {
  id
    .strip_prefix(prefix)
    .and_then(|rest| rest.strip_prefix('-'))
    .and_then(|n| n.parse().ok())
}

/// Allocates the next id in a `{prefix}-{n}` sequence by scanning `ids` for
/// the current maximum suffix.
pub(crate) fn next_id<'a>(prefix: &str, ids: impl Iterator<Item = &'a str>) -> String {
  let max = ids.filter_map(|id| id_suffix(id, prefix)).max();
  format!("{}-{}", prefix, max.map_or(0, |n| n + 1))
}
