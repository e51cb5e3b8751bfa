//! Dialogue-tree persistence: one JSON file per tree under a data directory,
//! keyed by the tree's own id.

use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::StoreError;
use crate::types::DialogueTree;

/// Id prefix for dialogue trees.
const TREE_ID_PREFIX: &str = "dt";

/// File-backed store over a data directory. Whole-tree reads and writes,
/// no versioning; every structural edit is followed by a full [Self::save].
#[derive(Debug, Clone)]
pub struct TreeStore {
  dir: PathBuf,
}

impl TreeStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  fn path_for(&self, id: &str) -> PathBuf {
    self.dir.join(format!("{}.json", id))
  }

  /// Allocates the next tree id (`dt-N`) by scanning existing file names for
  /// the maximum suffix.
  fn next_tree_id(&self) -> Result<String, StoreError> {
    std::fs::create_dir_all(&self.dir)?;
    let mut max: Option<u64> = None;
    for entry in std::fs::read_dir(&self.dir)? {
      let entry = entry?;
      let name = entry.file_name();
      let Some(name) = name.to_str() else {
        continue;
      };
      let num = name
        .strip_prefix(TREE_ID_PREFIX)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|rest| rest.strip_suffix(".json"))
        .and_then(|n| n.parse::<u64>().ok());
      if let Some(num) = num {
        max = Some(max.map_or(num, |m: u64| m.max(num)));
      }
    }
    Ok(format!(
      "{}-{}",
      TREE_ID_PREFIX,
      max.map_or(0, |n| n + 1)
    ))
  }

  /// Creates, persists, and returns a new empty tree with the given name.
  #[instrument(level = "trace", skip(self))]
  pub fn create(&self, name: &str) -> Result<DialogueTree, StoreError> {
    let id = self.next_tree_id()?;
    let tree = DialogueTree::new(id, name);
    self.save(&tree)?;
    Ok(tree)
  }

  pub fn exists(&self, id: &str) -> bool {
    self.path_for(id).exists()
  }

  /// Loads a tree by id. Not-found if the file is absent.
  #[instrument(level = "trace", skip(self))]
  pub fn load(&self, id: &str) -> Result<DialogueTree, StoreError> {
    let path = self.path_for(id);
    if !path.exists() {
      return Err(StoreError::NotFound(id.to_string()));
    }
    let bytes = std::fs::read(&path)?;
    Ok(serde_json::from_slice(&bytes)?)
  }

  /// Saves a tree as pretty-printed JSON. Idempotent full overwrite.
  #[instrument(level = "trace", skip_all, fields(tree_id = %tree.id))]
  pub fn save(&self, tree: &DialogueTree) -> Result<(), StoreError> {
    std::fs::create_dir_all(&self.dir)?;
    let json = serde_json::to_string_pretty(tree)?;
    std::fs::write(self.path_for(&tree.id), json)?;
    Ok(())
  }

  /// Deletes a tree by id. Not-found if the file is absent.
  #[instrument(level = "trace", skip(self))]
  pub fn delete(&self, id: &str) -> Result<(), StoreError> {
    let path = self.path_for(id);
    if !path.exists() {
      return Err(StoreError::NotFound(id.to_string()));
    }
    std::fs::remove_file(path)?;
    Ok(())
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }
}
