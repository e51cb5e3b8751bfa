//! Detection component body: labeled example buckets used for classification.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{NOT_PROVIDED, next_id};
use crate::error::TreeError;

/// Body of a detection component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Detection {
  pub classes: Vec<DetectionClass>,
}

/// One labeled class, id of the form `cls-N`. `det_class` is the label
/// matched against downstream generation `gen_class` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionClass {
  pub id: String,
  pub det_class: String,
  pub examples: Vec<DetectionExample>,
}

/// One classification example, id of the form `ex-N`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionExample {
  pub id: String,
  pub example: String,
}

impl Detection {
  /// Appends a new class with the given label and returns its id.
  pub fn add_class(&mut self, det_class: impl Into<String>) -> String {
    let id = next_id("cls", self.classes.iter().map(|c| c.id.as_str()));
    self.classes.push(DetectionClass {
      id: id.clone(),
      det_class: det_class.into(),
      examples: vec![],
    });
    id
  }

  pub fn get_class(&self, id: &str) -> Option<&DetectionClass> {
    self.classes.iter().find(|c| c.id == id)
  }

  pub fn get_class_mut(&mut self, id: &str) -> Option<&mut DetectionClass> {
    self.classes.iter_mut().find(|c| c.id == id)
  }

  pub fn delete_class(&mut self, id: &str) -> Result<(), TreeError> {
    let idx = self
      .classes
      .iter()
      .position(|c| c.id == id)
      .ok_or_else(|| TreeError::ClassNotFound(id.to_string()))?;
    self.classes.remove(idx);
    Ok(())
  }

  /// Class labels in insertion order, for the detection prompt.
  pub fn class_labels(&self) -> Vec<&str> {
    self.classes.iter().map(|c| c.det_class.as_str()).collect()
  }

  pub(crate) fn to_json(&self, id: &str, name: &str) -> serde_json::Value {
    let classes = if self.classes.is_empty() {
      json!(NOT_PROVIDED)
    } else {
      json!(
        self
          .classes
          .iter()
          .map(|c| json!({"id": c.id, "class": c.det_class}))
          .collect::<Vec<_>>()
      )
    };
    json!({"id": id, "name": name, "classes": classes})
  }
}

impl DetectionClass {
  /// Appends a new example string and returns its id.
  pub fn add_example(&mut self, example: impl Into<String>) -> String {
    let id = next_id("ex", self.examples.iter().map(|e| e.id.as_str()));
    self.examples.push(DetectionExample {
      id: id.clone(),
      example: example.into(),
    });
    id
  }

  pub fn get_example(&self, id: &str) -> Option<&DetectionExample> {
    self.examples.iter().find(|e| e.id == id)
  }

  pub fn get_example_mut(&mut self, id: &str) -> Option<&mut DetectionExample> {
    self.examples.iter_mut().find(|e| e.id == id)
  }

  pub fn delete_example(&mut self, id: &str) -> Result<(), TreeError> {
    let idx = self
      .examples
      .iter()
      .position(|e| e.id == id)
      .ok_or_else(|| TreeError::ExampleNotFound(id.to_string()))?;
    self.examples.remove(idx);
    Ok(())
  }

  /// JSON projection for external reporting.
  pub fn to_json(&self) -> serde_json::Value {
    let examples = if self.examples.is_empty() {
      json!(NOT_PROVIDED)
    } else {
      json!(
        self
          .examples
          .iter()
          .map(|e| json!({"id": e.id, "example": e.example}))
          .collect::<Vec<_>>()
      )
    };
    json!({"id": self.id, "class": self.det_class, "examples": examples})
  }
}
