//! Generation component body: few-shot examples that produce chatbot text.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{NOT_PROVIDED, next_id};
use crate::error::TreeError;

/// Body of a generation component. `gen_class` is the label an upstream
/// detection component routes on; the empty string means "unset".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Generation {
  pub gen_class: String,
  pub examples: Vec<GenerationExample>,
}

/// One few-shot (context, response) pair, id of the form `ex-N`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationExample {
  pub id: String,
  pub context: String,
  pub response: String,
}

impl GenerationExample {
  /// Overwrites context and/or response; fields left as `None` are kept.
  pub fn edit(&mut self, context: Option<String>, response: Option<String>) {
    if let Some(context) = context {
      self.context = context;
    }
    if let Some(response) = response {
      self.response = response;
    }
  }
}

impl Generation {
  /// Appends a new example and returns its id.
  pub fn add_example(&mut self, context: impl Into<String>, response: impl Into<String>) -> String {
    let id = next_id("ex", self.examples.iter().map(|e| e.id.as_str()));
    self.examples.push(GenerationExample {
      id: id.clone(),
      context: context.into(),
      response: response.into(),
    });
    id
  }

  pub fn get_example(&self, id: &str) -> Option<&GenerationExample> {
    self.examples.iter().find(|e| e.id == id)
  }

  pub fn get_example_mut(&mut self, id: &str) -> Option<&mut GenerationExample> {
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

  pub(crate) fn to_json(&self, id: &str, name: &str) -> serde_json::Value {
    let class = if self.gen_class.is_empty() {
      json!(NOT_PROVIDED)
    } else {
      json!(self.gen_class)
    };
    let examples = if self.examples.is_empty() {
      json!(NOT_PROVIDED)
    } else {
      json!(
        self
          .examples
          .iter()
          .map(|e| json!({"id": e.id, "context": e.context, "response": e.response}))
          .collect::<Vec<_>>()
      )
    };
    json!({"id": id, "name": name, "class": class, "examples": examples})
  }
}
