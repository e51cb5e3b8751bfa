//! Traversal engine: walks the dialogue tree from an entry component,
//! turning a transcript into generated responses and a continuation marker.

use tracing::{debug, info};

use crate::completion::Completion;
use crate::error::EngineError;
use crate::prompt::{
  DETECTION_MAX_TOKENS, GENERATION_MAX_TOKENS, detection_prompt, generation_prompt,
  normalize_label,
};
use crate::types::{Component, ComponentBody, Detection, DialogueTree, Generation, Message};

/// Upper bound on components visited in one traversal call. The walk between
/// two detection stops is bounded by the chain of generation components, so
/// hitting this limit means the tree has a cycle or is degenerate.
pub const MAX_TRAVERSAL_STEPS: usize = 64;

/// Continuation token on the chat wire: `exit` or a component id.
pub const EXIT_TOKEN: &str = "exit";

/// Where the caller should resume after a traversal call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
  /// A leaf was reached; the flow is over.
  Exit,
  /// A detection component awaits the student's next message.
  Detection(String),
}

impl Continuation {
  /// Wire form: the component id, or the literal `"exit"`.
  pub fn into_token(self) -> String {
    match self {
      Continuation::Exit => EXIT_TOKEN.to_string(),
      Continuation::Detection(id) => id,
    }
  }
}

/// Result of one traversal call: generated responses in order, plus where to
/// resume.
#[derive(Debug, Clone)]
pub struct Traversal {
  pub responses: Vec<String>,
  pub next: Continuation,
}

/// Runs the detection prompt for one component and returns the normalized
/// class label (the routing key).
pub async fn classify(
  detection: &Detection,
  transcript: &[Message],
  model: &dyn Completion,
) -> Result<String, EngineError> {
  let prompt = detection_prompt(detection, transcript);
  let raw = model.complete(&prompt, DETECTION_MAX_TOKENS).await?;
  Ok(normalize_label(&raw))
}

/// Runs the generation prompt for one component and returns the trimmed
/// response text.
pub async fn generate(
  generation: &Generation,
  transcript: &[Message],
  model: &dyn Completion,
) -> Result<String, EngineError> {
  let prompt = generation_prompt(generation, transcript);
  let raw = model.complete(&prompt, GENERATION_MAX_TOKENS).await?;
  Ok(raw.trim().to_string())
}

/// Selects the first generation neighbor (insertion order) whose normalized
/// class label matches `label`. Non-generation neighbors are skipped.
fn route<'a>(tree: &'a DialogueTree, component: &Component, label: &str) -> Option<&'a Component> {
  for neighbor_id in &component.neighbors {
    let Some(neighbor) = tree.get_component(neighbor_id) else {
      continue;
    };
    if let ComponentBody::Generation(g) = &neighbor.body {
      if normalize_label(&g.gen_class) == label {
        return Some(neighbor);
      }
    }
  }
  None
}

/// Walks the tree from `start_id` over `transcript`.
///
/// Generation components generate and advance to their single successor,
/// appending a synthetic chatbot turn so downstream prompts see it. The
/// first non-leaf detection component classifies the last message and routes
/// on the label; the walk stops at the next non-leaf detection so the caller
/// can collect the student's next message before another classification.
/// Leaves end the flow with [Continuation::Exit].
///
/// The walk is step-bounded; a cyclic tree fails with
/// [EngineError::StepLimitExceeded] instead of recursing without bound.
pub async fn traverse(
  tree: &DialogueTree,
  start_id: &str,
  transcript: &[Message],
  model: &dyn Completion,
) -> Result<Traversal, EngineError> {
  let mut current = tree
    .get_component(start_id)
    .ok_or_else(|| EngineError::ComponentNotFound(start_id.to_string()))?;
  let mut transcript = transcript.to_vec();
  let mut responses = vec![];
  let mut first_detection = true;

  for _step in 0..MAX_TRAVERSAL_STEPS {
    info!(tree_id = %tree.id, component_id = %current.id, "traversal step");
    match &current.body {
      ComponentBody::Generation(g) => {
        let response = generate(g, &transcript, model).await?;
        responses.push(response.clone());
        if current.is_leaf() {
          return Ok(Traversal {
            responses,
            next: Continuation::Exit,
          });
        }
        transcript.push(Message::chatbot(response));
        // Single successor, enforced at edit time.
        let next_id = &current.neighbors[0];
        current = tree
          .get_component(next_id)
          .ok_or_else(|| EngineError::ComponentNotFound(next_id.clone()))?;
      }
      ComponentBody::Detection(d) => {
        if current.is_leaf() {
          // Nothing to route to, so the classifier call is skipped.
          return Ok(Traversal {
            responses,
            next: Continuation::Exit,
          });
        }
        if !first_detection {
          // Hand control back so the caller can supply the next
          // classification-worthy message.
          return Ok(Traversal {
            responses,
            next: Continuation::Detection(current.id.clone()),
          });
        }
        let label = classify(d, &transcript, model).await?;
        debug!(component_id = %current.id, label = %label, "classified");
        current = route(tree, current, &label).ok_or_else(|| EngineError::NoMatchingRoute {
          node_id: current.id.clone(),
          label,
        })?;
        first_detection = false;
      }
    }
  }

  Err(EngineError::StepLimitExceeded {
    start_id: start_id.to_string(),
    limit: MAX_TRAVERSAL_STEPS,
  })
}
