use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::completion::Completion;
use crate::error::{CompletionError, EngineError};
use crate::traversal::{Continuation, MAX_TRAVERSAL_STEPS, traverse};
use crate::types::{ComponentKind, DialogueTree, Message};

/// Completion double that replays scripted replies and records every prompt.
struct Scripted {
  replies: Mutex<VecDeque<String>>,
  fallback: Option<String>,
  prompts: Mutex<Vec<String>>,
}

impl Scripted {
  fn new(replies: &[&str]) -> Self {
    Self {
      replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
      fallback: None,
      prompts: Mutex::new(vec![]),
    }
  }

  fn repeating(reply: &str) -> Self {
    Self {
      replies: Mutex::new(VecDeque::new()),
      fallback: Some(reply.to_string()),
      prompts: Mutex::new(vec![]),
    }
  }

  fn prompts(&self) -> Vec<String> {
    self.prompts.lock().unwrap().clone()
  }
}

#[async_trait]
impl Completion for Scripted {
  async fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<String, CompletionError> {
    self.prompts.lock().unwrap().push(prompt.to_string());
    let reply = self
      .replies
      .lock()
      .unwrap()
      .pop_front()
      .or_else(|| self.fallback.clone());
    Ok(reply.expect("unexpected completion call"))
  }
}

fn tree() -> DialogueTree {
  DialogueTree::new("dt-0", "test")
}

fn set_class(t: &mut DialogueTree, id: &str, label: &str) {
  t.component_mut(id)
    .unwrap()
    .as_generation_mut()
    .unwrap()
    .gen_class = label.to_string();
}

fn add_bully_class(t: &mut DialogueTree, id: &str) {
  t.component_mut(id)
    .unwrap()
    .as_detection_mut()
    .unwrap()
    .add_class("bully");
}

#[tokio::test]
async fn leaf_generation_generates_once_and_exits() {
  let mut t = tree();
  let g = t.add_component(ComponentKind::Generation, "greet");
  let model = Scripted::new(&["hello there"]);

  let result = traverse(&t, &g, &[Message::student("hi")], &model)
    .await
    .unwrap();
  assert_eq!(result.responses, vec!["hello there"]);
  assert_eq!(result.next, Continuation::Exit);
  assert_eq!(model.prompts().len(), 1);
}

#[tokio::test]
async fn leaf_detection_exits_without_model_call() {
  let mut t = tree();
  let d = t.add_component(ComponentKind::Detection, "intent");
  add_bully_class(&mut t, &d);
  let model = Scripted::new(&[]);

  let result = traverse(&t, &d, &[Message::student("hi")], &model)
    .await
    .unwrap();
  assert!(result.responses.is_empty());
  assert_eq!(result.next, Continuation::Exit);
  assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn chained_generations_feed_synthetic_chatbot_turn() {
  let mut t = tree();
  let g1 = t.add_component(ComponentKind::Generation, "first");
  let g2 = t.add_component(ComponentKind::Generation, "second");
  t.add_edge(&g1, &g2).unwrap();
  let model = Scripted::new(&["first reply", "second reply"]);

  let result = traverse(&t, &g1, &[Message::student("hi")], &model)
    .await
    .unwrap();
  assert_eq!(result.responses, vec!["first reply", "second reply"]);
  assert_eq!(result.next, Continuation::Exit);

  // The downstream prompt sees the upstream response as a chatbot turn.
  let prompts = model.prompts();
  assert_eq!(prompts.len(), 2);
  assert!(prompts[1].contains("Chatbot: first reply"));
}

#[tokio::test]
async fn detection_routes_on_normalized_label() {
  let mut t = tree();
  let d = t.add_component(ComponentKind::Detection, "intent");
  let g = t.add_component(ComponentKind::Generation, "counter");
  t.add_edge(&d, &g).unwrap();
  add_bully_class(&mut t, &d);
  set_class(&mut t, &g, "  Bully");
  let model = Scripted::new(&["BULLY\n", "stand up to them"]);

  let result = traverse(&t, &d, &[Message::student("u suck")], &model)
    .await
    .unwrap();
  assert_eq!(result.responses, vec!["stand up to them"]);
  assert_eq!(result.next, Continuation::Exit);
}

#[tokio::test]
async fn walk_stops_at_second_nonleaf_detection() {
  let mut t = tree();
  let d1 = t.add_component(ComponentKind::Detection, "first");
  let g = t.add_component(ComponentKind::Generation, "counter");
  let d2 = t.add_component(ComponentKind::Detection, "second");
  let g2 = t.add_component(ComponentKind::Generation, "later");
  t.add_edge(&d1, &g).unwrap();
  t.add_edge(&g, &d2).unwrap();
  t.add_edge(&d2, &g2).unwrap();
  add_bully_class(&mut t, &d1);
  add_bully_class(&mut t, &d2);
  set_class(&mut t, &g, "bully");
  set_class(&mut t, &g2, "bully");
  let model = Scripted::new(&["bully", "pushback"]);

  let result = traverse(&t, &d1, &[Message::student("u suck")], &model)
    .await
    .unwrap();
  assert_eq!(result.responses, vec!["pushback"]);
  assert_eq!(result.next, Continuation::Detection(d2.clone()));
  // One classification plus one generation; the second detection never
  // reaches the model.
  assert_eq!(model.prompts().len(), 2);
}

#[tokio::test]
async fn routing_failure_reports_the_label() {
  let mut t = tree();
  let d = t.add_component(ComponentKind::Detection, "intent");
  let g = t.add_component(ComponentKind::Generation, "counter");
  t.add_edge(&d, &g).unwrap();
  add_bully_class(&mut t, &d);
  set_class(&mut t, &g, "neutral");
  let model = Scripted::new(&["bully"]);

  let err = traverse(&t, &d, &[Message::student("u suck")], &model)
    .await
    .unwrap_err();
  match err {
    EngineError::NoMatchingRoute { node_id, label } => {
      assert_eq!(node_id, d);
      assert_eq!(label, "bully");
    }
    other => panic!("unexpected error: {:?}", other),
  }
}

#[tokio::test]
async fn first_matching_neighbor_wins() {
  let mut t = tree();
  let d = t.add_component(ComponentKind::Detection, "intent");
  let g1 = t.add_component(ComponentKind::Generation, "first");
  let g2 = t.add_component(ComponentKind::Generation, "second");
  t.add_edge(&d, &g1).unwrap();
  t.add_edge(&d, &g2).unwrap();
  add_bully_class(&mut t, &d);
  set_class(&mut t, &g1, "bully");
  set_class(&mut t, &g2, "bully");
  t.component_mut(&g1)
    .unwrap()
    .as_generation_mut()
    .unwrap()
    .add_example("first-context", "first-response");
  let model = Scripted::new(&["bully", "reply"]);

  traverse(&t, &d, &[Message::student("u suck")], &model)
    .await
    .unwrap();
  // The generation prompt carries the chosen component's examples.
  assert!(model.prompts()[1].contains("Context: first-context"));
}

#[tokio::test]
async fn non_generation_neighbors_are_skipped_when_routing() {
  let mut t = tree();
  let d = t.add_component(ComponentKind::Detection, "intent");
  let d2 = t.add_component(ComponentKind::Detection, "decoy");
  let g = t.add_component(ComponentKind::Generation, "counter");
  t.add_edge(&d, &d2).unwrap();
  t.add_edge(&d, &g).unwrap();
  add_bully_class(&mut t, &d);
  set_class(&mut t, &g, "bully");
  let model = Scripted::new(&["bully", "reply"]);

  let result = traverse(&t, &d, &[Message::student("u suck")], &model)
    .await
    .unwrap();
  assert_eq!(result.responses, vec!["reply"]);
  assert_eq!(result.next, Continuation::Exit);
}

#[tokio::test]
async fn unknown_start_component_fails() {
  let t = tree();
  let model = Scripted::new(&[]);
  let err = traverse(&t, "gc-0", &[Message::student("hi")], &model)
    .await
    .unwrap_err();
  assert!(matches!(err, EngineError::ComponentNotFound(id) if id == "gc-0"));
}

#[tokio::test]
async fn cyclic_tree_hits_the_step_limit() {
  let mut t = tree();
  let g1 = t.add_component(ComponentKind::Generation, "a");
  let g2 = t.add_component(ComponentKind::Generation, "b");
  t.add_edge(&g1, &g2).unwrap();
  t.add_edge(&g2, &g1).unwrap();
  let model = Scripted::repeating("loop");

  let err = traverse(&t, &g1, &[Message::student("hi")], &model)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    EngineError::StepLimitExceeded { limit, .. } if limit == MAX_TRAVERSAL_STEPS
  ));
  assert_eq!(model.prompts().len(), MAX_TRAVERSAL_STEPS);
}

#[tokio::test]
async fn traversal_is_deterministic() {
  let mut t = tree();
  let d = t.add_component(ComponentKind::Detection, "intent");
  let g = t.add_component(ComponentKind::Generation, "counter");
  t.add_edge(&d, &g).unwrap();
  add_bully_class(&mut t, &d);
  set_class(&mut t, &g, "bully");
  let transcript = [Message::student("u suck")];

  let first = traverse(&t, &d, &transcript, &Scripted::new(&["bully", "reply"]))
    .await
    .unwrap();
  let second = traverse(&t, &d, &transcript, &Scripted::new(&["bully", "reply"]))
    .await
    .unwrap();
  assert_eq!(first.responses, second.responses);
  assert_eq!(first.next, second.next);
}
