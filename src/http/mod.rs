//! REST boundary for authoring dialogue trees and driving conversations.
//!
//! Routes mirror the authoring surface: tree CRUD, edges, per-kind component
//! CRUD (classes, examples, copies, single-component prompts), and the chat
//! endpoint that runs the traversal engine.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::completion::Completion;
use crate::store::TreeStore;

mod chat;
mod detection;
mod dialogue;
mod generation;
mod response;

pub use response::{ApiError, success};

/// Shared state behind every handler: the tree store and the completion
/// capability.
#[derive(Clone)]
pub struct AppState {
  pub store: TreeStore,
  pub model: Arc<dyn Completion>,
}

impl AppState {
  pub fn new(store: TreeStore, model: Arc<dyn Completion>) -> Self {
    Self { store, model }
  }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/dialogue", post(dialogue::create_dialogue))
    .route(
      "/dialogue/:dt_id",
      get(dialogue::get_dialogue).delete(dialogue::delete_dialogue),
    )
    .route("/dialogue/:dt_id/name", put(dialogue::edit_dialogue_name))
    .route(
      "/dialogue/:dt_id/edge",
      post(dialogue::add_edge).delete(dialogue::delete_edge),
    )
    .route(
      "/dialogue/:dt_id/generation",
      post(generation::add_generation),
    )
    .route(
      "/dialogue/:dt_id/generation/:gc_id",
      get(generation::get_generation).delete(generation::delete_generation),
    )
    .route(
      "/dialogue/:dt_id/generation/:gc_id/name",
      put(generation::edit_generation_name),
    )
    .route(
      "/dialogue/:dt_id/generation/:gc_id/class",
      put(generation::edit_generation_class),
    )
    .route(
      "/dialogue/:dt_id/generation/:gc_id/example",
      post(generation::add_generation_example),
    )
    .route(
      "/dialogue/:dt_id/generation/:gc_id/example/:ex_id",
      put(generation::edit_generation_example).delete(generation::delete_generation_example),
    )
    .route(
      "/dialogue/:dt_id/generation/:gc_id/copy",
      post(generation::copy_generation),
    )
    .route(
      "/dialogue/:dt_id/generation/:gc_id/prompt",
      post(generation::prompt_generation),
    )
    .route("/dialogue/:dt_id/detection", post(detection::add_detection))
    .route(
      "/dialogue/:dt_id/detection/:dc_id",
      get(detection::get_detection).delete(detection::delete_detection),
    )
    .route(
      "/dialogue/:dt_id/detection/:dc_id/name",
      put(detection::edit_detection_name),
    )
    .route(
      "/dialogue/:dt_id/detection/:dc_id/class",
      post(detection::add_detection_class),
    )
    .route(
      "/dialogue/:dt_id/detection/:dc_id/class/:cls_id",
      get(detection::get_detection_class).delete(detection::delete_detection_class),
    )
    .route(
      "/dialogue/:dt_id/detection/:dc_id/class/:cls_id/name",
      put(detection::edit_detection_class_name),
    )
    .route(
      "/dialogue/:dt_id/detection/:dc_id/class/:cls_id/example",
      post(detection::add_detection_class_example),
    )
    .route(
      "/dialogue/:dt_id/detection/:dc_id/class/:cls_id/example/:ex_id",
      put(detection::edit_detection_class_example)
        .delete(detection::delete_detection_class_example),
    )
    .route(
      "/dialogue/:dt_id/detection/:dc_id/copy",
      post(detection::copy_detection),
    )
    .route(
      "/dialogue/:dt_id/detection/:dc_id/prompt",
      post(detection::prompt_detection),
    )
    .route("/dialogue/:dt_id/chat/:c_id", post(chat::chat))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
