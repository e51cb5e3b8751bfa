//! The chat endpoint: run the traversal engine from an entry component.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, AppState, success};
use crate::traversal::traverse;
use crate::types::Message;

#[derive(Deserialize)]
pub struct ChatBody {
  pub messages: Vec<Message>,
}

/// Traverses the tree from the given component over the supplied transcript.
/// Returns the generated responses in order and `next_id`: the id of the
/// detection component awaiting the student's next message, or `"exit"`.
pub async fn chat(
  State(state): State<AppState>,
  Path((dt_id, c_id)): Path<(String, String)>,
  Json(body): Json<ChatBody>,
) -> Result<Response, ApiError> {
  let tree = state.store.load(&dt_id)?;
  tree.component(&c_id)?;
  let result = traverse(&tree, &c_id, &body.messages, &*state.model).await?;
  Ok(success(
    StatusCode::OK,
    Some(json!({
      "responses": result.responses,
      "next_id": result.next.into_token(),
    })),
  ))
}
