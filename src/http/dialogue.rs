//! Handlers for dialogue-tree level operations: create, fetch, delete,
//! rename, and edge edits.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, AppState, success};

#[derive(Deserialize)]
pub struct NameBody {
  pub name: String,
}

#[derive(Deserialize)]
pub struct EdgeBody {
  pub start: String,
  pub end: String,
}

pub async fn create_dialogue(
  State(state): State<AppState>,
  Json(body): Json<NameBody>,
) -> Result<Response, ApiError> {
  let tree = state.store.create(&body.name)?;
  Ok(success(StatusCode::CREATED, Some(json!({"id": tree.id}))))
}

pub async fn get_dialogue(
  State(state): State<AppState>,
  Path(dt_id): Path<String>,
) -> Result<Response, ApiError> {
  let tree = state.store.load(&dt_id)?;
  Ok(success(StatusCode::OK, Some(tree.to_json())))
}

pub async fn delete_dialogue(
  State(state): State<AppState>,
  Path(dt_id): Path<String>,
) -> Result<Response, ApiError> {
  state.store.delete(&dt_id)?;
  Ok(success(StatusCode::OK, None))
}

pub async fn edit_dialogue_name(
  State(state): State<AppState>,
  Path(dt_id): Path<String>,
  Json(body): Json<NameBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  tree.name = body.name;
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}

pub async fn add_edge(
  State(state): State<AppState>,
  Path(dt_id): Path<String>,
  Json(body): Json<EdgeBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  tree.add_edge(&body.start, &body.end)?;
  state.store.save(&tree)?;
  Ok(success(StatusCode::CREATED, None))
}

pub async fn delete_edge(
  State(state): State<AppState>,
  Path(dt_id): Path<String>,
  Json(body): Json<EdgeBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  tree.delete_edge(&body.start, &body.end)?;
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}
