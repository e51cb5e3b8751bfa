//! Handlers for generation components: CRUD, class label, few-shot
//! examples, copy, and the single-component prompt endpoint.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, AppState, success};
use crate::error::TreeError;
use crate::traversal::generate;
use crate::types::{ComponentKind, Message};

#[derive(Deserialize)]
pub struct NameBody {
  pub name: String,
}

#[derive(Deserialize)]
pub struct ClassBody {
  #[serde(rename = "class")]
  pub class: String,
}

#[derive(Deserialize)]
pub struct ExampleBody {
  pub context: String,
  pub response: String,
}

#[derive(Deserialize)]
pub struct EditExampleBody {
  pub context: Option<String>,
  pub response: Option<String>,
}

#[derive(Deserialize)]
pub struct MessagesBody {
  pub messages: Vec<Message>,
}

pub async fn add_generation(
  State(state): State<AppState>,
  Path(dt_id): Path<String>,
  Json(body): Json<NameBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let id = tree.add_component(ComponentKind::Generation, body.name);
  state.store.save(&tree)?;
  Ok(success(StatusCode::CREATED, Some(json!({"id": id}))))
}

pub async fn get_generation(
  State(state): State<AppState>,
  Path((dt_id, gc_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
  let tree = state.store.load(&dt_id)?;
  let component = tree.component(&gc_id)?;
  component.as_generation()?;
  Ok(success(StatusCode::OK, Some(component.to_json())))
}

pub async fn delete_generation(
  State(state): State<AppState>,
  Path((dt_id, gc_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  tree.component(&gc_id)?.as_generation()?;
  tree.delete_component(&gc_id)?;
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}

pub async fn edit_generation_name(
  State(state): State<AppState>,
  Path((dt_id, gc_id)): Path<(String, String)>,
  Json(body): Json<NameBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let component = tree.component_mut(&gc_id)?;
  component.as_generation()?;
  component.name = body.name;
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}

/// Sets the routing label. Replies 201 on first assignment, 200 on
/// overwrite.
pub async fn edit_generation_class(
  State(state): State<AppState>,
  Path((dt_id, gc_id)): Path<(String, String)>,
  Json(body): Json<ClassBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let generation = tree.component_mut(&gc_id)?.as_generation_mut()?;
  let status = if generation.gen_class.is_empty() {
    StatusCode::CREATED
  } else {
    StatusCode::OK
  };
  generation.gen_class = body.class;
  state.store.save(&tree)?;
  Ok(success(status, None))
}

pub async fn add_generation_example(
  State(state): State<AppState>,
  Path((dt_id, gc_id)): Path<(String, String)>,
  Json(body): Json<ExampleBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let generation = tree.component_mut(&gc_id)?.as_generation_mut()?;
  let id = generation.add_example(body.context, body.response);
  state.store.save(&tree)?;
  Ok(success(StatusCode::CREATED, Some(json!({"id": id}))))
}

pub async fn edit_generation_example(
  State(state): State<AppState>,
  Path((dt_id, gc_id, ex_id)): Path<(String, String, String)>,
  Json(body): Json<EditExampleBody>,
) -> Result<Response, ApiError> {
  if body.context.is_none() && body.response.is_none() {
    return Err(ApiError::bad_request(
      "new generation example context and response not provided (need at least one)",
    ));
  }
  let mut tree = state.store.load(&dt_id)?;
  let generation = tree.component_mut(&gc_id)?.as_generation_mut()?;
  let example = generation
    .get_example_mut(&ex_id)
    .ok_or_else(|| TreeError::ExampleNotFound(ex_id.clone()))?;
  example.edit(body.context, body.response);
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}

pub async fn delete_generation_example(
  State(state): State<AppState>,
  Path((dt_id, gc_id, ex_id)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let generation = tree.component_mut(&gc_id)?.as_generation_mut()?;
  generation.delete_example(&ex_id)?;
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}

pub async fn copy_generation(
  State(state): State<AppState>,
  Path((dt_id, gc_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  tree.component(&gc_id)?.as_generation()?;
  let id = tree.copy_component(&gc_id)?;
  state.store.save(&tree)?;
  Ok(success(StatusCode::CREATED, Some(json!({"id": id}))))
}

/// Runs the generation prompt for one component without traversing.
pub async fn prompt_generation(
  State(state): State<AppState>,
  Path((dt_id, gc_id)): Path<(String, String)>,
  Json(body): Json<MessagesBody>,
) -> Result<Response, ApiError> {
  let tree = state.store.load(&dt_id)?;
  let generation = tree.component(&gc_id)?.as_generation()?;
  let response = generate(generation, &body.messages, &*state.model).await?;
  Ok(success(StatusCode::OK, Some(json!({"response": response}))))
}
