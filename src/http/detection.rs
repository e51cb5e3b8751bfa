//! Handlers for detection components: CRUD, labeled classes and their
//! examples, copy, and the single-component classification endpoint.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, AppState, success};
use crate::error::TreeError;
use crate::traversal::classify;
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
  pub example: String,
}

#[derive(Deserialize)]
pub struct MessagesBody {
  pub messages: Vec<Message>,
}

pub async fn add_detection(
  State(state): State<AppState>,
  Path(dt_id): Path<String>,
  Json(body): Json<NameBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let id = tree.add_component(ComponentKind::Detection, body.name);
  state.store.save(&tree)?;
  Ok(success(StatusCode::CREATED, Some(json!({"id": id}))))
}

pub async fn get_detection(
  State(state): State<AppState>,
  Path((dt_id, dc_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
  let tree = state.store.load(&dt_id)?;
  let component = tree.component(&dc_id)?;
  component.as_detection()?;
  Ok(success(StatusCode::OK, Some(component.to_json())))
}

pub async fn delete_detection(
  State(state): State<AppState>,
  Path((dt_id, dc_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  tree.component(&dc_id)?.as_detection()?;
  tree.delete_component(&dc_id)?;
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}

pub async fn edit_detection_name(
  State(state): State<AppState>,
  Path((dt_id, dc_id)): Path<(String, String)>,
  Json(body): Json<NameBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let component = tree.component_mut(&dc_id)?;
  component.as_detection()?;
  component.name = body.name;
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}

pub async fn add_detection_class(
  State(state): State<AppState>,
  Path((dt_id, dc_id)): Path<(String, String)>,
  Json(body): Json<ClassBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let detection = tree.component_mut(&dc_id)?.as_detection_mut()?;
  let id = detection.add_class(body.class);
  state.store.save(&tree)?;
  Ok(success(StatusCode::CREATED, Some(json!({"id": id}))))
}

pub async fn get_detection_class(
  State(state): State<AppState>,
  Path((dt_id, dc_id, cls_id)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
  let tree = state.store.load(&dt_id)?;
  let detection = tree.component(&dc_id)?.as_detection()?;
  let class = detection
    .get_class(&cls_id)
    .ok_or_else(|| TreeError::ClassNotFound(cls_id.clone()))?;
  Ok(success(StatusCode::OK, Some(class.to_json())))
}

pub async fn delete_detection_class(
  State(state): State<AppState>,
  Path((dt_id, dc_id, cls_id)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let detection = tree.component_mut(&dc_id)?.as_detection_mut()?;
  detection.delete_class(&cls_id)?;
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}

pub async fn edit_detection_class_name(
  State(state): State<AppState>,
  Path((dt_id, dc_id, cls_id)): Path<(String, String, String)>,
  Json(body): Json<ClassBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let detection = tree.component_mut(&dc_id)?.as_detection_mut()?;
  let class = detection
    .get_class_mut(&cls_id)
    .ok_or_else(|| TreeError::ClassNotFound(cls_id.clone()))?;
  class.det_class = body.class;
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}

pub async fn add_detection_class_example(
  State(state): State<AppState>,
  Path((dt_id, dc_id, cls_id)): Path<(String, String, String)>,
  Json(body): Json<ExampleBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let detection = tree.component_mut(&dc_id)?.as_detection_mut()?;
  let class = detection
    .get_class_mut(&cls_id)
    .ok_or_else(|| TreeError::ClassNotFound(cls_id.clone()))?;
  let id = class.add_example(body.example);
  state.store.save(&tree)?;
  Ok(success(StatusCode::CREATED, Some(json!({"id": id}))))
}

pub async fn edit_detection_class_example(
  State(state): State<AppState>,
  Path((dt_id, dc_id, cls_id, ex_id)): Path<(String, String, String, String)>,
  Json(body): Json<ExampleBody>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let detection = tree.component_mut(&dc_id)?.as_detection_mut()?;
  let class = detection
    .get_class_mut(&cls_id)
    .ok_or_else(|| TreeError::ClassNotFound(cls_id.clone()))?;
  let example = class
    .get_example_mut(&ex_id)
    .ok_or_else(|| TreeError::ExampleNotFound(ex_id.clone()))?;
  example.example = body.example;
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}

pub async fn delete_detection_class_example(
  State(state): State<AppState>,
  Path((dt_id, dc_id, cls_id, ex_id)): Path<(String, String, String, String)>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  let detection = tree.component_mut(&dc_id)?.as_detection_mut()?;
  let class = detection
    .get_class_mut(&cls_id)
    .ok_or_else(|| TreeError::ClassNotFound(cls_id.clone()))?;
  class.delete_example(&ex_id)?;
  state.store.save(&tree)?;
  Ok(success(StatusCode::OK, None))
}

pub async fn copy_detection(
  State(state): State<AppState>,
  Path((dt_id, dc_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
  let mut tree = state.store.load(&dt_id)?;
  tree.component(&dc_id)?.as_detection()?;
  let id = tree.copy_component(&dc_id)?;
  state.store.save(&tree)?;
  Ok(success(StatusCode::CREATED, Some(json!({"id": id}))))
}

/// Classifies the transcript's last message against one detection component
/// without traversing. Returns the normalized class label.
pub async fn prompt_detection(
  State(state): State<AppState>,
  Path((dt_id, dc_id)): Path<(String, String)>,
  Json(body): Json<MessagesBody>,
) -> Result<Response, ApiError> {
  let tree = state.store.load(&dt_id)?;
  let detection = tree.component(&dc_id)?.as_detection()?;
  let label = classify(detection, &body.messages, &*state.model).await?;
  Ok(success(StatusCode::OK, Some(json!({"response": label}))))
}
