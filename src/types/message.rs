//! Transcript messages passed into a traversal call.

use serde::{Deserialize, Serialize};

/// Who produced a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Chatbot,
}

/// One turn of the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  pub role: Role,
  pub message: String,
}

impl Message {
  pub fn student(message: impl Into<String>) -> Self {
    Self {
      role: Role::Student,
      message: message.into(),
    }
  }

  pub fn chatbot(message: impl Into<String>) -> Self {
    Self {
      role: Role::Chatbot,
      message: message.into(),
    }
  }
}
