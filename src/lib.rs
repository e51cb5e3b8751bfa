//! # dialogue-tree
//!
//! Authorable dialogue trees for a few-shot teaching chatbot. A tree is a
//! directed graph of *generation* components (produce chatbot text from
//! few-shot examples) and *detection* components (classify the student's
//! last message and route on the label). The traversal engine walks the tree
//! over a transcript, calling an external completion capability, and returns
//! the generated responses plus the id of the next detection component
//! awaiting input (or `"exit"`).
//!
//! ## Architecture
//!
//! - `types` — the tree data model and its structural edit operations.
//! - `prompt` — pure prompt renderers for both component kinds.
//! - `completion` — the `complete(prompt, max_tokens)` capability seam.
//! - `traversal` — the bounded conversation-flow walk.
//! - `store` — one JSON file per tree under a data directory.
//! - `http` — the REST boundary (axum) mirroring the authoring surface.

pub mod completion;
pub mod error;
pub mod http;
pub mod prompt;
#[cfg(test)]
mod prompt_test;
pub mod store;
pub mod traversal;
#[cfg(test)]
mod traversal_test;
pub mod types;

pub use completion::{Completion, CompletionConfig, OpenAiClient};
pub use error::{CompletionError, EngineError, StoreError, TreeError};
pub use store::TreeStore;
pub use traversal::{Continuation, Traversal, traverse};
pub use types::{Component, ComponentKind, DialogueTree, Message, Role};
