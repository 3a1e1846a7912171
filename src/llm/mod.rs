//! Structured generation over a chat-completion model.
//!
//! The flow is: build messages, call the model, clean the raw text
//! ([`repair`]), parse it, validate it against an explicit schema
//! description ([`schema`]), and retry with a corrective instruction
//! when the model misbehaves ([`caller`]).

pub mod caller;
pub mod client;
pub mod repair;
pub mod schema;

pub use caller::call_validated;
pub use client::{ChatMessage, Completion, HttpModelClient, ModelClient, Role};
pub use schema::{FieldDef, FieldKind, SchemaDef};
