//! # Sensei Core
//!
//! Domain types, traits, and error definitions for the Sensei tutoring agent
//! runtime. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod memory;
pub mod schema;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, MemoryError, Result, SchemaError, ToolError};
pub use memory::{NoteQuery, StudyMemory, StudyNote};
pub use schema::{ParameterSchema, SchemaKind, SchemaViolation};
pub use tool::{Tool, ToolCall, ToolContext, ToolDefinition, ToolRegistry, ToolResult};
