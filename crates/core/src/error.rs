//! Error types for the Sensei domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Sensei operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Schema errors ---
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum ToolError {
    /// Dispatch requested a name with no registered tool. Always surfaced
    /// to the caller so the agent can recover conversationally.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The tool's input does not satisfy its preconditions.
    #[error("Invalid tool input: {0}")]
    InvalidInput(String),

    /// The tool's underlying operation could not complete. Timeouts inside
    /// a tool surface through this variant as well.
    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Structural errors raised while constructing a parameter schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("object schema must declare properties")]
    ObjectWithoutProperties,

    #[error("array schema must declare items")]
    ArrayWithoutItems,

    #[error("required property '{0}' is not declared in properties")]
    UndeclaredRequired(String),

    #[error("enum constraint is not valid on {0} schemas")]
    EnumOnCompositeKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_displays_name() {
        let err = Error::Tool(ToolError::UnknownTool("quiz_feedback".into()));
        assert!(err.to_string().contains("quiz_feedback"));
    }

    #[test]
    fn execution_failed_displays_reason() {
        let err = Error::Tool(ToolError::ExecutionFailed {
            tool_name: "memory_search".into(),
            reason: "backend unavailable".into(),
        });
        assert!(err.to_string().contains("memory_search"));
        assert!(err.to_string().contains("backend unavailable"));
    }

    #[test]
    fn schema_error_displays_property() {
        let err = SchemaError::UndeclaredRequired("topic".into());
        assert!(err.to_string().contains("topic"));
    }
}
