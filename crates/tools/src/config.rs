//! Tools configuration — which built-in tools to register and their
//! per-tool settings. Loaded from TOML.

use sensei_core::error::Error;
use serde::{Deserialize, Serialize};

/// Configuration for the built-in tool set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Register the `memory_search` tool.
    pub enable_memory_search: bool,

    /// Register the `study_note` tool.
    pub enable_study_note: bool,

    /// Register the `quiz_feedback` tool.
    pub enable_quiz_feedback: bool,

    /// Default result limit for `memory_search` when the call does not
    /// specify one.
    pub memory_search_limit: usize,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enable_memory_search: true,
            enable_study_note: true,
            enable_quiz_feedback: true,
            memory_search_limit: 5,
        }
    }
}

impl ToolsConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, Error> {
        toml::from_str(toml_str).map_err(|e| Error::Config {
            message: e.to_string(),
        })
    }
}
