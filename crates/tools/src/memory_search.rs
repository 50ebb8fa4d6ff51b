//! Memory search tool — lets the agent search the learner's study history.
//!
//! This tool bridges the tools system with the study memory collaborator,
//! giving the agent on-demand recall of a learner's past struggles,
//! insights, and preferences. Queries are scoped to the calling learner
//! via `ToolContext::user_id`.
//!
//! When no `StudyMemory` backend is injected, the tool returns stub/mock
//! results. When a real backend is provided, it delegates to
//! `StudyMemory::search()`.

use async_trait::async_trait;
use sensei_core::error::ToolError;
use sensei_core::memory::{NoteQuery, StudyMemory};
use sensei_core::schema::ParameterSchema;
use sensei_core::tool::{Tool, ToolContext, ToolResult};
use std::sync::Arc;
use tracing::debug;

const MAX_LIMIT: usize = 50;

/// A tool that searches the learner's study history.
///
/// Without a backend, returns mock study notes for testing.
/// With a backend, performs real searches.
pub struct MemorySearchTool {
    backend: Option<Arc<dyn StudyMemory>>,
    default_limit: usize,
}

impl MemorySearchTool {
    /// Create a new memory search tool without a backend (stub mode).
    pub fn new() -> Self {
        Self {
            backend: None,
            default_limit: 5,
        }
    }

    /// Create a memory search tool backed by a real study memory.
    pub fn with_backend(backend: Arc<dyn StudyMemory>) -> Self {
        Self {
            backend: Some(backend),
            default_limit: 5,
        }
    }

    /// Set the result limit used when a call does not specify one.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit.clamp(1, MAX_LIMIT);
        self
    }
}

impl Default for MemorySearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for MemorySearchTool {
    fn name(&self) -> &str {
        "memory_search"
    }

    fn description(&self) -> &str {
        "Search this learner's study history for past struggles, insights, and preferences. \
         Use this before explaining a topic the learner may have seen before."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::object([
            (
                "query",
                ParameterSchema::string()
                    .description("The search query to find relevant study notes"),
            ),
            (
                "limit",
                ParameterSchema::number()
                    .description("Maximum number of notes to return (default 5)"),
            ),
            (
                "tags",
                ParameterSchema::array(ParameterSchema::string())
                    .description("Optional tags to filter notes by"),
            ),
        ])
        .required(["query"])
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidInput("Missing 'query' argument".into()))?;

        let limit = arguments["limit"]
            .as_u64()
            .map(|l| l as usize)
            .unwrap_or(self.default_limit)
            .min(MAX_LIMIT);

        let tags: Vec<String> = arguments
            .get("tags")
            .and_then(|t| serde_json::from_value(t.clone()).ok())
            .unwrap_or_default();

        let results = if let Some(backend) = &self.backend {
            let search = NoteQuery {
                user_id: ctx.user_id.clone(),
                text: query.to_string(),
                limit,
                min_score: 0.0,
                tags,
            };
            let notes = backend
                .search(search)
                .await
                .map_err(|e| ToolError::ExecutionFailed {
                    tool_name: self.name().to_string(),
                    reason: e.to_string(),
                })?;
            notes
                .into_iter()
                .map(|n| NoteView {
                    id: n.id,
                    content: n.content,
                    tags: n.tags,
                    score: n.score as f64,
                    source: n.source,
                    created_at: Some(n.created_at.to_rfc3339()),
                })
                .collect()
        } else {
            debug!(query, "memory_search running in stub mode");
            generate_mock_notes(query, limit)
        };

        let output = if results.is_empty() {
            format!("No study notes found matching '{query}'.")
        } else {
            serde_json::to_string_pretty(&results).unwrap_or_default()
        };

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output,
            data: serde_json::to_value(&results).ok(),
        })
    }
}

#[derive(serde::Serialize)]
struct NoteView {
    id: String,
    content: String,
    tags: Vec<String>,
    score: f64,
    source: Option<String>,
    created_at: Option<String>,
}

fn generate_mock_notes(query: &str, limit: usize) -> Vec<NoteView> {
    let q = query.to_lowercase();

    // Context-aware mock notes
    let mut results = Vec::new();

    if q.contains("struggle") || q.contains("confus") || q.contains("stuck") {
        results.push(NoteView {
            id: "note_struggle_001".into(),
            content: "Struggled with ownership and borrowing in chapter 3; asked for a second \
                      worked example."
                .into(),
            tags: vec!["struggle".into(), "chapter_3".into()],
            score: 0.91,
            source: Some("session".into()),
            created_at: Some("2024-03-02T18:40:00Z".into()),
        });
    }

    if q.contains("quiz") {
        results.push(NoteView {
            id: "note_quiz_001".into(),
            content: "Missed two questions on trait objects in quiz 4; both involved dynamic \
                      dispatch."
                .into(),
            tags: vec!["quiz".into(), "traits".into()],
            score: 0.88,
            source: Some("quiz".into()),
            created_at: Some("2024-03-05T09:10:00Z".into()),
        });
    }

    if q.contains("prefer") || q.contains("style") {
        results.push(NoteView {
            id: "note_pref_001".into(),
            content: "Prefers a worked example before the formal definition.".into(),
            tags: vec!["preference".into()],
            score: 0.85,
            source: Some("session".into()),
            created_at: Some("2024-02-20T14:05:00Z".into()),
        });
    }

    // If no specific matches, generate generic results
    if results.is_empty() {
        for i in 0..limit.min(3) {
            results.push(NoteView {
                id: format!("note_generic_{:03}", i + 1),
                content: format!(
                    "This is a mock study note related to '{}'. In production, this would \
                     contain actual stored history.",
                    query
                ),
                tags: vec!["auto-saved".into()],
                score: 0.7 - (i as f64 * 0.1),
                source: Some("session".into()),
                created_at: Some("2024-02-10T12:00:00Z".into()),
            });
        }
    }

    results.into_iter().take(limit).collect()
}
