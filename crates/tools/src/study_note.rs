//! Study note tool — records an insight about the learner for later
//! sessions.
//!
//! The side-effecting counterpart to `memory_search`: whatever the agent
//! learns about the learner mid-conversation (a struggle, a preference, a
//! breakthrough) gets written into the study memory collaborator, scoped to
//! the calling learner.

use async_trait::async_trait;
use chrono::Utc;
use sensei_core::error::ToolError;
use sensei_core::memory::{StudyMemory, StudyNote};
use sensei_core::schema::ParameterSchema;
use sensei_core::tool::{Tool, ToolContext, ToolResult};
use std::sync::Arc;

/// A tool that stores a note about the learner.
///
/// Requires a backend; without one, every call fails with
/// `ExecutionFailed` (there is nowhere to write).
pub struct StudyNoteTool {
    backend: Option<Arc<dyn StudyMemory>>,
}

impl StudyNoteTool {
    /// Create a study note tool without a backend.
    pub fn new() -> Self {
        Self { backend: None }
    }

    /// Create a study note tool backed by a real study memory.
    pub fn with_backend(backend: Arc<dyn StudyMemory>) -> Self {
        Self {
            backend: Some(backend),
        }
    }
}

impl Default for StudyNoteTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for StudyNoteTool {
    fn name(&self) -> &str {
        "study_note"
    }

    fn description(&self) -> &str {
        "Record an observation about this learner (a struggle, preference, or breakthrough) \
         so future sessions can build on it. Keep notes short and specific."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::object([
            (
                "content",
                ParameterSchema::string().description("The observation to record"),
            ),
            (
                "tags",
                ParameterSchema::array(ParameterSchema::string())
                    .description("Tags for categorization, e.g. [\"struggle\", \"chapter_3\"]"),
            ),
        ])
        .required(["content"])
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let content = arguments["content"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidInput("Missing 'content' argument".into()))?;

        let tags: Vec<String> = arguments
            .get("tags")
            .and_then(|t| serde_json::from_value(t.clone()).ok())
            .unwrap_or_default();

        let backend = self.backend.as_ref().ok_or_else(|| ToolError::ExecutionFailed {
            tool_name: self.name().to_string(),
            reason: "no study memory backend configured".into(),
        })?;

        let note = StudyNote {
            id: String::new(),
            user_id: ctx.user_id.clone(),
            content: content.to_string(),
            tags,
            source: Some(ctx.session_id.clone()),
            created_at: Utc::now(),
            score: 0.0,
        };

        let id = backend
            .store(note)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: self.name().to_string(),
                reason: e.to_string(),
            })?;

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: format!("Saved study note {id}."),
            data: Some(serde_json::json!({ "id": id })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensei_core::memory::NoteQuery;
    use sensei_memory::InMemoryStudyMemory;

    fn ctx() -> ToolContext {
        ToolContext::new("learner_1", "session_42")
    }

    #[test]
    fn tool_definition() {
        let tool = StudyNoteTool::new();
        assert_eq!(tool.name(), "study_note");
        let schema = tool.parameters().to_value();
        assert_eq!(schema["required"], serde_json::json!(["content"]));
    }

    #[tokio::test]
    async fn stores_note_scoped_to_caller() {
        let backend = Arc::new(InMemoryStudyMemory::new());
        let tool = StudyNoteTool::with_backend(backend.clone());

        let result = tool
            .execute(
                serde_json::json!({
                    "content": "Breakthrough on closures after the counter example",
                    "tags": ["breakthrough"]
                }),
                &ctx(),
            )
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(backend.count("learner_1").await.unwrap(), 1);

        let found = backend
            .search(NoteQuery {
                user_id: "learner_1".into(),
                text: "closures".into(),
                limit: 5,
                min_score: 0.0,
                tags: vec![],
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source.as_deref(), Some("session_42"));
    }

    #[tokio::test]
    async fn without_backend_fails_execution() {
        let tool = StudyNoteTool::new();
        let err = tool
            .execute(serde_json::json!({ "content": "anything" }), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed { .. }));
    }

    #[tokio::test]
    async fn missing_content_is_invalid_input() {
        let backend = Arc::new(InMemoryStudyMemory::new());
        let tool = StudyNoteTool::with_backend(backend);
        let err = tool
            .execute(serde_json::json!({}), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
