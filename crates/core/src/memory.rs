//! Study memory trait — the learner-memory collaborator tools call into.
//!
//! The memory service stores notes about a learner's study history
//! (insights, struggles, past explanations) and answers ranked similarity
//! queries over them. Tools consume this surface; implementations live in
//! the `sensei-memory` crate.

use crate::error::MemoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single note about a learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyNote {
    /// Unique ID for this note
    pub id: String,

    /// The learner this note belongs to
    pub user_id: String,

    /// The content of the note
    pub content: String,

    /// Tags for categorization
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Source of the note (session ID, tool name, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// When this note was created
    pub created_at: DateTime<Utc>,

    /// Relevance score (set by search operations)
    #[serde(default)]
    pub score: f32,
}

/// A query for searching a learner's notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteQuery {
    /// The learner whose notes to search
    pub user_id: String,

    /// The search text
    pub text: String,

    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Minimum relevance score threshold
    #[serde(default)]
    pub min_score: f32,

    /// Filter by tags
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_limit() -> usize {
    5
}

/// The study memory collaborator trait.
///
/// Implementations: in-memory (testing and single-process deployments);
/// anything that can answer a ranked similarity query fits behind it.
#[async_trait]
pub trait StudyMemory: Send + Sync {
    /// The backend name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Store a new note, returning its ID.
    async fn store(&self, note: StudyNote) -> std::result::Result<String, MemoryError>;

    /// Search notes, ranked by relevance score descending.
    async fn search(&self, query: NoteQuery) -> std::result::Result<Vec<StudyNote>, MemoryError>;

    /// Number of notes stored for a learner.
    async fn count(&self, user_id: &str) -> std::result::Result<usize, MemoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_query_defaults() {
        let json = serde_json::json!({
            "user_id": "user_1",
            "text": "ownership and borrowing"
        });
        let query: NoteQuery = serde_json::from_value(json).unwrap();
        assert_eq!(query.limit, 5);
        assert_eq!(query.min_score, 0.0);
        assert!(query.tags.is_empty());
    }

    #[test]
    fn note_serialization_skips_empty_optionals() {
        let note = StudyNote {
            id: "note_1".into(),
            user_id: "user_1".into(),
            content: "Struggled with lifetimes".into(),
            tags: vec![],
            source: None,
            created_at: Utc::now(),
            score: 0.0,
        };
        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("tags").is_none());
        assert!(value.get("source").is_none());
    }
}
