//! In-memory backend — useful for testing and single-process deployments.

use async_trait::async_trait;
use sensei_core::error::MemoryError;
use sensei_core::memory::{NoteQuery, StudyMemory, StudyNote};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// An in-memory backend that stores notes in a Vec.
/// Useful for testing and sessions where persistence isn't needed.
pub struct InMemoryStudyMemory {
    notes: Arc<RwLock<Vec<StudyNote>>>,
}

impl InMemoryStudyMemory {
    pub fn new() -> Self {
        Self {
            notes: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryStudyMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudyMemory for InMemoryStudyMemory {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn store(&self, mut note: StudyNote) -> Result<String, MemoryError> {
        if note.id.is_empty() {
            note.id = Uuid::new_v4().to_string();
        }
        let id = note.id.clone();
        self.notes.write().await.push(note);
        Ok(id)
    }

    async fn search(&self, query: NoteQuery) -> Result<Vec<StudyNote>, MemoryError> {
        let notes = self.notes.read().await;
        let query_lower = query.text.to_lowercase();

        let mut results: Vec<StudyNote> = notes
            .iter()
            .filter(|n| {
                let user_match = n.user_id == query.user_id;
                let content_match = n.content.to_lowercase().contains(&query_lower);
                let tag_match =
                    query.tags.is_empty() || query.tags.iter().any(|t| n.tags.contains(t));
                user_match && content_match && tag_match
            })
            .cloned()
            .map(|mut n| {
                // Simple keyword relevance score
                let occurrences = n.content.to_lowercase().matches(&query_lower).count();
                n.score = occurrences as f32 / (n.content.len() as f32 / 100.0).max(1.0);
                n
            })
            .filter(|n| n.score >= query.min_score)
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(query.limit);

        Ok(results)
    }

    async fn count(&self, user_id: &str) -> Result<usize, MemoryError> {
        let notes = self.notes.read().await;
        Ok(notes.iter().filter(|n| n.user_id == user_id).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(user_id: &str, content: &str, tags: &[&str]) -> StudyNote {
        StudyNote {
            id: String::new(),
            user_id: user_id.into(),
            content: content.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            source: Some("test".into()),
            created_at: Utc::now(),
            score: 0.0,
        }
    }

    fn query(user_id: &str, text: &str) -> NoteQuery {
        NoteQuery {
            user_id: user_id.into(),
            text: text.into(),
            limit: 5,
            min_score: 0.0,
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn store_assigns_id() {
        let memory = InMemoryStudyMemory::new();
        let id = memory
            .store(note("user_1", "Structs own their fields", &[]))
            .await
            .unwrap();
        assert!(!id.is_empty());
        assert_eq!(memory.count("user_1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn search_matches_keyword() {
        let memory = InMemoryStudyMemory::new();
        memory
            .store(note("user_1", "Confused lifetimes with scopes", &["rust"]))
            .await
            .unwrap();
        memory
            .store(note("user_1", "Comfortable with pattern matching", &["rust"]))
            .await
            .unwrap();

        let results = memory.search(query("user_1", "lifetimes")).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].content.contains("lifetimes"));
        assert!(results[0].score > 0.0);
    }

    #[tokio::test]
    async fn search_is_scoped_per_user() {
        let memory = InMemoryStudyMemory::new();
        memory
            .store(note("user_1", "Prefers worked examples", &[]))
            .await
            .unwrap();
        memory
            .store(note("user_2", "Prefers worked examples", &[]))
            .await
            .unwrap();

        let results = memory.search(query("user_1", "examples")).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].user_id, "user_1");
        assert_eq!(memory.count("user_2").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn search_filters_by_tag() {
        let memory = InMemoryStudyMemory::new();
        memory
            .store(note("user_1", "Quiz three went badly", &["quiz"]))
            .await
            .unwrap();
        memory
            .store(note("user_1", "Quiz four went well", &["progress"]))
            .await
            .unwrap();

        let mut q = query("user_1", "quiz");
        q.tags = vec!["progress".into()];
        let results = memory.search(q).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].content.contains("four"));
    }

    #[tokio::test]
    async fn search_respects_limit_and_ranks_by_score() {
        let memory = InMemoryStudyMemory::new();
        memory
            .store(note("user_1", "recursion", &[]))
            .await
            .unwrap();
        memory
            .store(note(
                "user_1",
                "recursion recursion recursion everywhere",
                &[],
            ))
            .await
            .unwrap();
        memory
            .store(note("user_1", "a note about recursion basics", &[]))
            .await
            .unwrap();

        let mut q = query("user_1", "recursion");
        q.limit = 2;
        let results = memory.search(q).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn search_no_results() {
        let memory = InMemoryStudyMemory::new();
        let results = memory
            .search(query("user_1", "nonexistent topic"))
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
