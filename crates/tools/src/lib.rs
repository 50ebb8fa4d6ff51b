//! Built-in tool implementations for Sensei.
//!
//! Tools give the tutoring agent the ability to act beyond conversation:
//! search the learner's study history, record insights for later sessions,
//! and explain quiz answers.

pub mod config;
pub mod memory_search;
pub mod quiz_feedback;
pub mod study_note;

pub use config::ToolsConfig;
pub use memory_search::MemorySearchTool;
pub use quiz_feedback::QuizFeedbackTool;
pub use study_note::StudyNoteTool;

use sensei_core::memory::StudyMemory;
use sensei_core::tool::ToolRegistry;
use std::sync::Arc;

/// Build a registry from a tools configuration.
///
/// `backend` is the learner-memory collaborator shared by the memory-backed
/// tools; pass `None` to run `memory_search` in stub mode (and `study_note`
/// without a place to write, which makes it fail at call time).
pub fn registry_from_config(
    config: &ToolsConfig,
    backend: Option<Arc<dyn StudyMemory>>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    if config.enable_memory_search {
        let tool = match &backend {
            Some(backend) => MemorySearchTool::with_backend(backend.clone()),
            None => MemorySearchTool::new(),
        }
        .with_default_limit(config.memory_search_limit);
        registry.register(Box::new(tool));
    }
    if config.enable_study_note {
        registry.register(Box::new(match &backend {
            Some(backend) => StudyNoteTool::with_backend(backend.clone()),
            None => StudyNoteTool::new(),
        }));
    }
    if config.enable_quiz_feedback {
        registry.register(Box::new(QuizFeedbackTool));
    }
    registry
}

/// Create a registry with all built-in tools and default settings.
pub fn default_registry(backend: Option<Arc<dyn StudyMemory>>) -> ToolRegistry {
    registry_from_config(&ToolsConfig::default(), backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensei_memory::InMemoryStudyMemory;

    #[test]
    fn default_registry_has_all_tools() {
        let registry = default_registry(None);
        assert_eq!(
            registry.names(),
            vec!["memory_search", "study_note", "quiz_feedback"]
        );
    }

    #[test]
    fn config_disables_tools() {
        let config = ToolsConfig {
            enable_study_note: false,
            enable_quiz_feedback: false,
            ..ToolsConfig::default()
        };
        let backend = Arc::new(InMemoryStudyMemory::new());
        let registry = registry_from_config(&config, Some(backend));
        assert_eq!(registry.names(), vec!["memory_search"]);
    }

    #[test]
    fn definitions_are_llm_ready() {
        let registry = default_registry(None);
        for def in registry.definitions() {
            assert!(!def.name.is_empty());
            assert!(!def.description.is_empty());
            assert_eq!(def.parameters["type"], "object");
        }
    }
}
