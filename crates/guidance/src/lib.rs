//! Behavioral guidance engine for Sensei.
//!
//! Converts a stream of detected relationship/learning signals about a
//! learner into a single, prioritized response strategy for the agent to
//! follow on its next turn:
//!
//! 1. An external analyzer (LLM or classifier, not this crate) emits a
//!    list of [`DetectedBehaviorPattern`] values per turn.
//! 2. [`consolidate`] collapses duplicate (concept, behavior) observations,
//!    strengthening confidence instead of duplicating entries.
//! 3. [`generate_guidance`] ranks patterns by strategy priority and weight,
//!    picks the primary strategy from the [`StrategyCatalog`], and
//!    aggregates tone/content/action guidance into one deduplicated,
//!    order-preserving [`ResponseGuidance`] bundle.
//!
//! The whole pipeline is pure and synchronous: it never errors (malformed
//! records are dropped, unknown response kinds are skipped) so the agent
//! loop always receives *some* guidance, even if it is the default.

pub mod catalog;
pub mod consolidate;
pub mod generator;
pub mod pattern;

pub use catalog::{ResponseStrategy, StrategyCatalog};
pub use consolidate::consolidate;
pub use generator::{ResponseGuidance, generate_guidance};
pub use pattern::{
    Concept, ConceptCategory, DetectedBehaviorPattern, PriorityLevel, ResponseKind,
};
