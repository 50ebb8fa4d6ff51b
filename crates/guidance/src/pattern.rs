//! Behavior pattern model — one observed signal about a learner.
//!
//! Patterns are produced once per turn by an external behavior analyzer
//! and consumed by the consolidator and guidance generator. They are never
//! persisted here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a concept describes the tutor/learner relationship or the
/// learning process itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptCategory {
    Relationship,
    Learning,
}

/// The closed set of concepts the behavior analyzer reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concept {
    Trust,
    Respect,
    EffectiveCommunication,
    Empathy,
    Reciprocity,
    Honesty,
    Attention,
    CognitiveLoad,
    Metacognition,
}

impl Concept {
    /// Which category this concept belongs to.
    pub fn category(&self) -> ConceptCategory {
        match self {
            Concept::Attention | Concept::CognitiveLoad | Concept::Metacognition => {
                ConceptCategory::Learning
            }
            _ => ConceptCategory::Relationship,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Concept::Trust => "trust",
            Concept::Respect => "respect",
            Concept::EffectiveCommunication => "effective_communication",
            Concept::Empathy => "empathy",
            Concept::Reciprocity => "reciprocity",
            Concept::Honesty => "honesty",
            Concept::Attention => "attention",
            Concept::CognitiveLoad => "cognitive_load",
            Concept::Metacognition => "metacognition",
        }
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The response category a pattern asks for — the key into the strategy
/// catalog.
///
/// `Unknown` absorbs any unrecognized key coming from the analyzer
/// (`#[serde(other)]`), so a stray label deserializes cleanly and is
/// silently skipped downstream instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    RewardHonestCommunication,
    AcknowledgeVulnerability,
    RebuildTrustGently,
    AddressDisrespect,
    ReinforceRespectfulDialogue,
    ClarifyCommunication,
    ModelEmpathy,
    EncourageReciprocity,
    RedirectAttention,
    ReduceCognitiveLoad,
    PromptMetacognition,
    CelebrateProgress,
    #[serde(other)]
    Unknown,
}

impl ResponseKind {
    /// Every catalog-backed kind (excludes `Unknown`).
    pub const ALL: [ResponseKind; 12] = [
        ResponseKind::RewardHonestCommunication,
        ResponseKind::AcknowledgeVulnerability,
        ResponseKind::RebuildTrustGently,
        ResponseKind::AddressDisrespect,
        ResponseKind::ReinforceRespectfulDialogue,
        ResponseKind::ClarifyCommunication,
        ResponseKind::ModelEmpathy,
        ResponseKind::EncourageReciprocity,
        ResponseKind::RedirectAttention,
        ResponseKind::ReduceCognitiveLoad,
        ResponseKind::PromptMetacognition,
        ResponseKind::CelebrateProgress,
    ];
}

/// Priority tier of a response strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Urgent,
}

impl PriorityLevel {
    /// Numeric rank used for ordering: urgent(4) > high(3) > medium(2) >
    /// low(1). A pattern with no catalog entry ranks 0.
    pub fn rank(&self) -> u8 {
        match self {
            PriorityLevel::Low => 1,
            PriorityLevel::Medium => 2,
            PriorityLevel::High => 3,
            PriorityLevel::Urgent => 4,
        }
    }
}

/// One observed signal about a learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedBehaviorPattern {
    /// Relationship or learning signal.
    pub concept_category: ConceptCategory,

    /// The concept the behavior relates to.
    pub concept: Concept,

    /// Free-text label of the specific observed action
    /// (e.g. "admitted_confusion").
    pub behavior: String,

    /// Confidence in the observation, clamped to [0, 1]. Also doubles as
    /// the boost-vs-reduce signal for the relationship score.
    pub weight: f64,

    /// Free-text justification for the observation.
    #[serde(default)]
    pub evidence: String,

    /// Situational tags (e.g. "late_night_session", "after_failed_quiz").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_factors: Vec<String>,

    /// The response category this pattern calls for.
    pub ai_response_needed: ResponseKind,

    /// When the behavior was observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl DetectedBehaviorPattern {
    /// Create a pattern, deriving the category from the concept and
    /// clamping the weight into [0, 1] (NaN clamps to 0).
    pub fn new(
        concept: Concept,
        behavior: impl Into<String>,
        weight: f64,
        ai_response_needed: ResponseKind,
    ) -> Self {
        Self {
            concept_category: concept.category(),
            concept,
            behavior: behavior.into(),
            weight: clamp_weight(weight),
            evidence: String::new(),
            context_factors: Vec::new(),
            ai_response_needed,
            timestamp: None,
        }
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = evidence.into();
        self
    }

    pub fn with_context_factors(
        mut self,
        factors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.context_factors = factors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The consolidation key: duplicate observations of the same
    /// (concept, behavior) pair share a key.
    pub fn key(&self) -> String {
        format!("{}_{}", self.concept.as_str(), self.behavior)
    }

    /// Whether this record carries the minimum it needs to be usable.
    /// Malformed records are dropped downstream rather than raising, so one
    /// bad signal cannot blank out a whole turn's guidance.
    pub fn is_well_formed(&self) -> bool {
        !self.behavior.is_empty() && self.weight.is_finite()
    }
}

/// Clamp a weight into the closed interval [0, 1]; NaN clamps to 0.
pub(crate) fn clamp_weight(weight: f64) -> f64 {
    if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concept_categories() {
        assert_eq!(Concept::Trust.category(), ConceptCategory::Relationship);
        assert_eq!(Concept::Empathy.category(), ConceptCategory::Relationship);
        assert_eq!(Concept::Attention.category(), ConceptCategory::Learning);
        assert_eq!(Concept::CognitiveLoad.category(), ConceptCategory::Learning);
        assert_eq!(Concept::Metacognition.category(), ConceptCategory::Learning);
    }

    #[test]
    fn new_clamps_weight() {
        let p = DetectedBehaviorPattern::new(
            Concept::Trust,
            "admitted_confusion",
            1.7,
            ResponseKind::RewardHonestCommunication,
        );
        assert_eq!(p.weight, 1.0);

        let p = DetectedBehaviorPattern::new(
            Concept::Trust,
            "admitted_confusion",
            -0.2,
            ResponseKind::RewardHonestCommunication,
        );
        assert_eq!(p.weight, 0.0);

        let p = DetectedBehaviorPattern::new(
            Concept::Trust,
            "admitted_confusion",
            f64::NAN,
            ResponseKind::RewardHonestCommunication,
        );
        assert_eq!(p.weight, 0.0);
    }

    #[test]
    fn key_joins_concept_and_behavior() {
        let p = DetectedBehaviorPattern::new(
            Concept::CognitiveLoad,
            "asked_for_break",
            0.5,
            ResponseKind::ReduceCognitiveLoad,
        );
        assert_eq!(p.key(), "cognitive_load_asked_for_break");
    }

    #[test]
    fn priority_ranks() {
        assert_eq!(PriorityLevel::Low.rank(), 1);
        assert_eq!(PriorityLevel::Medium.rank(), 2);
        assert_eq!(PriorityLevel::High.rank(), 3);
        assert_eq!(PriorityLevel::Urgent.rank(), 4);
        assert!(PriorityLevel::Urgent > PriorityLevel::High);
    }

    #[test]
    fn unknown_response_kind_deserializes() {
        let kind: ResponseKind = serde_json::from_value(serde_json::json!("summon_wizard")).unwrap();
        assert_eq!(kind, ResponseKind::Unknown);

        let kind: ResponseKind =
            serde_json::from_value(serde_json::json!("reward_honest_communication")).unwrap();
        assert_eq!(kind, ResponseKind::RewardHonestCommunication);
    }

    #[test]
    fn pattern_deserializes_from_analyzer_payload() {
        let json = serde_json::json!({
            "concept_category": "relationship",
            "concept": "trust",
            "behavior": "admitted_confusion",
            "weight": 0.6,
            "evidence": "said 'I have no idea what a lifetime is'",
            "context_factors": ["after_failed_quiz"],
            "ai_response_needed": "reward_honest_communication"
        });
        let p: DetectedBehaviorPattern = serde_json::from_value(json).unwrap();
        assert_eq!(p.concept, Concept::Trust);
        assert_eq!(p.ai_response_needed, ResponseKind::RewardHonestCommunication);
        assert!(p.timestamp.is_none());
        assert!(p.is_well_formed());
    }

    #[test]
    fn malformed_patterns_detected() {
        let empty_behavior = DetectedBehaviorPattern::new(
            Concept::Trust,
            "",
            0.5,
            ResponseKind::RewardHonestCommunication,
        );
        assert!(!empty_behavior.is_well_formed());

        let mut bad_weight = DetectedBehaviorPattern::new(
            Concept::Trust,
            "x",
            0.5,
            ResponseKind::RewardHonestCommunication,
        );
        bad_weight.weight = f64::INFINITY;
        assert!(!bad_weight.is_well_formed());
    }
}
