//! Built-in strategy catalog — the hand-authored table mapping each
//! response category to a concrete strategy.
//!
//! This is configuration data, not logic: the generator consumes the four
//! guidance fields verbatim, and `example_phrases` illustrate the intended
//! register. Every `ResponseKind` except `Unknown` has exactly one entry.

use crate::pattern::{PriorityLevel, ResponseKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How the agent should adapt its next response for one category of
/// observed behavior. Immutable, statically defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseStrategy {
    /// Overall tone for the next response.
    pub tone: String,

    /// The structural approach to take.
    pub approach: String,

    /// Ordered content directives.
    pub content_adjustments: Vec<String>,

    /// Ordered follow-up actions.
    pub followup_actions: Vec<String>,

    /// Illustrative phrasings in the intended register.
    pub example_phrases: Vec<String>,

    /// How strongly this strategy should win over others this turn.
    pub priority_level: PriorityLevel,
}

fn strategy(
    tone: &str,
    approach: &str,
    content_adjustments: &[&str],
    followup_actions: &[&str],
    example_phrases: &[&str],
    priority_level: PriorityLevel,
) -> ResponseStrategy {
    ResponseStrategy {
        tone: tone.into(),
        approach: approach.into(),
        content_adjustments: content_adjustments.iter().map(|s| s.to_string()).collect(),
        followup_actions: followup_actions.iter().map(|s| s.to_string()).collect(),
        example_phrases: example_phrases.iter().map(|s| s.to_string()).collect(),
        priority_level,
    }
}

/// The catalog of response strategies, keyed by [`ResponseKind`].
pub struct StrategyCatalog {
    strategies: HashMap<ResponseKind, ResponseStrategy>,
}

impl StrategyCatalog {
    /// Create a catalog with the built-in strategy table.
    pub fn with_defaults() -> Self {
        let mut strategies = HashMap::new();

        // ── Trust & honesty ────────────────────────────────────────
        strategies.insert(
            ResponseKind::RewardHonestCommunication,
            strategy(
                "appreciative_encouraging_supportive",
                "acknowledge_honesty_then_reteach",
                &[
                    "Thank the learner for saying where they are stuck",
                    "Re-explain the confusing concept from a different angle",
                    "Break the next explanation into smaller steps",
                ],
                &[
                    "Check understanding with a low-stakes question",
                    "Revisit the concept early in the next session",
                ],
                &[
                    "Thanks for telling me you're stuck — that's exactly how we get unstuck.",
                    "Good call flagging that. Let's look at it from another angle.",
                ],
                PriorityLevel::High,
            ),
        );
        strategies.insert(
            ResponseKind::AcknowledgeVulnerability,
            strategy(
                "warm_reassuring",
                "normalize_struggle_before_content",
                &[
                    "Name the difficulty as normal and expected",
                    "Keep the next step small and winnable",
                    "Avoid piling on new material this turn",
                ],
                &[
                    "Offer an easier practice problem to rebuild confidence",
                    "Check in on how the learner is feeling next turn",
                ],
                &[
                    "This topic is genuinely hard — you're not behind.",
                    "Most people wrestle with this exact point for a while.",
                ],
                PriorityLevel::High,
            ),
        );
        strategies.insert(
            ResponseKind::RebuildTrustGently,
            strategy(
                "steady_patient_consistent",
                "small_reliable_commitments",
                &[
                    "Keep any promises made earlier in the conversation",
                    "Be explicit about what will happen next",
                    "Avoid overclaiming what the learner has mastered",
                ],
                &[
                    "Deliver the promised follow-up before introducing anything new",
                    "Keep response structure predictable for a few turns",
                ],
                &[
                    "Last time I said we'd come back to this — let's do that now.",
                    "Here's exactly what we'll do next, step by step.",
                ],
                PriorityLevel::High,
            ),
        );

        // ── Respect ────────────────────────────────────────────────
        strategies.insert(
            ResponseKind::AddressDisrespect,
            strategy(
                "calm_firm_respectful",
                "set_boundary_without_escalating",
                &[
                    "Name the disrespectful language without shaming",
                    "Restate the expectation of mutual respect",
                    "Offer to continue as soon as the tone resets",
                ],
                &[
                    "Return to the lesson the moment the tone recovers",
                    "Do not mirror or escalate the language",
                ],
                &[
                    "I want to keep helping — let's keep this respectful on both sides.",
                    "Let's reset and get back to the problem.",
                ],
                PriorityLevel::Urgent,
            ),
        );
        strategies.insert(
            ResponseKind::ReinforceRespectfulDialogue,
            strategy(
                "appreciative_collegial",
                "positively_reinforce_tone",
                &[
                    "Acknowledge the respectful, constructive phrasing",
                    "Keep the collaborative framing going",
                ],
                &["Mirror the learner's constructive tone in the reply"],
                &["I appreciate how you framed that question."],
                PriorityLevel::Medium,
            ),
        );

        // ── Communication & empathy ────────────────────────────────
        strategies.insert(
            ResponseKind::ClarifyCommunication,
            strategy(
                "patient_precise",
                "restate_and_confirm",
                &[
                    "Restate the learner's question in your own words",
                    "Ask one targeted clarifying question",
                    "Avoid stacking multiple questions in one turn",
                ],
                &["Confirm the restatement matched the learner's intent"],
                &[
                    "Let me make sure I've got this: you're asking about the second case, right?",
                ],
                PriorityLevel::Medium,
            ),
        );
        strategies.insert(
            ResponseKind::ModelEmpathy,
            strategy(
                "warm_attentive",
                "reflect_feelings_before_facts",
                &[
                    "Reflect the feeling behind the learner's message",
                    "Connect the feeling to the learning situation before explaining",
                ],
                &["Check back on the feeling after the explanation lands"],
                &["That sounds frustrating — staring at the same error for an hour is draining."],
                PriorityLevel::Medium,
            ),
        );
        strategies.insert(
            ResponseKind::EncourageReciprocity,
            strategy(
                "inviting_curious",
                "invite_contribution",
                &[
                    "Ask the learner to explain part of the idea back",
                    "Leave deliberate space for the learner's own examples",
                ],
                &["Build the next explanation on the learner's contribution"],
                &["How would you explain this bit in your own words?"],
                PriorityLevel::Low,
            ),
        );

        // ── Learning process ───────────────────────────────────────
        strategies.insert(
            ResponseKind::RedirectAttention,
            strategy(
                "energetic_focused",
                "shorten_and_refocus",
                &[
                    "Shorten explanations to one idea at a time",
                    "Use a concrete example to re-anchor attention",
                    "Drop tangents until the main thread lands",
                ],
                &["Switch activity type if attention keeps drifting"],
                &["Quick check — one question before we move on."],
                PriorityLevel::Medium,
            ),
        );
        strategies.insert(
            ResponseKind::ReduceCognitiveLoad,
            strategy(
                "calm_unhurried",
                "chunk_and_sequence",
                &[
                    "Split the material into smaller chunks",
                    "Remove optional detail from explanations",
                    "Recap prior steps before adding a new one",
                ],
                &[
                    "Pause for consolidation before any new material",
                    "Offer a short written summary of the steps so far",
                ],
                &[
                    "Let's park everything except this one piece.",
                    "Here's the only thing to hold in your head right now.",
                ],
                PriorityLevel::High,
            ),
        );
        strategies.insert(
            ResponseKind::PromptMetacognition,
            strategy(
                "reflective_curious",
                "ask_about_the_learning_itself",
                &[
                    "Ask how the learner approached the problem",
                    "Surface which strategy worked and which didn't",
                ],
                &["Suggest one concrete study-strategy adjustment"],
                &["What did you try first, and why that?"],
                PriorityLevel::Low,
            ),
        );
        strategies.insert(
            ResponseKind::CelebrateProgress,
            strategy(
                "enthusiastic_genuine",
                "name_the_specific_win",
                &[
                    "Point at the specific skill that improved",
                    "Tie the win to the learner's effort, not luck",
                ],
                &["Raise difficulty slightly while momentum is high"],
                &["Two weeks ago this error would have stopped you — today you fixed it yourself."],
                PriorityLevel::Low,
            ),
        );

        Self { strategies }
    }

    /// Create an empty catalog.
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Insert or replace the strategy for a response kind.
    pub fn set(&mut self, kind: ResponseKind, strategy: ResponseStrategy) {
        self.strategies.insert(kind, strategy);
    }

    /// Look up the strategy for a response kind. `Unknown` (and any kind
    /// without an entry) yields `None` — callers skip such patterns.
    pub fn strategy_for(&self, kind: ResponseKind) -> Option<&ResponseStrategy> {
        self.strategies.get(&kind)
    }

    /// Priority rank for ordering: the catalog entry's rank, or 0 when the
    /// kind has no entry.
    pub fn priority_rank(&self, kind: ResponseKind) -> u8 {
        self.strategy_for(kind)
            .map(|s| s.priority_level.rank())
            .unwrap_or(0)
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_exactly_one_entry() {
        let catalog = StrategyCatalog::with_defaults();
        assert_eq!(catalog.len(), ResponseKind::ALL.len());
        for kind in ResponseKind::ALL {
            let strategy = catalog.strategy_for(kind).unwrap();
            assert!(!strategy.tone.is_empty());
            assert!(!strategy.approach.is_empty());
            assert!(!strategy.content_adjustments.is_empty());
            assert!(!strategy.followup_actions.is_empty());
            assert!(!strategy.example_phrases.is_empty());
        }
    }

    #[test]
    fn unknown_kind_has_no_entry() {
        let catalog = StrategyCatalog::with_defaults();
        assert!(catalog.strategy_for(ResponseKind::Unknown).is_none());
        assert_eq!(catalog.priority_rank(ResponseKind::Unknown), 0);
    }

    #[test]
    fn honest_communication_tone_is_fixed() {
        let catalog = StrategyCatalog::with_defaults();
        let strategy = catalog
            .strategy_for(ResponseKind::RewardHonestCommunication)
            .unwrap();
        assert_eq!(strategy.tone, "appreciative_encouraging_supportive");
        assert_eq!(strategy.priority_level, PriorityLevel::High);
    }

    #[test]
    fn disrespect_is_the_only_urgent_entry() {
        let catalog = StrategyCatalog::with_defaults();
        let urgent: Vec<ResponseKind> = ResponseKind::ALL
            .into_iter()
            .filter(|k| catalog.priority_rank(*k) == 4)
            .collect();
        assert_eq!(urgent, vec![ResponseKind::AddressDisrespect]);
    }

    #[test]
    fn set_overrides_existing() {
        let mut catalog = StrategyCatalog::with_defaults();
        let mut custom = catalog
            .strategy_for(ResponseKind::CelebrateProgress)
            .unwrap()
            .clone();
        custom.priority_level = PriorityLevel::Urgent;
        catalog.set(ResponseKind::CelebrateProgress, custom);
        assert_eq!(catalog.priority_rank(ResponseKind::CelebrateProgress), 4);
        assert_eq!(catalog.len(), ResponseKind::ALL.len());
    }

    #[test]
    fn empty_catalog() {
        let catalog = StrategyCatalog::empty();
        assert!(catalog.is_empty());
        assert!(
            catalog
                .strategy_for(ResponseKind::RewardHonestCommunication)
                .is_none()
        );
    }
}
