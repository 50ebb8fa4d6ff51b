//! Response guidance generation — turn a list of behavior patterns into
//! one prioritized, aggregated guidance bundle for the next agent turn.

use crate::catalog::{ResponseStrategy, StrategyCatalog};
use crate::pattern::{DetectedBehaviorPattern, PriorityLevel};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// The interaction approach reported when no patterns were detected.
const STANDARD_APPROACH: &str = "standard";

/// What the agent must not do while a situation is at urgent priority.
const ESCALATION_AVOID: [&str; 4] = [
    "sarcasm_or_mockery",
    "matching_hostile_tone",
    "lecturing_about_behavior",
    "withdrawing_help",
];

/// The single aggregated output handed to the agent for the next turn.
///
/// Ephemeral: produced and consumed within one turn, never stored. The
/// aggregate lists are deduplicated in order of first appearance, so
/// earlier entries are the logically higher-priority ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseGuidance {
    /// The highest-priority strategy, or `None` when no patterns (with a
    /// catalog entry) were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_strategy: Option<ResponseStrategy>,

    /// Tones from every contributing strategy, first occurrence first.
    pub tone_adjustments: Vec<String>,

    /// All content adjustments across contributing strategies.
    pub content_priorities: Vec<String>,

    /// All follow-up actions across contributing strategies.
    pub immediate_actions: Vec<String>,

    /// The primary strategy's approach, or "standard" when idle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_approach: Option<String>,

    /// Behaviors the agent must avoid this turn (set while the primary
    /// strategy is urgent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid_patterns: Option<Vec<String>>,
}

impl ResponseGuidance {
    /// The terminal/default guidance for a turn with no detected patterns.
    fn standard() -> Self {
        Self {
            primary_strategy: None,
            tone_adjustments: Vec::new(),
            content_priorities: Vec::new(),
            immediate_actions: Vec::new(),
            interaction_approach: Some(STANDARD_APPROACH.into()),
            avoid_patterns: None,
        }
    }
}

/// Generate guidance from a (possibly already-consolidated) pattern list.
///
/// The primary strategy is picked by sorting descending on the catalog
/// priority rank of each pattern's `ai_response_needed` (patterns with no
/// catalog entry rank 0), ties broken by weight descending. Aggregation
/// runs over the *original* input order and deduplicates each list while
/// preserving first appearance.
///
/// Never errors: malformed patterns and unknown response kinds contribute
/// nothing, so the agent loop always gets an answer.
pub fn generate_guidance(
    patterns: &[DetectedBehaviorPattern],
    catalog: &StrategyCatalog,
) -> ResponseGuidance {
    let usable: Vec<&DetectedBehaviorPattern> =
        patterns.iter().filter(|p| p.is_well_formed()).collect();
    if usable.is_empty() {
        return ResponseGuidance::standard();
    }

    let mut ranked = usable.clone();
    ranked.sort_by(|a, b| {
        catalog
            .priority_rank(b.ai_response_needed)
            .cmp(&catalog.priority_rank(a.ai_response_needed))
            .then_with(|| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal))
    });

    let primary = ranked[0];
    let primary_strategy = catalog.strategy_for(primary.ai_response_needed).cloned();

    let mut tone_adjustments = Vec::new();
    let mut content_priorities = Vec::new();
    let mut immediate_actions = Vec::new();
    for pattern in &usable {
        let Some(strategy) = catalog.strategy_for(pattern.ai_response_needed) else {
            debug!(
                concept = %pattern.concept,
                behavior = %pattern.behavior,
                "pattern has no catalog entry, skipping"
            );
            continue;
        };
        push_unique(&mut tone_adjustments, &strategy.tone);
        for adjustment in &strategy.content_adjustments {
            push_unique(&mut content_priorities, adjustment);
        }
        for action in &strategy.followup_actions {
            push_unique(&mut immediate_actions, action);
        }
    }

    let interaction_approach = Some(
        primary_strategy
            .as_ref()
            .map(|s| s.approach.clone())
            .unwrap_or_else(|| STANDARD_APPROACH.into()),
    );
    let avoid_patterns = primary_strategy
        .as_ref()
        .filter(|s| s.priority_level == PriorityLevel::Urgent)
        .map(|_| ESCALATION_AVOID.iter().map(|s| s.to_string()).collect());

    ResponseGuidance {
        primary_strategy,
        tone_adjustments,
        content_priorities,
        immediate_actions,
        interaction_approach,
        avoid_patterns,
    }
}

/// Order-preserving set insert: keep the first occurrence, drop repeats.
fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}
