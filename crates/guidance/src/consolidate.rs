//! Pattern consolidation — collapse duplicate observations of the same
//! (concept, behavior) pair into one strengthened record.

use crate::pattern::{DetectedBehaviorPattern, clamp_weight};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// How much a repeat observation strengthens the existing weight.
const REPEAT_WEIGHT_FACTOR: f64 = 0.3;

/// Merge duplicate patterns, keeping first-seen order.
///
/// The first occurrence of a `(concept, behavior)` key is kept as-is;
/// each repeat strengthens it: `weight = min(1.0, weight + incoming * 0.3)`
/// and the incoming evidence is comma-joined onto the existing evidence.
/// All other fields (including `ai_response_needed` and `timestamp`) keep
/// the first occurrence's values.
///
/// Deterministic, and idempotent on its own output: re-consolidating a
/// consolidated list changes nothing, since no duplicate keys remain.
/// Malformed records are dropped rather than raising. Empty in, empty out.
pub fn consolidate(patterns: Vec<DetectedBehaviorPattern>) -> Vec<DetectedBehaviorPattern> {
    let mut order: Vec<String> = Vec::new();
    let mut merged: HashMap<String, DetectedBehaviorPattern> = HashMap::new();

    for pattern in patterns {
        if !pattern.is_well_formed() {
            debug!(
                concept = %pattern.concept,
                behavior = %pattern.behavior,
                "dropping malformed behavior pattern"
            );
            continue;
        }

        match merged.entry(pattern.key()) {
            Entry::Vacant(slot) => {
                order.push(slot.key().clone());
                let mut first = pattern;
                first.weight = clamp_weight(first.weight);
                slot.insert(first);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                existing.weight =
                    (existing.weight + clamp_weight(pattern.weight) * REPEAT_WEIGHT_FACTOR).min(1.0);
                if !pattern.evidence.is_empty() {
                    if existing.evidence.is_empty() {
                        existing.evidence = pattern.evidence;
                    } else {
                        existing.evidence = format!("{}, {}", existing.evidence, pattern.evidence);
                    }
                }
            }
        }
    }

    order.into_iter().filter_map(|k| merged.remove(&k)).collect()
}
