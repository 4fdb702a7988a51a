//! Per-kind aggregation of delivered labels
//!
//! - Goal, Task: fold the per-source map in the configured direction
//! - Resource: passthrough, deliveries are ignored
//! - SoftGoal: see [`super::softgoal`]
//!
//! The per-source map is the only input; the current label is recomputed
//! from it on every delivery, so re-deliveries from the same source
//! replace rather than accumulate.

use super::softgoal;
use crate::config::{Aggregation, EvaluationConfig};
use crate::intention::{Intention, IntentionKind};
use crate::label::Label;
use crate::types::IntentionId;

/// A named label arriving at an intention
pub(crate) type Delivery = (IntentionId, Label);

/// Apply a delivery, or a bare re-trigger when `None`
pub(crate) fn receive(
    intention: &mut Intention,
    delivery: Option<Delivery>,
    config: &EvaluationConfig,
) {
    match intention.kind {
        IntentionKind::Resource => {}
        IntentionKind::Goal => fold_hard(intention, delivery, config.goal_aggregation),
        IntentionKind::Task => fold_hard(intention, delivery, config.task_aggregation),
        IntentionKind::SoftGoal => resolve_soft(intention, delivery, config.require_full_evidence),
    }
}

fn fold_hard(intention: &mut Intention, delivery: Option<Delivery>, direction: Aggregation) {
    if let Some((source, label)) = delivery {
        intention.incoming.insert(source, label);
    }
    if let Some(label) = direction.fold(intention.incoming.values().copied()) {
        intention.label = Some(label);
    }
}

fn resolve_soft(
    intention: &mut Intention,
    delivery: Option<Delivery>,
    require_full_evidence: bool,
) {
    if let Some((source, label)) = delivery {
        intention.incoming.insert(source, label);
    }
    if let Some(judgment) = intention.judgment {
        intention.label = Some(judgment);
        intention.judgment_needed = false;
        return;
    }
    let labels: Vec<Label> = intention.incoming.values().copied().collect();
    if let Some(resolution) = softgoal::resolve(&labels, intention.seed, require_full_evidence) {
        intention.label = Some(resolution.label);
        intention.judgment_needed = resolution.needs_judgment;
    }
}
