//! Softgoal judgment resolution
//!
//! A softgoal has no crisp satisfaction criterion, so several deliveries
//! are only combined automatically when they agree in polarity. Every other
//! bag resolves to `Unknown` and asks for a human judgment.

use crate::intention::{Intention, IntentionKind};
use crate::label::{Label, Polarity};
use serde::Serialize;

/// Where a softgoal stands after the last pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum JudgmentState {
    /// Nothing delivered yet
    NoEvidence,
    /// Label derived from the deliveries
    AutoResolved,
    /// Deliveries disagree; a judgment is required
    NeedsJudgment,
    /// A manual judgment overrides the deliveries
    Judged,
}

/// Outcome of resolving a bag of deliveries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Label to assign
    pub label: Label,
    /// Whether the caller must be asked for a judgment
    pub needs_judgment: bool,
}

impl Resolution {
    fn resolved(label: Label) -> Self {
        Self {
            label,
            needs_judgment: false,
        }
    }

    fn undecided() -> Self {
        Self {
            label: Label::Unknown,
            needs_judgment: true,
        }
    }
}

/// Resolve the labels delivered to a softgoal
///
/// Returns `None` for an empty bag. With `require_full_evidence`, a bag of
/// one polarity resolves only if it contains the full label of that
/// polarity. A seed that disagrees with the result turns it into a
/// judgment request.
#[must_use]
pub fn resolve(
    labels: &[Label],
    seed: Option<Label>,
    require_full_evidence: bool,
) -> Option<Resolution> {
    let resolution = match labels {
        [] => return None,
        [only] => Resolution::resolved(*only),
        _ => combine(labels, require_full_evidence),
    };
    match seed {
        Some(seed) if seed != resolution.label => Some(Resolution::undecided()),
        _ => Some(resolution),
    }
}

fn combine(labels: &[Label], require_full_evidence: bool) -> Resolution {
    if labels.iter().any(|l| l.is_indeterminate()) {
        return Resolution::undecided();
    }
    let positive = labels.iter().any(|l| l.polarity() == Polarity::Positive);
    let negative = labels.iter().any(|l| l.polarity() == Polarity::Negative);
    let full = match (positive, negative) {
        (true, false) => Label::Satisfied,
        (false, true) => Label::Denied,
        _ => return Resolution::undecided(),
    };
    if require_full_evidence && !labels.contains(&full) {
        return Resolution::undecided();
    }
    Resolution::resolved(full)
}

impl Intention {
    /// Judgment state, for softgoals
    #[must_use]
    pub fn judgment_state(&self) -> Option<JudgmentState> {
        if self.kind != IntentionKind::SoftGoal {
            return None;
        }
        Some(if self.judgment.is_some() {
            JudgmentState::Judged
        } else if self.judgment_needed {
            JudgmentState::NeedsJudgment
        } else if self.incoming.is_empty() {
            JudgmentState::NoEvidence
        } else {
            JudgmentState::AutoResolved
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Label::*;

    fn run(labels: &[Label]) -> Resolution {
        resolve(labels, None, false).unwrap()
    }

    #[test]
    fn single_delivery_is_verbatim() {
        for label in Label::ALL {
            assert_eq!(run(&[label]), Resolution::resolved(label));
        }
    }

    #[test]
    fn agreeing_polarity_saturates() {
        assert_eq!(run(&[PartiallySatisfied, PartiallySatisfied]).label, Satisfied);
        assert_eq!(run(&[Denied, PartiallyDenied]).label, Denied);
    }

    #[test]
    fn mixed_or_indeterminate_needs_judgment() {
        assert_eq!(run(&[Satisfied, Denied]), Resolution::undecided());
        assert_eq!(run(&[Satisfied, Unknown]), Resolution::undecided());
        assert_eq!(run(&[Conflict, Conflict]), Resolution::undecided());
    }

    #[test]
    fn full_evidence_rule() {
        let strict = |labels: &[Label]| resolve(labels, None, true).unwrap();
        assert!(strict(&[PartiallySatisfied, PartiallySatisfied]).needs_judgment);
        assert_eq!(strict(&[Satisfied, PartiallySatisfied]).label, Satisfied);
        assert_eq!(strict(&[PartiallyDenied, Denied]).label, Denied);
    }

    #[test]
    fn disagreeing_seed_needs_judgment() {
        assert!(resolve(&[Satisfied], Some(Denied), false).unwrap().needs_judgment);
        assert_eq!(
            resolve(&[Satisfied], Some(Satisfied), false),
            Some(Resolution::resolved(Satisfied))
        );
    }

    #[test]
    fn empty_bag_is_no_resolution() {
        assert_eq!(resolve(&[], Some(Satisfied), false), None);
    }
}
