//! Evaluation report

use crate::label::Label;
use crate::types::IntentionId;
use serde::Serialize;
use std::fmt;

/// One delivery recorded at a flagged softgoal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLabel {
    /// Upstream intention
    pub source: IntentionId,
    /// Its full name path
    pub path: String,
    /// Last label it delivered
    pub label: Label,
}

/// A softgoal left for a human to decide
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JudgmentRequest {
    /// Flagged softgoal
    pub intention: IntentionId,
    /// Its full name path
    pub path: String,
    /// Deliveries in arrival order
    pub sources: Vec<SourceLabel>,
}

impl fmt::Display for JudgmentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} needs a judgment:", self.path)?;
        for source in &self.sources {
            write!(f, " [{} -> {}]", source.path, source.label)?;
        }
        Ok(())
    }
}

/// Result of a forward evaluation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationReport {
    /// Boundaries evaluated
    pub boundaries: usize,
    /// Intention visits across all passes
    pub visits: usize,
    /// Softgoals awaiting judgment, in boundary evaluation order
    pub judgments: Vec<JudgmentRequest>,
}

impl EvaluationReport {
    /// Whether any softgoal awaits judgment
    #[inline]
    #[must_use]
    pub fn needs_judgment(&self) -> bool {
        !self.judgments.is_empty()
    }

    /// Paths of the softgoals awaiting judgment
    pub fn pending_paths(&self) -> impl Iterator<Item = &str> {
        self.judgments.iter().map(|j| j.path.as_str())
    }
}
