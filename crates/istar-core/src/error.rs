//! Error types for goal models
//!
//! Provides error handling for:
//! - Malformed model assembly (construction errors)
//! - Addressing elements that do not exist (lookup errors)
//! - Runaway propagation (evaluation errors)
//! - Configuration loading
//!
//! Construction and lookup errors are fail-fast: every check runs before
//! the model is touched, so an `Err` never leaves a partial mutation
//! behind. A softgoal that needs a human judgment is not an error; it is
//! reported through [`crate::evaluation::EvaluationReport`].

use crate::intention::IntentionKind;
use crate::link::LinkKind;

/// Main error type
#[derive(Debug, thiserror::Error)]
pub enum IstarError {
    /// Model assembly failed
    #[error("construction failed: {0}")]
    Construction(#[from] ConstructionError),

    /// Addressed element does not exist
    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Propagation did not finish
    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Model assembly errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    /// Link endpoint has the wrong intention kind
    #[error("{link} link cannot {side} at {name} ({found}); expected {expected}")]
    WrongKind {
        /// Link being built
        link: LinkKind,
        /// `"start"` or `"end"`
        side: &'static str,
        /// Offending intention
        name: String,
        /// Kind of the offending intention
        found: IntentionKind,
        /// Accepted kinds, human readable
        expected: &'static str,
    },

    /// Contribution type string not in the closed set
    #[error("unknown contribution type {0:?}")]
    UnknownContributionType(String),

    /// Label string not in the lattice
    #[error("unknown label {0:?}; expected one of the six lattice labels")]
    UnknownLabel(String),

    /// Depender already has its one incoming dependency
    #[error("{0} already has an incoming dependency")]
    DuplicateDependency(String),

    /// No dependency link carries the dependum
    #[error("no dependency found for dependum {0}")]
    DependencyNotFound(String),

    /// Refinement without dependee and depender
    #[error("refining {0} needs a dependee or a depender")]
    EmptyRefinement(String),

    /// Link would close a propagation cycle
    #[error("link from {from} to {to} would create a propagation cycle")]
    WouldCreateCycle {
        /// Begin of the rejected link
        from: String,
        /// End of the rejected link
        to: String,
    },

    /// Link from an intention to itself
    #[error("{0} cannot be linked to itself")]
    SelfLoop(String),

    /// Second element with the same name in one boundary
    #[error("{name} already exists in {boundary}")]
    DuplicateName {
        /// Rejected name
        name: String,
        /// Boundary already holding it
        boundary: String,
    },

    /// Boundary kind not valid at this position
    #[error("{0} is not an actor")]
    NotAnActor(String),

    /// A handle passed to a constructor is not part of the model
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Addressing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No element at the path
    #[error("no element at path {0:?}")]
    PathNotFound(String),

    /// Handle does not belong to this model
    #[error("unknown {0} handle")]
    StaleHandle(&'static str),

    /// Judgments only apply to softgoals
    #[error("{name} is a {found}; judgments apply to softgoals only")]
    NotASoftGoal {
        /// Addressed intention
        name: String,
        /// Its kind
        found: IntentionKind,
    },
}

/// Propagation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// More intention visits than the configured budget
    #[error("propagation exceeded {budget} visits in {boundary}")]
    VisitBudgetExhausted {
        /// Boundary being evaluated
        boundary: String,
        /// Configured maximum
        budget: usize,
    },
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// Requested file
        path: String,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for the config schema
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_error_converts() {
        let err: IstarError = ConstructionError::SelfLoop("Quick".into()).into();
        assert!(matches!(err, IstarError::Construction(_)));
        assert_eq!(
            err.to_string(),
            "construction failed: Quick cannot be linked to itself"
        );
    }

    #[test]
    fn wrong_kind_message_names_both_kinds() {
        let err = ConstructionError::WrongKind {
            link: LinkKind::MeansEnd,
            side: "end",
            name: "Agree".into(),
            found: IntentionKind::Task,
            expected: "a goal",
        };
        assert_eq!(
            err.to_string(),
            "means-end link cannot end at Agree (task); expected a goal"
        );
    }
}
