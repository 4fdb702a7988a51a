//! Evaluation configuration
//!
//! Knobs for the places where the propagation rules admit more than one
//! reading. Defaults follow the documented rule set; every field can be
//! overridden from TOML:
//!
//! ```toml
//! goal_aggregation = "strongest"
//! task_aggregation = "weakest"
//! denied_transfer = "strict"
//! require_full_evidence = true
//! max_visits = 50000
//! ```

use crate::error::ConfigError;
use crate::label::Label;
pub use crate::link::DeniedTransfer;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a goal or task combines the labels delivered to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Aggregation {
    /// AND: the weakest delivery wins
    #[default]
    Weakest,
    /// OR: the strongest delivery wins
    Strongest,
}

impl Aggregation {
    /// Combine two labels
    #[inline]
    #[must_use]
    pub fn combine(self, a: Label, b: Label) -> Label {
        match self {
            Aggregation::Weakest => a.weakest(b),
            Aggregation::Strongest => a.strongest(b),
        }
    }

    /// Combine a bag of labels, `None` when empty
    pub fn fold(self, labels: impl IntoIterator<Item = Label>) -> Option<Label> {
        labels.into_iter().reduce(|a, b| self.combine(a, b))
    }
}

/// Forward evaluation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Goal aggregation
    pub goal_aggregation: Aggregation,
    /// Task aggregation
    pub task_aggregation: Aggregation,
    /// Denied row of the contribution table
    pub denied_transfer: DeniedTransfer,
    /// Softgoals auto-resolve a bag of one polarity only when it contains
    /// the full label (`Satisfied` or `Denied`)
    pub require_full_evidence: bool,
    /// Upper bound on intention visits per boundary pass
    pub max_visits: usize,
}

impl EvaluationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With goal aggregation
    #[inline]
    #[must_use]
    pub fn with_goal_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.goal_aggregation = aggregation;
        self
    }

    /// With task aggregation
    #[inline]
    #[must_use]
    pub fn with_task_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.task_aggregation = aggregation;
        self
    }

    /// With denied transfer row
    #[inline]
    #[must_use]
    pub fn with_denied_transfer(mut self, denied: DeniedTransfer) -> Self {
        self.denied_transfer = denied;
        self
    }

    /// With full-evidence requirement for softgoals
    #[inline]
    #[must_use]
    pub fn with_full_evidence(mut self, required: bool) -> Self {
        self.require_full_evidence = required;
        self
    }

    /// With visit budget
    #[inline]
    #[must_use]
    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = max_visits;
        self
    }

    /// Parse from TOML; missing fields take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            goal_aggregation: Aggregation::Weakest,
            task_aggregation: Aggregation::Weakest,
            denied_transfer: DeniedTransfer::Softened,
            require_full_evidence: false,
            max_visits: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            EvaluationConfig::from_toml_str("").unwrap(),
            EvaluationConfig::default()
        );
    }

    #[test]
    fn partial_toml_overrides() {
        let config = EvaluationConfig::from_toml_str(
            "goal_aggregation = \"strongest\"\ndenied_transfer = \"strict\"\n",
        )
        .unwrap();
        assert_eq!(config.goal_aggregation, Aggregation::Strongest);
        assert_eq!(config.task_aggregation, Aggregation::Weakest);
        assert_eq!(config.denied_transfer, DeniedTransfer::Strict);
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(matches!(
            EvaluationConfig::from_toml_str("max_steps = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "require_full_evidence = true").unwrap();
        writeln!(file, "max_visits = 10").unwrap();

        let config = EvaluationConfig::from_file(file.path()).unwrap();
        assert!(config.require_full_evidence);
        assert_eq!(config.max_visits, 10);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            EvaluationConfig::from_file("/definitely/not/here.toml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn fold_directions() {
        let bag = [Label::PartiallySatisfied, Label::Denied, Label::Conflict];
        assert_eq!(Aggregation::Weakest.fold(bag), Some(Label::Denied));
        assert_eq!(Aggregation::Strongest.fold(bag), Some(Label::PartiallySatisfied));
        assert_eq!(Aggregation::Weakest.fold([]), None);
    }
}
