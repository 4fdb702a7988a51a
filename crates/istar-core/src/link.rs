//! Typed links between intentions
//!
//! Four link types connect intentions:
//! - **Decomposition**: any intention refines a task (AND at the task)
//! - **Means-end**: a task is a means to a goal
//! - **Contribution**: any intention contributes to a softgoal with a
//!   typed strength ([`ContributionType`])
//! - **Dependency**: a depender relies on a dependee for a dependum
//!
//! Only contribution links transform a label on the way; decomposition and
//! means-end pass it unchanged, dependencies copy it.

use crate::error::ConstructionError;
use crate::label::Label;
use crate::types::{BoundaryId, Endpoint, IntentionId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Link discriminant, used in diagnostics and views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    /// Task decomposition
    Decomposition,
    /// Means-end refinement of a goal
    MeansEnd,
    /// Typed contribution to a softgoal
    Contribution,
    /// Cross-actor dependency
    Dependency,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LinkKind::Decomposition => "decomposition",
            LinkKind::MeansEnd => "means-end",
            LinkKind::Contribution => "contribution",
            LinkKind::Dependency => "dependency",
        })
    }
}

/// Strength and polarity of a contribution link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContributionType {
    /// Sufficient positive
    #[serde(rename = "MAKE")]
    Make,
    /// Partial positive
    #[serde(rename = "HELP")]
    Help,
    /// Positive of unknown strength
    #[serde(rename = "SOME+")]
    SomePlus,
    /// Unknown polarity
    #[serde(rename = "UNKNOWN")]
    Unknown,
    /// Negative of unknown strength
    #[serde(rename = "SOME-")]
    SomeMinus,
    /// Partial negative
    #[serde(rename = "HURT")]
    Hurt,
    /// Sufficient negative
    #[serde(rename = "BREAK")]
    Break,
}

impl ContributionType {
    /// Every type, in table column order
    pub const ALL: [ContributionType; 7] = [
        ContributionType::Make,
        ContributionType::Break,
        ContributionType::Help,
        ContributionType::Hurt,
        ContributionType::SomePlus,
        ContributionType::SomeMinus,
        ContributionType::Unknown,
    ];

    /// Canonical spelling
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ContributionType::Make => "MAKE",
            ContributionType::Help => "HELP",
            ContributionType::SomePlus => "SOME+",
            ContributionType::Unknown => "UNKNOWN",
            ContributionType::SomeMinus => "SOME-",
            ContributionType::Hurt => "HURT",
            ContributionType::Break => "BREAK",
        }
    }

    const fn is_positive(self) -> bool {
        matches!(
            self,
            ContributionType::Make | ContributionType::Help | ContributionType::SomePlus
        )
    }
}

impl fmt::Display for ContributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContributionType {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MAKE" => Ok(ContributionType::Make),
            "HELP" => Ok(ContributionType::Help),
            "SOME+" => Ok(ContributionType::SomePlus),
            "UNKNOWN" => Ok(ContributionType::Unknown),
            "SOME-" => Ok(ContributionType::SomeMinus),
            "HURT" => Ok(ContributionType::Hurt),
            "BREAK" => Ok(ContributionType::Break),
            other => Err(ConstructionError::UnknownContributionType(other.to_string())),
        }
    }
}

/// How a `Denied` source crosses a MAKE link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeniedTransfer {
    /// Denied mirrors the partially-denied row (MAKE gives `PartiallyDenied`)
    #[default]
    Softened,
    /// Denied through MAKE stays `Denied`
    Strict,
}

/// Label arriving at a softgoal through a contribution link
#[must_use]
pub fn transfer(source: Label, link: ContributionType, denied: DeniedTransfer) -> Label {
    use ContributionType as C;

    if link == C::Unknown {
        return Label::Unknown;
    }
    match source {
        Label::Conflict => Label::Conflict,
        Label::Unknown => Label::Unknown,
        Label::Satisfied => match link {
            C::Make => Label::Satisfied,
            C::Break => Label::Denied,
            l if l.is_positive() => Label::PartiallySatisfied,
            _ => Label::PartiallyDenied,
        },
        Label::PartiallySatisfied => {
            if link.is_positive() {
                Label::PartiallySatisfied
            } else {
                Label::PartiallyDenied
            }
        }
        Label::Denied if link == C::Make && denied == DeniedTransfer::Strict => Label::Denied,
        Label::PartiallyDenied | Label::Denied => {
            if link.is_positive() {
                Label::PartiallyDenied
            } else {
                Label::PartiallySatisfied
            }
        }
    }
}

/// Link variant with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkType {
    /// Task decomposition
    Decomposition,
    /// Means-end refinement
    MeansEnd,
    /// Contribution with its strength
    Contribution(ContributionType),
    /// Dependency with the exchanged element
    Dependency {
        /// Element exchanged between dependee and depender
        dependum: IntentionId,
    },
}

/// Directed edge stored in the model arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub(crate) link_type: LinkType,
    pub(crate) begin: Endpoint,
    pub(crate) end: Endpoint,
    pub(crate) owner: BoundaryId,
}

impl Link {
    /// Discriminant
    #[must_use]
    pub fn kind(&self) -> LinkKind {
        match self.link_type {
            LinkType::Decomposition => LinkKind::Decomposition,
            LinkType::MeansEnd => LinkKind::MeansEnd,
            LinkType::Contribution(_) => LinkKind::Contribution,
            LinkType::Dependency { .. } => LinkKind::Dependency,
        }
    }

    /// Variant with payload
    #[inline]
    #[must_use]
    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    /// Begin; the dependee for dependencies
    #[inline]
    #[must_use]
    pub fn begin(&self) -> Endpoint {
        self.begin
    }

    /// End; the depender for dependencies
    #[inline]
    #[must_use]
    pub fn end(&self) -> Endpoint {
        self.end
    }

    /// Boundary holding the link
    #[inline]
    #[must_use]
    pub fn owner(&self) -> BoundaryId {
        self.owner
    }

    /// Contribution strength, for contribution links
    #[must_use]
    pub fn contribution(&self) -> Option<ContributionType> {
        match self.link_type {
            LinkType::Contribution(t) => Some(t),
            _ => None,
        }
    }

    /// Dependum, for dependency links
    #[must_use]
    pub fn dependum(&self) -> Option<IntentionId> {
        match self.link_type {
            LinkType::Dependency { dependum } => Some(dependum),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_contribution_types() {
        for t in ContributionType::ALL {
            assert_eq!(t.as_str().parse::<ContributionType>().unwrap(), t);
        }
        assert_eq!(
            "make".parse::<ContributionType>(),
            Err(ConstructionError::UnknownContributionType("make".into()))
        );
    }

    #[test]
    fn unknown_link_swallows_conflict() {
        assert_eq!(
            transfer(Label::Conflict, ContributionType::Unknown, DeniedTransfer::Softened),
            Label::Unknown
        );
        assert_eq!(
            transfer(Label::Conflict, ContributionType::Hurt, DeniedTransfer::Softened),
            Label::Conflict
        );
    }

    #[test]
    fn strict_denied_only_changes_make() {
        for t in ContributionType::ALL {
            let soft = transfer(Label::Denied, t, DeniedTransfer::Softened);
            let strict = transfer(Label::Denied, t, DeniedTransfer::Strict);
            if t == ContributionType::Make {
                assert_eq!(soft, Label::PartiallyDenied);
                assert_eq!(strict, Label::Denied);
            } else {
                assert_eq!(soft, strict);
            }
        }
    }
}
