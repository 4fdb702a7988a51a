//! Satisfaction labels
//!
//! The six-point lattice every intention is evaluated on. The order is
//! fixed and all comparisons go through [`Label::rank`]:
//!
//! `Satisfied(6) > PartiallySatisfied(5) > Conflict(4) > Unknown(3) >
//! PartiallyDenied(2) > Denied(1)`
//!
//! An unset label is modelled as `Option<Label>::None`.

use crate::error::ConstructionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Satisfaction label of an intention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Fully satisfied
    Satisfied,
    /// Partially satisfied
    PartiallySatisfied,
    /// Contradicting evidence
    Conflict,
    /// No usable evidence
    Unknown,
    /// Partially denied
    PartiallyDenied,
    /// Fully denied
    Denied,
}

/// Direction of the evidence carried by a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// `Satisfied` or `PartiallySatisfied`
    Positive,
    /// `PartiallyDenied` or `Denied`
    Negative,
    /// `Conflict` or `Unknown`
    Neutral,
}

impl Label {
    /// Every label, strongest first
    pub const ALL: [Label; 6] = [
        Label::Satisfied,
        Label::PartiallySatisfied,
        Label::Conflict,
        Label::Unknown,
        Label::PartiallyDenied,
        Label::Denied,
    ];

    /// Fixed rank in the lattice (1 = weakest, 6 = strongest)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Label::Satisfied => 6,
            Label::PartiallySatisfied => 5,
            Label::Conflict => 4,
            Label::Unknown => 3,
            Label::PartiallyDenied => 2,
            Label::Denied => 1,
        }
    }

    /// The stronger of two labels
    #[inline]
    #[must_use]
    pub fn strongest(self, other: Label) -> Label {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// The weaker of two labels
    #[inline]
    #[must_use]
    pub fn weakest(self, other: Label) -> Label {
        if other.rank() < self.rank() {
            other
        } else {
            self
        }
    }

    /// Polarity of the evidence
    #[inline]
    #[must_use]
    pub const fn polarity(self) -> Polarity {
        match self {
            Label::Satisfied | Label::PartiallySatisfied => Polarity::Positive,
            Label::PartiallyDenied | Label::Denied => Polarity::Negative,
            Label::Conflict | Label::Unknown => Polarity::Neutral,
        }
    }

    /// `Satisfied` or `Denied`
    #[inline]
    #[must_use]
    pub const fn is_full(self) -> bool {
        matches!(self, Label::Satisfied | Label::Denied)
    }

    /// `Conflict` or `Unknown`
    #[inline]
    #[must_use]
    pub const fn is_indeterminate(self) -> bool {
        matches!(self, Label::Conflict | Label::Unknown)
    }

    /// Human-readable name as used in models and reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Label::Satisfied => "Satisfied",
            Label::PartiallySatisfied => "Partially Satisfied",
            Label::Conflict => "Conflict",
            Label::Unknown => "Unknown",
            Label::PartiallyDenied => "Partially Denied",
            Label::Denied => "Denied",
        }
    }

    /// Key of the overlay icon the drawing layer puts on a labeled node
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Label::Satisfied => "sL",
            Label::PartiallySatisfied => "psL",
            Label::Conflict => "cL",
            Label::Unknown => "uL",
            Label::PartiallyDenied => "pdL",
            Label::Denied => "dL",
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Satisfied" => Ok(Label::Satisfied),
            "Partially Satisfied" | "PartiallySatisfied" => Ok(Label::PartiallySatisfied),
            "Conflict" => Ok(Label::Conflict),
            "Unknown" => Ok(Label::Unknown),
            "Partially Denied" | "PartiallyDenied" => Ok(Label::PartiallyDenied),
            "Denied" => Ok(Label::Denied),
            other => Err(ConstructionError::UnknownLabel(other.to_string())),
        }
    }
}
