//! Intentional elements
//!
//! Goals, softgoals, tasks and resources share one record type; the
//! [`IntentionKind`] tag decides how incoming labels are aggregated. Each
//! intention keeps the last label delivered by every upstream source, and
//! its current label is always recomputed from that history.

use crate::label::Label;
use crate::types::{BoundaryId, IntentionId, LinkId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variant of an intention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntentionKind {
    /// Hard goal
    Goal,
    /// Softgoal without clear-cut satisfaction criteria
    SoftGoal,
    /// Task
    Task,
    /// Resource
    Resource,
}

impl fmt::Display for IntentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntentionKind::Goal => "goal",
            IntentionKind::SoftGoal => "softgoal",
            IntentionKind::Task => "task",
            IntentionKind::Resource => "resource",
        })
    }
}

/// Structural role assigned by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Nothing flows into it; evaluation starts here
    Leaf,
    /// Nothing flows out of it
    Root,
    /// Receives its value through a dependency
    Depender,
}

impl Role {
    /// Fill colour used by the drawing layer
    #[must_use]
    pub const fn fill_color(role: Option<Role>) -> &'static str {
        match role {
            Some(Role::Root) => "lightblue",
            Some(Role::Leaf) => "green",
            Some(Role::Depender) => "yellow",
            None => "white",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Leaf => "leaf",
            Role::Root => "root",
            Role::Depender => "depender",
        })
    }
}

/// Intention record stored in the model arena
#[derive(Debug, Clone)]
pub struct Intention {
    pub(crate) name: String,
    pub(crate) kind: IntentionKind,
    pub(crate) boundary: BoundaryId,
    pub(crate) role: Option<Role>,
    pub(crate) label: Option<Label>,
    pub(crate) seed: Option<Label>,
    pub(crate) judgment: Option<Label>,
    pub(crate) judgment_needed: bool,
    pub(crate) incoming: IndexMap<IntentionId, Label>,
    pub(crate) contribution_to: Vec<LinkId>,
    pub(crate) contribution_from: Vec<LinkId>,
    pub(crate) decomposition_to: Vec<LinkId>,
    pub(crate) decomposition_from: Vec<LinkId>,
    pub(crate) dependency_from: Option<LinkId>,
    pub(crate) dependencies_to: Vec<LinkId>,
}

impl Intention {
    pub(crate) fn new(name: impl Into<String>, kind: IntentionKind, boundary: BoundaryId) -> Self {
        Self {
            name: name.into(),
            kind,
            boundary,
            role: None,
            label: None,
            seed: None,
            judgment: None,
            judgment_needed: false,
            incoming: IndexMap::new(),
            contribution_to: Vec::new(),
            contribution_from: Vec::new(),
            decomposition_to: Vec::new(),
            decomposition_from: Vec::new(),
            dependency_from: None,
            dependencies_to: Vec::new(),
        }
    }

    /// Name, unique within the owning boundary
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variant
    #[inline]
    #[must_use]
    pub fn kind(&self) -> IntentionKind {
        self.kind
    }

    /// Owning boundary
    #[inline]
    #[must_use]
    pub fn boundary(&self) -> BoundaryId {
        self.boundary
    }

    /// Structural role tag
    #[inline]
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Current label
    #[inline]
    #[must_use]
    pub fn label(&self) -> Option<Label> {
        self.label
    }

    /// Externally supplied seed label
    #[inline]
    #[must_use]
    pub fn seed(&self) -> Option<Label> {
        self.seed
    }

    /// Manual judgment, softgoals only
    #[inline]
    #[must_use]
    pub fn judgment(&self) -> Option<Label> {
        self.judgment
    }

    /// Whether the last pass left this softgoal for a human to decide
    #[inline]
    #[must_use]
    pub fn needs_judgment(&self) -> bool {
        self.judgment_needed
    }

    /// Last label delivered by each upstream source, in delivery order
    #[inline]
    #[must_use]
    pub fn incoming(&self) -> &IndexMap<IntentionId, Label> {
        &self.incoming
    }

    /// Outgoing contribution links
    #[must_use]
    pub fn contributions_to(&self) -> &[LinkId] {
        &self.contribution_to
    }

    /// Incoming contribution links
    #[must_use]
    pub fn contributions_from(&self) -> &[LinkId] {
        &self.contribution_from
    }

    /// Outgoing decomposition and means-end links
    #[must_use]
    pub fn decompositions_to(&self) -> &[LinkId] {
        &self.decomposition_to
    }

    /// Incoming decomposition and means-end links
    #[must_use]
    pub fn decompositions_from(&self) -> &[LinkId] {
        &self.decomposition_from
    }

    /// The single incoming dependency
    #[must_use]
    pub fn dependency_from(&self) -> Option<LinkId> {
        self.dependency_from
    }

    /// Dependencies this intention is the dependee of
    #[must_use]
    pub fn dependencies_to(&self) -> &[LinkId] {
        &self.dependencies_to
    }

    pub(crate) fn is_leaf_shaped(&self) -> bool {
        self.contribution_from.is_empty()
            && self.decomposition_from.is_empty()
            && self.dependency_from.is_none()
    }

    pub(crate) fn is_root_shaped(&self) -> bool {
        self.contribution_to.is_empty()
            && self.decomposition_to.is_empty()
            && self.dependencies_to.is_empty()
    }

    pub(crate) fn clear_label(&mut self) {
        self.label = self.judgment;
        self.seed = None;
        self.judgment_needed = false;
        self.incoming.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_intention_is_leaf_and_root_shaped() {
        let i = Intention::new("Quick", IntentionKind::SoftGoal, BoundaryId(0));
        assert!(i.is_leaf_shaped());
        assert!(i.is_root_shaped());
        assert_eq!(i.role(), None);
        assert!(i.incoming().is_empty());
    }

    #[test]
    fn clear_label_keeps_judgment() {
        let mut i = Intention::new("Quick", IntentionKind::SoftGoal, BoundaryId(0));
        i.seed = Some(Label::Denied);
        i.judgment = Some(Label::PartiallySatisfied);
        i.label = Some(Label::Unknown);
        i.judgment_needed = true;
        i.incoming.insert(IntentionId(3), Label::Unknown);

        i.clear_label();

        assert_eq!(i.label(), Some(Label::PartiallySatisfied));
        assert_eq!(i.seed(), None);
        assert!(!i.needs_judgment());
        assert!(i.incoming().is_empty());
    }

    #[test]
    fn fill_colors_follow_role() {
        assert_eq!(Role::fill_color(Some(Role::Leaf)), "green");
        assert_eq!(Role::fill_color(None), "white");
    }
}
