//! Goal model arenas
//!
//! [`GoalModel`] owns every boundary, intention and link; all
//! cross-references are handles into its arenas. This module covers
//! element creation, addressing by name path, seeding labels and manual
//! judgments, and the explicit reset operations. Link construction lives
//! in [`crate::construction`].
//!
//! # Example
//!
//! ```rust
//! use istar_core::prelude::*;
//!
//! let mut model = GoalModel::new("SD-Model");
//! let actor = model.add_actor(model.root(), "Initiator").unwrap();
//! let quick = model.add_soft_goal(actor, "Quick").unwrap();
//! let organize = model.add_task(actor, "Organize Meeting").unwrap();
//! model.add_contribution(organize, quick, ContributionType::Help).unwrap();
//!
//! model.set_label_at("Initiator/Organize Meeting", Label::Satisfied).unwrap();
//! assert_eq!(model.lookup_intention("*/Quick").unwrap(), quick.id());
//! ```

use crate::boundary::{Boundary, BoundaryKind};
use crate::construction::guard::PropagationGuard;
use crate::error::{ConstructionError, LookupError};
use crate::intention::{Intention, IntentionKind, Role};
use crate::label::Label;
use crate::link::Link;
use crate::types::{BoundaryId, GoalRef, IntentionId, LinkId, ResourceRef, SoftGoalRef, TaskRef};

/// Segment matching any number of nested boundaries in a path
pub const WILDCARD: &str = "*";

/// Arena-backed i* model
#[derive(Debug, Clone)]
pub struct GoalModel {
    pub(crate) boundaries: Vec<Boundary>,
    pub(crate) intentions: Vec<Intention>,
    pub(crate) links: Vec<Link>,
    pub(crate) guard: PropagationGuard,
}

impl GoalModel {
    /// Create a model whose root is a Strategic Dependency boundary
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            boundaries: vec![Boundary::new(name, BoundaryKind::Model, None)],
            intentions: Vec::new(),
            links: Vec::new(),
            guard: PropagationGuard::default(),
        }
    }

    /// Root boundary
    #[inline]
    #[must_use]
    pub fn root(&self) -> BoundaryId {
        BoundaryId(0)
    }

    /// Number of intentions
    #[inline]
    #[must_use]
    pub fn intention_count(&self) -> usize {
        self.intentions.len()
    }

    /// Number of links
    #[inline]
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Get an intention
    #[must_use]
    pub fn intention(&self, id: IntentionId) -> Option<&Intention> {
        self.intentions.get(id.0)
    }

    /// Get a link
    #[must_use]
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.0)
    }

    /// Get a boundary
    #[must_use]
    pub fn boundary(&self, id: BoundaryId) -> Option<&Boundary> {
        self.boundaries.get(id.0)
    }

    /// All intention handles in creation order
    pub fn intention_ids(&self) -> impl Iterator<Item = IntentionId> + '_ {
        (0..self.intentions.len()).map(IntentionId)
    }

    /// All link handles in creation order
    pub fn link_ids(&self) -> impl Iterator<Item = LinkId> + '_ {
        (0..self.links.len()).map(LinkId)
    }

    /// Current label of an intention
    #[must_use]
    pub fn label_of(&self, id: impl Into<IntentionId>) -> Option<Label> {
        self.intention(id.into()).and_then(Intention::label)
    }

    /// Add an actor under `parent`
    pub fn add_actor(
        &mut self,
        parent: BoundaryId,
        name: impl Into<String>,
    ) -> Result<BoundaryId, ConstructionError> {
        self.add_boundary(parent, name.into(), BoundaryKind::Actor)
    }

    /// Add a nested model under `parent`
    pub fn add_model(
        &mut self,
        parent: BoundaryId,
        name: impl Into<String>,
    ) -> Result<BoundaryId, ConstructionError> {
        self.add_boundary(parent, name.into(), BoundaryKind::Model)
    }

    fn add_boundary(
        &mut self,
        parent: BoundaryId,
        name: String,
        kind: BoundaryKind,
    ) -> Result<BoundaryId, ConstructionError> {
        self.check_free_name(parent, &name)?;
        let id = BoundaryId(self.boundaries.len());
        self.boundaries.push(Boundary::new(name, kind, Some(parent)));
        self.boundaries[parent.0].children.push(id);
        Ok(id)
    }

    /// Add a goal
    pub fn add_goal(
        &mut self,
        boundary: BoundaryId,
        name: impl Into<String>,
    ) -> Result<GoalRef, ConstructionError> {
        self.add_intention(boundary, name.into(), IntentionKind::Goal)
            .map(GoalRef)
    }

    /// Add a softgoal
    pub fn add_soft_goal(
        &mut self,
        boundary: BoundaryId,
        name: impl Into<String>,
    ) -> Result<SoftGoalRef, ConstructionError> {
        self.add_intention(boundary, name.into(), IntentionKind::SoftGoal)
            .map(SoftGoalRef)
    }

    /// Add a task
    pub fn add_task(
        &mut self,
        boundary: BoundaryId,
        name: impl Into<String>,
    ) -> Result<TaskRef, ConstructionError> {
        self.add_intention(boundary, name.into(), IntentionKind::Task)
            .map(TaskRef)
    }

    /// Add a resource
    pub fn add_resource(
        &mut self,
        boundary: BoundaryId,
        name: impl Into<String>,
    ) -> Result<ResourceRef, ConstructionError> {
        self.add_intention(boundary, name.into(), IntentionKind::Resource)
            .map(ResourceRef)
    }

    /// Add an intention of a kind chosen at runtime
    pub fn add_intention(
        &mut self,
        boundary: BoundaryId,
        name: String,
        kind: IntentionKind,
    ) -> Result<IntentionId, ConstructionError> {
        self.check_free_name(boundary, &name)?;
        let id = IntentionId(self.intentions.len());
        self.intentions.push(Intention::new(name, kind, boundary));
        self.boundaries[boundary.0].intentions.push(id);
        self.guard.add_node(id);
        Ok(id)
    }

    fn check_free_name(&self, boundary: BoundaryId, name: &str) -> Result<(), ConstructionError> {
        let b = self.boundary_checked(boundary)?;
        let taken = b.intentions.iter().any(|i| self.intentions[i.0].name == name)
            || b.children.iter().any(|c| self.boundaries[c.0].name == name);
        if taken {
            return Err(ConstructionError::DuplicateName {
                name: name.to_string(),
                boundary: b.name.clone(),
            });
        }
        Ok(())
    }

    /// Narrow a handle to a goal
    #[must_use]
    pub fn as_goal(&self, id: IntentionId) -> Option<GoalRef> {
        self.kind_of(id, IntentionKind::Goal).map(GoalRef)
    }

    /// Narrow a handle to a softgoal
    #[must_use]
    pub fn as_soft_goal(&self, id: IntentionId) -> Option<SoftGoalRef> {
        self.kind_of(id, IntentionKind::SoftGoal).map(SoftGoalRef)
    }

    /// Narrow a handle to a task
    #[must_use]
    pub fn as_task(&self, id: IntentionId) -> Option<TaskRef> {
        self.kind_of(id, IntentionKind::Task).map(TaskRef)
    }

    /// Narrow a handle to a resource
    #[must_use]
    pub fn as_resource(&self, id: IntentionId) -> Option<ResourceRef> {
        self.kind_of(id, IntentionKind::Resource).map(ResourceRef)
    }

    fn kind_of(&self, id: IntentionId, kind: IntentionKind) -> Option<IntentionId> {
        self.intention(id).filter(|i| i.kind == kind).map(|_| id)
    }

    pub(crate) fn intention_checked(&self, id: IntentionId) -> Result<&Intention, LookupError> {
        self.intentions
            .get(id.0)
            .ok_or(LookupError::StaleHandle("intention"))
    }

    pub(crate) fn boundary_checked(&self, id: BoundaryId) -> Result<&Boundary, LookupError> {
        self.boundaries
            .get(id.0)
            .ok_or(LookupError::StaleHandle("boundary"))
    }

    /// Resolve a name path to an intention
    ///
    /// Segments are separated by `/`. The root name may be omitted and
    /// [`WILDCARD`] matches any depth of nested boundaries, so
    /// `"*/Low Effort"` finds the first `Low Effort` in creation order.
    pub fn lookup_intention(&self, path: &str) -> Result<IntentionId, LookupError> {
        let segments = split_path(path);
        self.from_root(&segments, |b, segs| self.resolve_intention(b, segs))
            .ok_or_else(|| LookupError::PathNotFound(path.to_string()))
    }

    /// Resolve a name path to a boundary
    pub fn lookup_boundary(&self, path: &str) -> Result<BoundaryId, LookupError> {
        let segments = split_path(path);
        if segments.is_empty() || segments == [self.boundaries[0].name.as_str()] {
            return Ok(self.root());
        }
        self.from_root(&segments, |b, segs| self.resolve_boundary(b, segs))
            .ok_or_else(|| LookupError::PathNotFound(path.to_string()))
    }

    fn from_root<T>(
        &self,
        segments: &[&str],
        resolve: impl Fn(BoundaryId, &[&str]) -> Option<T>,
    ) -> Option<T> {
        let root = self.root();
        if segments.is_empty() {
            return None;
        }
        if segments.len() > 1 && segments[0] == self.boundaries[root.0].name {
            if let Some(found) = resolve(root, &segments[1..]) {
                return Some(found);
            }
        }
        resolve(root, segments)
    }

    fn resolve_intention(&self, boundary: BoundaryId, segments: &[&str]) -> Option<IntentionId> {
        let b = &self.boundaries[boundary.0];
        match segments {
            [] => None,
            [name] if *name != WILDCARD => b
                .intentions
                .iter()
                .copied()
                .find(|i| self.intentions[i.0].name == *name),
            [first, rest @ ..] if *first == WILDCARD => self
                .resolve_intention(boundary, rest)
                .or_else(|| {
                    b.children
                        .iter()
                        .find_map(|c| self.resolve_intention(*c, segments))
                }),
            [first, rest @ ..] => self
                .child_named(boundary, first)
                .and_then(|c| self.resolve_intention(c, rest)),
        }
    }

    fn resolve_boundary(&self, boundary: BoundaryId, segments: &[&str]) -> Option<BoundaryId> {
        let b = &self.boundaries[boundary.0];
        match segments {
            [] => Some(boundary),
            [first, rest @ ..] if *first == WILDCARD => self
                .resolve_boundary(boundary, rest)
                .filter(|_| !rest.is_empty())
                .or_else(|| {
                    b.children
                        .iter()
                        .find_map(|c| self.resolve_boundary(*c, segments))
                }),
            [first, rest @ ..] => self
                .child_named(boundary, first)
                .and_then(|c| self.resolve_boundary(c, rest)),
        }
    }

    fn child_named(&self, boundary: BoundaryId, name: &str) -> Option<BoundaryId> {
        self.boundaries[boundary.0]
            .children
            .iter()
            .copied()
            .find(|c| self.boundaries[c.0].name == name)
    }

    /// Full name path of an intention, root first
    #[must_use]
    pub fn path_of(&self, id: IntentionId) -> String {
        match self.intention(id) {
            Some(intention) => {
                format!("{}/{}", self.boundary_path(intention.boundary), intention.name)
            }
            None => id.to_string(),
        }
    }

    /// Full name path of a boundary, root first
    #[must_use]
    pub fn boundary_path(&self, id: BoundaryId) -> String {
        let mut parts = Vec::new();
        let mut cursor = self.boundary(id).map(|_| id);
        while let Some(b) = cursor {
            let boundary = &self.boundaries[b.0];
            parts.push(boundary.name.as_str());
            cursor = boundary.parent;
        }
        parts.reverse();
        parts.join("/")
    }

    /// Seed an intention: sets both its input and its current label
    pub fn set_label(
        &mut self,
        id: impl Into<IntentionId>,
        label: Label,
    ) -> Result<(), LookupError> {
        let id = id.into();
        self.intention_checked(id)?;
        let intention = &mut self.intentions[id.0];
        intention.seed = Some(label);
        intention.label = Some(label);
        tracing::debug!("Seeded {} with {}", intention.name, label);
        Ok(())
    }

    /// Seed the intention at `path`
    pub fn set_label_at(&mut self, path: &str, label: Label) -> Result<(), LookupError> {
        let id = self.lookup_intention(path)?;
        self.set_label(id, label)
    }

    /// Seed several intentions; nothing is applied if any path fails
    pub fn set_labels<'a>(
        &mut self,
        labels: impl IntoIterator<Item = (&'a str, Label)>,
    ) -> Result<(), LookupError> {
        let resolved = labels
            .into_iter()
            .map(|(path, label)| self.lookup_intention(path).map(|id| (id, label)))
            .collect::<Result<Vec<_>, _>>()?;
        for (id, label) in resolved {
            self.set_label(id, label)?;
        }
        Ok(())
    }

    /// Record a manual judgment on a softgoal
    ///
    /// The judgment becomes the label immediately and sticks across later
    /// passes until [`GoalModel::clear_judgment`] removes it.
    pub fn make_judgment(
        &mut self,
        id: impl Into<IntentionId>,
        label: Label,
    ) -> Result<(), LookupError> {
        let id = id.into();
        let intention = self.intention_checked(id)?;
        if intention.kind != IntentionKind::SoftGoal {
            return Err(LookupError::NotASoftGoal {
                name: intention.name.clone(),
                found: intention.kind,
            });
        }
        let intention = &mut self.intentions[id.0];
        intention.judgment = Some(label);
        intention.label = Some(label);
        intention.judgment_needed = false;
        tracing::info!("Judgment on {}: {}", intention.name, label);
        Ok(())
    }

    /// Judge the softgoal at `path`
    pub fn make_judgment_at(&mut self, path: &str, label: Label) -> Result<(), LookupError> {
        let id = self.lookup_intention(path)?;
        self.make_judgment(id, label)
    }

    /// Judge several softgoals; nothing is applied if any entry fails
    pub fn make_judgments<'a>(
        &mut self,
        judgments: impl IntoIterator<Item = (&'a str, Label)>,
    ) -> Result<(), LookupError> {
        let resolved = judgments
            .into_iter()
            .map(|(path, label)| {
                let id = self.lookup_intention(path)?;
                let intention = &self.intentions[id.0];
                if intention.kind == IntentionKind::SoftGoal {
                    Ok((id, label))
                } else {
                    Err(LookupError::NotASoftGoal {
                        name: intention.name.clone(),
                        found: intention.kind,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (id, label) in resolved {
            self.make_judgment(id, label)?;
        }
        Ok(())
    }

    /// Remove a manual judgment; the label stays until the next pass
    pub fn clear_judgment(&mut self, id: impl Into<IntentionId>) -> Result<(), LookupError> {
        let id = id.into();
        self.intention_checked(id)?;
        self.intentions[id.0].judgment = None;
        Ok(())
    }

    /// Reset labels, seeds, flags and delivery history below `boundary`
    ///
    /// Manual judgments survive; a judged softgoal keeps its judgment as
    /// label.
    pub fn clear_labels(&mut self, boundary: BoundaryId) -> Result<(), LookupError> {
        for b in self.subtree(boundary)? {
            for i in self.boundaries[b.0].intentions.clone() {
                self.intentions[i.0].clear_label();
            }
        }
        Ok(())
    }

    /// Drop leaf and root tags below `boundary`; depender tags stay
    pub fn clear_roles(&mut self, boundary: BoundaryId) -> Result<(), LookupError> {
        for b in self.subtree(boundary)? {
            for i in self.boundaries[b.0].intentions.clone() {
                let intention = &mut self.intentions[i.0];
                if intention.role != Some(Role::Depender) {
                    intention.role = None;
                }
            }
        }
        Ok(())
    }

    /// Boundaries below and including `boundary`, children before parents
    pub fn subtree(&self, boundary: BoundaryId) -> Result<Vec<BoundaryId>, LookupError> {
        self.boundary_checked(boundary)?;
        let mut order = Vec::new();
        self.post_order(boundary, &mut order);
        Ok(order)
    }

    fn post_order(&self, boundary: BoundaryId, order: &mut Vec<BoundaryId>) {
        for child in &self.boundaries[boundary.0].children {
            self.post_order(*child, order);
        }
        order.push(boundary);
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
