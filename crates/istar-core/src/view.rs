//! Render view
//!
//! A flat, serializable snapshot of a boundary subtree for the drawing
//! layer: every intention with its fill colour and label overlay icon,
//! every link with its endpoints as name paths.

use crate::boundary::BoundaryKind;
use crate::error::LookupError;
use crate::evaluation::JudgmentState;
use crate::intention::{IntentionKind, Role};
use crate::label::Label;
use crate::link::{ContributionType, LinkKind};
use crate::model::GoalModel;
use crate::types::{BoundaryId, Endpoint, IntentionId};
use serde::Serialize;

/// One boundary in the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundaryView {
    /// Full name path
    pub path: String,
    /// Model or actor
    pub kind: BoundaryKind,
}

/// One intention in the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    /// Handle
    pub id: IntentionId,
    /// Full name path
    pub path: String,
    /// Variant
    pub kind: IntentionKind,
    /// Structural role
    pub role: Option<Role>,
    /// Current label
    pub label: Option<Label>,
    /// Softgoal judgment state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judgment: Option<JudgmentState>,
    /// Flagged for human judgment
    pub needs_judgment: bool,
    /// Fill colour keyed by role
    pub fill_color: &'static str,
    /// Overlay icon keyed by label
    pub icon: Option<&'static str>,
}

/// One link in the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    /// Discriminant
    pub kind: LinkKind,
    /// Begin path; the dependee for dependencies
    pub from: String,
    /// End path; the depender for dependencies
    pub to: String,
    /// Contribution strength
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution: Option<ContributionType>,
    /// Dependum path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependum: Option<String>,
}

/// Labeled snapshot of a boundary subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelView {
    /// Boundaries, parents before children
    pub boundaries: Vec<BoundaryView>,
    /// Intentions
    pub nodes: Vec<NodeView>,
    /// Links
    pub links: Vec<LinkView>,
}

impl ModelView {
    /// Snapshot the whole model
    #[must_use]
    pub fn of(model: &GoalModel) -> Self {
        Self::collect(model, model.root())
    }

    /// Snapshot `boundary` and everything nested in it
    pub fn of_boundary(model: &GoalModel, boundary: BoundaryId) -> Result<Self, LookupError> {
        model.boundary_checked(boundary)?;
        Ok(Self::collect(model, boundary))
    }

    fn collect(model: &GoalModel, top: BoundaryId) -> Self {
        let mut scope = Vec::new();
        pre_order(model, top, &mut scope);
        let mut view = Self {
            boundaries: Vec::new(),
            nodes: Vec::new(),
            links: Vec::new(),
        };
        for b in scope {
            let boundary = &model.boundaries[b.0];
            view.boundaries.push(BoundaryView {
                path: model.boundary_path(b),
                kind: boundary.kind,
            });
            for id in &boundary.intentions {
                let intention = &model.intentions[id.0];
                view.nodes.push(NodeView {
                    id: *id,
                    path: model.path_of(*id),
                    kind: intention.kind,
                    role: intention.role,
                    label: intention.label,
                    judgment: intention.judgment_state(),
                    needs_judgment: intention.judgment_needed,
                    fill_color: Role::fill_color(intention.role),
                    icon: intention.label.map(Label::icon),
                });
            }
            for link_id in &boundary.links {
                let link = &model.links[link_id.0];
                view.links.push(LinkView {
                    kind: link.kind(),
                    from: endpoint_path(model, link.begin),
                    to: endpoint_path(model, link.end),
                    contribution: link.contribution(),
                    dependum: link.dependum().map(|d| model.path_of(d)),
                });
            }
        }
        view
    }

    /// Node at `path`, if present
    #[must_use]
    pub fn node(&self, path: &str) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.path == path)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn pre_order(model: &GoalModel, boundary: BoundaryId, order: &mut Vec<BoundaryId>) {
    order.push(boundary);
    for child in &model.boundaries[boundary.0].children {
        pre_order(model, *child, order);
    }
}

fn endpoint_path(model: &GoalModel, endpoint: Endpoint) -> String {
    match endpoint {
        Endpoint::Actor(b) => model.boundary_path(b),
        Endpoint::Intention(i) => model.path_of(i),
    }
}
