//! Actor and model boundaries
//!
//! A boundary groups intentions and the links local to them. The root of a
//! [`crate::GoalModel`] is a `Model` boundary (a Strategic Dependency
//! model); actors nested under it carry their Strategic Rationale
//! elements. Dependums usually live directly in the model.

use crate::types::{BoundaryId, IntentionId, LinkId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variant of a boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryKind {
    /// Strategic Dependency model
    Model,
    /// Intentional actor
    Actor,
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BoundaryKind::Model => "model",
            BoundaryKind::Actor => "actor",
        })
    }
}

/// Boundary record stored in the model arena
#[derive(Debug, Clone)]
pub struct Boundary {
    pub(crate) name: String,
    pub(crate) kind: BoundaryKind,
    pub(crate) parent: Option<BoundaryId>,
    pub(crate) children: Vec<BoundaryId>,
    pub(crate) intentions: Vec<IntentionId>,
    pub(crate) links: Vec<LinkId>,
}

impl Boundary {
    pub(crate) fn new(
        name: impl Into<String>,
        kind: BoundaryKind,
        parent: Option<BoundaryId>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            parent,
            children: Vec::new(),
            intentions: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Name, unique among its siblings
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variant
    #[inline]
    #[must_use]
    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    /// Enclosing boundary, `None` for the root
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<BoundaryId> {
        self.parent
    }

    /// Nested boundaries in creation order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[BoundaryId] {
        &self.children
    }

    /// Owned intentions in creation order
    #[inline]
    #[must_use]
    pub fn intentions(&self) -> &[IntentionId] {
        &self.intentions
    }

    /// Links held by this boundary
    #[inline]
    #[must_use]
    pub fn links(&self) -> &[LinkId] {
        &self.links
    }
}
