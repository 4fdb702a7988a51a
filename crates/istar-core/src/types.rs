//! Handles into the model arenas
//!
//! Intentions, links and boundaries live in arenas owned by
//! [`crate::GoalModel`]; everything else refers to them by these integer
//! handles. The typed references (`GoalRef`, `TaskRef`, ...) are handed out
//! by the constructors and let link builders reject invalid endpoint kinds
//! at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of an intention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IntentionId(pub(crate) usize);

impl IntentionId {
    /// Arena index
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for IntentionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}", self.0)
    }
}

/// Handle of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkId(pub(crate) usize);

impl LinkId {
    /// Arena index
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of an actor or model boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoundaryId(pub(crate) usize);

impl BoundaryId {
    /// Arena index
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

macro_rules! typed_ref {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) IntentionId);

        impl $name {
            /// Untyped handle
            #[inline]
            #[must_use]
            pub fn id(self) -> IntentionId {
                self.0
            }
        }

        impl From<$name> for IntentionId {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl From<$name> for Endpoint {
            fn from(value: $name) -> Self {
                Endpoint::Intention(value.0)
            }
        }
    };
}

typed_ref!(
    /// Handle known to point at a goal
    GoalRef
);
typed_ref!(
    /// Handle known to point at a softgoal
    SoftGoalRef
);
typed_ref!(
    /// Handle known to point at a task
    TaskRef
);
typed_ref!(
    /// Handle known to point at a resource
    ResourceRef
);

/// Endpoint of a dependency link
///
/// A dependency may be anchored at an actor as a whole before it is refined
/// down to a concrete intention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// The boundary as a whole
    Actor(BoundaryId),
    /// A concrete intention
    Intention(IntentionId),
}

impl Endpoint {
    /// The intention, if the endpoint is not an actor
    #[inline]
    #[must_use]
    pub fn intention(self) -> Option<IntentionId> {
        match self {
            Endpoint::Intention(id) => Some(id),
            Endpoint::Actor(_) => None,
        }
    }
}

impl From<IntentionId> for Endpoint {
    fn from(value: IntentionId) -> Self {
        Endpoint::Intention(value)
    }
}

impl From<BoundaryId> for Endpoint {
    fn from(value: BoundaryId) -> Self {
        Endpoint::Actor(value)
    }
}
