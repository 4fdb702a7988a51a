//! i* goal model evaluation
//!
//! Builds Strategic Dependency / Strategic Rationale models and propagates
//! satisfaction labels through them:
//! - Typed construction of goals, softgoals, tasks, resources and their links
//! - Leaf / root / depender classification
//! - Forward worklist propagation with per-source label history
//! - Conflict detection on softgoals and human judgment injection
//! - A serializable render view for drawing layers
//!
//! # Example
//!
//! ```rust
//! use istar_core::prelude::*;
//!
//! let mut model = GoalModel::new("SD");
//! let actor = model.add_actor(model.root(), "Initiator").unwrap();
//! let task = model.add_task(actor, "Let Scheduler Schedule Meeting").unwrap();
//! let quick = model.add_soft_goal(actor, "Quick").unwrap();
//! model.add_contribution(task, quick, ContributionType::Help).unwrap();
//!
//! model.find_leaf(model.root()).unwrap();
//! model.set_label(task, Label::Satisfied).unwrap();
//!
//! let report = ForwardEvaluator::default().evaluate(&mut model).unwrap();
//! assert_eq!(model.label_of(quick), Some(Label::PartiallySatisfied));
//! assert!(!report.needs_judgment());
//! ```

pub mod boundary;
pub mod classifier;
pub mod config;
pub mod construction;
pub mod error;
pub mod evaluation;
pub mod intention;
pub mod label;
pub mod link;
pub mod model;
pub mod samples;
pub mod types;
pub mod view;

pub use boundary::{Boundary, BoundaryKind};
pub use config::{Aggregation, EvaluationConfig};
pub use error::{ConfigError, ConstructionError, EvaluationError, IstarError, LookupError};
pub use evaluation::{
    EvaluationReport, ForwardEvaluator, JudgmentRequest, JudgmentState, SourceLabel,
};
pub use intention::{Intention, IntentionKind, Role};
pub use label::{Label, Polarity};
pub use link::{transfer, ContributionType, DeniedTransfer, Link, LinkKind, LinkType};
pub use model::{GoalModel, WILDCARD};
pub use types::{
    BoundaryId, Endpoint, GoalRef, IntentionId, LinkId, ResourceRef, SoftGoalRef, TaskRef,
};
pub use view::ModelView;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building and evaluating models
    pub use crate::{
        Aggregation, BoundaryId, ContributionType, DeniedTransfer, EvaluationConfig,
        EvaluationReport, ForwardEvaluator, GoalModel, IntentionId, IntentionKind, IstarError,
        Label, ModelView, Role,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
