//! Forward evaluation
//!
//! Labels flow from leaves and dependers along contribution, decomposition
//! and means-end links until every reachable intention has settled:
//!
//! - [`ForwardEvaluator`]: boundary passes, children before parents
//! - `aggregate`: how each intention kind combines its deliveries
//! - [`softgoal`]: conflict detection and judgment requests
//! - [`EvaluationReport`]: visit counts and the softgoals left to judge
//!
//! The human-in-the-loop workflow is: evaluate, inspect
//! [`EvaluationReport::judgments`], record judgments with
//! [`GoalModel::make_judgment`](crate::model::GoalModel::make_judgment),
//! evaluate again.

pub(crate) mod aggregate;
mod engine;
mod report;
pub mod softgoal;

pub use engine::ForwardEvaluator;
pub use report::{EvaluationReport, JudgmentRequest, SourceLabel};
pub use softgoal::{JudgmentState, Resolution};
