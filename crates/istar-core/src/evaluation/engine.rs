//! Worklist propagation
//!
//! Each boundary pass classifies leaves, then drains one FIFO queue per
//! start intention. A visit re-aggregates the target from its per-source
//! map and, when the label differs from what the target last pushed
//! downstream, enqueues a delivery for every outgoing contribution,
//! decomposition and means-end link. Start intentions always push.
//! Dependums get a direct copy of the dependee's label and are not
//! enqueued.
//!
//! Judgment flags are reset once per run over the evaluated subtree and
//! collected from every intention the run reached, so deliveries across
//! boundaries are reported too.

use super::aggregate::{self, Delivery};
use super::report::{EvaluationReport, JudgmentRequest, SourceLabel};
use crate::config::EvaluationConfig;
use crate::error::{EvaluationError, IstarError};
use crate::intention::Role;
use crate::label::Label;
use crate::link::transfer;
use crate::model::GoalModel;
use crate::types::{BoundaryId, IntentionId};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone, Copy)]
struct Visit {
    target: IntentionId,
    delivery: Option<Delivery>,
}

/// Propagation state shared by the passes of one run
#[derive(Debug, Default)]
struct Run {
    visits: usize,
    pass_visits: usize,
    /// Last label each reached intention pushed downstream
    pushed: BTreeMap<IntentionId, Option<Label>>,
}

/// Forward label propagation over a [`GoalModel`]
#[derive(Debug, Clone, Default)]
pub struct ForwardEvaluator {
    config: EvaluationConfig,
}

impl ForwardEvaluator {
    /// Create an evaluator
    #[inline]
    #[must_use]
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Evaluate the whole model
    pub fn evaluate(&self, model: &mut GoalModel) -> Result<EvaluationReport, IstarError> {
        let root = model.root();
        self.evaluate_boundary(model, root)
    }

    /// Evaluate `boundary` and everything nested in it, children first
    pub fn evaluate_boundary(
        &self,
        model: &mut GoalModel,
        boundary: BoundaryId,
    ) -> Result<EvaluationReport, IstarError> {
        let subtree = model.subtree(boundary)?;
        let members: Vec<IntentionId> = subtree
            .iter()
            .flat_map(|b| model.boundaries[b.0].intentions.iter().copied())
            .collect();
        for id in members {
            model.intentions[id.0].judgment_needed = false;
        }

        let mut run = Run::default();
        for b in &subtree {
            self.pass(model, *b, &mut run)?;
        }

        let judgments: Vec<JudgmentRequest> = run
            .pushed
            .keys()
            .filter(|id| model.intentions[id.0].judgment_needed)
            .map(|id| judgment_request(model, *id))
            .collect();
        for request in &judgments {
            tracing::warn!("{}", request);
        }
        tracing::info!(
            "Evaluated {}: {} boundaries, {} visits, {} judgments needed",
            model.boundaries[boundary.0].name,
            subtree.len(),
            run.visits,
            judgments.len()
        );

        Ok(EvaluationReport {
            boundaries: subtree.len(),
            visits: run.visits,
            judgments,
        })
    }

    /// Run the start procedure for a single intention
    ///
    /// The seed (if any) becomes the label, a depender pulls its value
    /// through its dependency, and the result is propagated downstream.
    /// Returns the number of visits.
    pub fn compute(
        &self,
        model: &mut GoalModel,
        id: impl Into<IntentionId>,
    ) -> Result<usize, IstarError> {
        let id = id.into();
        let boundary = model.intention_checked(id)?.boundary;
        let mut run = Run::default();
        self.start(model, id, boundary, &mut run)?;
        Ok(run.visits)
    }

    /// Deliver `label` from `source` to `target` and propagate
    pub fn deliver(
        &self,
        model: &mut GoalModel,
        target: impl Into<IntentionId>,
        source: impl Into<IntentionId>,
        label: Label,
    ) -> Result<usize, IstarError> {
        let (target, source) = (target.into(), source.into());
        model.intention_checked(source)?;
        let boundary = model.intention_checked(target)?.boundary;
        let mut run = Run::default();
        let visit = Visit {
            target,
            delivery: Some((source, label)),
        };
        self.drain(model, visit, boundary, &mut run)?;
        Ok(run.visits)
    }

    fn pass(
        &self,
        model: &mut GoalModel,
        boundary: BoundaryId,
        run: &mut Run,
    ) -> Result<(), EvaluationError> {
        model.find_leaf_local(boundary);
        let starts: Vec<IntentionId> = model.boundaries[boundary.0]
            .intentions
            .iter()
            .copied()
            .filter(|id| {
                matches!(
                    model.intentions[id.0].role,
                    Some(Role::Leaf | Role::Depender)
                )
            })
            .collect();

        run.pass_visits = 0;
        for id in &starts {
            self.start(model, *id, boundary, run)?;
        }
        tracing::debug!(
            "Pass over {}: {} start nodes, {} visits",
            model.boundaries[boundary.0].name,
            starts.len(),
            run.pass_visits
        );
        Ok(())
    }

    fn start(
        &self,
        model: &mut GoalModel,
        id: IntentionId,
        boundary: BoundaryId,
        run: &mut Run,
    ) -> Result<(), EvaluationError> {
        let intention = &mut model.intentions[id.0];
        if let Some(seed) = intention.seed {
            intention.label = Some(seed);
        }
        let delivery = if intention.role == Some(Role::Depender) {
            match depender_value(model, id) {
                Some(delivery) => Some(delivery),
                None => {
                    tracing::debug!("No value yet for depender {}", model.intentions[id.0].name);
                    return Ok(());
                }
            }
        } else {
            None
        };
        self.drain(model, Visit { target: id, delivery }, boundary, run)
    }

    fn drain(
        &self,
        model: &mut GoalModel,
        first: Visit,
        boundary: BoundaryId,
        run: &mut Run,
    ) -> Result<(), EvaluationError> {
        let mut queue = VecDeque::from([first]);
        let mut force = true;
        while let Some(visit) = queue.pop_front() {
            if run.pass_visits >= self.config.max_visits {
                return Err(EvaluationError::VisitBudgetExhausted {
                    boundary: model.boundaries[boundary.0].name.clone(),
                    budget: self.config.max_visits,
                });
            }
            run.visits += 1;
            run.pass_visits += 1;
            self.visit(model, visit, force, run, &mut queue);
            force = false;
        }
        Ok(())
    }

    fn visit(
        &self,
        model: &mut GoalModel,
        visit: Visit,
        force: bool,
        run: &mut Run,
        queue: &mut VecDeque<Visit>,
    ) {
        let target = visit.target;
        aggregate::receive(&mut model.intentions[target.0], visit.delivery, &self.config);
        if let Some((source, label)) = visit.delivery {
            tracing::debug!(
                "{} -> {}: delivered {}, now {:?}",
                model.intentions[source.0].name,
                model.intentions[target.0].name,
                label,
                model.intentions[target.0].label
            );
        }

        let intention = &model.intentions[target.0];
        let label = intention.label;
        let previous = run.pushed.insert(target, label);
        if !force && previous == Some(label) {
            return;
        }
        for link_id in &intention.contribution_to {
            let link = &model.links[link_id.0];
            if let (Some(end), Some(kind)) = (link.end.intention(), link.contribution()) {
                let denied = self.config.denied_transfer;
                queue.push_back(Visit {
                    target: end,
                    delivery: label.map(|l| (target, transfer(l, kind, denied))),
                });
            }
        }
        for link_id in &intention.decomposition_to {
            if let Some(end) = model.links[link_id.0].end.intention() {
                queue.push_back(Visit {
                    target: end,
                    delivery: label.map(|l| (target, l)),
                });
            }
        }

        let Some(label) = label else { return };
        let dependums: Vec<IntentionId> = intention
            .dependencies_to
            .iter()
            .filter_map(|link_id| model.links[link_id.0].dependum())
            .collect();
        for dependum in dependums {
            let dependum = &mut model.intentions[dependum.0];
            if dependum.judgment.is_none() {
                dependum.label = Some(label);
            }
        }
    }
}

/// Value a depender pulls through its dependency link
///
/// Dependum label, dependum seed, dependee label, dependee seed; the
/// delivery is named by whichever element supplied it.
fn depender_value(model: &GoalModel, id: IntentionId) -> Option<Delivery> {
    let link = &model.links[model.intentions[id.0].dependency_from?.0];
    let dependum = link.dependum()?;
    let d = &model.intentions[dependum.0];
    if let Some(label) = d.label.or(d.seed) {
        return Some((dependum, label));
    }
    let dependee = link.begin.intention()?;
    let b = &model.intentions[dependee.0];
    b.label.or(b.seed).map(|label| (dependee, label))
}

fn judgment_request(model: &GoalModel, id: IntentionId) -> JudgmentRequest {
    let sources = model.intentions[id.0]
        .incoming
        .iter()
        .map(|(source, label)| SourceLabel {
            source: *source,
            path: model.path_of(*source),
            label: *label,
        })
        .collect();
    JudgmentRequest {
        intention: id,
        path: model.path_of(id),
        sources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::ContributionType;

    #[test]
    fn decomposed_task_takes_weakest() {
        let mut model = GoalModel::new("SD");
        let actor = model.add_actor(model.root(), "A").unwrap();
        let a = model.add_goal(actor, "A goal").unwrap();
        let b = model.add_goal(actor, "B goal").unwrap();
        let t = model.add_task(actor, "T").unwrap();
        model.add_decomposition(a, t).unwrap();
        model.add_decomposition(b, t).unwrap();
        model.set_label(a, Label::Satisfied).unwrap();
        model.set_label(b, Label::Denied).unwrap();

        ForwardEvaluator::default().evaluate(&mut model).unwrap();
        assert_eq!(model.label_of(t), Some(Label::Denied));
    }

    #[test]
    fn unlabeled_sender_still_retriggers() {
        let mut model = GoalModel::new("SD");
        let actor = model.add_actor(model.root(), "A").unwrap();
        let source = model.add_task(actor, "Source").unwrap();
        let soft = model.add_soft_goal(actor, "Soft").unwrap();
        let sink = model.add_soft_goal(actor, "Sink").unwrap();
        model.add_contribution(source, soft, ContributionType::Help).unwrap();
        model.add_contribution(soft, sink, ContributionType::Make).unwrap();
        model.set_label(soft, Label::PartiallyDenied).unwrap();

        let report = ForwardEvaluator::default().evaluate(&mut model).unwrap();
        assert_eq!(model.label_of(soft), Some(Label::PartiallyDenied));
        assert_eq!(model.label_of(sink), Some(Label::PartiallyDenied));
        assert_eq!(report.visits, 3);
    }

    #[test]
    fn visit_budget_is_enforced() {
        let mut model = GoalModel::new("SD");
        let actor = model.add_actor(model.root(), "A").unwrap();
        let a = model.add_task(actor, "A").unwrap();
        let b = model.add_task(actor, "B").unwrap();
        model.add_decomposition(a, b).unwrap();

        let evaluator = ForwardEvaluator::new(EvaluationConfig::default().with_max_visits(1));
        let err = evaluator.evaluate(&mut model).unwrap_err();
        assert!(matches!(
            err,
            IstarError::Evaluation(EvaluationError::VisitBudgetExhausted { budget: 1, .. })
        ));
    }

    #[test]
    fn diamond_chain_visits_stay_linear() {
        let mut model = GoalModel::new("SD");
        let actor = model.add_actor(model.root(), "A").unwrap();
        let first = model.add_task(actor, "T0").unwrap();
        let mut top = first;
        for k in 0..18 {
            let left = model.add_task(actor, format!("L{k}")).unwrap();
            let right = model.add_task(actor, format!("R{k}")).unwrap();
            let bottom = model.add_task(actor, format!("T{}", k + 1)).unwrap();
            model.add_decomposition(top, left).unwrap();
            model.add_decomposition(top, right).unwrap();
            model.add_decomposition(left, bottom).unwrap();
            model.add_decomposition(right, bottom).unwrap();
            top = bottom;
        }
        model.set_label(first, Label::Satisfied).unwrap();
        assert_eq!(model.intention_count(), 55);

        let report = ForwardEvaluator::default().evaluate(&mut model).unwrap();
        // each join is reached twice, the second delivery changes nothing
        assert_eq!(report.visits, 1 + 18 * 4);
        assert_eq!(model.label_of(top), Some(Label::Satisfied));
    }

    #[test]
    fn unchanged_label_stops_propagation() {
        let mut model = GoalModel::new("SD");
        let actor = model.add_actor(model.root(), "A").unwrap();
        let a = model.add_goal(actor, "A").unwrap();
        let b = model.add_goal(actor, "B").unwrap();
        let join = model.add_task(actor, "Join").unwrap();
        let tail = model.add_task(actor, "Tail").unwrap();
        model.add_decomposition(a, join).unwrap();
        model.add_decomposition(b, join).unwrap();
        model.add_decomposition(join, tail).unwrap();
        model.set_label(a, Label::Denied).unwrap();
        model.set_label(b, Label::Satisfied).unwrap();

        let report = ForwardEvaluator::default().evaluate(&mut model).unwrap();
        assert_eq!(model.label_of(tail), Some(Label::Denied));
        // a, join, tail, then b and a join that stays Denied
        assert_eq!(report.visits, 5);
    }

    #[test]
    fn depender_falls_back_to_dependee_label() {
        let mut model = GoalModel::new("SD");
        let a = model.add_actor(model.root(), "A").unwrap();
        let b = model.add_actor(model.root(), "B").unwrap();
        let dependee = model.add_task(a, "Provide").unwrap();
        let depender = model.add_goal(b, "Need").unwrap();
        let dependum = model.add_resource(model.root(), "Thing").unwrap();
        model.add_dependency(dependee, depender, dependum).unwrap();
        model.set_label(dependee, Label::PartiallySatisfied).unwrap();
        let evaluator = ForwardEvaluator::default();
        evaluator.compute(&mut model, depender).unwrap();
        assert_eq!(model.label_of(depender), Some(Label::PartiallySatisfied));
        let incoming = model.intention(depender.id()).unwrap().incoming();
        assert_eq!(incoming.get(&dependee.id()), Some(&Label::PartiallySatisfied));
    }
}
