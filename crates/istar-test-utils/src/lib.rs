//! Testing utilities for the i* workspace
//!
//! Small models seeded for one scenario each, plus evaluation shorthands.

#![allow(missing_docs)]

use istar_core::{
    BoundaryId, ContributionType, DeniedTransfer, EvaluationConfig, EvaluationReport,
    ForwardEvaluator, GoalModel, GoalRef, IntentionId, Label, ResourceRef, SoftGoalRef, TaskRef,
};

/// Model with one actor `A` under root `SD`
pub fn single_actor() -> (GoalModel, BoundaryId) {
    let mut model = GoalModel::new("SD");
    let actor = model.add_actor(model.root(), "A").unwrap();
    (model, actor)
}

/// Two seeded goals decomposing one task
pub fn decomposition_fixture(first: Label, second: Label) -> (GoalModel, TaskRef) {
    let (mut model, actor) = single_actor();
    let a = model.add_goal(actor, "First").unwrap();
    let b = model.add_goal(actor, "Second").unwrap();
    let task = model.add_task(actor, "Task").unwrap();
    model.add_decomposition(a, task).unwrap();
    model.add_decomposition(b, task).unwrap();
    model.set_label(a, first).unwrap();
    model.set_label(b, second).unwrap();
    (model, task)
}

/// One seeded task contributing to one softgoal
pub fn contribution_fixture(source: Label, link: ContributionType) -> (GoalModel, SoftGoalRef) {
    let (mut model, actor) = single_actor();
    let task = model.add_task(actor, "Source").unwrap();
    let soft = model.add_soft_goal(actor, "Target").unwrap();
    model.add_contribution(task, soft, link).unwrap();
    model.set_label(task, source).unwrap();
    (model, soft)
}

/// A softgoal receiving one MAKE contribution per label
///
/// Evaluate with [`strict_config`] so every label arrives unchanged.
pub fn softgoal_with_sources(labels: &[Label]) -> (GoalModel, SoftGoalRef, Vec<TaskRef>) {
    let (mut model, actor) = single_actor();
    let soft = model.add_soft_goal(actor, "Target").unwrap();
    let mut sources = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let task = model.add_task(actor, format!("Source {i}")).unwrap();
        model.add_contribution(task, soft, ContributionType::Make).unwrap();
        model.set_label(task, *label).unwrap();
        sources.push(task);
    }
    (model, soft, sources)
}

pub struct DependencyFixture {
    pub model: GoalModel,
    pub dependee: TaskRef,
    pub depender: GoalRef,
    pub dependum: ResourceRef,
}

/// `Provider/Provide` gives the resource `Thing` to `Consumer/Need`
pub fn dependency_fixture() -> DependencyFixture {
    let mut model = GoalModel::new("SD");
    let provider = model.add_actor(model.root(), "Provider").unwrap();
    let consumer = model.add_actor(model.root(), "Consumer").unwrap();
    let dependee = model.add_task(provider, "Provide").unwrap();
    let depender = model.add_goal(consumer, "Need").unwrap();
    let dependum = model.add_resource(model.root(), "Thing").unwrap();
    model.add_dependency(dependee, depender, dependum).unwrap();
    DependencyFixture {
        model,
        dependee,
        depender,
        dependum,
    }
}

/// Contribution transfer with exact MAKE passthrough
pub fn strict_config() -> EvaluationConfig {
    EvaluationConfig::default().with_denied_transfer(DeniedTransfer::Strict)
}

/// Evaluate the whole model with the default configuration
pub fn evaluate(model: &mut GoalModel) -> EvaluationReport {
    ForwardEvaluator::default().evaluate(model).unwrap()
}

/// Evaluate the whole model with `config`
pub fn evaluate_with(model: &mut GoalModel, config: EvaluationConfig) -> EvaluationReport {
    ForwardEvaluator::new(config).evaluate(model).unwrap()
}

/// Label of the intention at `path`
pub fn label_at(model: &GoalModel, path: &str) -> Option<Label> {
    let id: IntentionId = model.lookup_intention(path).unwrap();
    model.label_of(id)
}
