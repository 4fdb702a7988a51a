//! Softgoal conflict detection and manual judgment

use istar_core::prelude::*;
use istar_core::JudgmentState;
use istar_test_utils::{evaluate_with, softgoal_with_sources, strict_config};
use pretty_assertions::assert_eq;

#[test]
fn mixed_polarity_requests_judgment() {
    let (mut model, soft, sources) = softgoal_with_sources(&[Label::Satisfied, Label::Denied]);
    let report = evaluate_with(&mut model, strict_config());

    assert_eq!(model.label_of(soft), Some(Label::Unknown));
    assert_eq!(report.judgments.len(), 1);
    let request = &report.judgments[0];
    assert_eq!(request.intention, soft.id());
    assert_eq!(request.path, "SD/A/Target");
    let delivered: Vec<(IntentionId, Label)> =
        request.sources.iter().map(|s| (s.source, s.label)).collect();
    assert_eq!(
        delivered,
        vec![(sources[0].id(), Label::Satisfied), (sources[1].id(), Label::Denied)]
    );
}

#[test]
fn agreeing_partials_saturate() {
    let (mut model, soft, _) =
        softgoal_with_sources(&[Label::PartiallySatisfied, Label::PartiallySatisfied]);
    let report = evaluate_with(&mut model, strict_config());
    assert_eq!(model.label_of(soft), Some(Label::Satisfied));
    assert!(!report.needs_judgment());
}

#[test]
fn full_evidence_switch_flags_partials() {
    let (mut model, soft, _) =
        softgoal_with_sources(&[Label::PartiallySatisfied, Label::PartiallySatisfied]);
    let report = evaluate_with(&mut model, strict_config().with_full_evidence(true));
    assert_eq!(model.label_of(soft), Some(Label::Unknown));
    assert!(report.needs_judgment());
}

#[test]
fn unknown_among_several_needs_judgment() {
    let (mut model, soft, _) = softgoal_with_sources(&[Label::Satisfied, Label::Unknown]);
    evaluate_with(&mut model, strict_config());
    let intention = model.intention(soft.id()).unwrap();
    assert_eq!(intention.label(), Some(Label::Unknown));
    assert_eq!(intention.judgment_state(), Some(JudgmentState::NeedsJudgment));
}

#[test]
fn judgment_sticks_across_passes() {
    let (mut model, soft, _) = softgoal_with_sources(&[Label::Satisfied, Label::Denied]);
    evaluate_with(&mut model, strict_config());
    model.make_judgment(soft, Label::Conflict).unwrap();

    for _ in 0..2 {
        let report = evaluate_with(&mut model, strict_config());
        assert!(!report.needs_judgment());
        assert_eq!(model.label_of(soft), Some(Label::Conflict));
    }
    let intention = model.intention(soft.id()).unwrap();
    assert_eq!(intention.judgment_state(), Some(JudgmentState::Judged));
    assert_eq!(intention.incoming().len(), 2);
}

#[test]
fn judgment_survives_clear_labels() {
    let (mut model, soft, _) = softgoal_with_sources(&[Label::Satisfied, Label::Denied]);
    model.make_judgment(soft, Label::PartiallySatisfied).unwrap();
    model.clear_labels(model.root()).unwrap();
    assert_eq!(model.label_of(soft), Some(Label::PartiallySatisfied));

    model.clear_judgment(soft).unwrap();
    model.clear_labels(model.root()).unwrap();
    let report = evaluate_with(&mut model, strict_config());
    assert_eq!(model.label_of(soft), None);
    assert!(!report.needs_judgment());
}

#[test]
fn disagreeing_seed_requests_judgment() {
    let (mut model, soft, _) = softgoal_with_sources(&[Label::Satisfied]);
    model.set_label(soft, Label::Denied).unwrap();
    let report = evaluate_with(&mut model, strict_config());
    assert_eq!(model.label_of(soft), Some(Label::Unknown));
    assert!(report.needs_judgment());
}

#[test]
fn judgment_rejected_on_hard_goal() {
    let mut model = GoalModel::new("SD");
    let actor = model.add_actor(model.root(), "A").unwrap();
    let goal = model.add_goal(actor, "Hard").unwrap();
    assert!(model.make_judgment(goal, Label::Satisfied).is_err());
    assert_eq!(model.label_of(goal), None);
}

#[test]
fn root_softgoal_keeps_flag_raised_by_actor_pass() {
    let mut model = GoalModel::new("SD");
    let actor = model.add_actor(model.root(), "B").unwrap();
    let shared = model.add_soft_goal(model.root(), "Shared").unwrap();
    let make = model.add_task(actor, "Make").unwrap();
    let spoil = model.add_task(actor, "Spoil").unwrap();
    model.add_contribution(make, shared, ContributionType::Make).unwrap();
    model.add_contribution(spoil, shared, ContributionType::Break).unwrap();
    model.set_label(make, Label::Satisfied).unwrap();
    model.set_label(spoil, Label::Satisfied).unwrap();

    let report = evaluate_with(&mut model, strict_config());
    let intention = model.intention(shared.id()).unwrap();
    assert_eq!(intention.label(), Some(Label::Unknown));
    assert_eq!(intention.judgment_state(), Some(JudgmentState::NeedsJudgment));
    assert_eq!(report.pending_paths().collect::<Vec<_>>(), ["SD/Shared"]);
}

#[test]
fn cross_actor_softgoal_is_reported() {
    let mut model = GoalModel::new("SD");
    let a = model.add_actor(model.root(), "A").unwrap();
    let b = model.add_actor(model.root(), "B").unwrap();
    let target = model.add_soft_goal(a, "Target").unwrap();
    let up = model.add_task(b, "Up").unwrap();
    let down = model.add_task(b, "Down").unwrap();
    model.add_contribution(up, target, ContributionType::Make).unwrap();
    model.add_contribution(down, target, ContributionType::Make).unwrap();
    model.set_label(up, Label::Satisfied).unwrap();
    model.set_label(down, Label::Denied).unwrap();

    let report = evaluate_with(&mut model, strict_config());
    assert_eq!(model.label_of(target), Some(Label::Unknown));
    assert_eq!(report.judgments.len(), 1);
    assert_eq!(report.judgments[0].intention, target.id());
    assert_eq!(report.judgments[0].path, "SD/A/Target");
    assert_eq!(report.judgments[0].sources.len(), 2);
}
