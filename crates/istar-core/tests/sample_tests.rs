//! Meeting scheduler workflow: seed, propagate, judge, propagate

use istar_core::prelude::*;
use istar_core::samples::{self, JUDGMENTS, SEEDS};
use istar_test_utils::label_at;
use pretty_assertions::assert_eq;
use std::io::Write;

fn seeded() -> GoalModel {
    let mut model = samples::meeting_scheduler().unwrap();
    let root = model.root();
    model.find_leaf(root).unwrap();
    model.find_root(root).unwrap();
    model.set_labels(SEEDS).unwrap();
    model
}

#[test]
fn first_pass_flags_participant_softgoals() {
    let mut model = seeded();
    let report = ForwardEvaluator::default().evaluate(&mut model).unwrap();

    let pending: Vec<&str> = report.pending_paths().collect();
    assert_eq!(
        pending,
        [
            "SD-Model of Meeting Scheduler/Meeting Participant/Richer Medium",
            "SD-Model of Meeting Scheduler/Meeting Participant/User Friendly",
        ]
    );
    assert_eq!(report.boundaries, 4);
    assert_eq!(label_at(&model, "Meeting Participant/User Friendly"), Some(Label::Unknown));
}

#[test]
fn judgments_clear_requests() {
    let mut model = seeded();
    let evaluator = ForwardEvaluator::default();
    evaluator.evaluate(&mut model).unwrap();
    model.make_judgments(JUDGMENTS).unwrap();
    let report = evaluator.evaluate(&mut model).unwrap();

    assert!(!report.needs_judgment());
    for (path, judged) in JUDGMENTS {
        assert_eq!(label_at(&model, path), Some(judged), "{path}");
    }
    assert_eq!(label_at(&model, "Meeting Participant/Low Effort"), Some(Label::Conflict));
}

#[test]
fn scheduler_value_reaches_initiator_on_second_run() {
    let mut model = seeded();
    let evaluator = ForwardEvaluator::default();
    evaluator.evaluate(&mut model).unwrap();
    assert_eq!(label_at(&model, "Meeting Be Scheduled D"), Some(Label::Satisfied));
    assert_eq!(label_at(&model, "Meeting Initiator/Let Scheduler Schedule Meeting"), None);

    evaluator.evaluate(&mut model).unwrap();
    assert_eq!(
        label_at(&model, "Meeting Initiator/Let Scheduler Schedule Meeting"),
        Some(Label::Satisfied)
    );
}

#[test]
fn seeds_resolve_with_wildcards_too() {
    let model = seeded();
    let explicit = model.lookup_intention("Meeting Initiator/Schedule Meeting").unwrap();
    let wildcard = model.lookup_intention("*/Schedule Meeting").unwrap();
    assert_eq!(explicit, wildcard);
    let scheduler = model.lookup_intention("*/Meeting Scheduler/Schedule Meeting").unwrap();
    assert_ne!(scheduler, explicit);
}

#[test]
fn config_file_drives_evaluation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "require_full_evidence = true").unwrap();
    writeln!(file, "denied_transfer = \"strict\"").unwrap();
    let config = EvaluationConfig::from_file(file.path()).unwrap();
    assert_eq!(config.denied_transfer, DeniedTransfer::Strict);

    let mut model = seeded();
    let report = ForwardEvaluator::new(config).evaluate(&mut model).unwrap();
    assert!(report.needs_judgment());
}

#[test]
fn view_of_evaluated_sample() {
    let mut model = seeded();
    ForwardEvaluator::default().evaluate(&mut model).unwrap();
    let view = ModelView::of(&model);

    assert_eq!(view.nodes.len(), model.intention_count());
    assert_eq!(view.links.len(), model.link_count());
    let friendly = view
        .node("SD-Model of Meeting Scheduler/Meeting Participant/User Friendly")
        .unwrap();
    assert!(friendly.needs_judgment);
    assert_eq!(friendly.icon, Some("uL"));
    let json = view.to_json().unwrap();
    assert!(json.contains("\"fill_color\": \"yellow\""));
}
