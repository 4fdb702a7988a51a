//! Meeting scheduler sample
//!
//! The classic i* case study: an SD model with three actors (initiator,
//! participant, scheduler system), six dependums drawn between the actors
//! and then refined onto the SR intentions that provide and need them.

use crate::error::ConstructionError;
use crate::label::Label;
use crate::link::ContributionType::{Help, Hurt};
use crate::model::GoalModel;

/// Name of the root SD model
pub const MODEL_NAME: &str = "SD-Model of Meeting Scheduler";

/// Seed labels for the first analysis question
pub const SEEDS: [(&str, Label); 5] = [
    ("Proposed Date D", Label::Satisfied),
    ("Meeting Initiator/Schedule Meeting", Label::Denied),
    ("Meeting Scheduler/Merge Avail Dates", Label::Satisfied),
    ("Meeting Participant/Attend Meeting", Label::Satisfied),
    (
        "Meeting Participant/Find Agreeable Date By Talking To Initiator",
        Label::Satisfied,
    ),
];

/// Judgments made after inspecting the first propagation
pub const JUDGMENTS: [(&str, Label); 4] = [
    ("Meeting Participant/User Friendly", Label::Conflict),
    ("Meeting Participant/Richer Medium", Label::Conflict),
    ("Meeting Initiator/Low Effort", Label::PartiallySatisfied),
    ("Meeting Initiator/Quick", Label::PartiallySatisfied),
];

/// Propagation rules as applied by the evaluator
pub const GUIDELINE: &str = "\
Label propagation rules

Labels, strongest first:
    Satisfied, Partially Satisfied, Conflict, Unknown, Partially Denied, Denied

Dependency links:
    1. A dependum takes the label of its dependee.
    2. A depender takes the label of the dependum.

Decomposition links:
    3. A task decomposed into several elements takes the weakest of their
       labels (AND).
    4. A task that is both decomposed and a depender combines the two
       sources the same way.

Means-end links:
    5. A goal takes the weakest label of its means by default; configure
       goal_aggregation = \"strongest\" for the OR reading.

Contribution links:
    6. MAKE passes the label, HELP and SOME+ weaken it to partial, HURT,
       SOME- and BREAK invert its polarity, UNKNOWN always yields Unknown.
       Conflict and Unknown pass through unchanged.
    7. A softgoal with one contribution adopts it. Several contributions of
       one polarity saturate to Satisfied or Denied. Mixed polarity, Unknown
       or Conflict among several contributions needs a human judgment.

Evaluation:
    1. Seed the leaves with labels for an analysis question.
    2. Propagate.
    3. Judge the softgoals that were flagged.
    4. Propagate again and interpret the model.
";

/// Build the meeting scheduler model
pub fn meeting_scheduler() -> Result<GoalModel, ConstructionError> {
    let mut model = GoalModel::new(MODEL_NAME);
    let sd = model.root();
    let initiator = model.add_actor(sd, "Meeting Initiator")?;
    let participant = model.add_actor(sd, "Meeting Participant")?;
    let scheduler = model.add_actor(sd, "Meeting Scheduler")?;

    let attends_d = model.add_goal(sd, "Attends Meeting D")?;
    let scheduled_d = model.add_goal(sd, "Meeting Be Scheduled D")?;
    let date_range_d = model.add_task(sd, "Enter Date Range D")?;
    let avail_dates_d = model.add_task(sd, "Enter Avail Dates D")?;
    let proposed_d = model.add_resource(sd, "Proposed Date D")?;
    let agreement_d = model.add_resource(sd, "Agreement D")?;

    model.add_dependency(scheduler, initiator, scheduled_d)?;
    model.add_dependency(scheduler, participant, proposed_d)?;
    model.add_dependency(initiator, scheduler, date_range_d)?;
    model.add_dependency(participant, scheduler, avail_dates_d)?;
    model.add_dependency(participant, scheduler, agreement_d)?;
    model.add_dependency(participant, initiator, attends_d)?;

    // Initiator
    let organize = model.add_task(initiator, "Organize Meeting")?;
    let be_scheduled = model.add_goal(initiator, "Meeting Be Scheduled")?;
    model.add_decomposition(be_scheduled, organize)?;
    let quick = model.add_soft_goal(initiator, "Quick")?;
    model.add_decomposition(quick, organize)?;
    let low_effort = model.add_soft_goal(initiator, "Low Effort")?;
    model.add_decomposition(low_effort, organize)?;
    let schedule_self = model.add_task(initiator, "Schedule Meeting")?;
    model.add_means_end(schedule_self, be_scheduled)?;
    let let_scheduler = model.add_task(initiator, "Let Scheduler Schedule Meeting")?;
    model.add_means_end(let_scheduler, be_scheduled)?;
    model.add_contribution(schedule_self, quick, Hurt)?;
    model.add_contribution(let_scheduler, quick, Help)?;
    model.add_contribution(schedule_self, low_effort, Hurt)?;
    model.add_contribution(let_scheduler, low_effort, Help)?;

    // Participant
    let participate = model.add_task(participant, "Participate In Meeting")?;
    let attend = model.add_task(participant, "Attend Meeting")?;
    model.add_decomposition(attend, participate)?;
    let convenient = model.add_soft_goal(participant, "Convenient (Meeting, Date)")?;
    model.add_decomposition(convenient, participate)?;
    let arrange = model.add_task(participant, "Arrange Meeting")?;
    model.add_decomposition(arrange, participate)?;
    let p_low_effort = model.add_soft_goal(participant, "Low Effort")?;
    model.add_decomposition(p_low_effort, arrange)?;
    let agreeable = model.add_goal(participant, "Agreeable (Meeting, Date)")?;
    model.add_decomposition(agreeable, arrange)?;
    let by_talking = model.add_task(participant, "Find Agreeable Date By Talking To Initiator")?;
    model.add_means_end(by_talking, agreeable)?;
    let by_scheduler = model.add_task(participant, "Find Agreeable Date Using Scheduler")?;
    model.add_means_end(by_scheduler, agreeable)?;
    let agree = model.add_task(participant, "Agree To Date")?;
    model.add_decomposition(agree, by_scheduler)?;
    let quality = model.add_soft_goal(participant, "Quality (Proposed Date)")?;
    model.add_contribution(quality, convenient, Help)?;
    let richer = model.add_soft_goal(participant, "Richer Medium")?;
    model.add_contribution(richer, quality, Help)?;
    model.add_contribution(by_scheduler, richer, Hurt)?;
    model.add_contribution(by_talking, richer, Help)?;
    let friendly = model.add_soft_goal(participant, "User Friendly")?;
    model.add_contribution(friendly, p_low_effort, Help)?;
    model.add_contribution(by_scheduler, friendly, Hurt)?;
    model.add_contribution(by_talking, friendly, Help)?;

    // Scheduler system
    let schedule = model.add_task(scheduler, "Schedule Meeting")?;
    let obtain_agreement = model.add_task(scheduler, "Obtain Agreement")?;
    model.add_decomposition(obtain_agreement, schedule)?;
    let obtain_dates = model.add_task(scheduler, "Obtain Avail Dates")?;
    model.add_decomposition(obtain_dates, schedule)?;
    let slot = model.add_goal(scheduler, "Find Agreeable Slot")?;
    model.add_decomposition(slot, schedule)?;
    let merge = model.add_task(scheduler, "Merge Avail Dates")?;
    model.add_means_end(merge, slot)?;

    model.refine_dependency(scheduled_d, Some(schedule.id()), Some(let_scheduler.id()))?;
    model.refine_dependency(proposed_d, Some(schedule.id()), Some(agree.id()))?;
    model.refine_dependency(date_range_d, Some(let_scheduler.id()), Some(schedule.id()))?;
    model.refine_dependency(avail_dates_d, Some(by_scheduler.id()), Some(obtain_dates.id()))?;
    model.refine_dependency(agreement_d, Some(agree.id()), Some(obtain_agreement.id()))?;
    model.refine_dependency(attends_d, Some(attend.id()), Some(organize.id()))?;

    tracing::info!(
        "Built {}: {} intentions, {} links",
        MODEL_NAME,
        model.intention_count(),
        model.link_count()
    );
    Ok(model)
}
