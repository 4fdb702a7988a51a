//! Link construction
//!
//! Typed builders take [`TaskRef`], [`GoalRef`] and [`SoftGoalRef`] so an
//! invalid endpoint combination does not compile. The `connect_*` variants
//! accept untyped handles (as produced by path lookup) and return
//! [`ConstructionError::WrongKind`] instead.
//!
//! Every builder validates first and mutates second: an `Err` leaves the
//! model exactly as it was.

pub(crate) mod guard;

use crate::boundary::BoundaryKind;
use crate::error::ConstructionError;
use crate::intention::{IntentionKind, Role};
use crate::link::{ContributionType, Link, LinkKind, LinkType};
use crate::model::GoalModel;
use crate::types::{Endpoint, GoalRef, IntentionId, LinkId, SoftGoalRef, TaskRef};
use guard::Rejection;

impl GoalModel {
    /// Decompose the task `end` into `begin`
    pub fn add_decomposition(
        &mut self,
        begin: impl Into<IntentionId>,
        end: TaskRef,
    ) -> Result<LinkId, ConstructionError> {
        self.add_refinement(begin.into(), end.id(), LinkType::Decomposition)
    }

    /// Make the task `begin` a means to the goal `end`
    pub fn add_means_end(
        &mut self,
        begin: TaskRef,
        end: GoalRef,
    ) -> Result<LinkId, ConstructionError> {
        self.add_refinement(begin.id(), end.id(), LinkType::MeansEnd)
    }

    /// Let `begin` contribute to the softgoal `end`
    pub fn add_contribution(
        &mut self,
        begin: impl Into<IntentionId>,
        end: SoftGoalRef,
        contribution: ContributionType,
    ) -> Result<LinkId, ConstructionError> {
        let (begin, end) = (begin.into(), end.id());
        self.check_propagation_edge(begin, end)?;
        let id = self.push_link(begin, end, LinkType::Contribution(contribution));
        self.intentions[begin.0].contribution_to.push(id);
        self.intentions[end.0].contribution_from.push(id);
        self.guard.insert(begin, end);
        Ok(id)
    }

    /// Untyped decomposition; `end` must be a task
    pub fn connect_decomposition(
        &mut self,
        begin: IntentionId,
        end: IntentionId,
    ) -> Result<LinkId, ConstructionError> {
        self.intention_checked(begin)?;
        let end =
            self.expect_kind(end, LinkKind::Decomposition, "end", IntentionKind::Task, "a task")?;
        self.add_decomposition(begin, TaskRef(end))
    }

    /// Untyped means-end; `begin` must be a task and `end` a goal
    pub fn connect_means_end(
        &mut self,
        begin: IntentionId,
        end: IntentionId,
    ) -> Result<LinkId, ConstructionError> {
        let begin =
            self.expect_kind(begin, LinkKind::MeansEnd, "start", IntentionKind::Task, "a task")?;
        let end = self.expect_kind(end, LinkKind::MeansEnd, "end", IntentionKind::Goal, "a goal")?;
        self.add_means_end(TaskRef(begin), GoalRef(end))
    }

    /// Untyped contribution; `end` must be a softgoal and `contribution`
    /// one of `MAKE`, `HELP`, `SOME+`, `UNKNOWN`, `SOME-`, `HURT`, `BREAK`
    pub fn connect_contribution(
        &mut self,
        begin: IntentionId,
        end: IntentionId,
        contribution: &str,
    ) -> Result<LinkId, ConstructionError> {
        let contribution: ContributionType = contribution.parse()?;
        self.intention_checked(begin)?;
        let end = self.expect_kind(
            end,
            LinkKind::Contribution,
            "end",
            IntentionKind::SoftGoal,
            "a softgoal",
        )?;
        self.add_contribution(begin, SoftGoalRef(end), contribution)
    }

    /// Record that `depender` relies on `dependee` for `dependum`
    ///
    /// Either side may be an actor as a whole. A depender intention gets
    /// the `Depender` role and may have only one incoming dependency.
    pub fn add_dependency(
        &mut self,
        dependee: impl Into<Endpoint>,
        depender: impl Into<Endpoint>,
        dependum: impl Into<IntentionId>,
    ) -> Result<LinkId, ConstructionError> {
        let (dependee, depender, dependum) = (dependee.into(), depender.into(), dependum.into());
        self.check_endpoint(dependee)?;
        self.check_endpoint(depender)?;
        let owner = self.intention_checked(dependum)?.boundary;
        if let Endpoint::Intention(d) = depender {
            let intention = &self.intentions[d.0];
            if intention.dependency_from.is_some() {
                return Err(ConstructionError::DuplicateDependency(self.path_of(d)));
            }
        }

        let id = LinkId(self.links.len());
        self.links.push(Link {
            link_type: LinkType::Dependency { dependum },
            begin: dependee,
            end: depender,
            owner,
        });
        self.boundaries[owner.0].links.push(id);
        if let Endpoint::Intention(d) = dependee {
            self.intentions[d.0].dependencies_to.push(id);
        }
        if let Endpoint::Intention(d) = depender {
            let intention = &mut self.intentions[d.0];
            intention.dependency_from = Some(id);
            intention.role = Some(Role::Depender);
        }
        tracing::debug!(
            "Dependency on {} from {:?} to {:?}",
            self.intentions[dependum.0].name,
            dependee,
            depender
        );
        Ok(id)
    }

    /// Move the ends of the dependency carrying `dependum` onto concrete
    /// intentions inside the actors
    ///
    /// SD models first draw dependencies between actors; SR refinement then
    /// names the intention that provides the dependum and the one that
    /// needs it.
    pub fn refine_dependency(
        &mut self,
        dependum: impl Into<IntentionId>,
        dependee: Option<IntentionId>,
        depender: Option<IntentionId>,
    ) -> Result<(), ConstructionError> {
        let dependum = dependum.into();
        self.intention_checked(dependum)?;
        if dependee.is_none() && depender.is_none() {
            return Err(ConstructionError::EmptyRefinement(self.path_of(dependum)));
        }
        for id in dependee.iter().chain(depender.iter()) {
            self.intention_checked(*id)?;
        }
        let matches: Vec<LinkId> = self
            .link_ids()
            .filter(|l| self.links[l.0].dependum() == Some(dependum))
            .collect();
        if matches.is_empty() {
            return Err(ConstructionError::DependencyNotFound(self.path_of(dependum)));
        }
        if let Some(d) = depender {
            let existing = self.intentions[d.0].dependency_from;
            let foreign = existing.is_some_and(|l| !matches.contains(&l));
            if matches.len() > 1 || foreign {
                return Err(ConstructionError::DuplicateDependency(self.path_of(d)));
            }
        }

        for link in matches {
            if let Some(new_begin) = dependee {
                if let Endpoint::Intention(old) = self.links[link.0].begin {
                    self.intentions[old.0].dependencies_to.retain(|l| *l != link);
                }
                self.links[link.0].begin = Endpoint::Intention(new_begin);
                self.intentions[new_begin.0].dependencies_to.push(link);
            }
            if let Some(new_end) = depender {
                if let Endpoint::Intention(old) = self.links[link.0].end {
                    if old != new_end {
                        let previous = &mut self.intentions[old.0];
                        previous.dependency_from = None;
                        if previous.role == Some(Role::Depender) {
                            previous.role = None;
                        }
                    }
                }
                self.links[link.0].end = Endpoint::Intention(new_end);
                let intention = &mut self.intentions[new_end.0];
                intention.dependency_from = Some(link);
                intention.role = Some(Role::Depender);
            }
        }
        tracing::debug!("Refined dependency on {}", self.path_of(dependum));
        Ok(())
    }

    fn add_refinement(
        &mut self,
        begin: IntentionId,
        end: IntentionId,
        link_type: LinkType,
    ) -> Result<LinkId, ConstructionError> {
        self.check_propagation_edge(begin, end)?;
        let id = self.push_link(begin, end, link_type);
        self.intentions[begin.0].decomposition_to.push(id);
        self.intentions[end.0].decomposition_from.push(id);
        self.guard.insert(begin, end);
        Ok(id)
    }

    fn push_link(&mut self, begin: IntentionId, end: IntentionId, link_type: LinkType) -> LinkId {
        let owner = self.intentions[begin.0].boundary;
        let id = LinkId(self.links.len());
        self.links.push(Link {
            link_type,
            begin: Endpoint::Intention(begin),
            end: Endpoint::Intention(end),
            owner,
        });
        self.boundaries[owner.0].links.push(id);
        id
    }

    fn check_propagation_edge(
        &self,
        begin: IntentionId,
        end: IntentionId,
    ) -> Result<(), ConstructionError> {
        self.intention_checked(begin)?;
        self.intention_checked(end)?;
        match self.guard.check(begin, end) {
            Ok(()) => Ok(()),
            Err(Rejection::SelfLoop) => Err(ConstructionError::SelfLoop(self.path_of(begin))),
            Err(Rejection::Cycle) => Err(ConstructionError::WouldCreateCycle {
                from: self.path_of(begin),
                to: self.path_of(end),
            }),
        }
    }

    fn check_endpoint(&self, endpoint: Endpoint) -> Result<(), ConstructionError> {
        match endpoint {
            Endpoint::Intention(id) => {
                self.intention_checked(id)?;
            }
            Endpoint::Actor(id) => {
                let boundary = self.boundary_checked(id)?;
                if boundary.kind != BoundaryKind::Actor {
                    return Err(ConstructionError::NotAnActor(boundary.name.clone()));
                }
            }
        }
        Ok(())
    }

    fn expect_kind(
        &self,
        id: IntentionId,
        link: LinkKind,
        side: &'static str,
        kind: IntentionKind,
        expected: &'static str,
    ) -> Result<IntentionId, ConstructionError> {
        let intention = self.intention_checked(id)?;
        if intention.kind == kind {
            Ok(id)
        } else {
            Err(ConstructionError::WrongKind {
                link,
                side,
                name: intention.name.clone(),
                found: intention.kind,
                expected,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;

    #[test]
    fn decomposition_registers_both_sides() {
        let mut model = GoalModel::new("SD");
        let actor = model.add_actor(model.root(), "A").unwrap();
        let goal = model.add_goal(actor, "G").unwrap();
        let task = model.add_task(actor, "T").unwrap();

        let link = model.add_decomposition(goal, task).unwrap();

        assert_eq!(model.intention(goal.id()).unwrap().decompositions_to(), &[link]);
        assert_eq!(model.intention(task.id()).unwrap().decompositions_from(), &[link]);
        assert_eq!(model.boundary(actor).unwrap().links(), &[link]);
    }

    #[test]
    fn untyped_means_end_checks_kinds() {
        let mut model = GoalModel::new("SD");
        let actor = model.add_actor(model.root(), "A").unwrap();
        let t1 = model.add_task(actor, "T1").unwrap();
        let t2 = model.add_task(actor, "T2").unwrap();

        let err = model.connect_means_end(t1.id(), t2.id()).unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::WrongKind {
                link: LinkKind::MeansEnd,
                side: "end",
                found: IntentionKind::Task,
                ..
            }
        ));
        assert_eq!(model.link_count(), 0);
    }

    #[test]
    fn untyped_contribution_rejects_bad_type() {
        let mut model = GoalModel::new("SD");
        let actor = model.add_actor(model.root(), "A").unwrap();
        let t = model.add_task(actor, "T").unwrap();
        let s = model.add_soft_goal(actor, "S").unwrap();

        assert_eq!(
            model.connect_contribution(t.id(), s.id(), "HELPS"),
            Err(ConstructionError::UnknownContributionType("HELPS".into()))
        );
        let link = model.connect_contribution(t.id(), s.id(), "SOME-").unwrap();
        assert_eq!(
            model.link(link).unwrap().contribution(),
            Some(ContributionType::SomeMinus)
        );
    }

    #[test]
    fn dependency_between_actors_then_refined() {
        let mut model = GoalModel::new("SD");
        let initiator = model.add_actor(model.root(), "Initiator").unwrap();
        let scheduler = model.add_actor(model.root(), "Scheduler").unwrap();
        let dependum = model.add_goal(model.root(), "Meeting Be Scheduled D").unwrap();
        let link = model.add_dependency(scheduler, initiator, dependum).unwrap();

        let provider = model.add_task(scheduler, "Schedule Meeting").unwrap();
        let needer = model.add_task(initiator, "Let Scheduler Schedule").unwrap();
        model
            .refine_dependency(dependum, Some(provider.id()), Some(needer.id()))
            .unwrap();

        let l = model.link(link).unwrap();
        assert_eq!(l.begin(), Endpoint::Intention(provider.id()));
        assert_eq!(l.end(), Endpoint::Intention(needer.id()));
        assert_eq!(l.owner(), model.root());
        let needer = model.intention(needer.id()).unwrap();
        assert_eq!(needer.role(), Some(Role::Depender));
        assert_eq!(needer.dependency_from(), Some(link));
        assert_eq!(model.intention(provider.id()).unwrap().dependencies_to(), &[link]);
    }

    #[test]
    fn refinement_errors() {
        let mut model = GoalModel::new("SD");
        let actor = model.add_actor(model.root(), "A").unwrap();
        let dependum = model.add_resource(model.root(), "Agreement D").unwrap();
        let t = model.add_task(actor, "T").unwrap();

        assert!(matches!(
            model.refine_dependency(dependum, Some(t.id()), None),
            Err(ConstructionError::DependencyNotFound(_))
        ));
        assert!(matches!(
            model.refine_dependency(dependum, None, None),
            Err(ConstructionError::EmptyRefinement(_))
        ));
    }

    #[test]
    fn dependency_endpoint_must_be_actor_boundary() {
        let mut model = GoalModel::new("SD");
        let actor = model.add_actor(model.root(), "A").unwrap();
        let dependum = model.add_goal(model.root(), "D").unwrap();
        assert_eq!(
            model.add_dependency(model.root(), actor, dependum),
            Err(ConstructionError::NotAnActor("SD".into()))
        );
    }

    #[test]
    fn labels_are_untouched_by_construction() {
        let mut model = GoalModel::new("SD");
        let actor = model.add_actor(model.root(), "A").unwrap();
        let t = model.add_task(actor, "T").unwrap();
        let s = model.add_soft_goal(actor, "S").unwrap();
        model.set_label(t, Label::Satisfied).unwrap();
        model.add_contribution(t, s, ContributionType::Make).unwrap();
        assert_eq!(model.label_of(s), None);
    }
}
