#![cfg(test)]
//! This module exposes helpers that aid testing of propagators. The [`TestSolver`] allows setting
//! up specific scenarios under which to test the various operations of a propagator.
use crate::basic_types::EmptyDomain;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::notifications::WatchList;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::Assignments;
use crate::predicate;

/// A container for variables, which can be used to test propagators.
#[derive(Default, Debug)]
pub(crate) struct TestSolver {
    assignments: Assignments,
    watch_list: WatchList,
    next_id: u32,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        let domain = self.assignments.grow(lb, ub);
        self.watch_list.grow(domain);
        domain
    }

    pub(crate) fn new_literal(&mut self) -> Literal {
        Literal::new(self.new_variable(0, 1))
    }

    /// Initialises the propagator and propagates it once.
    pub(crate) fn new_propagator<P: Propagator>(
        &mut self,
        mut propagator: P,
    ) -> Result<P, Inconsistency> {
        let id = PropagatorId(self.next_id);
        self.next_id += 1;

        propagator.initialise_at_root(&mut PropagatorInitialisationContext::new(
            &mut self.watch_list,
            id,
            &self.assignments,
        ))?;

        self.propagate(&mut propagator)?;

        Ok(propagator)
    }

    pub(crate) fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        var.contains(&self.assignments, value)
    }

    pub(crate) fn lower_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        var.lower_bound(&self.assignments)
    }

    pub(crate) fn upper_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        var.upper_bound(&self.assignments)
    }

    pub(crate) fn domain_size(&self, var: DomainId) -> u32 {
        self.assignments.get_domain_size(var)
    }

    pub(crate) fn set_lower_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.assignments
            .post_predicate(predicate!(var >= bound))
            .map(|_| ())
    }

    pub(crate) fn set_upper_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.assignments
            .post_predicate(predicate!(var <= bound))
            .map(|_| ())
    }

    pub(crate) fn remove(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.assignments
            .post_predicate(predicate!(var != value))
            .map(|_| ())
    }

    pub(crate) fn set_literal(&mut self, literal: Literal, value: bool) -> Result<(), EmptyDomain> {
        let predicate = if value {
            literal.true_predicate()
        } else {
            literal.false_predicate()
        };
        self.assignments.post_predicate(predicate).map(|_| ())
    }

    pub(crate) fn is_literal_true(&self, literal: Literal) -> bool {
        self.assignments
            .is_predicate_satisfied(literal.true_predicate())
    }

    pub(crate) fn is_literal_false(&self, literal: Literal) -> bool {
        self.assignments
            .is_predicate_satisfied(literal.false_predicate())
    }

    pub(crate) fn propagate<P: Propagator>(&mut self, propagator: &mut P) -> PropagationStatusCP {
        propagator.propagate(PropagationContextMut::new(&mut self.assignments))
    }

    pub(crate) fn propagate_until_fixed_point<P: Propagator>(
        &mut self,
        propagator: &mut P,
    ) -> PropagationStatusCP {
        loop {
            let num_changes = self.assignments.num_changes();
            self.propagate(propagator)?;
            if self.assignments.num_changes() == num_changes {
                return Ok(());
            }
        }
    }

    pub(crate) fn assert_bounds(&self, var: DomainId, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var);
        let actual_ub = self.upper_bound(var);

        assert_eq!(
            (lb, ub),
            (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}]"
        );
    }
}
