use crate::basic_types::EmptyDomain;
use crate::engine::notifications::WatchList;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::predicate::Comparison;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::propagation::PropagatorId;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::fd_assert_simple;

/// Gives access to the [`Assignments`] of a structure.
pub trait HasAssignments {
    fn assignments(&self) -> &Assignments;
}

/// Read-only queries on the domains of variables, available on every structure which has
/// [`Assignments`].
pub(crate) trait ReadDomains: HasAssignments {
    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.assignments(), value)
    }

    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    fn is_predicate_satisfied(&self, predicate: Predicate) -> bool {
        self.assignments().is_predicate_satisfied(predicate)
    }
}

impl<T: HasAssignments> ReadDomains for T {}

/// A read-only view of the domains, handed to [`Propagator::detect_inconsistency`].
///
/// [`Propagator::detect_inconsistency`]: crate::engine::propagation::Propagator::detect_inconsistency
#[derive(Clone, Copy, Debug)]
pub(crate) struct PropagationContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

impl HasAssignments for PropagationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

/// The context through which a propagator changes domains.
#[derive(Debug)]
pub(crate) struct PropagationContextMut<'a> {
    assignments: &'a mut Assignments,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(assignments: &'a mut Assignments) -> Self {
        PropagationContextMut { assignments }
    }

    pub(crate) fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext::new(self.assignments)
    }

    pub(crate) fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        self.post(var.lower_bound_predicate(bound))
    }

    pub(crate) fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        self.post(var.upper_bound_predicate(bound))
    }

    pub(crate) fn remove<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.post(var.disequality_predicate(value))
    }

    /// Removes every value of `var` in `[from, to]`.
    pub(crate) fn remove_range<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        from: i32,
        to: i32,
    ) -> Result<(), EmptyDomain> {
        if from > to {
            return Ok(());
        }

        // The bound predicates of a view are bounds of its underlying domain, swapped when the
        // view has a negative scale.
        let at_least = var.lower_bound_predicate(from);
        let at_most = var.upper_bound_predicate(to);
        fd_assert_simple!(at_least.domain() == at_most.domain());

        let (from, to) = if at_least.comparison() == Comparison::AtLeast {
            (at_least.value(), at_most.value())
        } else {
            (at_most.value(), at_least.value())
        };

        self.assignments
            .remove_range(at_least.domain(), from, to)
            .map(|_| ())
    }

    pub(crate) fn post(&mut self, predicate: Predicate) -> Result<(), EmptyDomain> {
        self.assignments.post_predicate(predicate).map(|_| ())
    }
}

impl HasAssignments for PropagationContextMut<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

/// The context handed to a propagator when it is added to the engine.
#[derive(Debug)]
pub(crate) struct PropagatorInitialisationContext<'a> {
    watch_list: &'a mut WatchList,
    propagator_id: PropagatorId,
    assignments: &'a Assignments,
}

impl<'a> PropagatorInitialisationContext<'a> {
    pub(crate) fn new(
        watch_list: &'a mut WatchList,
        propagator_id: PropagatorId,
        assignments: &'a Assignments,
    ) -> Self {
        PropagatorInitialisationContext {
            watch_list,
            propagator_id,
            assignments,
        }
    }

    pub(crate) fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext::new(self.assignments)
    }

    /// Subscribes the propagator to every change of the domain of `var`.
    pub(crate) fn register<Var: IntegerVariable>(&mut self, var: &Var) {
        let mut watchers = Watchers::new(self.propagator_id, self.watch_list);
        var.watch_all(&mut watchers);
    }
}

impl HasAssignments for PropagatorInitialisationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}
