//! Houses the engine which searches for solutions by alternating propagation and branching.
use std::time::Instant;

use log::debug;

use crate::basic_types::ConstraintOperationError;
use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::SolutionReference;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::notifications::WatchList;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::PropagatorQueue;
use crate::engine::propagation::PropagatorStore;
use crate::engine::solver_statistics::SolverStatistics;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::Assignments;
use crate::engine::VariableNames;
use crate::fd_assert_moderate;
use crate::fd_assert_simple;

/// The number of distinct propagator priorities the queue distinguishes.
const NUM_PRIORITY_LEVELS: u32 = 5;

/// The outcome of a call to [`ConstraintSatisfactionSolver::solve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CSPSolverExecutionFlag {
    /// Every variable of the brancher is assigned and no propagator reports a conflict; the
    /// solution can be read through [`ConstraintSatisfactionSolver::get_solution_reference`].
    Feasible,
    /// The problem has no solution.
    Infeasible,
    /// The problem has no solution in which all assumptions hold.
    InfeasibleUnderAssumptions,
    /// The termination condition triggered before a conclusion was reached.
    Timeout,
}

/// A depth-first search engine over finite integer domains.
///
/// At every node the engine propagates all constraints to a fixed point and then asks the
/// [`Brancher`] for a decision `d`. The decision opens a new decision level; when the subtree
/// below it fails, the engine backtracks chronologically to the previous level and posts `!d`
/// there. Assumptions are posted one per decision level before any decision of the brancher,
/// and a conflict which reaches the levels of the assumptions stops the search.
///
/// No nogoods are learned and the engine never restarts.
#[derive(Debug)]
pub(crate) struct ConstraintSatisfactionSolver {
    assignments: Assignments,
    watch_list: WatchList,
    propagators: PropagatorStore,
    propagator_queue: PropagatorQueue,
    /// The decision (or assumption) which opened each decision level.
    decisions: Vec<Predicate>,
    /// Trail entries before this index have been used to enqueue the affected propagators.
    last_notified_trail_index: usize,
    /// Set once a root-level conflict has been found; the engine cannot recover from it.
    is_infeasible: bool,
    variable_names: VariableNames,
    solver_statistics: SolverStatistics,
}

impl Default for ConstraintSatisfactionSolver {
    fn default() -> Self {
        ConstraintSatisfactionSolver {
            assignments: Assignments::default(),
            watch_list: WatchList::default(),
            propagators: PropagatorStore::default(),
            propagator_queue: PropagatorQueue::new(NUM_PRIORITY_LEVELS),
            decisions: Vec::new(),
            last_notified_trail_index: 0,
            is_infeasible: false,
            variable_names: VariableNames::default(),
            solver_statistics: SolverStatistics::default(),
        }
    }
}

// methods for creating variables and reading their domains
impl ConstraintSatisfactionSolver {
    pub(crate) fn create_new_integer_variable(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: Option<String>,
    ) -> DomainId {
        fd_assert_simple!(
            self.get_decision_level() == 0,
            "Variables can only be created at the root"
        );

        let domain_id = self.assignments.grow(lower_bound, upper_bound);
        self.watch_list.grow(domain_id);
        self.last_notified_trail_index = self.assignments.num_changes();

        if let Some(name) = name {
            self.variable_names.add_integer(domain_id, name);
        }

        domain_id
    }

    pub(crate) fn create_new_literal(&mut self, name: Option<String>) -> Literal {
        Literal::new(self.create_new_integer_variable(0, 1, name))
    }

    pub(crate) fn get_lower_bound(&self, variable: &impl IntegerVariable) -> i32 {
        variable.lower_bound(&self.assignments)
    }

    pub(crate) fn get_upper_bound(&self, variable: &impl IntegerVariable) -> i32 {
        variable.upper_bound(&self.assignments)
    }

    #[cfg(test)]
    pub(crate) fn get_assigned_integer_value(&self, variable: &impl IntegerVariable) -> Option<i32> {
        self.assignments.get_assigned_value(variable)
    }

    pub(crate) fn get_variable_name(&self, domain_id: DomainId) -> Option<&str> {
        self.variable_names.get_int_name(domain_id)
    }

    pub(crate) fn get_solution_reference(&self) -> SolutionReference<'_> {
        SolutionReference::new(&self.assignments)
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.assignments.get_decision_level()
    }

    pub(crate) fn is_infeasible(&self) -> bool {
        self.is_infeasible
    }

    pub(crate) fn statistics(&self) -> &SolverStatistics {
        &self.solver_statistics
    }
}

// methods that serve as the main building blocks
impl ConstraintSatisfactionSolver {
    pub(crate) fn solve(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        self.solve_under_assumptions(&[], termination, brancher)
    }

    pub(crate) fn solve_under_assumptions(
        &mut self,
        assumptions: &[Predicate],
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        if self.is_infeasible {
            return CSPSolverExecutionFlag::Infeasible;
        }
        fd_assert_simple!(
            self.get_decision_level() == 0,
            "The search should start from the root; was the state restored after the last run?"
        );

        let start_time = Instant::now();
        let result = self.solve_internal(assumptions, termination, brancher);

        self.solver_statistics
            .engine_statistics
            .time_spent_in_solver += start_time.elapsed().as_millis() as u64;

        debug!(
            "Search finished with {result:?} after {} decisions",
            self.solver_statistics.engine_statistics.num_decisions
        );

        result
    }

    /// Undoes every decision; the domains return to the state they had after root propagation.
    pub(crate) fn restore_state_at_root(&mut self) {
        if self.get_decision_level() != 0 {
            self.backtrack(0);
        }
    }

    fn solve_internal(
        &mut self,
        assumptions: &[Predicate],
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        // A decision which emptied a domain while it was posted.
        let mut pending_conflict = false;

        loop {
            if termination.should_stop() {
                return CSPSolverExecutionFlag::Timeout;
            }

            let status = if pending_conflict {
                pending_conflict = false;
                Err(EmptyDomain.into())
            } else {
                self.propagate()
            };

            if status.is_err() {
                self.solver_statistics.engine_statistics.num_conflicts += 1;

                if let Err(flag) = self.backtrack_after_conflict(assumptions.len()) {
                    return flag;
                }
                continue;
            }

            let decision_level = self.get_decision_level();
            if decision_level < assumptions.len() {
                let assumption = assumptions[decision_level];
                if self.assignments.is_predicate_falsified(assumption) {
                    debug!("The assumption {assumption} is falsified");
                    return CSPSolverExecutionFlag::InfeasibleUnderAssumptions;
                }

                pending_conflict = self.open_decision_level(assumption).is_err();
                continue;
            }

            let context = &mut SelectionContext::new(&self.assignments);
            let Some(decision) = brancher.next_decision(context) else {
                return CSPSolverExecutionFlag::Feasible;
            };

            fd_assert_moderate!(
                !self.assignments.is_predicate_satisfied(decision),
                "Decision should not already be assigned; double check the brancher"
            );

            self.solver_statistics.engine_statistics.num_decisions += 1;
            termination.decision_has_been_made();

            pending_conflict = self.open_decision_level(decision).is_err();
        }
    }

    fn open_decision_level(&mut self, decision: Predicate) -> Result<(), EmptyDomain> {
        self.assignments.open_decision_level();
        self.decisions.push(decision);

        self.assignments.post_predicate(decision).map(|_| ())
    }

    /// Backtracks to the deepest decision level at which the refutation of a decision can be
    /// posted; the refutation is posted at that level.
    ///
    /// Fails when the conflict cannot be escaped, either because it is a root-level conflict or
    /// because only assumptions remain on the decision stack.
    fn backtrack_after_conflict(
        &mut self,
        num_assumptions: usize,
    ) -> Result<(), CSPSolverExecutionFlag> {
        loop {
            let decision_level = self.get_decision_level();

            if decision_level == 0 {
                self.is_infeasible = true;
                return Err(CSPSolverExecutionFlag::Infeasible);
            }
            if decision_level <= num_assumptions {
                return Err(CSPSolverExecutionFlag::InfeasibleUnderAssumptions);
            }

            let decision = self.decisions[decision_level - 1];
            self.backtrack(decision_level - 1);

            if self.assignments.post_predicate(!decision).is_ok() {
                return Ok(());
            }

            self.solver_statistics.engine_statistics.num_conflicts += 1;
        }
    }

    fn backtrack(&mut self, backtrack_level: usize) {
        fd_assert_simple!(backtrack_level < self.get_decision_level());

        self.assignments.backtrack_to(backtrack_level);
        self.decisions.truncate(backtrack_level);
        self.propagator_queue.clear();
        self.last_notified_trail_index = self.assignments.num_changes();
    }

    /// Enqueues the propagators watching the domains which changed since the last call.
    fn notify_propagators(&mut self) {
        let num_changes = self.assignments.num_changes();

        for index in self.last_notified_trail_index..num_changes {
            let domain = self.assignments.changed_domain(index);

            for &propagator_id in self.watch_list.get_affected_propagators(domain) {
                self.propagator_queue
                    .enqueue_propagator(propagator_id, self.propagators[propagator_id].priority());
            }
        }

        self.last_notified_trail_index = num_changes;
    }

    /// Runs the propagators until none of them changes a domain any more or one of them reports a
    /// conflict.
    pub(crate) fn propagate(&mut self) -> PropagationStatusCP {
        loop {
            self.notify_propagators();

            let Some(propagator_id) = self.propagator_queue.pop() else {
                return Ok(());
            };

            self.solver_statistics.engine_statistics.num_propagations += 1;

            let context = PropagationContextMut::new(&mut self.assignments);
            if let Err(inconsistency) = self.propagators[propagator_id].propagate(context) {
                debug!(
                    "{} reported {inconsistency:?}",
                    self.propagators[propagator_id].name()
                );
                self.propagator_queue.clear();
                self.last_notified_trail_index = self.assignments.num_changes();

                return Err(inconsistency);
            }
        }
    }

    /// Adds the propagator at the root and propagates it.
    ///
    /// If the propagator finds the root infeasible, every later attempt to add a propagator fails
    /// with [`ConstraintOperationError::InfeasibleState`].
    pub(crate) fn add_propagator(
        &mut self,
        propagator: Box<dyn Propagator>,
    ) -> Result<(), ConstraintOperationError> {
        fd_assert_simple!(
            self.get_decision_level() == 0,
            "Propagators can only be added at the root"
        );

        if self.is_infeasible {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let propagator_id = self.propagators.alloc(propagator);

        let mut context = PropagatorInitialisationContext::new(
            &mut self.watch_list,
            propagator_id,
            &self.assignments,
        );
        if self.propagators[propagator_id]
            .initialise_at_root(&mut context)
            .is_err()
        {
            self.is_infeasible = true;
            return Err(ConstraintOperationError::InfeasiblePropagator);
        }

        self.propagator_queue
            .enqueue_propagator(propagator_id, self.propagators[propagator_id].priority());

        if self.propagate().is_err() {
            self.is_infeasible = true;
            return Err(ConstraintOperationError::InfeasiblePropagator);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::FirstFail;
    use crate::predicate;
    use crate::propagators::BinaryNotEqualsPropagator;
    use crate::propagators::LinearLessOrEqualPropagator;
    use crate::termination::DecisionBudget;
    use crate::termination::Indefinite;

    fn brancher(
        variables: &[DomainId],
    ) -> IndependentVariableValueBrancher<DomainId, FirstFail, InDomainMin> {
        IndependentVariableValueBrancher::new(FirstFail::new(variables), InDomainMin)
    }

    /// Three variables over {0, 1} which are pairwise different.
    fn pigeon_hole(solver: &mut ConstraintSatisfactionSolver) -> Vec<DomainId> {
        let variables = (0..3)
            .map(|_| solver.create_new_integer_variable(0, 1, None))
            .collect::<Vec<_>>();
        for i in 0..3 {
            for j in i + 1..3 {
                solver
                    .add_propagator(Box::new(BinaryNotEqualsPropagator::new(
                        variables[i],
                        variables[j],
                    )))
                    .expect("no root conflict");
            }
        }
        variables
    }

    #[test]
    fn a_feasible_problem_is_solved() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.create_new_integer_variable(0, 2, None);
        let y = solver.create_new_integer_variable(0, 2, None);
        solver
            .add_propagator(Box::new(BinaryNotEqualsPropagator::new(x, y)))
            .expect("no root conflict");

        let result = solver.solve(&mut Indefinite, &mut brancher(&[x, y]));

        assert_eq!(CSPSolverExecutionFlag::Feasible, result);
        assert_eq!(Some(0), solver.get_assigned_integer_value(&x));
        assert_eq!(Some(1), solver.get_assigned_integer_value(&y));
    }

    #[test]
    fn exhausting_the_search_proves_infeasibility() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let variables = pigeon_hole(&mut solver);

        let result = solver.solve(&mut Indefinite, &mut brancher(&variables));

        assert_eq!(CSPSolverExecutionFlag::Infeasible, result);
        assert!(solver.is_infeasible());
        assert!(solver.statistics().engine_statistics.num_conflicts > 0);
    }

    #[test]
    fn a_root_conflict_makes_the_state_infeasible() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.create_new_integer_variable(5, 10, None);

        let result = solver.add_propagator(Box::new(LinearLessOrEqualPropagator::new(
            [x].into(),
            4,
        )));
        assert_eq!(Err(ConstraintOperationError::InfeasiblePropagator), result);

        let result = solver.add_propagator(Box::new(LinearLessOrEqualPropagator::new(
            [x].into(),
            10,
        )));
        assert_eq!(Err(ConstraintOperationError::InfeasibleState), result);
    }

    #[test]
    fn falsified_assumptions_are_reported() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.create_new_integer_variable(0, 5, None);
        let y = solver.create_new_integer_variable(0, 5, None);
        solver
            .add_propagator(Box::new(LinearLessOrEqualPropagator::new([x, y].into(), 3)))
            .expect("no root conflict");

        let result = solver.solve_under_assumptions(
            &[predicate!(x >= 2), predicate!(y >= 2)],
            &mut Indefinite,
            &mut brancher(&[x, y]),
        );
        assert_eq!(CSPSolverExecutionFlag::InfeasibleUnderAssumptions, result);
        assert!(!solver.is_infeasible());

        solver.restore_state_at_root();
        assert_eq!(0, solver.get_decision_level());
        assert_eq!(0, solver.get_lower_bound(&x));
        assert_eq!(3, solver.get_upper_bound(&x));
    }

    #[test]
    fn assumptions_restrict_the_solution() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.create_new_integer_variable(0, 5, None);

        let result = solver.solve_under_assumptions(
            &[predicate!(x >= 3)],
            &mut Indefinite,
            &mut brancher(&[x]),
        );

        assert_eq!(CSPSolverExecutionFlag::Feasible, result);
        assert_eq!(Some(3), solver.get_assigned_integer_value(&x));
    }

    #[test]
    fn the_termination_condition_is_respected() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let variables = pigeon_hole(&mut solver);

        let result = solver.solve(&mut DecisionBudget::new(1), &mut brancher(&variables));

        assert_eq!(CSPSolverExecutionFlag::Timeout, result);
        assert!(!solver.is_infeasible());
        assert_eq!(1, solver.statistics().engine_statistics.num_decisions);
    }

    #[test]
    fn names_are_stored() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.create_new_integer_variable(0, 5, Some("x".to_owned()));
        let y = solver.create_new_integer_variable(0, 5, None);

        assert_eq!(Some("x"), solver.get_variable_name(x));
        assert_eq!(None, solver.get_variable_name(y));
    }
}
