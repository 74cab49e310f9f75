use super::results::OptimisationResult;
use super::results::SatisfactionResult;
use super::results::SatisfactionResultUnderAssumptions;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Solution;
use crate::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
use crate::branching::value_selection::InDomainMin;
use crate::branching::variable_selection::FirstFail;
use crate::branching::Brancher;
use crate::constraints::ConstraintPoster;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::propagation::Propagator;
use crate::engine::solver_statistics::EngineStatistics;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::CSPSolverExecutionFlag;
use crate::engine::ConstraintSatisfactionSolver;
use crate::optimisation::solution_callback::SolutionCallback;
use crate::optimisation::OptimisationProcedure;

/// Owns the variables and constraints of a model and runs searches over them.
///
/// ```rust
/// # use fd_core::Solver;
/// # use fd_core::variables::TransformableVariable;
/// let mut solver = Solver::default();
///
/// let track = solver.new_named_bounded_integer(1, 3, "track");
/// let reversed = track.scaled(-1).offset(4);
/// let chosen = solver.new_literal();
///
/// assert_eq!(1, solver.lower_bound(&reversed));
/// assert_eq!(1, solver.upper_bound(&chosen));
/// ```
///
/// A search ([`Solver::satisfy`], [`Solver::satisfy_under_assumptions`] or
/// [`Solver::optimise`]) always starts at the root, and the solver is back at the root when it
/// returns. Constraints added in between searches therefore apply to all later searches.
#[derive(Debug, Default)]
pub struct Solver {
    satisfaction_solver: ConstraintSatisfactionSolver,
}

impl Solver {
    /// Search counters accumulated over every search on this solver.
    pub fn statistics(&self) -> EngineStatistics {
        self.satisfaction_solver.statistics().engine_statistics
    }

    /// Set once a constraint conflicts at the root; every later search is unsatisfiable.
    pub fn is_infeasible(&self) -> bool {
        self.satisfaction_solver.is_infeasible()
    }

    pub fn get_true_literal(&self) -> Literal {
        Literal::new(DomainId::new(0))
    }

    pub fn get_false_literal(&self) -> Literal {
        !self.get_true_literal()
    }

    /// The lower bound at the root, after propagation.
    pub fn lower_bound(&self, variable: &impl IntegerVariable) -> i32 {
        self.satisfaction_solver.get_lower_bound(variable)
    }

    /// The upper bound at the root, after propagation.
    pub fn upper_bound(&self, variable: &impl IntegerVariable) -> i32 {
        self.satisfaction_solver.get_upper_bound(variable)
    }

    pub fn get_variable_name(&self, domain_id: DomainId) -> Option<&str> {
        self.satisfaction_solver.get_variable_name(domain_id)
    }
}

/// Variable creation. Variables can only be created while the solver is at the root, which is
/// whenever no search is running.
impl Solver {
    pub fn new_literal(&mut self) -> Literal {
        self.satisfaction_solver.create_new_literal(None)
    }

    pub fn new_named_literal(&mut self, name: impl Into<String>) -> Literal {
        self.satisfaction_solver.create_new_literal(Some(name.into()))
    }

    /// A fresh variable over `lower_bound..=upper_bound`.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.satisfaction_solver
            .create_new_integer_variable(lower_bound, upper_bound, None)
    }

    pub fn new_named_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: impl Into<String>,
    ) -> DomainId {
        self.satisfaction_solver.create_new_integer_variable(
            lower_bound,
            upper_bound,
            Some(name.into()),
        )
    }
}

/// Searching.
impl Solver {
    pub fn satisfy<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
    ) -> SatisfactionResult {
        let flag = self.satisfaction_solver.solve(termination, brancher);
        match self.finish_search(flag) {
            SearchEnd::Solution(solution) => SatisfactionResult::Satisfiable(solution),
            SearchEnd::Infeasible | SearchEnd::InfeasibleUnderAssumptions => {
                SatisfactionResult::Unsatisfiable
            }
            SearchEnd::Stopped => SatisfactionResult::Unknown,
        }
    }

    /// Searches for a solution in which every assumption holds.
    ///
    /// The assumptions are decided one per level before the brancher is asked for anything, so
    /// a conflict while they are being decided means no solution satisfies all of them.
    ///
    /// ```rust
    /// # use fd_core::predicate;
    /// # use fd_core::results::SatisfactionResultUnderAssumptions;
    /// # use fd_core::termination::Indefinite;
    /// # use fd_core::Solver;
    /// let mut solver = Solver::default();
    /// let x = solver.new_bounded_integer(0, 3);
    /// let mut brancher = solver.default_brancher();
    ///
    /// let result = solver.satisfy_under_assumptions(
    ///     &mut brancher,
    ///     &mut Indefinite,
    ///     &[predicate!(x >= 2), predicate!(x <= 1)],
    /// );
    /// assert!(matches!(
    ///     result,
    ///     SatisfactionResultUnderAssumptions::UnsatisfiableUnderAssumptions
    /// ));
    /// ```
    pub fn satisfy_under_assumptions<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
        assumptions: &[Predicate],
    ) -> SatisfactionResultUnderAssumptions {
        let flag =
            self.satisfaction_solver
                .solve_under_assumptions(assumptions, termination, brancher);
        match self.finish_search(flag) {
            SearchEnd::Solution(solution) => {
                SatisfactionResultUnderAssumptions::Satisfiable(solution)
            }
            SearchEnd::InfeasibleUnderAssumptions => {
                SatisfactionResultUnderAssumptions::UnsatisfiableUnderAssumptions
            }
            SearchEnd::Infeasible => SatisfactionResultUnderAssumptions::Unsatisfiable,
            SearchEnd::Stopped => SatisfactionResultUnderAssumptions::Unknown,
        }
    }

    /// Runs `procedure`, which owns the objective, its direction and the callback for improving
    /// solutions.
    ///
    /// ```rust
    /// # use fd_core::constraints;
    /// # use fd_core::optimisation::linear_sat_unsat::LinearSatUnsat;
    /// # use fd_core::optimisation::OptimisationDirection;
    /// # use fd_core::results::OptimisationResult;
    /// # use fd_core::results::ProblemSolution;
    /// # use fd_core::results::SolutionReference;
    /// # use fd_core::termination::Indefinite;
    /// # use fd_core::Solver;
    /// let mut solver = Solver::default();
    /// let x = solver.new_bounded_integer(0, 10);
    /// let y = solver.new_bounded_integer(0, 10);
    /// solver
    ///     .add_constraint(constraints::less_than_or_equals([x, y], 12))
    ///     .post()
    ///     .expect("no root conflict");
    ///
    /// let mut brancher = solver.default_brancher();
    /// let mut seen = Vec::new();
    /// let result = solver.optimise(
    ///     &mut brancher,
    ///     &mut Indefinite,
    ///     LinearSatUnsat::new(
    ///         OptimisationDirection::Maximise,
    ///         y,
    ///         |_: &Solver, solution: SolutionReference<'_>, _: &_| {
    ///             seen.push(solution.get_integer_value(y))
    ///         },
    ///     ),
    /// );
    ///
    /// let OptimisationResult::Optimal(best) = result else {
    ///     panic!("the search is not limited, so it ends with a proof");
    /// };
    /// assert_eq!(10, best.get_integer_value(y));
    /// assert_eq!(Some(&10), seen.last());
    /// ```
    pub fn optimise<B, Callback>(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        mut procedure: impl OptimisationProcedure<B, Callback>,
    ) -> OptimisationResult
    where
        B: Brancher,
        Callback: SolutionCallback<B>,
    {
        procedure.optimise(brancher, termination, self)
    }

    /// Takes the solution out of the engine, if there is one, and restores the root.
    fn finish_search(&mut self, flag: CSPSolverExecutionFlag) -> SearchEnd {
        let end = match flag {
            CSPSolverExecutionFlag::Feasible => {
                SearchEnd::Solution(Solution::from(self.satisfaction_solver.get_solution_reference()))
            }
            CSPSolverExecutionFlag::Infeasible => SearchEnd::Infeasible,
            CSPSolverExecutionFlag::InfeasibleUnderAssumptions => {
                SearchEnd::InfeasibleUnderAssumptions
            }
            CSPSolverExecutionFlag::Timeout => SearchEnd::Stopped,
        };
        self.satisfaction_solver.restore_state_at_root();
        end
    }
}

enum SearchEnd {
    Solution(Solution),
    Infeasible,
    InfeasibleUnderAssumptions,
    Stopped,
}

/// Constraints.
impl Solver {
    /// Wraps `constraint` in a [`ConstraintPoster`], which decides how it is added: as is,
    /// implied by a literal, or equivalent to a literal. A poster that is dropped without being
    /// used adds nothing and logs a warning.
    ///
    /// ```
    /// # use fd_core::constraints;
    /// # use fd_core::Solver;
    /// let mut solver = Solver::default();
    /// let a = solver.new_bounded_integer(0, 3);
    /// let b = solver.new_bounded_integer(0, 3);
    ///
    /// solver
    ///     .add_constraint(constraints::equals([a, b], 0))
    ///     .post()
    ///     .expect("a = b = 0 is consistent");
    /// assert_eq!(0, solver.upper_bound(&a));
    /// ```
    pub fn add_constraint<Constraint>(
        &mut self,
        constraint: Constraint,
    ) -> ConstraintPoster<'_, Constraint> {
        ConstraintPoster::new(self, constraint)
    }

    pub(crate) fn add_propagator(
        &mut self,
        propagator: Box<dyn Propagator>,
    ) -> Result<(), ConstraintOperationError> {
        self.satisfaction_solver.add_propagator(propagator)
    }

    /// A [`DefaultBrancher`] over every integer variable created so far.
    pub fn default_brancher(&self) -> DefaultBrancher {
        let variables = self
            .satisfaction_solver
            .get_solution_reference()
            .get_domains()
            .collect::<Vec<_>>();

        IndependentVariableValueBrancher::new(FirstFail::new(&variables), InDomainMin)
    }
}

/// Picks the variable with the smallest domain, ties going to the earliest created, and tries
/// its minimum first.
pub type DefaultBrancher = IndependentVariableValueBrancher<DomainId, FirstFail, InDomainMin>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;
    use crate::predicate;
    use crate::results::ProblemSolution;
    use crate::termination::Indefinite;
    use crate::variables::TransformableVariable;

    #[test]
    fn true_and_false_literals_are_fixed() {
        let solver = Solver::default();

        assert_eq!(solver.lower_bound(&solver.get_true_literal()), 1);
        assert_eq!(solver.upper_bound(&solver.get_false_literal()), 0);
    }

    #[test]
    fn named_variables_keep_their_names() {
        let mut solver = Solver::default();
        let x = solver.new_named_bounded_integer(0, 4, "x");
        let y = solver.new_bounded_integer(0, 4);

        assert_eq!(solver.get_variable_name(x), Some("x"));
        assert_eq!(solver.get_variable_name(y), None);
    }

    #[test]
    fn satisfy_restores_the_root() {
        let mut solver = Solver::default();
        let x = solver.new_bounded_integer(2, 6);
        let mut brancher = solver.default_brancher();

        let result = solver.satisfy(&mut brancher, &mut Indefinite);

        let Some(solution) = result.solution() else {
            panic!("expected a solution, got {result:?}");
        };
        assert_eq!(solution.get_integer_value(x), 2);
        assert_eq!(solver.lower_bound(&x), 2);
        assert_eq!(solver.upper_bound(&x), 6);
    }

    #[test]
    fn root_conflict_makes_the_solver_infeasible() {
        let mut solver = Solver::default();
        let x = solver.new_bounded_integer(0, 3);

        let outcome = solver
            .add_constraint(constraints::less_than_or_equals([x.scaled(-1)], -4))
            .post();

        assert_eq!(outcome, Err(ConstraintOperationError::InfeasiblePropagator));
        assert!(solver.is_infeasible());

        let second = solver
            .add_constraint(constraints::less_than_or_equals([x], 3))
            .post();
        assert_eq!(second, Err(ConstraintOperationError::InfeasibleState));

        let mut brancher = solver.default_brancher();
        assert!(matches!(
            solver.satisfy(&mut brancher, &mut Indefinite),
            SatisfactionResult::Unsatisfiable
        ));
    }

    #[test]
    fn satisfiable_assumptions_are_respected() {
        let mut solver = Solver::default();
        let x = solver.new_bounded_integer(0, 3);
        let mut brancher = solver.default_brancher();

        let result =
            solver.satisfy_under_assumptions(&mut brancher, &mut Indefinite, &[predicate!(x >= 2)]);

        let SatisfactionResultUnderAssumptions::Satisfiable(solution) = result else {
            panic!("expected a solution, got {result:?}");
        };
        assert_eq!(solution.get_integer_value(x), 2);
        assert_eq!(solver.lower_bound(&x), 0);
    }

    #[test]
    fn statistics_accumulate_over_searches() {
        let mut solver = Solver::default();
        let _ = solver.new_bounded_integer(0, 3);
        let mut brancher = solver.default_brancher();

        let _ = solver.satisfy(&mut brancher, &mut Indefinite);
        let after_first = solver.statistics().num_decisions;
        let _ = solver.satisfy(&mut brancher, &mut Indefinite);

        assert_eq!(after_first, 1);
        assert_eq!(solver.statistics().num_decisions, 2);
    }
}
