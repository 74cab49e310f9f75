pub use crate::basic_types::ProblemSolution;
use crate::basic_types::Solution;
pub use crate::basic_types::SolutionReference;
#[cfg(doc)]
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// Outcome of [`Solver::satisfy`].
#[derive(Debug)]
pub enum SatisfactionResult {
    Satisfiable(Solution),
    /// The search space was exhausted without a solution.
    Unsatisfiable,
    /// The [`TerminationCondition`] fired before the search was decided.
    Unknown,
}

/// Outcome of [`Solver::satisfy_under_assumptions`].
#[derive(Debug)]
pub enum SatisfactionResultUnderAssumptions {
    Satisfiable(Solution),
    /// The problem has no solution in which every assumption holds, but may have one without
    /// them.
    UnsatisfiableUnderAssumptions,
    /// The problem has no solution at all.
    Unsatisfiable,
    /// The [`TerminationCondition`] fired before the search was decided.
    Unknown,
}

/// Outcome of [`Solver::optimise`].
#[derive(Debug)]
pub enum OptimisationResult {
    /// No solution with a better objective exists.
    Optimal(Solution),
    /// The best solution seen before the search was stopped; it may not be optimal.
    Satisfiable(Solution),
    Unsatisfiable,
    /// Stopped before any solution was found.
    Unknown,
}

impl OptimisationResult {
    /// The best solution found, whether proven optimal or not.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            OptimisationResult::Optimal(solution) | OptimisationResult::Satisfiable(solution) => {
                Some(solution)
            }
            OptimisationResult::Unsatisfiable | OptimisationResult::Unknown => None,
        }
    }
}

impl SatisfactionResult {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SatisfactionResult::Satisfiable(solution) => Some(solution),
            SatisfactionResult::Unsatisfiable | SatisfactionResult::Unknown => None,
        }
    }
}
