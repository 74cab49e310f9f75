//! Contains structures related to optimisation.

use solution_callback::SolutionCallback;

use crate::branching::Brancher;
use crate::results::OptimisationResult;
use crate::termination::TerminationCondition;
use crate::Solver;

pub mod linear_sat_unsat;
pub mod solution_callback;

/// A procedure which drives the [`Solver`] towards an optimal solution of an objective.
pub trait OptimisationProcedure<B: Brancher, Callback: SolutionCallback<B>> {
    fn optimise(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        solver: &mut Solver,
    ) -> OptimisationResult;
}

/// The direction of the optimisation, either maximising or minimising.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimisationDirection {
    Maximise,
    Minimise,
}
