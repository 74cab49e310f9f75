use log::debug;
use log::warn;

use super::solution_callback::SolutionCallback;
use super::OptimisationProcedure;
use crate::branching::Brancher;
use crate::optimisation::OptimisationDirection;
use crate::predicate;
use crate::results::OptimisationResult;
use crate::results::ProblemSolution;
use crate::results::SatisfactionResult;
use crate::results::SatisfactionResultUnderAssumptions;
use crate::results::Solution;
use crate::termination::TerminationCondition;
use crate::variables::IntegerVariable;
use crate::Solver;

/// Linear SAT-UNSAT search: every solution is followed by a search for one with a strictly
/// better objective value, until that search fails or is stopped.
///
/// The improvement bound is posted as an assumption, so it disappears again when the engine
/// returns to the root.
#[derive(Debug, Clone, Copy)]
pub struct LinearSatUnsat<Var, Callback> {
    direction: OptimisationDirection,
    objective: Var,
    solution_callback: Callback,
}

/// What a single improvement attempt ended with.
enum Improvement {
    Found(Solution),
    NoneExists,
    Stopped,
}

impl<Var, Callback> LinearSatUnsat<Var, Callback> {
    pub fn new(
        direction: OptimisationDirection,
        objective: Var,
        solution_callback: Callback,
    ) -> Self {
        LinearSatUnsat {
            direction,
            objective,
            solution_callback,
        }
    }
}

impl<Var: IntegerVariable, Callback> LinearSatUnsat<Var, Callback> {
    /// The objective turned into one which is minimised.
    fn minimised_objective(&self) -> Var::AffineView {
        match self.direction {
            OptimisationDirection::Minimise => self.objective.scaled(1),
            OptimisationDirection::Maximise => self.objective.scaled(-1),
        }
    }
}

fn improve<B: Brancher>(
    solver: &mut Solver,
    brancher: &mut B,
    termination: &mut impl TerminationCondition,
    objective: &impl IntegerVariable,
    incumbent_value: i32,
) -> Improvement {
    let Some(bound) = incumbent_value.checked_sub(1) else {
        return Improvement::NoneExists;
    };

    match solver.satisfy_under_assumptions(brancher, termination, &[predicate!(objective <= bound)])
    {
        SatisfactionResultUnderAssumptions::Satisfiable(solution) => Improvement::Found(solution),
        SatisfactionResultUnderAssumptions::UnsatisfiableUnderAssumptions => {
            Improvement::NoneExists
        }
        SatisfactionResultUnderAssumptions::Unsatisfiable => {
            warn!("The problem became unsatisfiable after a solution was found");
            Improvement::NoneExists
        }
        SatisfactionResultUnderAssumptions::Unknown => Improvement::Stopped,
    }
}

impl<Var, Callback, B> OptimisationProcedure<B, Callback> for LinearSatUnsat<Var, Callback>
where
    Var: IntegerVariable,
    B: Brancher,
    Callback: SolutionCallback<B>,
{
    fn optimise(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        solver: &mut Solver,
    ) -> OptimisationResult {
        let objective = self.minimised_objective();

        let mut incumbent = match solver.satisfy(brancher, termination) {
            SatisfactionResult::Satisfiable(solution) => solution,
            SatisfactionResult::Unsatisfiable => return OptimisationResult::Unsatisfiable,
            SatisfactionResult::Unknown => return OptimisationResult::Unknown,
        };

        loop {
            self.solution_callback
                .on_solution_callback(solver, incumbent.as_reference(), brancher);

            let incumbent_value = incumbent.get_integer_value(objective.clone());
            debug!("Improving on minimised objective value {incumbent_value}");

            match improve(solver, brancher, termination, &objective, incumbent_value) {
                Improvement::Found(solution) => incumbent = solution,
                Improvement::NoneExists => return OptimisationResult::Optimal(incumbent),
                Improvement::Stopped => return OptimisationResult::Satisfiable(incumbent),
            }
        }
    }
}
