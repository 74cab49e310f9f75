//! Branch-and-bound search over a [`PlacementModel`].
use std::time::Duration;
use std::time::Instant;

use fd_core::branching::branchers::matrix_brancher::DomainSize;
use fd_core::branching::branchers::matrix_brancher::MatrixBrancher;
use fd_core::branching::branchers::matrix_brancher::Regret;
use fd_core::branching::value_selection::InDomainMin;
use fd_core::constraints;
use fd_core::optimisation::linear_sat_unsat::LinearSatUnsat;
use fd_core::optimisation::OptimisationDirection;
use fd_core::results::OptimisationResult;
use fd_core::results::ProblemSolution;
use fd_core::results::SatisfactionResult;
use fd_core::results::Solution;
use fd_core::results::SolutionReference;
use fd_core::statistics::EngineStatistics;
use fd_core::termination::TimeBudget;
use fd_core::Solver;
use log::info;
use log::warn;

use crate::lower_bound;
use crate::model::PlacementModel;
use crate::report::PlacementReport;
use crate::report::SearchOutcome;

/// The brancher used by every search: rows of the choice matrix with the largest regret on the
/// pair cost first, ties broken by the smallest placement domain, and the minimum value first.
pub type PlacementBrancher = MatrixBrancher<Regret, DomainSize, InDomainMin>;

/// Runs searches on a [`PlacementModel`].
///
/// Every search uses a fresh brancher and time budget, and leaves the engine at the root. A
/// timeout of zero or fewer seconds means no time limit.
#[derive(Debug)]
pub struct SearchStrategy<'model> {
    model: &'model mut PlacementModel,
    lower_bound: i64,
}

impl<'model> SearchStrategy<'model> {
    pub fn new(model: &'model mut PlacementModel) -> Self {
        let instance = model.instance();
        let lower_bound = lower_bound::estimate(
            instance.no_of_parallel_tracks,
            instance.no_of_time_slots,
            model.cost_table(),
        );
        info!("Lower bound estimate on the total cost: {lower_bound}");

        SearchStrategy { model, lower_bound }
    }

    /// The relaxation lower bound included in every report.
    pub fn lower_bound(&self) -> i64 {
        self.lower_bound
    }

    /// Minimises the total cost with linear SAT-UNSAT search.
    ///
    /// Every improving placement is logged. The outcome is [`SearchOutcome::Optimal`] when no
    /// cheaper placement exists, [`SearchOutcome::BestFound`] when the time ran out after a
    /// placement was found, and otherwise [`SearchOutcome::Infeasible`] or
    /// [`SearchOutcome::Unknown`].
    pub fn find_optimal(&mut self, timeout_seconds: i64) -> PlacementReport {
        let start = Instant::now();
        let statistics_before = self.model.solver().statistics();

        let mut brancher = self.brancher();
        let mut termination = time_budget(timeout_seconds);
        let total_cost = self.model.total_cost();
        let mut improving_solutions = 0;

        let result = self.model.solver_mut().optimise(
            &mut brancher,
            &mut termination,
            LinearSatUnsat::new(
                OptimisationDirection::Minimise,
                total_cost,
                |_: &Solver, solution: SolutionReference<'_>, _: &PlacementBrancher| {
                    improving_solutions += 1;
                    info!(
                        "Found a placement with total cost {}",
                        solution.get_integer_value(total_cost)
                    );
                },
            ),
        );

        let (outcome, solution) = match result {
            OptimisationResult::Optimal(solution) => (SearchOutcome::Optimal, Some(solution)),
            OptimisationResult::Satisfiable(solution) => (SearchOutcome::BestFound, Some(solution)),
            OptimisationResult::Unsatisfiable => (SearchOutcome::Infeasible, None),
            OptimisationResult::Unknown => (SearchOutcome::Unknown, None),
        };

        self.report(
            outcome,
            solution.as_ref(),
            improving_solutions,
            start,
            statistics_before,
        )
    }

    /// Searches for any placement with a total cost of at most `max_cost_allowed`.
    ///
    /// The cap is added to the model permanently, so repeated calls can only tighten it. Without
    /// a cap (or with a negative one, which is ignored) this is a plain feasibility search. The
    /// outcome is [`SearchOutcome::Satisfiable`], [`SearchOutcome::Infeasible`] or
    /// [`SearchOutcome::Unknown`].
    pub fn find_under_bound(
        &mut self,
        max_cost_allowed: Option<i32>,
        timeout_seconds: i64,
    ) -> PlacementReport {
        let start = Instant::now();
        let statistics_before = self.model.solver().statistics();

        match max_cost_allowed {
            Some(cap) if cap >= 0 => {
                let total_cost = self.model.total_cost();
                let imposed = self
                    .model
                    .solver_mut()
                    .add_constraint(constraints::less_than_or_equals([total_cost], cap))
                    .post();

                if let Err(error) = imposed {
                    info!("No placement costs at most {cap}: {error}");
                    return self.report(
                        SearchOutcome::Infeasible,
                        None,
                        0,
                        start,
                        statistics_before,
                    );
                }
            }
            Some(cap) => warn!("Ignoring the negative cost cap {cap}"),
            None => {}
        }

        let mut brancher = self.brancher();
        let mut termination = time_budget(timeout_seconds);

        let (outcome, solution) = match self
            .model
            .solver_mut()
            .satisfy(&mut brancher, &mut termination)
        {
            SatisfactionResult::Satisfiable(solution) => {
                (SearchOutcome::Satisfiable, Some(solution))
            }
            SatisfactionResult::Unsatisfiable => (SearchOutcome::Infeasible, None),
            SatisfactionResult::Unknown => (SearchOutcome::Unknown, None),
        };

        let improving_solutions = usize::from(solution.is_some());
        self.report(
            outcome,
            solution.as_ref(),
            improving_solutions,
            start,
            statistics_before,
        )
    }

    /// Repeatedly calls [`SearchStrategy::find_under_bound`], each time lowering the cap to
    /// `step_percent` percent below the cost just found (and at least one below it), until a run
    /// finds nothing.
    ///
    /// Returns the report of the last successful run, or that of the first run if it failed.
    pub fn descend_from_above(
        &mut self,
        initial_cap: Option<i32>,
        step_percent: u32,
        timeout_seconds: i64,
    ) -> PlacementReport {
        let step_percent = i64::from(step_percent.min(100));
        let mut cap = initial_cap;
        let mut last_success: Option<PlacementReport> = None;

        loop {
            let report = self.find_under_bound(cap, timeout_seconds);

            let Some(found_cost) = report.total_cost() else {
                return last_success.unwrap_or(report);
            };
            info!("Found a placement with total cost {found_cost}");

            let lowered = (found_cost * (100 - step_percent) / 100).min(found_cost - 1);
            let Ok(next_cap) = i32::try_from(lowered) else {
                return report;
            };
            if next_cap < 0 {
                return report;
            }

            cap = Some(next_cap);
            last_success = Some(report);
        }
    }

    fn brancher(&self) -> PlacementBrancher {
        MatrixBrancher::new(
            self.model.choice_matrix().to_vec(),
            Regret,
            DomainSize,
            InDomainMin,
        )
    }

    fn report(
        &self,
        outcome: SearchOutcome,
        solution: Option<&Solution>,
        improving_solutions: usize,
        start: Instant,
        statistics_before: EngineStatistics,
    ) -> PlacementReport {
        // Track ids are non-negative by construction of the placement domains.
        let placement = solution.map(|solution| {
            self.model
                .placement_variables()
                .iter()
                .map(|&talk| solution.get_integer_value(talk) as usize)
                .collect::<Vec<_>>()
        });
        let total_cost =
            solution.map(|solution| i64::from(solution.get_integer_value(self.model.total_cost())));

        let elapsed = start.elapsed();
        info!("Search finished as {outcome} after {} ms", elapsed.as_millis());

        PlacementReport {
            outcome,
            no_of_parallel_tracks: self.model.instance().no_of_parallel_tracks,
            placement,
            total_cost,
            elapsed,
            lower_bound: self.lower_bound,
            improving_solutions,
            statistics: statistics_since(statistics_before, self.model.solver().statistics()),
        }
    }
}

fn time_budget(timeout_seconds: i64) -> Option<TimeBudget> {
    u64::try_from(timeout_seconds)
        .ok()
        .filter(|&seconds| seconds > 0)
        .map(|seconds| TimeBudget::starting_now(Duration::from_secs(seconds)))
}

fn statistics_since(before: EngineStatistics, after: EngineStatistics) -> EngineStatistics {
    EngineStatistics {
        num_decisions: after.num_decisions.saturating_sub(before.num_decisions),
        num_conflicts: after.num_conflicts.saturating_sub(before.num_conflicts),
        num_propagations: after.num_propagations.saturating_sub(before.num_propagations),
        time_spent_in_solver: after
            .time_spent_in_solver
            .saturating_sub(before.time_spent_in_solver),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_timeout_means_no_limit() {
        assert!(time_budget(0).is_none());
        assert!(time_budget(-3).is_none());
        assert!(time_budget(2).is_some());
    }

    #[test]
    fn statistics_of_a_run_exclude_earlier_runs() {
        let before = EngineStatistics {
            num_decisions: 3,
            num_conflicts: 1,
            num_propagations: 40,
            time_spent_in_solver: 5,
        };
        let after = EngineStatistics {
            num_decisions: 10,
            num_conflicts: 4,
            num_propagations: 100,
            time_spent_in_solver: 9,
        };

        let run = statistics_since(before, after);

        assert_eq!(run.num_decisions, 7);
        assert_eq!(run.num_conflicts, 3);
        assert_eq!(run.num_propagations, 60);
        assert_eq!(run.time_spent_in_solver, 4);
    }
}
