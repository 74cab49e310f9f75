//! The outcome of a search run.
use std::fmt::Display;
use std::time::Duration;

use fd_core::statistics::log_statistic;
use fd_core::statistics::log_statistic_postfix;
use fd_core::statistics::should_log_statistics;
use fd_core::statistics::EngineStatistics;
use fd_core::statistics::Statistic;
use fd_core::statistics::StatisticLogger;
use itertools::Itertools;

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A placement was found and proven to have the minimal total cost.
    Optimal,
    /// The time ran out after at least one placement was found.
    BestFound,
    /// A placement within the cost cap was found.
    Satisfiable,
    /// The engine proved that no placement exists.
    Infeasible,
    /// The time ran out before any placement was found.
    Unknown,
}

impl Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SearchOutcome::Optimal => "optimal",
            SearchOutcome::BestFound => "best found",
            SearchOutcome::Satisfiable => "satisfiable",
            SearchOutcome::Infeasible => "infeasible",
            SearchOutcome::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// The result of one call into [`SearchStrategy`](crate::search::SearchStrategy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementReport {
    pub(crate) outcome: SearchOutcome,
    pub(crate) no_of_parallel_tracks: usize,
    pub(crate) placement: Option<Vec<usize>>,
    pub(crate) total_cost: Option<i64>,
    pub(crate) elapsed: Duration,
    pub(crate) lower_bound: i64,
    pub(crate) improving_solutions: usize,
    pub(crate) statistics: EngineStatistics,
}

impl PlacementReport {
    pub fn is_solution_found(&self) -> bool {
        self.placement.is_some()
    }

    pub fn outcome(&self) -> SearchOutcome {
        self.outcome
    }

    /// The track of every talk, indexed by talk.
    pub fn placement(&self) -> Option<&[usize]> {
        self.placement.as_deref()
    }

    pub fn total_cost(&self) -> Option<i64> {
        self.total_cost
    }

    /// The wall-clock time of the run.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn lower_bound(&self) -> i64 {
        self.lower_bound
    }

    /// The number of placements found, each cheaper than the previous one.
    pub fn improving_solutions(&self) -> usize {
        self.improving_solutions
    }

    /// The engine counters accumulated during this run.
    pub fn statistics(&self) -> EngineStatistics {
        self.statistics
    }

    /// Logs the report through the statistic logging of the engine; nothing is written unless
    /// statistic logging has been configured.
    pub fn log_statistics(&self) {
        if !should_log_statistics() {
            return;
        }
        log_statistic("outcome", self.outcome);
        if let Some(total_cost) = self.total_cost {
            log_statistic("objective", total_cost);
        }
        log_statistic("lowerBound", self.lower_bound);
        log_statistic("elapsedMs", self.elapsed.as_millis());
        log_statistic("improvingSolutions", self.improving_solutions);
        self.statistics.log(StatisticLogger::default());
        log_statistic_postfix();
    }
}

impl Display for PlacementReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Outcome: {}", self.outcome)?;

        let Some((placement, total_cost)) = self.placement.as_ref().zip(self.total_cost) else {
            writeln!(f, "Failed to find any solution")?;
            return write!(f, "Execution time = {} ms", self.elapsed.as_millis());
        };

        writeln!(
            f,
            "Total cost: {total_cost} (lower bound {})",
            self.lower_bound
        )?;
        for track in 0..self.no_of_parallel_tracks {
            let talks = placement
                .iter()
                .positions(|&assigned| assigned == track)
                .join(", ");
            writeln!(f, "Track {track}: {talks}")?;
        }
        write!(f, "Execution time = {} ms", self.elapsed.as_millis())
    }
}
