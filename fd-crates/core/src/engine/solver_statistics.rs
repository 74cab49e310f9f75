use crate::create_statistics_struct;

create_statistics_struct!(
    /// Everything the engine counts over the lifetime of a solver.
    SolverStatistics {
        engine_statistics: EngineStatistics,
});

create_statistics_struct!(
    /// Search counters. They are cumulative over every search on the same solver.
    EngineStatistics {
        num_decisions: u64,
        /// Failed propagations, including those caused by a decision or an assumption.
        num_conflicts: u64,
        /// Propagator calls made from the propagation queue.
        num_propagations: u64,
        /// Milliseconds spent searching.
        time_spent_in_solver: u64,
});
