//! The constraint model of a placement problem.
use std::iter::once;

use fd_core::constraints;
use fd_core::variables::DomainId;
use fd_core::variables::TransformableVariable;
use fd_core::Solver;
use itertools::Itertools;
use log::debug;

use crate::cost_table::CostTable;
use crate::cost_table::TalkPair;
use crate::instance::PlacementInstance;
use crate::result::PlacementError;
use crate::result::PlacementResult;

/// The variables and constraints of a placement problem, together with the [`Solver`] that holds
/// them.
///
/// - Every talk gets a placement variable with the domain `[0, no_of_parallel_tracks)`.
/// - Every track gets a count variable, equal to the number of talks placed in it.
/// - Every pair of talks `(i, j)` gets a cost variable which equals `cost(i, j)` when both talks
///   share a track and `0` otherwise.
/// - The total cost equals the sum of the pair costs.
///
/// The choice matrix has one row `[pair cost, placement of i, placement of j]` per pair, in the
/// order `(0, 1), (0, 2), ..., (1, 2), ...`.
#[derive(Debug)]
pub struct PlacementModel {
    solver: Solver,
    instance: PlacementInstance,
    table: CostTable,
    placement: Vec<DomainId>,
    track_counts: Vec<DomainId>,
    pair_costs: Vec<(TalkPair, DomainId)>,
    total_cost: DomainId,
    choice_matrix: Vec<Vec<DomainId>>,
}

impl PlacementModel {
    /// Creates the variables and posts the constraints of `instance` with the costs of `table`.
    ///
    /// Fails with [`PlacementError::ConfigurationError`] before anything is created if the
    /// instance is invalid, if the table was built for a different number of talks, or if a cost
    /// exceeds the maximum single cost. A conflict while posting a constraint is reported as
    /// [`PlacementError::ModelInconsistent`].
    pub fn build(instance: PlacementInstance, table: CostTable) -> PlacementResult<PlacementModel> {
        instance.validate()?;

        if table.no_of_talks() != instance.no_of_talks {
            return Err(PlacementError::configuration(format!(
                "the cost table is built for {} talks, the instance has {}",
                table.no_of_talks(),
                instance.no_of_talks
            )));
        }
        if let Some((pair, cost)) = table
            .iter()
            .find(|&(_, cost)| cost > instance.max_single_cost)
        {
            return Err(PlacementError::configuration(format!(
                "the cost {cost} of {pair} exceeds the maximum single cost {}",
                instance.max_single_cost
            )));
        }

        let no_of_tracks = to_bound(instance.no_of_parallel_tracks)?;
        let no_of_talks = to_bound(instance.no_of_talks)?;
        let no_of_time_slots = to_bound(instance.no_of_time_slots)?;

        let mut solver = Solver::default();

        let placement = (0..instance.no_of_talks)
            .map(|talk| {
                solver.new_named_bounded_integer(0, no_of_tracks - 1, format!("talk[{talk}]-track"))
            })
            .collect::<Vec<_>>();

        // One below the balanced occupancy. The upper bounds force a balanced split regardless.
        let min_talks_per_track = no_of_talks / no_of_tracks - 1;
        let track_counts = (0..instance.no_of_parallel_tracks)
            .map(|track| {
                solver.new_named_bounded_integer(
                    min_talks_per_track,
                    no_of_time_slots,
                    format!("noOfTalksIn-{track}-th-Track"),
                )
            })
            .collect::<Vec<_>>();

        for (track, &count) in (0..no_of_tracks).zip(&track_counts) {
            solver
                .add_constraint(constraints::count(placement.clone(), track, count))
                .post()?;
        }

        let mut pair_costs = Vec::new();
        let mut choice_matrix = Vec::new();
        for (i, j) in (0..instance.no_of_talks).tuple_combinations::<(usize, usize)>() {
            let cost = table.cost(i, j);
            let pair_cost =
                solver.new_named_bounded_integer(0, cost, format!("pair({i}, {j})Cost"));

            if cost > 0 {
                let same_track = solver.new_named_literal(format!("sameTrack({i}, {j})"));

                solver
                    .add_constraint(constraints::binary_equals(placement[i], placement[j]))
                    .reify(same_track)?;
                solver
                    .add_constraint(constraints::equals([pair_cost], cost))
                    .implied_by(same_track)?;
                solver
                    .add_constraint(constraints::equals([pair_cost], 0))
                    .implied_by(!same_track)?;
                solver
                    .add_constraint(constraints::member(pair_cost, [0, cost]))
                    .post()?;
            } else {
                solver
                    .add_constraint(constraints::equals([pair_cost], 0))
                    .post()?;
            }

            pair_costs.push((TalkPair::new(i, j), pair_cost));
            choice_matrix.push(vec![pair_cost, placement[i], placement[j]]);
        }

        let total_cost = solver.new_named_bounded_integer(0, i32::MAX, "cost");
        let sum_terms = pair_costs
            .iter()
            .map(|(_, pair_cost)| pair_cost.scaled(1))
            .chain(once(total_cost.scaled(-1)))
            .collect::<Vec<_>>();
        solver
            .add_constraint(constraints::equals(sum_terms, 0))
            .post()?;

        debug!(
            "Built a model with {} talks, {} tracks and {} pairs",
            placement.len(),
            track_counts.len(),
            pair_costs.len()
        );

        Ok(PlacementModel {
            solver,
            instance,
            table,
            placement,
            track_counts,
            pair_costs,
            total_cost,
            choice_matrix,
        })
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    pub(crate) fn solver_mut(&mut self) -> &mut Solver {
        &mut self.solver
    }

    pub fn instance(&self) -> &PlacementInstance {
        &self.instance
    }

    pub fn cost_table(&self) -> &CostTable {
        &self.table
    }

    /// The track of every talk, indexed by talk.
    pub fn placement_variables(&self) -> &[DomainId] {
        &self.placement
    }

    /// The number of talks in every track, indexed by track.
    pub fn track_count_variables(&self) -> &[DomainId] {
        &self.track_counts
    }

    pub fn pair_cost_variables(&self) -> &[(TalkPair, DomainId)] {
        &self.pair_costs
    }

    /// The objective.
    pub fn total_cost(&self) -> DomainId {
        self.total_cost
    }

    pub fn choice_matrix(&self) -> &[Vec<DomainId>] {
        &self.choice_matrix
    }

    /// The total cost of `placement`, which gives the track of every talk.
    ///
    /// Pairs that involve a talk beyond the end of `placement` do not count.
    pub fn evaluate(&self, placement: &[usize]) -> i64 {
        self.table
            .iter()
            .filter(|(pair, _)| {
                matches!(
                    (placement.get(pair.first()), placement.get(pair.second())),
                    (Some(a), Some(b)) if a == b
                )
            })
            .map(|(_, cost)| i64::from(cost))
            .sum()
    }
}

fn to_bound(size: usize) -> PlacementResult<i32> {
    i32::try_from(size)
        .map_err(|_| PlacementError::configuration(format!("{size} does not fit a domain bound")))
}
