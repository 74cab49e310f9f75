use std::path::PathBuf;

use crate::cost_table::CostTable;
use crate::result::PlacementError;
use crate::result::PlacementResult;

/// The dimensions of a placement problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementInstance {
    pub no_of_parallel_tracks: usize,
    pub no_of_talks: usize,
    pub no_of_time_slots: usize,
    /// The largest conflict cost a single pair may have.
    pub max_single_cost: i32,
}

impl Default for PlacementInstance {
    fn default() -> Self {
        PlacementInstance::balanced(6, 6, 50)
    }
}

impl PlacementInstance {
    /// An instance in which every slot of every track holds exactly one talk.
    pub fn balanced(
        no_of_parallel_tracks: usize,
        no_of_time_slots: usize,
        max_single_cost: i32,
    ) -> Self {
        PlacementInstance {
            no_of_parallel_tracks,
            no_of_talks: no_of_parallel_tracks.saturating_mul(no_of_time_slots),
            no_of_time_slots,
            max_single_cost,
        }
    }

    /// Checks that all sizes are positive, that the number of talks equals
    /// `no_of_parallel_tracks * no_of_time_slots`, and that the maximum cost is non-negative.
    pub fn validate(&self) -> PlacementResult<()> {
        if self.no_of_parallel_tracks == 0 || self.no_of_talks == 0 || self.no_of_time_slots == 0
        {
            return Err(PlacementError::configuration(format!(
                "the number of tracks ({}), talks ({}) and time slots ({}) must be positive",
                self.no_of_parallel_tracks, self.no_of_talks, self.no_of_time_slots
            )));
        }

        if self.no_of_parallel_tracks.checked_mul(self.no_of_time_slots) != Some(self.no_of_talks)
        {
            return Err(PlacementError::configuration(format!(
                "{} talks do not fill {} tracks of {} time slots",
                self.no_of_talks, self.no_of_parallel_tracks, self.no_of_time_slots
            )));
        }

        if self.max_single_cost < 0 {
            return Err(PlacementError::configuration(format!(
                "the maximum single cost {} is negative",
                self.max_single_cost
            )));
        }

        Ok(())
    }
}

/// Where the conflict costs of an instance come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostSource {
    /// Costs drawn uniformly from `[0, max_single_cost)` with the given seed.
    Random { seed: u64 },
    /// `(talk_a, talk_b, cost)` triples.
    Explicit(Vec<(usize, usize, i32)>),
    /// A cost file in the format of [`CostTable::parse`].
    File(PathBuf),
}

impl Default for CostSource {
    fn default() -> Self {
        CostSource::Random { seed: 55 }
    }
}

impl CostSource {
    /// Builds the cost table for `instance`.
    pub fn build_table(&self, instance: &PlacementInstance) -> PlacementResult<CostTable> {
        match self {
            CostSource::Random { seed } => {
                CostTable::random(instance.no_of_talks, *seed, instance.max_single_cost)
            }
            CostSource::Explicit(entries) => {
                CostTable::from_explicit_entries(entries.iter().copied(), instance.no_of_talks)
            }
            CostSource::File(path) => CostTable::from_file(path, instance.no_of_talks),
        }
    }
}
