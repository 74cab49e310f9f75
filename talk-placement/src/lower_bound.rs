//! A relaxation lower bound on the total cost of a placement, used for reporting only.
use itertools::Itertools;

use crate::cost_table::CostTable;

/// Sums the `no_of_time_slots * C(no_of_parallel_tracks, 2)` smallest pair costs (all of them if
/// there are fewer pairs).
///
/// Every pair of talks contributes its cost, where a pair without an entry costs `0`.
///
/// The number of summed pairs equals the number of same-track pairs of a balanced placement,
/// `no_of_parallel_tracks * C(no_of_time_slots, 2)`, only when both sizes are equal; the bound is
/// admissible whenever `no_of_parallel_tracks <= no_of_time_slots`.
pub fn estimate(no_of_parallel_tracks: usize, no_of_time_slots: usize, table: &CostTable) -> i64 {
    let pairs_per_slot = no_of_parallel_tracks * no_of_parallel_tracks.saturating_sub(1) / 2;
    let no_of_counted_pairs = no_of_time_slots * pairs_per_slot;

    (0..table.no_of_talks())
        .tuple_combinations::<(usize, usize)>()
        .map(|(a, b)| i64::from(table.cost(a, b)))
        .sorted_unstable()
        .take(no_of_counted_pairs)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smallest_costs_are_summed() {
        // 2 tracks and 2 slots count 2 pairs; the four absent pairs cost 0.
        let table = CostTable::from_explicit_entries([(0, 1, 10), (2, 3, 10)], 4).unwrap();

        assert_eq!(estimate(2, 2, &table), 0);
    }

    #[test]
    fn uniform_costs() {
        let entries = (0..4)
            .tuple_combinations::<(usize, usize)>()
            .map(|(a, b)| (a, b, 5));
        let table = CostTable::from_explicit_entries(entries, 4).unwrap();

        assert_eq!(estimate(2, 2, &table), 10);
    }

    #[test]
    fn all_costs_are_summed_when_fewer_exist() {
        let table = CostTable::from_explicit_entries([(0, 1, 4), (0, 2, 1), (1, 2, 2)], 3).unwrap();

        // 3 tracks and 3 slots would count 9 pairs, but only 3 exist.
        assert_eq!(estimate(3, 3, &table), 7);
    }

    #[test]
    fn single_track_has_no_conflicting_slots() {
        let table = CostTable::random(4, 3, 20).unwrap();

        assert_eq!(estimate(1, 4, &table), 0);
    }
}
