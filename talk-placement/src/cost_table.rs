//! The sparse table of conflict costs between pairs of talks.
use std::fmt::Display;
use std::fs;
use std::path::Path;

use fnv::FnvHashMap;
use itertools::Itertools;
use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use crate::result::PlacementError;
use crate::result::PlacementResult;

/// An unordered pair of distinct talks, stored with the smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TalkPair {
    first: usize,
    second: usize,
}

impl TalkPair {
    /// Creates the pair `{a, b}`; the order of the arguments does not matter.
    pub fn new(a: usize, b: usize) -> Self {
        TalkPair {
            first: a.min(b),
            second: a.max(b),
        }
    }

    /// The talk with the smaller id.
    pub fn first(&self) -> usize {
        self.first
    }

    /// The talk with the larger id.
    pub fn second(&self) -> usize {
        self.second
    }
}

impl Display for TalkPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// The cost incurred when two talks are placed in the same track.
///
/// Pairs without an entry cost `0`. Every key lies within `[0, no_of_talks)` and every cost is
/// non-negative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostTable {
    no_of_talks: usize,
    costs: FnvHashMap<TalkPair, i32>,
}

impl CostTable {
    /// Builds the table from `(talk_a, talk_b, cost)` triples.
    ///
    /// Fails on the first entry with a talk outside `[0, no_of_talks)`, with `talk_a >= talk_b`,
    /// or with a negative cost. When several entries name the same pair, the last one is kept.
    pub fn from_explicit_entries(
        entries: impl IntoIterator<Item = (usize, usize, i32)>,
        no_of_talks: usize,
    ) -> PlacementResult<CostTable> {
        let mut costs = FnvHashMap::default();

        for (talk_a, talk_b, cost) in entries {
            if talk_a >= talk_b || talk_b >= no_of_talks || cost < 0 {
                return Err(PlacementError::InvalidCostEntry {
                    talk_a,
                    talk_b,
                    cost,
                    no_of_talks,
                });
            }

            if let Some(previous) = costs.insert(TalkPair::new(talk_a, talk_b), cost) {
                debug!("Cost of ({talk_a}, {talk_b}) overwritten; {previous} is replaced by {cost}");
            }
        }

        Ok(CostTable { no_of_talks, costs })
    }

    /// Generates a cost for every pair of talks, drawn uniformly from `[0, max_single_cost)`.
    ///
    /// The pairs are drawn in the order `(0, 1), (0, 2), ..., (1, 2), ...` from a generator
    /// seeded with `seed`, so the same arguments always give the same table.
    pub fn random(
        no_of_talks: usize,
        seed: u64,
        max_single_cost: i32,
    ) -> PlacementResult<CostTable> {
        if max_single_cost <= 0 {
            return Err(PlacementError::configuration(format!(
                "random costs are drawn from [0, {max_single_cost}), which is empty"
            )));
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let costs = (0..no_of_talks)
            .tuple_combinations::<(usize, usize)>()
            .map(|(a, b)| (TalkPair::new(a, b), rng.gen_range(0..max_single_cost)))
            .collect();

        Ok(CostTable { no_of_talks, costs })
    }

    /// Parses explicit entries from text with one `talk_a talk_b cost` triple per line.
    ///
    /// Everything after a `#` is a comment; blank lines are skipped.
    pub fn parse(text: &str, no_of_talks: usize) -> PlacementResult<CostTable> {
        let mut entries = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let content = line.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }

            let fields = content.split_whitespace().collect::<Vec<_>>();
            let [talk_a, talk_b, cost] = fields.as_slice() else {
                return Err(PlacementError::CostFile {
                    line: line_number,
                    message: format!("expected 3 fields, found {}", fields.len()),
                });
            };

            entries.push((
                parse_field(talk_a, "talk", line_number)?,
                parse_field(talk_b, "talk", line_number)?,
                parse_field(cost, "cost", line_number)?,
            ));
        }

        CostTable::from_explicit_entries(entries, no_of_talks)
    }

    /// Reads and parses a cost file; see [`CostTable::parse`] for the format.
    pub fn from_file(path: impl AsRef<Path>, no_of_talks: usize) -> PlacementResult<CostTable> {
        let text = fs::read_to_string(path)?;
        CostTable::parse(&text, no_of_talks)
    }

    /// The cost of placing `a` and `b` in the same track.
    pub fn cost(&self, a: usize, b: usize) -> i32 {
        self.costs
            .get(&TalkPair::new(a, b))
            .copied()
            .unwrap_or_default()
    }

    /// The number of pairs with an entry.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// The entries in an unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (TalkPair, i32)> + '_ {
        self.costs.iter().map(|(&pair, &cost)| (pair, cost))
    }

    /// The number of talks the table was built for.
    pub fn no_of_talks(&self) -> usize {
        self.no_of_talks
    }

    /// The largest cost in the table, or `0` if it is empty.
    pub fn max_cost(&self) -> i32 {
        self.costs.values().copied().max().unwrap_or_default()
    }
}

fn parse_field<T: std::str::FromStr>(
    field: &str,
    kind: &str,
    line: usize,
) -> PlacementResult<T> {
    field.parse().map_err(|_| PlacementError::CostFile {
        line,
        message: format!("'{field}' is not a valid {kind}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_pairs_cost_nothing() {
        let table = CostTable::from_explicit_entries([(0, 1, 10), (2, 3, 7)], 4).unwrap();

        assert_eq!(table.cost(0, 1), 10);
        assert_eq!(table.cost(1, 0), 10);
        assert_eq!(table.cost(3, 2), 7);
        assert_eq!(table.cost(0, 2), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.max_cost(), 10);
    }

    #[test]
    fn invalid_entries_are_rejected() {
        for entry in [(1, 0, 3), (2, 2, 3), (0, 4, 3), (0, 1, -1)] {
            let result = CostTable::from_explicit_entries([entry], 4);

            assert!(
                matches!(result, Err(PlacementError::InvalidCostEntry { .. })),
                "{entry:?} should be rejected"
            );
        }
    }

    #[test]
    fn last_duplicate_entry_wins() {
        let table = CostTable::from_explicit_entries([(0, 1, 10), (0, 1, 3)], 2).unwrap();

        assert_eq!(table.cost(0, 1), 3);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn random_table_is_deterministic() {
        let first = CostTable::random(12, 55, 50).unwrap();
        let second = CostTable::random(12, 55, 50).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 12 * 11 / 2);
        assert!(first.iter().all(|(_, cost)| (0..50).contains(&cost)));
    }

    #[test]
    fn random_table_needs_a_positive_range() {
        assert!(matches!(
            CostTable::random(4, 1, 0),
            Err(PlacementError::ConfigurationError(_))
        ));
    }

    #[test]
    fn cost_file_with_comments_is_parsed() {
        let text = "# talk_a talk_b cost\n0 1 10\n\n2 3 10 # the second pair\n";

        let table = CostTable::parse(text, 4).unwrap();

        assert_eq!(table.cost(0, 1), 10);
        assert_eq!(table.cost(2, 3), 10);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn malformed_cost_file_reports_the_line() {
        let missing_field = CostTable::parse("0 1 10\n1 2\n", 4);
        assert!(matches!(
            missing_field,
            Err(PlacementError::CostFile { line: 2, .. })
        ));

        let not_a_number = CostTable::parse("\n0 x 10\n", 4);
        assert!(matches!(
            not_a_number,
            Err(PlacementError::CostFile { line: 2, .. })
        ));
    }
}
