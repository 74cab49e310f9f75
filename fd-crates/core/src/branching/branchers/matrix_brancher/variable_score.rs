use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// Ranks a single variable for the [`MatrixBrancher`]; a larger rank is preferred.
///
/// [`MatrixBrancher`]: super::MatrixBrancher
pub trait VariableScore {
    fn rank(&self, context: &SelectionContext, variable: DomainId) -> i64;
}

/// The difference between the two smallest values in the domain, larger is better. A fixed
/// variable has a regret of 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Regret;

impl VariableScore for Regret {
    fn rank(&self, context: &SelectionContext, variable: DomainId) -> i64 {
        context
            .second_smallest_value(variable)
            .map_or(0, |second| {
                i64::from(second) - i64::from(context.lower_bound(variable))
            })
    }
}

/// The number of values in the domain, smaller is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainSize;

impl VariableScore for DomainSize {
    fn rank(&self, context: &SelectionContext, variable: DomainId) -> i64 {
        -i64::from(context.get_size_of_domain(variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;

    #[test]
    fn regret_measures_the_gap_above_the_lower_bound() {
        let mut assignments = SelectionContext::create_for_testing(vec![(1, 8), (4, 4)]);
        let ids = assignments.get_domains().collect::<Vec<_>>();
        let _ = assignments.post_predicate(predicate!(ids[0] != 2));

        let context = SelectionContext::new(&assignments);

        assert_eq!(2, Regret.rank(&context, ids[0]));
        assert_eq!(0, Regret.rank(&context, ids[1]));
    }

    #[test]
    fn smaller_domains_rank_higher() {
        let assignments = SelectionContext::create_for_testing(vec![(0, 9), (0, 2)]);
        let ids = assignments.get_domains().collect::<Vec<_>>();
        let context = SelectionContext::new(&assignments);

        assert!(DomainSize.rank(&context, ids[1]) > DomainSize.rank(&context, ids[0]));
    }

    #[test]
    fn a_wide_gap_is_one_step_of_regret() {
        let mut assignments = SelectionContext::create_for_testing(vec![(0, 3_000_000)]);
        let ids = assignments.get_domains().collect::<Vec<_>>();
        let _ = assignments.remove_range(ids[0], 1, 2_999_999);

        let context = SelectionContext::new(&assignments);

        assert_eq!(3_000_000, Regret.rank(&context, ids[0]));
        assert_eq!(-2, DomainSize.rank(&context, ids[0]));
    }
}
