use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// Bounds propagation for `sum(terms) <= rhs`.
///
/// Each term may use at most the room the other terms leave at their lower bounds, so its upper
/// bound drops to `rhs - (lb(sum) - lb(term))`. Sums are taken in `i64`; an objective over
/// `[0, i32::MAX]` would overflow otherwise.
#[derive(Debug)]
pub(crate) struct LinearLessOrEqualPropagator<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var: IntegerVariable> LinearLessOrEqualPropagator<Var> {
    pub(crate) fn new(terms: Box<[Var]>, rhs: i32) -> Self {
        LinearLessOrEqualPropagator { terms, rhs }
    }

    fn minimum_sum(&self, context: &impl ReadDomains) -> i64 {
        self.terms
            .iter()
            .map(|term| i64::from(context.lower_bound(term)))
            .sum()
    }
}

impl<Var: IntegerVariable> Propagator for LinearLessOrEqualPropagator<Var> {
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn priority(&self) -> u32 {
        0
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), Inconsistency> {
        self.terms.iter().for_each(|term| context.register(term));

        self.detect_inconsistency(context.as_readonly())
            .map_or(Ok(()), Err)
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatusCP {
        let minimum_sum = self.minimum_sum(&context);
        let slack = i64::from(self.rhs) - minimum_sum;
        if slack < 0 {
            return Err(Inconsistency::Conflict);
        }

        for term in self.terms.iter() {
            let lower_bound = i64::from(context.lower_bound(term));
            let largest_value = lower_bound + slack;

            if i64::from(context.upper_bound(term)) > largest_value {
                // `largest_value` lies in [lb, ub) of the term, so it fits in an i32.
                context.set_upper_bound(term, largest_value as i32)?;
            }
        }

        Ok(())
    }

    fn detect_inconsistency(&self, context: PropagationContext<'_>) -> Option<Inconsistency> {
        (self.minimum_sum(&context) > i64::from(self.rhs)).then_some(Inconsistency::Conflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSolver;
    use crate::engine::variables::TransformableVariable;

    #[test]
    fn upper_bounds_shrink_to_the_slack() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 5);
        let y = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(LinearLessOrEqualPropagator::new([x, y].into(), 7))
            .expect("no empty domains");

        solver.assert_bounds(x, 1, 5);
        solver.assert_bounds(y, 0, 6);
    }

    #[test]
    fn negated_terms_bound_the_positive_ones() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(3, 5);

        // x - y <= 0 together with y >= 3
        let _ = solver
            .new_propagator(LinearLessOrEqualPropagator::new(
                [x.scaled(1), y.scaled(-1)].into(),
                0,
            ))
            .expect("no empty domains");

        solver.assert_bounds(x, 0, 5);
    }

    #[test]
    fn overflowing_sums_do_not_wrap() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, i32::MAX);
        let y = solver.new_variable(0, i32::MAX);

        let _ = solver
            .new_propagator(LinearLessOrEqualPropagator::new([x, y].into(), i32::MAX))
            .expect("no empty domains");

        solver.assert_bounds(x, 0, i32::MAX);
        solver.assert_bounds(y, 0, i32::MAX);
    }

    #[test]
    fn an_infeasible_sum_fails_at_the_root() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(3, 5);
        let y = solver.new_variable(4, 10);

        let result = solver.new_propagator(LinearLessOrEqualPropagator::new([x, y].into(), 6));
        assert!(matches!(result, Err(Inconsistency::Conflict)));
    }

    #[test]
    fn raised_lower_bounds_cause_a_conflict() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 5);
        let y = solver.new_variable(0, 10);

        let mut propagator = solver
            .new_propagator(LinearLessOrEqualPropagator::new([x, y].into(), 6))
            .expect("no empty domains");

        solver.set_lower_bound(x, 4).expect("non-empty domain");
        solver.set_lower_bound(y, 3).expect("non-empty domain");
        assert!(solver.propagate(&mut propagator).is_err());
    }
}
