use itertools::Itertools;

use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// Propagator for the constraint `x \in values`.
///
/// The values below the smallest and above the largest allowed value are cut off through the
/// bounds, and every gap between two consecutive allowed values is removed as one range.
#[derive(Debug)]
pub(crate) struct MemberPropagator<Var> {
    variable: Var,
    /// Sorted and without duplicates.
    values: Box<[i32]>,
}

impl<Var: IntegerVariable> MemberPropagator<Var> {
    pub(crate) fn new(variable: Var, values: impl IntoIterator<Item = i32>) -> Self {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_unstable();
        values.dedup();

        MemberPropagator {
            variable,
            values: values.into(),
        }
    }
}

impl<Var: IntegerVariable> Propagator for MemberPropagator<Var> {
    fn name(&self) -> &str {
        "Member"
    }

    fn priority(&self) -> u32 {
        0
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), Inconsistency> {
        context.register(&self.variable);

        self.detect_inconsistency(context.as_readonly())
            .map_or(Ok(()), Err)
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatusCP {
        let (Some(&smallest), Some(&largest)) = (self.values.first(), self.values.last()) else {
            return Err(Inconsistency::Conflict);
        };

        context.set_lower_bound(&self.variable, smallest)?;
        context.set_upper_bound(&self.variable, largest)?;

        for (&below, &above) in self.values.iter().tuple_windows() {
            context.remove_range(&self.variable, below + 1, above - 1)?;
        }

        Ok(())
    }

    fn detect_inconsistency(&self, context: PropagationContext<'_>) -> Option<Inconsistency> {
        if self
            .values
            .iter()
            .any(|&value| context.contains(&self.variable, value))
        {
            None
        } else {
            Some(Inconsistency::Conflict)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSolver;
    use crate::engine::variables::TransformableVariable;

    #[test]
    fn values_outside_the_set_are_removed() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 7);

        let _ = solver
            .new_propagator(MemberPropagator::new(x, [7, 0]))
            .expect("no empty domains");

        solver.assert_bounds(x, 0, 7);
        assert!((1..7).all(|value| !solver.contains(x, value)));
    }

    #[test]
    fn gaps_are_removed_without_visiting_every_value() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(-3, 2_000_000);

        let _ = solver
            .new_propagator(MemberPropagator::new(x, [0, 2_000_000]))
            .expect("no empty domains");

        solver.assert_bounds(x, 0, 2_000_000);
        assert!(!solver.contains(x, 1));
        assert!(!solver.contains(x, 1_999_999));
        assert_eq!(2, solver.domain_size(x));
    }

    #[test]
    fn gaps_are_mapped_through_a_negated_view() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(-10, 10);

        let _ = solver
            .new_propagator(MemberPropagator::new(x.scaled(-1), [-5, 0, 5]))
            .expect("no empty domains");

        solver.assert_bounds(x, -5, 5);
        assert!([-5, 0, 5].into_iter().all(|value| solver.contains(x, value)));
        assert!([-4, -1, 1, 4].into_iter().all(|value| !solver.contains(x, value)));
    }

    #[test]
    fn a_domain_without_allowed_values_is_inconsistent() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 3);

        let result = solver.new_propagator(MemberPropagator::new(x, [0, 4]));
        assert!(matches!(result, Err(Inconsistency::Conflict)));
    }
}
