use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::HasAssignments;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// Propagator for the constraint `a = b`; both domains are made equal to their intersection.
#[derive(Debug)]
pub(crate) struct BinaryEqualsPropagator<AVar, BVar> {
    a: AVar,
    b: BVar,
}

impl<AVar: IntegerVariable, BVar: IntegerVariable> BinaryEqualsPropagator<AVar, BVar> {
    pub(crate) fn new(a: AVar, b: BVar) -> Self {
        BinaryEqualsPropagator { a, b }
    }
}

impl<AVar, BVar> Propagator for BinaryEqualsPropagator<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    fn name(&self) -> &str {
        "BinaryEq"
    }

    fn priority(&self) -> u32 {
        0
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), Inconsistency> {
        context.register(&self.a);
        context.register(&self.b);

        self.detect_inconsistency(context.as_readonly())
            .map_or(Ok(()), Err)
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatusCP {
        let lower_bound = context.lower_bound(&self.a).max(context.lower_bound(&self.b));
        let upper_bound = context.upper_bound(&self.a).min(context.upper_bound(&self.b));

        context.set_lower_bound(&self.a, lower_bound)?;
        context.set_lower_bound(&self.b, lower_bound)?;
        context.set_upper_bound(&self.a, upper_bound)?;
        context.set_upper_bound(&self.b, upper_bound)?;

        let removed_from_a = self
            .a
            .iterate_domain(context.assignments())
            .filter(|&value| !context.contains(&self.b, value))
            .collect::<Vec<_>>();
        for value in removed_from_a {
            context.remove(&self.a, value)?;
        }

        let removed_from_b = self
            .b
            .iterate_domain(context.assignments())
            .filter(|&value| !context.contains(&self.a, value))
            .collect::<Vec<_>>();
        for value in removed_from_b {
            context.remove(&self.b, value)?;
        }

        Ok(())
    }

    fn detect_inconsistency(&self, context: PropagationContext<'_>) -> Option<Inconsistency> {
        if context.upper_bound(&self.a) < context.lower_bound(&self.b)
            || context.upper_bound(&self.b) < context.lower_bound(&self.a)
        {
            return Some(Inconsistency::Conflict);
        }

        let mut shared_values = self
            .a
            .iterate_domain(context.assignments())
            .filter(|&value| context.contains(&self.b, value));

        if shared_values.next().is_none() {
            Some(Inconsistency::Conflict)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSolver;

    #[test]
    fn domains_are_intersected() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 5);
        let b = solver.new_variable(2, 8);
        solver.remove(a, 3).expect("non-empty domain");

        let _ = solver
            .new_propagator(BinaryEqualsPropagator::new(a, b))
            .expect("no empty domains");

        solver.assert_bounds(a, 2, 5);
        solver.assert_bounds(b, 2, 5);
        assert!(!solver.contains(b, 3));
    }

    #[test]
    fn disjoint_domains_are_inconsistent() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 2);
        let b = solver.new_variable(3, 4);

        let result = solver.new_propagator(BinaryEqualsPropagator::new(a, b));
        assert!(matches!(result, Err(Inconsistency::Conflict)));
    }

    #[test]
    fn fixing_one_side_fixes_the_other() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 3);
        let b = solver.new_variable(0, 3);

        let mut propagator = solver
            .new_propagator(BinaryEqualsPropagator::new(a, b))
            .expect("no empty domains");

        solver.set_lower_bound(a, 2).expect("non-empty domain");
        solver.set_upper_bound(a, 2).expect("non-empty domain");
        solver
            .propagate(&mut propagator)
            .expect("no empty domains");

        solver.assert_bounds(b, 2, 2);
    }
}
