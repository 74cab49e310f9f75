use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// Propagator for the constraint `a != b`. Only propagates once one side is fixed.
#[derive(Debug)]
pub(crate) struct BinaryNotEqualsPropagator<AVar, BVar> {
    a: AVar,
    b: BVar,
}

impl<AVar: IntegerVariable, BVar: IntegerVariable> BinaryNotEqualsPropagator<AVar, BVar> {
    pub(crate) fn new(a: AVar, b: BVar) -> Self {
        BinaryNotEqualsPropagator { a, b }
    }
}

impl<AVar, BVar> Propagator for BinaryNotEqualsPropagator<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    fn name(&self) -> &str {
        "BinaryNotEq"
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
        if context.is_fixed(&self.a) {
            let value = context.lower_bound(&self.a);
            context.remove(&self.b, value)?;
        }

        if context.is_fixed(&self.b) {
            let value = context.lower_bound(&self.b);
            context.remove(&self.a, value)?;
        }

        Ok(())
    }

    fn detect_inconsistency(&self, context: PropagationContext<'_>) -> Option<Inconsistency> {
        if context.is_fixed(&self.a)
            && context.is_fixed(&self.b)
            && context.lower_bound(&self.a) == context.lower_bound(&self.b)
        {
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
    fn fixed_value_is_removed_from_the_other_side() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(2, 2);
        let b = solver.new_variable(0, 4);

        let _ = solver
            .new_propagator(BinaryNotEqualsPropagator::new(a, b))
            .expect("no empty domains");

        assert!(!solver.contains(b, 2));
        solver.assert_bounds(b, 0, 4);
    }

    #[test]
    fn unfixed_variables_are_not_changed() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 1);
        let b = solver.new_variable(0, 1);

        let _ = solver
            .new_propagator(BinaryNotEqualsPropagator::new(a, b))
            .expect("no empty domains");

        solver.assert_bounds(a, 0, 1);
        solver.assert_bounds(b, 0, 1);
    }

    #[test]
    fn equal_fixed_values_are_inconsistent() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(1, 1);
        let b = solver.new_variable(1, 1);

        let result = solver.new_propagator(BinaryNotEqualsPropagator::new(a, b));
        assert!(matches!(result, Err(Inconsistency::Conflict)));
    }
}
