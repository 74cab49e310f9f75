use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::Literal;

/// Enforces `literal -> constraint` for the constraint of the wrapped propagator.
///
/// The wrapped propagator runs only once the literal is true. While the literal is undecided,
/// an inconsistency reported by [`Propagator::detect_inconsistency`] sets the literal to false.
#[derive(Debug)]
pub(crate) struct ReifiedPropagator<Inner> {
    propagator: Inner,
    literal: Literal,
    infeasible_at_root: bool,
    name: String,
}

impl<Inner: Propagator> ReifiedPropagator<Inner> {
    pub(crate) fn new(propagator: Inner, literal: Literal) -> Self {
        let name = format!("Reified({})", propagator.name());

        ReifiedPropagator {
            propagator,
            literal,
            infeasible_at_root: false,
            name,
        }
    }

    fn enforced(&self, context: &impl ReadDomains) -> bool {
        context.is_predicate_satisfied(self.literal.true_predicate())
    }

    fn refuted(&self, context: &PropagationContextMut<'_>) -> bool {
        self.infeasible_at_root
            || (!context.is_fixed(&self.literal)
                && self
                    .propagator
                    .detect_inconsistency(context.as_readonly())
                    .is_some())
    }
}

impl<Inner: Propagator> Propagator for ReifiedPropagator<Inner> {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u32 {
        self.propagator.priority()
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), Inconsistency> {
        // Initialisation cannot change domains; the literal is falsified on the first propagation.
        self.infeasible_at_root = self.propagator.initialise_at_root(context).is_err();
        context.register(&self.literal);

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatusCP {
        if self.refuted(&context) {
            context.post(self.literal.false_predicate())?;
        }

        if self.enforced(&context) {
            self.propagator.propagate(context)
        } else {
            Ok(())
        }
    }

    fn detect_inconsistency(&self, context: PropagationContext<'_>) -> Option<Inconsistency> {
        self.enforced(&context)
            .then(|| self.propagator.detect_inconsistency(context))
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSolver;
    use crate::propagators::BinaryEqualsPropagator;
    use crate::propagators::LinearLessOrEqualPropagator;

    #[test]
    fn an_inconsistency_falsifies_the_literal() {
        let mut solver = TestSolver::default();
        let literal = solver.new_literal();
        let a = solver.new_variable(0, 2);
        let b = solver.new_variable(0, 2);

        let mut propagator = solver
            .new_propagator(ReifiedPropagator::new(
                BinaryEqualsPropagator::new(a, b),
                literal,
            ))
            .expect("no conflict");
        assert!(!solver.is_literal_false(literal));

        solver.set_upper_bound(a, 0).expect("non-empty domain");
        solver.set_lower_bound(b, 1).expect("non-empty domain");
        solver.propagate(&mut propagator).expect("no conflict");

        assert!(solver.is_literal_false(literal));
    }

    #[test]
    fn a_root_inconsistency_falsifies_the_literal() {
        let mut solver = TestSolver::default();
        let literal = solver.new_literal();
        let a = solver.new_variable(3, 4);

        let _ = solver
            .new_propagator(ReifiedPropagator::new(
                LinearLessOrEqualPropagator::new([a].into(), 2),
                literal,
            ))
            .expect("no conflict");

        assert!(solver.is_literal_false(literal));
    }

    #[test]
    fn the_inner_propagator_only_runs_once_the_literal_is_true() {
        let mut solver = TestSolver::default();
        let literal = solver.new_literal();
        let a = solver.new_variable(0, 5);
        let b = solver.new_variable(2, 8);

        let mut propagator = solver
            .new_propagator(ReifiedPropagator::new(
                BinaryEqualsPropagator::new(a, b),
                literal,
            ))
            .expect("no conflict");
        solver.assert_bounds(a, 0, 5);

        solver
            .set_literal(literal, true)
            .expect("non-empty domain");
        solver.propagate(&mut propagator).expect("no conflict");

        solver.assert_bounds(a, 2, 5);
        solver.assert_bounds(b, 2, 5);
    }

    #[test]
    fn an_enforced_inconsistency_is_a_conflict() {
        let mut solver = TestSolver::default();
        let literal = solver.new_literal();
        let a = solver.new_variable(0, 0);
        let b = solver.new_variable(0, 2);

        let mut propagator = solver
            .new_propagator(ReifiedPropagator::new(
                BinaryEqualsPropagator::new(a, b),
                literal,
            ))
            .expect("no conflict");

        solver
            .set_literal(literal, true)
            .expect("non-empty domain");
        solver.set_lower_bound(b, 1).expect("non-empty domain");

        assert!(solver.propagate(&mut propagator).is_err());
    }
}
