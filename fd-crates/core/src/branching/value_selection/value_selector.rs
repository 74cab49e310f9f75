use crate::branching::SelectionContext;
use crate::engine::predicates::predicate::Predicate;

/// Chooses how to split the domain of a variable picked by a variable selector.
pub trait ValueSelector<Var> {
    /// `decision_variable` is never fixed when this is called.
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> Predicate;
}
