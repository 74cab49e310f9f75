use crate::branching::SelectionContext;

/// Picks the variable to branch on next.
pub trait VariableSelector<Var> {
    /// `None` only once every variable of the selector is fixed.
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var>;
}
