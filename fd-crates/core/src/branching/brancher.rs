use crate::branching::SelectionContext;
use crate::engine::predicates::predicate::Predicate;

/// A search strategy.
///
/// Every returned decision must not hold yet, otherwise the search would not make progress.
/// The engine checks this under debug checks.
pub trait Brancher {
    /// The predicate to decide next, or `None` once every variable the brancher covers is fixed.
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate>;
}
