use std::fmt::Debug;

use super::TransformableVariable;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::predicate_constructor::PredicateConstructor;
use crate::engine::Assignments;

/// Anything that reads as an integer domain of the engine: a [`DomainId`] or a view over one.
///
/// [`DomainId`]: super::DomainId
pub trait IntegerVariable:
    Clone + PredicateConstructor + TransformableVariable<Self::AffineView> + Debug + 'static
{
    type AffineView: IntegerVariable;

    fn lower_bound(&self, assignment: &Assignments) -> i32;

    fn upper_bound(&self, assignment: &Assignments) -> i32;

    /// Whether `value` is still in the domain.
    fn contains(&self, assignment: &Assignments, value: i32) -> bool;

    /// The values of the domain in increasing order of the underlying domain; a view with a
    /// negative scale yields them in decreasing order.
    fn iterate_domain(&self, assignment: &Assignments) -> impl Iterator<Item = i32>;

    /// Subscribes the propagator owning `watchers` to every change of the underlying domain.
    fn watch_all(&self, watchers: &mut Watchers<'_>);
}
