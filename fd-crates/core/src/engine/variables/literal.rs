use std::ops::Not;

use super::DomainId;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::predicate::Comparison;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::predicates::predicate_constructor::PredicateConstructor;
use crate::engine::variables::AffineView;
use crate::engine::Assignments;

/// A boolean variable: a view of a `{0, 1}` domain where 1 means true.
///
/// Negating a literal turns the view into `1 - x`, so `!l` shares the domain of `l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    view: AffineView<DomainId>,
}

impl Literal {
    /// `domain` must be `{0, 1}`.
    pub fn new(domain: DomainId) -> Literal {
        Literal {
            view: domain.scaled(1),
        }
    }

    /// The predicate which holds when the literal is true.
    pub fn true_predicate(&self) -> Predicate {
        self.lower_bound_predicate(1)
    }

    pub fn false_predicate(&self) -> Predicate {
        self.upper_bound_predicate(0)
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            view: self.view.scaled(-1).offset(1),
        }
    }
}

impl IntegerVariable for Literal {
    type AffineView = AffineView<Self>;

    fn lower_bound(&self, assignment: &Assignments) -> i32 {
        self.view.lower_bound(assignment)
    }

    fn upper_bound(&self, assignment: &Assignments) -> i32 {
        self.view.upper_bound(assignment)
    }

    fn contains(&self, assignment: &Assignments, value: i32) -> bool {
        self.view.contains(assignment, value)
    }

    fn iterate_domain(&self, assignment: &Assignments) -> impl Iterator<Item = i32> {
        self.view.iterate_domain(assignment)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>) {
        self.view.watch_all(watchers)
    }
}

impl PredicateConstructor for Literal {
    fn predicate(&self, comparison: Comparison, value: i32) -> Predicate {
        self.view.predicate(comparison, value)
    }
}

impl TransformableVariable<AffineView<Literal>> for Literal {
    fn scaled(&self, scale: i32) -> AffineView<Literal> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<Literal> {
        AffineView::new(*self, 1, offset)
    }
}
