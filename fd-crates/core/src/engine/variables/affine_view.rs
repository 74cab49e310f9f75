use std::fmt::Debug;
use std::fmt::Formatter;

use super::TransformableVariable;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::predicate::Comparison;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::predicates::predicate_constructor::PredicateConstructor;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::math::ceil_div;
use crate::math::floor_div;

/// The variable `scale * inner + offset`, read and written through the domain of `inner`.
///
/// The scale is never zero.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView<Inner> {
    inner: Inner,
    scale: i32,
    offset: i32,
}

impl<Inner> AffineView<Inner> {
    pub fn new(inner: Inner, scale: i32, offset: i32) -> Self {
        AffineView {
            inner,
            scale,
            offset,
        }
    }

    fn map(&self, value: i32) -> i32 {
        self.scale * value + self.offset
    }

    /// The inner value mapping onto `value`, if there is one.
    fn preimage(&self, value: i32) -> Option<i32> {
        let shifted = value - self.offset;
        (shifted % self.scale == 0).then_some(shifted / self.scale)
    }

    fn flips_order(&self) -> bool {
        self.scale < 0
    }
}

impl<View: IntegerVariable> IntegerVariable for AffineView<View> {
    type AffineView = Self;

    fn lower_bound(&self, assignment: &Assignments) -> i32 {
        if self.flips_order() {
            self.map(self.inner.upper_bound(assignment))
        } else {
            self.map(self.inner.lower_bound(assignment))
        }
    }

    fn upper_bound(&self, assignment: &Assignments) -> i32 {
        if self.flips_order() {
            self.map(self.inner.lower_bound(assignment))
        } else {
            self.map(self.inner.upper_bound(assignment))
        }
    }

    fn contains(&self, assignment: &Assignments, value: i32) -> bool {
        self.preimage(value)
            .is_some_and(|inner_value| self.inner.contains(assignment, inner_value))
    }

    fn iterate_domain(&self, assignment: &Assignments) -> impl Iterator<Item = i32> {
        self.inner
            .iterate_domain(assignment)
            .map(|value| self.map(value))
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>) {
        self.inner.watch_all(watchers)
    }
}

impl<View: IntegerVariable> TransformableVariable<AffineView<View>> for AffineView<View> {
    fn scaled(&self, scale: i32) -> AffineView<View> {
        AffineView::new(self.inner.clone(), self.scale * scale, self.offset * scale)
    }

    fn offset(&self, offset: i32) -> AffineView<View> {
        AffineView::new(self.inner.clone(), self.scale, self.offset + offset)
    }
}

impl<Var: PredicateConstructor> PredicateConstructor for AffineView<Var> {
    fn predicate(&self, comparison: Comparison, value: i32) -> Predicate {
        let shifted = value - self.offset;
        match comparison {
            Comparison::AtLeast if self.flips_order() => self
                .inner
                .upper_bound_predicate(floor_div(shifted, self.scale)),
            Comparison::AtLeast => self
                .inner
                .lower_bound_predicate(ceil_div(shifted, self.scale)),
            Comparison::AtMost if self.flips_order() => self
                .inner
                .lower_bound_predicate(ceil_div(shifted, self.scale)),
            Comparison::AtMost => self
                .inner
                .upper_bound_predicate(floor_div(shifted, self.scale)),
            Comparison::Equal => match self.preimage(value) {
                Some(inner_value) => self.inner.equality_predicate(inner_value),
                None => Predicate::always_false(),
            },
            Comparison::NotEqual => match self.preimage(value) {
                Some(inner_value) => self.inner.disequality_predicate(inner_value),
                None => Predicate::always_true(),
            },
        }
    }
}

impl<Var: Debug> Debug for AffineView<Var> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.scale {
            1 => write!(f, "{:?}", self.inner)?,
            -1 => write!(f, "-{:?}", self.inner)?,
            scale => write!(f, "{scale}*{:?}", self.inner)?,
        }
        if self.offset != 0 {
            write!(f, "{:+}", self.offset)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::DomainId;
    use crate::predicate;

    #[test]
    fn transformations_compose() {
        let view = AffineView::new(DomainId::new(0), 3, 4);

        let scaled = view.scaled(6);
        assert_eq!((18, 24), (scaled.scale, scaled.offset));

        let shifted = view.offset(6);
        assert_eq!((3, 10), (shifted.scale, shifted.offset));
    }

    #[test]
    fn bounds_are_read_through_a_negated_view() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(2, 5);
        let view = x.scaled(-1).offset(10);

        assert_eq!(5, view.lower_bound(&assignments));
        assert_eq!(8, view.upper_bound(&assignments));
        assert!(view.contains(&assignments, 7));
        assert!(!view.contains(&assignments, 9));
    }

    #[test]
    fn bound_predicates_are_mapped_onto_the_inner_variable() {
        let x = DomainId::new(1);
        let positive = x.scaled(2);
        let negative = x.scaled(-1);

        assert_eq!(predicate!(x >= 2), predicate!(positive >= 3));
        assert_eq!(predicate!(x <= 1), predicate!(positive <= 3));
        assert_eq!(predicate!(x <= -3), predicate!(negative >= 3));
        assert_eq!(predicate!(x >= -3), predicate!(negative <= 3));
    }

    #[test]
    fn values_outside_the_image_give_constant_predicates() {
        let x = DomainId::new(1);
        let view = x.scaled(2);

        assert_eq!(Predicate::always_false(), predicate!(view == 3));
        assert_eq!(Predicate::always_true(), predicate!(view != 3));
        assert_eq!(predicate!(x == 2), predicate!(view == 4));
    }

    #[test]
    fn debug_output_shows_the_transformation() {
        let x = DomainId::new(4);

        assert_eq!("x4", format!("{:?}", x.scaled(1)));
        assert_eq!("-x4+1", format!("{:?}", x.scaled(-1).offset(1)));
        assert_eq!("3*x4-2", format!("{:?}", x.scaled(3).offset(-2)));
    }
}
