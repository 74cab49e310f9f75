use super::predicate::Comparison;
use super::predicate::Predicate;
use crate::engine::variables::DomainId;

/// Variables which can be turned into a [`Predicate`] over an underlying [`DomainId`].
///
/// Only [`PredicateConstructor::predicate`] needs to be provided; the named constructors are
/// what the [`predicate!`](crate::predicate) macro expands to.
pub trait PredicateConstructor {
    fn predicate(&self, comparison: Comparison, value: i32) -> Predicate;

    /// `[x >= bound]`
    fn lower_bound_predicate(&self, bound: i32) -> Predicate {
        self.predicate(Comparison::AtLeast, bound)
    }

    /// `[x <= bound]`
    fn upper_bound_predicate(&self, bound: i32) -> Predicate {
        self.predicate(Comparison::AtMost, bound)
    }

    /// `[x == value]`
    fn equality_predicate(&self, value: i32) -> Predicate {
        self.predicate(Comparison::Equal, value)
    }

    /// `[x != value]`
    fn disequality_predicate(&self, value: i32) -> Predicate {
        self.predicate(Comparison::NotEqual, value)
    }
}

impl PredicateConstructor for DomainId {
    fn predicate(&self, comparison: Comparison, value: i32) -> Predicate {
        Predicate::new(*self, comparison, value)
    }
}

/// Builds a [`Predicate`] from a comparison between a variable and a value.
///
/// # Example
/// ```rust
/// # use fd_core::Solver;
/// # use fd_core::predicate;
/// # use fd_core::predicates::Comparison;
/// let mut solver = Solver::default();
/// let x = solver.new_bounded_integer(0, 10);
///
/// let at_least_five = predicate!(x >= 5);
/// assert_eq!(x, at_least_five.domain());
/// assert_eq!(Comparison::AtLeast, at_least_five.comparison());
/// assert_eq!(5, at_least_five.value());
///
/// assert_eq!(!at_least_five, predicate!(x <= 4));
/// ```
#[macro_export]
macro_rules! predicate {
    ($($var:ident).+$([$index:expr])? >= $bound:expr) => {{
        #[allow(unused, reason = "Could be imported twice")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.lower_bound_predicate($bound)
    }};
    ($($var:ident).+$([$index:expr])? <= $bound:expr) => {{
        #[allow(unused, reason = "Could be imported twice")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.upper_bound_predicate($bound)
    }};
    ($($var:ident).+$([$index:expr])? == $value:expr) => {{
        #[allow(unused, reason = "Could be imported twice")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.equality_predicate($value)
    }};
    ($($var:ident).+$([$index:expr])? != $value:expr) => {{
        #[allow(unused, reason = "Could be imported twice")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.disequality_predicate($value)
    }};
}
