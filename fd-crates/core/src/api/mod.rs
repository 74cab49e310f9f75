mod outputs;
pub(crate) mod solver;

pub mod results {
    //! What the [`Solver`] returns.
    //!
    //! Plain satisfaction yields a [`SatisfactionResult`], satisfaction under assumptions a
    //! [`SatisfactionResultUnderAssumptions`] and optimisation an [`OptimisationResult`]. A
    //! result that carries a [`Solution`] owns it, and by the time it is returned the [`Solver`]
    //! has already been restored to the root.
    pub use crate::api::outputs::OptimisationResult;
    pub use crate::api::outputs::ProblemSolution;
    pub use crate::api::outputs::SatisfactionResult;
    pub use crate::api::outputs::SatisfactionResultUnderAssumptions;
    pub use crate::api::outputs::SolutionReference;
    pub use crate::basic_types::Solution;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod variables {
    //! Handles to the domains of a [`Solver`].
    //!
    //! [`Solver::new_bounded_integer`] hands out a [`DomainId`] and [`Solver::new_literal`] a
    //! [`Literal`] over `{0, 1}`. Scaling or offsetting either through
    //! [`TransformableVariable`] gives an [`AffineView`], which reads and writes the same
    //! domain without an extra constraint.
    pub use crate::engine::variables::AffineView;
    pub use crate::engine::variables::DomainId;
    pub use crate::engine::variables::IntegerVariable;
    pub use crate::engine::variables::Literal;
    pub use crate::engine::variables::TransformableVariable;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod termination {
    //! Ways to stop a search before it reaches a conclusion.
    //!
    //! The [`Solver`] polls its [`TerminationCondition`] once per search step. A placement run
    //! uses [`TimeBudget`] for its timeout; [`Combinator`] joins two conditions.
    pub use crate::engine::termination::combinator::*;
    pub use crate::engine::termination::decision_budget::*;
    pub use crate::engine::termination::indefinite::*;
    pub use crate::engine::termination::time_budget::*;
    pub use crate::engine::termination::TerminationCondition;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod predicates {
    //! Contains structures which represent atomic constraints over a single domain.
    //!
    //! A [`Predicate`] relates one domain to a constant through a [`Comparison`]. Branchers
    //! return them as decisions and [`Solver::satisfy_under_assumptions`] takes them as
    //! assumptions. The [`predicate!`] macro is the usual way to write one.
    //!
    //! [`predicate!`]: crate::predicate
    pub use crate::engine::predicates::predicate::Comparison;
    pub use crate::engine::predicates::predicate::Predicate;
    pub use crate::engine::predicates::predicate_constructor::PredicateConstructor;
    #[cfg(doc)]
    use crate::Solver;
}
