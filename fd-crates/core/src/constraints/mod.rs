//! The constraints the placement model is built from.
//!
//! Every constraint here is enforced by one or more propagators, which are not public: new
//! relations have to be expressed in terms of these.
//!
//! # Example
//! ```
//! # use fd_core::constraints;
//! # use fd_core::Solver;
//! let mut solver = Solver::default();
//! let a = solver.new_bounded_integer(0, 3);
//! let b = solver.new_bounded_integer(0, 3);
//! let same = solver.new_literal();
//!
//! solver
//!     .add_constraint(constraints::binary_equals(a, b))
//!     .reify(same)
//!     .expect("a = b can be both true and false");
//! solver
//!     .add_constraint(constraints::equals([a], 2))
//!     .implied_by(same)
//!     .expect("no conflict at the root");
//! ```

mod arithmetic;
mod constraint_poster;
mod count;
mod member;

pub use arithmetic::*;
pub use constraint_poster::*;
pub use count::*;
pub use member::*;

use crate::engine::propagation::Propagator;
use crate::propagators::ReifiedPropagator;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// A relation over variables which can be added to a [`Solver`].
pub trait Constraint {
    /// Enforces the constraint unconditionally.
    ///
    /// Fails if the solver becomes infeasible at the root.
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError>;

    /// Enforces `condition -> constraint`. When the constraint cannot hold any more a propagator
    /// may also fix `condition` to false.
    fn implied_by(
        self,
        solver: &mut Solver,
        condition: Literal,
    ) -> Result<(), ConstraintOperationError>;
}

/// A [`Constraint`] whose complement is again a constraint, so it can be turned into
/// `literal <-> constraint`.
pub trait NegatableConstraint: Constraint {
    type NegatedConstraint: NegatableConstraint + 'static;

    fn negation(&self) -> Self::NegatedConstraint;

    fn reify(self, solver: &mut Solver, literal: Literal) -> Result<(), ConstraintOperationError>
    where
        Self: Sized,
    {
        let negation = self.negation();
        self.implied_by(solver, literal)?;
        negation.implied_by(solver, !literal)
    }
}

/// Adds `propagator` to the solver, guarded by `condition` if there is one.
fn enforce<P: Propagator + 'static>(
    solver: &mut Solver,
    propagator: P,
    condition: Option<Literal>,
) -> Result<(), ConstraintOperationError> {
    match condition {
        Some(literal) => solver.add_propagator(Box::new(ReifiedPropagator::new(propagator, literal))),
        None => solver.add_propagator(Box::new(propagator)),
    }
}
