use log::warn;

use super::Constraint;
use super::NegatableConstraint;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// Returned by [`Solver::add_constraint`]; the constraint only takes effect once one of
/// [`post`](ConstraintPoster::post), [`implied_by`](ConstraintPoster::implied_by) or
/// [`reify`](ConstraintPoster::reify) is called.
#[derive(Debug)]
pub struct ConstraintPoster<'solver, C> {
    solver: &'solver mut Solver,
    constraint: Option<C>,
}

impl<'solver, C> ConstraintPoster<'solver, C> {
    pub(crate) fn new(solver: &'solver mut Solver, constraint: C) -> Self {
        ConstraintPoster {
            solver,
            constraint: Some(constraint),
        }
    }

    fn take(&mut self) -> Option<(C, &mut Solver)> {
        let constraint = self.constraint.take()?;
        Some((constraint, &mut *self.solver))
    }
}

impl<C: Constraint> ConstraintPoster<'_, C> {
    pub fn post(mut self) -> Result<(), ConstraintOperationError> {
        self.take()
            .map_or(Ok(()), |(constraint, solver)| constraint.post(solver))
    }

    /// Posts `condition -> constraint`.
    pub fn implied_by(mut self, condition: Literal) -> Result<(), ConstraintOperationError> {
        self.take().map_or(Ok(()), |(constraint, solver)| {
            constraint.implied_by(solver, condition)
        })
    }
}

impl<C: NegatableConstraint> ConstraintPoster<'_, C> {
    /// Posts `literal <-> constraint`.
    pub fn reify(mut self, literal: Literal) -> Result<(), ConstraintOperationError> {
        self.take()
            .map_or(Ok(()), |(constraint, solver)| constraint.reify(solver, literal))
    }
}

impl<C> Drop for ConstraintPoster<'_, C> {
    fn drop(&mut self) {
        if self.constraint.is_some() {
            warn!("A constraint was created but never posted");
        }
    }
}
