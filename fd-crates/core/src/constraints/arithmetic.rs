use super::enforce;
use super::Constraint;
use super::NegatableConstraint;
use crate::propagators::BinaryEqualsPropagator;
use crate::propagators::BinaryNotEqualsPropagator;
use crate::propagators::LinearLessOrEqualPropagator;
use crate::variables::IntegerVariable;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// `sum(terms) <= rhs`. The negation is `sum(terms) >= rhs + 1`.
pub fn less_than_or_equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl NegatableConstraint {
    LessOrEqual {
        terms: terms.into(),
        rhs,
    }
}

/// `sum(terms) == rhs`, posted as the two inequalities `<= rhs` and `>= rhs`.
pub fn equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    let terms: Box<[Var]> = terms.into();
    let negated_terms: Box<[Var::AffineView]> = terms.iter().map(|term| term.scaled(-1)).collect();
    (
        LessOrEqual { terms, rhs },
        LessOrEqual {
            terms: negated_terms,
            rhs: -rhs,
        },
    )
}

/// `lhs == rhs`, with [`binary_not_equals`] as its negation.
pub fn binary_equals<A, B>(lhs: A, rhs: B) -> impl NegatableConstraint
where
    A: IntegerVariable + 'static,
    B: IntegerVariable + 'static,
{
    BinaryRelation {
        lhs,
        rhs,
        equal: true,
    }
}

/// `lhs != rhs`, with [`binary_equals`] as its negation.
pub fn binary_not_equals<A, B>(lhs: A, rhs: B) -> impl NegatableConstraint
where
    A: IntegerVariable + 'static,
    B: IntegerVariable + 'static,
{
    BinaryRelation {
        lhs,
        rhs,
        equal: false,
    }
}

struct LessOrEqual<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var: IntegerVariable + 'static> LessOrEqual<Var> {
    fn enforce(self, solver: &mut Solver, condition: Option<Literal>) -> ConstraintResult {
        enforce(
            solver,
            LinearLessOrEqualPropagator::new(self.terms, self.rhs),
            condition,
        )
    }
}

type ConstraintResult = Result<(), ConstraintOperationError>;

impl<Var: IntegerVariable + 'static> Constraint for LessOrEqual<Var> {
    fn post(self, solver: &mut Solver) -> ConstraintResult {
        self.enforce(solver, None)
    }

    fn implied_by(self, solver: &mut Solver, condition: Literal) -> ConstraintResult {
        self.enforce(solver, Some(condition))
    }
}

impl<Var: IntegerVariable + 'static> NegatableConstraint for LessOrEqual<Var> {
    type NegatedConstraint = LessOrEqual<Var::AffineView>;

    fn negation(&self) -> Self::NegatedConstraint {
        LessOrEqual {
            terms: self.terms.iter().map(|term| term.scaled(-1)).collect(),
            rhs: -self.rhs - 1,
        }
    }
}

/// Both halves of an equality.
impl<Pos, Neg> Constraint for (LessOrEqual<Pos>, LessOrEqual<Neg>)
where
    Pos: IntegerVariable + 'static,
    Neg: IntegerVariable + 'static,
{
    fn post(self, solver: &mut Solver) -> ConstraintResult {
        self.0.enforce(solver, None)?;
        self.1.enforce(solver, None)
    }

    fn implied_by(self, solver: &mut Solver, condition: Literal) -> ConstraintResult {
        self.0.enforce(solver, Some(condition))?;
        self.1.enforce(solver, Some(condition))
    }
}

struct BinaryRelation<A, B> {
    lhs: A,
    rhs: B,
    equal: bool,
}

impl<A, B> BinaryRelation<A, B>
where
    A: IntegerVariable + 'static,
    B: IntegerVariable + 'static,
{
    fn enforce(self, solver: &mut Solver, condition: Option<Literal>) -> ConstraintResult {
        if self.equal {
            enforce(solver, BinaryEqualsPropagator::new(self.lhs, self.rhs), condition)
        } else {
            enforce(solver, BinaryNotEqualsPropagator::new(self.lhs, self.rhs), condition)
        }
    }
}

impl<A, B> Constraint for BinaryRelation<A, B>
where
    A: IntegerVariable + 'static,
    B: IntegerVariable + 'static,
{
    fn post(self, solver: &mut Solver) -> ConstraintResult {
        self.enforce(solver, None)
    }

    fn implied_by(self, solver: &mut Solver, condition: Literal) -> ConstraintResult {
        self.enforce(solver, Some(condition))
    }
}

impl<A, B> NegatableConstraint for BinaryRelation<A, B>
where
    A: IntegerVariable + 'static,
    B: IntegerVariable + 'static,
{
    type NegatedConstraint = BinaryRelation<A, B>;

    fn negation(&self) -> Self::NegatedConstraint {
        BinaryRelation {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            equal: !self.equal,
        }
    }
}
