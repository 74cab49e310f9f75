use super::enforce;
use super::Constraint;
use crate::propagators::MemberPropagator;
use crate::variables::IntegerVariable;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// `variable` takes one of `values`.
pub fn member<Var: IntegerVariable>(
    variable: Var,
    values: impl IntoIterator<Item = i32>,
) -> impl Constraint {
    Member {
        variable,
        values: values.into_iter().collect(),
    }
}

struct Member<Var> {
    variable: Var,
    values: Vec<i32>,
}

impl<Var: IntegerVariable> Constraint for Member<Var> {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        enforce(solver, MemberPropagator::new(self.variable, self.values), None)
    }

    fn implied_by(
        self,
        solver: &mut Solver,
        condition: Literal,
    ) -> Result<(), ConstraintOperationError> {
        enforce(
            solver,
            MemberPropagator::new(self.variable, self.values),
            Some(condition),
        )
    }
}
