use super::enforce;
use super::Constraint;
use crate::propagators::CountPropagator;
use crate::variables::IntegerVariable;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// `count` equals the number of `variables` assigned to `value`.
pub fn count<Var, CountVar>(
    variables: impl Into<Box<[Var]>>,
    value: i32,
    count: CountVar,
) -> impl Constraint
where
    Var: IntegerVariable,
    CountVar: IntegerVariable,
{
    Count {
        variables: variables.into(),
        value,
        count,
    }
}

struct Count<Var, CountVar> {
    variables: Box<[Var]>,
    value: i32,
    count: CountVar,
}

impl<Var: IntegerVariable, CountVar: IntegerVariable> Constraint for Count<Var, CountVar> {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        enforce(
            solver,
            CountPropagator::new(self.variables, self.value, self.count),
            None,
        )
    }

    fn implied_by(
        self,
        solver: &mut Solver,
        condition: Literal,
    ) -> Result<(), ConstraintOperationError> {
        enforce(
            solver,
            CountPropagator::new(self.variables, self.value, self.count),
            Some(condition),
        )
    }
}
