use crate::engine::propagation::HasAssignments;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::Assignments;
use crate::fd_assert_simple;

/// Read access to the values of a solution, whether borrowed from the solver or owned.
pub trait ProblemSolution {
    /// Panics (under debug checks) if `var` is not fixed.
    fn get_integer_value<Var: IntegerVariable>(&self, var: Var) -> i32;

    fn get_literal_value(&self, literal: Literal) -> bool {
        self.get_integer_value(literal) == 1
    }
}

impl<T: HasAssignments> ProblemSolution for T {
    fn get_integer_value<Var: IntegerVariable>(&self, var: Var) -> i32 {
        let assignments = self.assignments();
        fd_assert_simple!(
            assignments.is_domain_assigned(&var),
            "{var:?} is not fixed in the solution"
        );
        var.lower_bound(assignments)
    }
}

/// The solver state at the moment a solution was found. Only valid until the solver moves on,
/// which the borrow enforces.
#[derive(Debug, Copy, Clone)]
pub struct SolutionReference<'a> {
    assignments: &'a Assignments,
}

impl<'a> SolutionReference<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> SolutionReference<'a> {
        SolutionReference { assignments }
    }

    /// Every user-created domain, in creation order.
    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + 'a {
        self.assignments.get_domains()
    }
}

impl HasAssignments for SolutionReference<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

/// A snapshot of a solution which outlives the search that found it.
#[derive(Clone, Debug, Default)]
pub struct Solution {
    assignments: Assignments,
}

impl Solution {
    pub fn as_reference(&self) -> SolutionReference<'_> {
        SolutionReference::new(&self.assignments)
    }
}

impl From<SolutionReference<'_>> for Solution {
    fn from(reference: SolutionReference<'_>) -> Self {
        Solution {
            assignments: reference.assignments.clone(),
        }
    }
}

impl HasAssignments for Solution {
    fn assignments(&self) -> &Assignments {
        &self.assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_snapshot_keeps_the_values_of_the_reference() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(4, 4);
        let flag = Literal::new(assignments.grow(1, 1));

        let solution = Solution::from(SolutionReference::new(&assignments));
        drop(assignments);

        assert_eq!(4, solution.get_integer_value(x));
        assert!(solution.get_literal_value(flag));
        assert!(!solution.get_literal_value(!flag));
        assert_eq!(
            vec![x],
            solution.as_reference().get_domains().take(1).collect::<Vec<_>>()
        );
    }
}
