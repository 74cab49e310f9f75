#[cfg(doc)]
use crate::branching::Brancher;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;

/// Read-only view of the domains handed to a [`Brancher`].
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> SelectionContext<'a> {
    pub fn new(assignments: &'a Assignments) -> Self {
        SelectionContext { assignments }
    }

    /// The number of values left in the domain of `var`.
    pub fn get_size_of_domain(&self, var: DomainId) -> u32 {
        self.assignments.get_domain_size(var)
    }

    pub fn lower_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        var.lower_bound(self.assignments)
    }

    pub fn upper_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        var.upper_bound(self.assignments)
    }

    pub fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        var.contains(self.assignments, value)
    }

    pub fn is_integer_fixed<Var: IntegerVariable>(&self, var: Var) -> bool {
        self.lower_bound(var.clone()) == self.upper_bound(var)
    }

    /// The smallest value of the domain above its lower bound, if the domain has one.
    pub fn second_smallest_value(&self, var: DomainId) -> Option<i32> {
        self.assignments.next_value_after(var, self.lower_bound(var))
    }

    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + 'a {
        self.assignments.get_domains()
    }

    /// One fresh domain per `(lower_bound, upper_bound)`.
    #[cfg(test)]
    pub(crate) fn create_for_testing(domains: Vec<(i32, i32)>) -> Assignments {
        let mut assignments = Assignments::default();
        for (lower_bound, upper_bound) in domains {
            let _ = assignments.grow(lower_bound, upper_bound);
        }
        assignments
    }
}
