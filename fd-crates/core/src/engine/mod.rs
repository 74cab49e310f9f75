pub(crate) mod assignments;
pub(crate) mod constraint_satisfaction_solver;
pub(crate) mod notifications;
pub(crate) mod predicates;
pub(crate) mod propagation;
pub(crate) mod solver_statistics;
pub(crate) mod termination;
pub(crate) mod test_helper;
pub(crate) mod variable_names;
pub(crate) mod variables;

pub use assignments::Assignments;
pub(crate) use constraint_satisfaction_solver::*;
pub(crate) use variable_names::VariableNames;
