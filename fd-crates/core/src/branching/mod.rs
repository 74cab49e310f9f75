//! How the search picks its next decision.
//!
//! A [`Brancher`] looks at the current domains through a [`SelectionContext`] and proposes a
//! [`Predicate`](crate::predicates::Predicate) to decide next. When the subtree below that
//! decision is exhausted the engine posts its negation instead, so a brancher never has to
//! remember what it tried before.
//!
//! [`IndependentVariableValueBrancher`] combines a [`VariableSelector`] with a
//! [`ValueSelector`]; `MatrixBrancher` ranks whole rows of a matrix:
//! ```rust
//! # use fd_core::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
//! # use fd_core::branching::variable_selection::FirstFail;
//! # use fd_core::branching::value_selection::InDomainMin;
//! # use fd_core::termination::Indefinite;
//! # use fd_core::results::ProblemSolution;
//! # use fd_core::Solver;
//! let mut solver = Solver::default();
//! let wide = solver.new_bounded_integer(0, 10);
//! let narrow = solver.new_bounded_integer(2, 5);
//!
//! let mut brancher =
//!     IndependentVariableValueBrancher::new(FirstFail::new(&[wide, narrow]), InDomainMin);
//!
//! let result = solver.satisfy(&mut brancher, &mut Indefinite);
//! let solution = result.solution().expect("no constraints, so there is a solution");
//! assert_eq!(0, solution.get_integer_value(wide));
//! assert_eq!(2, solution.get_integer_value(narrow));
//! ```
//!
//! [`IndependentVariableValueBrancher`]: branchers::independent_variable_value_brancher::IndependentVariableValueBrancher
mod brancher;
pub mod branchers;
mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::*;
pub use selection_context::*;

#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
