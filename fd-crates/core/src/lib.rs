//! A small finite-domain constraint engine.
//!
//! Integer variables are created on a [`Solver`], constraints are added through
//! [`Solver::add_constraint`] with the factory functions in [`constraints`], and a search is
//! started with [`Solver::satisfy`] or [`Solver::optimise`]. The search is a depth-first search
//! over the decisions of a [`Brancher`] with chronological backtracking, stopped early by a
//! [`TerminationCondition`].
//!
//! ```rust
//! # use fd_core::constraints;
//! # use fd_core::results::ProblemSolution;
//! # use fd_core::results::SatisfactionResult;
//! # use fd_core::termination::Indefinite;
//! # use fd_core::Solver;
//! let mut solver = Solver::default();
//! let x = solver.new_bounded_integer(0, 3);
//! let y = solver.new_bounded_integer(0, 3);
//!
//! // x and y differ and sum to 3
//! solver
//!     .add_constraint(constraints::binary_not_equals(x, y))
//!     .post()
//!     .expect("no root conflict");
//! solver
//!     .add_constraint(constraints::equals([x, y], 3))
//!     .post()
//!     .expect("no root conflict");
//!
//! let mut brancher = solver.default_brancher();
//! let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
//! else {
//!     panic!("expected a solution");
//! };
//! assert_eq!(solution.get_integer_value(x) + solution.get_integer_value(y), 3);
//! ```
#[cfg(doc)]
use crate::branching::Brancher;
#[cfg(doc)]
use crate::termination::TerminationCondition;

#[doc(hidden)]
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod math;
pub(crate) mod propagators;

pub mod branching;
pub mod constraints;
pub mod optimisation;
pub mod statistics;

pub use convert_case;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
//
// Example:
// `use fd_core::Solver;`
// vs.
// `use fd_core::api::Solver;`
mod api;

pub use api::*;

pub use crate::api::solver::DefaultBrancher;
pub use crate::api::solver::Solver;
pub use crate::basic_types::ConstraintOperationError;
