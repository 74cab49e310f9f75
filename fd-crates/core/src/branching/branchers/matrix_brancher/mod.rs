//! A [`Brancher`] over a matrix of variables, selecting a whole row at a time.
//!
//! Every row has a pivot variable in its first column. Rows are ranked by a [`VariableScore`] of
//! their pivot; ties between pivots are broken by the best [`VariableScore`] among the other
//! unfixed variables of the row, and remaining ties go to the earliest row. In the selected row
//! the first unfixed variable is branched on using a [`ValueSelector`].
mod variable_score;

use std::cmp::Reverse;

use log::warn;
pub use variable_score::*;

use crate::branching::value_selection::ValueSelector;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::variables::DomainId;

/// Branches on the rows of a matrix of variables; see the [module documentation](self).
///
/// # Example
/// ```rust
/// # use fd_core::branching::branchers::matrix_brancher::DomainSize;
/// # use fd_core::branching::branchers::matrix_brancher::MatrixBrancher;
/// # use fd_core::branching::branchers::matrix_brancher::Regret;
/// # use fd_core::branching::value_selection::InDomainMin;
/// # use fd_core::results::SatisfactionResult;
/// # use fd_core::termination::Indefinite;
/// # use fd_core::Solver;
/// let mut solver = Solver::default();
/// let x = solver.new_bounded_integer(0, 3);
/// let y = solver.new_bounded_integer(0, 3);
///
/// let mut brancher = MatrixBrancher::new(vec![vec![x, y]], Regret, DomainSize, InDomainMin);
/// let result = solver.satisfy(&mut brancher, &mut Indefinite);
/// assert!(matches!(result, SatisfactionResult::Satisfiable(_)));
/// ```
pub struct MatrixBrancher<PivotScore, TieBreakScore, ValueSelect> {
    rows: Vec<Vec<DomainId>>,
    pivot_score: PivotScore,
    tie_break_score: TieBreakScore,
    value_selector: ValueSelect,
}

impl<PivotScore, TieBreakScore, ValueSelect> std::fmt::Debug
    for MatrixBrancher<PivotScore, TieBreakScore, ValueSelect>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixBrancher")
            .field("rows", &self.rows)
            .finish_non_exhaustive()
    }
}

impl<PivotScore, TieBreakScore, ValueSelect> MatrixBrancher<PivotScore, TieBreakScore, ValueSelect>
where
    PivotScore: VariableScore,
    TieBreakScore: VariableScore,
    ValueSelect: ValueSelector<DomainId>,
{
    pub fn new(
        rows: Vec<Vec<DomainId>>,
        pivot_score: PivotScore,
        tie_break_score: TieBreakScore,
        value_selector: ValueSelect,
    ) -> Self {
        if rows.iter().all(|row| row.is_empty()) {
            warn!("The MatrixBrancher was not provided with any variables");
        }

        MatrixBrancher {
            rows,
            pivot_score,
            tie_break_score,
            value_selector,
        }
    }

    /// The rank of the row; `None` if every variable in it is fixed.
    fn rank_row(&self, context: &SelectionContext, row: &[DomainId]) -> Option<(i64, i64)> {
        let (&pivot, others) = row.split_first()?;

        let mut unfixed_others = others
            .iter()
            .copied()
            .filter(|&variable| !context.is_integer_fixed(variable))
            .peekable();

        if context.is_integer_fixed(pivot) && unfixed_others.peek().is_none() {
            return None;
        }

        let pivot_rank = self.pivot_score.rank(context, pivot);
        let tie_break_rank = unfixed_others
            .map(|variable| self.tie_break_score.rank(context, variable))
            .max()
            .unwrap_or(i64::MIN);

        Some((pivot_rank, tie_break_rank))
    }
}

impl<PivotScore, TieBreakScore, ValueSelect> Brancher
    for MatrixBrancher<PivotScore, TieBreakScore, ValueSelect>
where
    PivotScore: VariableScore,
    TieBreakScore: VariableScore,
    ValueSelect: ValueSelector<DomainId>,
{
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate> {
        // `min_by_key` keeps the first of several minima, so the earliest best row wins.
        let (selected_row, _) = self
            .rows
            .iter()
            .filter_map(|row| self.rank_row(context, row).map(|rank| (row, rank)))
            .min_by_key(|&(_, rank)| Reverse(rank))?;

        let variable = selected_row
            .iter()
            .copied()
            .find(|&variable| !context.is_integer_fixed(variable))?;

        Some(self.value_selector.select_value(context, variable))
    }
}
