//! A [`Brancher`] built from one [`VariableSelector`] and one [`ValueSelector`].

use std::marker::PhantomData;

use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::predicates::predicate::Predicate;

/// Asks the variable selector for a variable and the value selector for how to split it.
#[derive(Debug)]
pub struct IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect> {
    variable_selector: VariableSelect,
    value_selector: ValueSelect,
    variable_type: PhantomData<Var>,
}

impl<Var, VariableSelect, ValueSelect>
    IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    pub fn new(variable_selector: VariableSelect, value_selector: ValueSelect) -> Self {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
            variable_type: PhantomData,
        }
    }
}

impl<Var, VariableSelect, ValueSelect> Brancher
    for IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate> {
        let variable = self.variable_selector.select_variable(context)?;
        Some(self.value_selector.select_value(context, variable))
    }
}
