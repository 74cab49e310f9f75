use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// Selects the unfixed variable with the fewest values left, preferring the earliest variable
/// on ties.
#[derive(Debug, Clone)]
pub struct FirstFail {
    variables: Vec<DomainId>,
}

impl FirstFail {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("FirstFail was created without any variables");
        }
        FirstFail {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector<DomainId> for FirstFail {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        // `min_by_key` keeps the first of several minima.
        self.variables
            .iter()
            .copied()
            .filter(|&variable| !context.is_integer_fixed(variable))
            .min_by_key(|&variable| context.get_size_of_domain(variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;

    #[test]
    fn the_smallest_domain_is_selected() {
        let assignments = SelectionContext::create_for_testing(vec![(0, 10), (5, 7)]);
        let mut context = SelectionContext::new(&assignments);
        let variables = context.get_domains().collect::<Vec<_>>();

        let mut strategy = FirstFail::new(&variables);

        assert_eq!(Some(variables[1]), strategy.select_variable(&mut context));
    }

    #[test]
    fn holes_shrink_the_domain_size() {
        let mut assignments = SelectionContext::create_for_testing(vec![(0, 3), (0, 4)]);
        let variables = assignments.get_domains().collect::<Vec<_>>();
        let _ = assignments.post_predicate(predicate!(variables[1] != 1));
        let _ = assignments.post_predicate(predicate!(variables[1] != 2));

        let mut context = SelectionContext::new(&assignments);
        let mut strategy = FirstFail::new(&variables);

        assert_eq!(Some(variables[1]), strategy.select_variable(&mut context));
    }

    #[test]
    fn ties_go_to_the_earliest_variable() {
        let assignments = SelectionContext::create_for_testing(vec![(0, 9), (0, 4), (5, 9)]);
        let mut context = SelectionContext::new(&assignments);
        let variables = context.get_domains().collect::<Vec<_>>();

        let mut strategy = FirstFail::new(&variables);

        assert_eq!(Some(variables[1]), strategy.select_variable(&mut context));
    }

    #[test]
    fn domains_spanning_the_non_negative_integers_are_compared() {
        let assignments = SelectionContext::create_for_testing(vec![(0, i32::MAX), (0, 3)]);
        let mut context = SelectionContext::new(&assignments);
        let variables = context.get_domains().collect::<Vec<_>>();

        let mut strategy = FirstFail::new(&variables);

        assert_eq!(Some(variables[1]), strategy.select_variable(&mut context));
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let assignments = SelectionContext::create_for_testing(vec![(10, 10), (20, 20)]);
        let mut context = SelectionContext::new(&assignments);
        let variables = context.get_domains().collect::<Vec<_>>();

        let mut strategy = FirstFail::new(&variables);

        assert!(strategy.select_variable(&mut context).is_none());
    }
}
