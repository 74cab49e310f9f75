use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::variables::IntegerVariable;
use crate::predicate;

/// Tries the smallest value first: decides `[x <= lb(x)]`, which is refuted by
/// `[x >= lb(x) + 1]`.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMin;

impl<Var: IntegerVariable + Copy> ValueSelector<Var> for InDomainMin {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> Predicate {
        predicate!(decision_variable <= context.lower_bound(decision_variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_decision_fixes_the_lower_bound() {
        let assignments = SelectionContext::create_for_testing(vec![(3, 10)]);
        let mut context = SelectionContext::new(&assignments);
        let domain_id = context.get_domains().next().expect("one domain was created");

        let decision = InDomainMin.select_value(&mut context, domain_id);

        assert_eq!(predicate!(domain_id <= 3), decision);
        assert_eq!(predicate!(domain_id >= 4), !decision);
    }
}
