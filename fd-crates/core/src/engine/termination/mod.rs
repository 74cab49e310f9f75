//! Stopping criteria for a search, polled once per search step.

pub(crate) mod combinator;
pub(crate) mod decision_budget;
pub(crate) mod indefinite;
pub(crate) mod time_budget;

/// Decides when a search gives up before it has reached a conclusion.
pub trait TerminationCondition {
    fn should_stop(&mut self) -> bool;

    /// Called by the engine after every decision it makes.
    fn decision_has_been_made(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        self.as_mut().is_some_and(TerminationCondition::should_stop)
    }

    fn decision_has_been_made(&mut self) {
        if let Some(t) = self {
            t.decision_has_been_made()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn decision_has_been_made(&mut self) {
        (**self).decision_has_been_made()
    }
}

#[cfg(test)]
mod tests {
    use super::decision_budget::DecisionBudget;
    use super::*;

    #[test]
    fn absent_condition_never_stops() {
        let mut termination: Option<DecisionBudget> = None;
        termination.decision_has_been_made();

        assert!(!termination.should_stop());
    }

    #[test]
    fn present_condition_is_forwarded() {
        let mut termination = Some(DecisionBudget::new(1));
        assert!(!termination.should_stop());

        termination.decision_has_been_made();
        assert!(termination.should_stop());
    }
}
