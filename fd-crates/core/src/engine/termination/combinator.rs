use super::TerminationCondition;

/// Stops as soon as either of its two conditions stops.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<T1, T2> {
    first: T1,
    second: T2,
}

impl<T1, T2> Combinator<T1, T2> {
    pub fn new(first: T1, second: T2) -> Self {
        Combinator { first, second }
    }
}

impl<T1: TerminationCondition, T2: TerminationCondition> TerminationCondition
    for Combinator<T1, T2>
{
    fn should_stop(&mut self) -> bool {
        self.first.should_stop() || self.second.should_stop()
    }

    fn decision_has_been_made(&mut self) {
        self.first.decision_has_been_made();
        self.second.decision_has_been_made();
    }
}
