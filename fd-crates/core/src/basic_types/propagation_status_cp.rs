/// The result of invoking a propagator. The propagation can either succeed or identify a
/// conflict.
pub type PropagationStatusCP = Result<(), Inconsistency>;

/// Reason a propagator gave up on the current node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// A domain ran out of values while it was being narrowed.
    EmptyDomain,
    /// The propagator detected that its constraint cannot be satisfied any more.
    Conflict,
}

/// Returned when a domain update would leave the domain without values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDomain;

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}
