use super::PropagationContext;
use super::PropagationContextMut;
use super::PropagatorInitialisationContext;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;

/// The filtering algorithm of one constraint.
///
/// The engine calls [`Propagator::initialise_at_root`] once when the propagator is added and
/// [`Propagator::propagate`] whenever one of its registered variables changes.
pub(crate) trait Propagator {
    /// Used in logs and the debug output of the propagator store.
    fn name(&self) -> &str;

    /// Removes values which cannot be part of a solution.
    ///
    /// Returns [`Inconsistency::EmptyDomain`] when a removal empties a domain and
    /// [`Inconsistency::Conflict`] when the constraint cannot be satisfied anymore. It does not
    /// need to reach a fixed point; the engine calls it again while it keeps making changes.
    fn propagate(&mut self, context: PropagationContextMut<'_>) -> PropagationStatusCP;

    /// Propagators with a lower value run first.
    fn priority(&self) -> u32 {
        3
    }

    /// Registers the variables to watch. An error means the constraint is infeasible at the root.
    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), Inconsistency>;

    /// Reports whether the constraint is already violated without changing any domain.
    ///
    /// Only reification relies on this; [`Propagator::propagate`] still has to detect
    /// conflicts itself.
    fn detect_inconsistency(&self, _context: PropagationContext<'_>) -> Option<Inconsistency> {
        None
    }
}
