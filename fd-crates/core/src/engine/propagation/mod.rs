//! Contains the main building blocks for propagators.
//!
//! A propagator takes as input a set of variables (<code>x<sub>i</sub> &isin; X</code>) and for
//! each variable a corresponding domain (<code>D<sub>i</sub> &isin; D</code>); it then removes
//! values from the domains which cannot be part of a solution of its constraint. Propagation
//! continues until no propagator can make further changes, after which the search makes a
//! decision.
//!
//! Changes are communicated through the [`PropagationContextMut`]. The engine keeps track of the
//! variables a propagator registered for (see [`PropagatorInitialisationContext::register`]) and
//! enqueues it whenever one of their domains changes.
pub(crate) mod contexts;
mod propagator;
mod propagator_queue;
mod store;

pub(crate) use contexts::*;
pub(crate) use propagator::Propagator;
pub(crate) use propagator_queue::PropagatorQueue;
pub(crate) use store::PropagatorId;
pub(crate) use store::PropagatorStore;
