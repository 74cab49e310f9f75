//! Contains the propagators behind the constraints of [`crate::constraints`].
pub(crate) mod arithmetic;
pub(crate) mod count;
pub(crate) mod member;
pub(crate) mod reified_propagator;

pub(crate) use arithmetic::*;
pub(crate) use count::*;
pub(crate) use member::*;
pub(crate) use reified_propagator::*;
