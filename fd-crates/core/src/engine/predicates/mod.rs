pub(crate) mod predicate;
pub(crate) mod predicate_constructor;
