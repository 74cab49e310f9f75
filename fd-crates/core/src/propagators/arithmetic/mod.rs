pub(crate) mod binary_equals;
pub(crate) mod binary_not_equals;
pub(crate) mod linear_less_or_equal;

pub(crate) use binary_equals::*;
pub(crate) use binary_not_equals::*;
pub(crate) use linear_less_or_equal::*;
