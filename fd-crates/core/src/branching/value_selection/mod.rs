mod in_domain_min;
mod value_selector;

pub use in_domain_min::*;
pub use value_selector::ValueSelector;
