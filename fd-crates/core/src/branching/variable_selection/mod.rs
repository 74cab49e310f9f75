mod first_fail;
mod variable_selector;

pub use first_fail::*;
pub use variable_selector::VariableSelector;
