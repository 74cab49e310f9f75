mod constraint_operation_error;
mod propagation_status_cp;
mod solution;
mod trail;

pub use constraint_operation_error::*;
pub use propagation_status_cp::*;
pub use solution::*;
pub(crate) use trail::*;
