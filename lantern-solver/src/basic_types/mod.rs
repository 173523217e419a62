mod constraint_operation_error;
mod propagation_status_cp;
mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub use propagation_status_cp::Inconsistency;
pub(crate) use propagation_status_cp::PropagationStatusCP;
pub use propagation_status_cp::PropagatorConflict;
pub(crate) use trail::Trail;
